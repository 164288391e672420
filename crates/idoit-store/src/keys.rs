//! Key encoding utilities for `RocksDB`.
//!
//! This module provides functions for encoding and decoding keys used in
//! column families. Index keys are built so that lexicographic byte order
//! matches the scan order the listing operations need.

use chrono::{DateTime, Utc};

use idoit_core::{ChallengeId, CommentId, DonationId};

/// Create a challenge key from a challenge ID.
#[must_use]
pub fn challenge_key(challenge_id: &ChallengeId) -> Vec<u8> {
    challenge_id.as_bytes().to_vec()
}

/// Create a time-index key for a challenge.
///
/// Format: `created_at_millis (8 bytes BE) || challenge_id (16 bytes)`
///
/// Big-endian millis sort chronologically, so a reverse scan of this index
/// yields challenges newest first. Pre-epoch timestamps clamp to 0.
#[must_use]
pub fn challenge_time_key(created_at: DateTime<Utc>, challenge_id: &ChallengeId) -> Vec<u8> {
    let millis = u64::try_from(created_at.timestamp_millis()).unwrap_or(0);

    let mut key = Vec::with_capacity(24);
    key.extend_from_slice(&millis.to_be_bytes());
    key.extend_from_slice(challenge_id.as_bytes());
    key
}

/// Extract the challenge ID from a time-index key.
///
/// # Panics
///
/// Panics if the key is not at least 24 bytes.
#[must_use]
pub fn extract_challenge_id_from_time_key(key: &[u8]) -> ChallengeId {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[8..24]);
    ChallengeId::from_uuid(uuid::Uuid::from_bytes(bytes))
}

/// Create a donation key from a donation ID.
#[must_use]
pub fn donation_key(donation_id: &DonationId) -> Vec<u8> {
    donation_id.to_bytes().to_vec()
}

/// Create a challenge-donation index key.
///
/// Format: `challenge_id (16 bytes) || donation_id (16 bytes)`
///
/// Since ULIDs are time-ordered, a forward scan under one challenge prefix
/// yields that challenge's donations in `created_at`-ascending order.
#[must_use]
pub fn challenge_donation_key(challenge_id: &ChallengeId, donation_id: &DonationId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(challenge_id.as_bytes());
    key.extend_from_slice(&donation_id.to_bytes());
    key
}

/// Create a prefix for iterating all donations (or comments) of a challenge.
#[must_use]
pub fn challenge_prefix(challenge_id: &ChallengeId) -> Vec<u8> {
    challenge_id.as_bytes().to_vec()
}

/// Extract the donation ID from a challenge-donation index key.
///
/// # Panics
///
/// Panics if the key is not at least 32 bytes.
#[must_use]
pub fn extract_donation_id_from_challenge_key(key: &[u8]) -> DonationId {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[16..32]);
    DonationId::from_bytes(bytes).expect("valid ULID bytes")
}

/// Create a comment key from a comment ID.
#[must_use]
pub fn comment_key(comment_id: &CommentId) -> Vec<u8> {
    comment_id.to_bytes().to_vec()
}

/// Create a challenge-comment index key.
///
/// Format: `challenge_id (16 bytes) || comment_id (16 bytes)`
#[must_use]
pub fn challenge_comment_key(challenge_id: &ChallengeId, comment_id: &CommentId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(challenge_id.as_bytes());
    key.extend_from_slice(&comment_id.to_bytes());
    key
}

/// Extract the comment ID from a challenge-comment index key.
///
/// # Panics
///
/// Panics if the key is not at least 32 bytes.
#[must_use]
pub fn extract_comment_id_from_challenge_key(key: &[u8]) -> CommentId {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[16..32]);
    CommentId::from_bytes(bytes).expect("valid ULID bytes")
}
