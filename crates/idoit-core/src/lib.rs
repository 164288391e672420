//! Core types and utilities for the Idoit challenge platform.
//!
//! This crate provides the foundational types used throughout Idoit:
//!
//! - **Identifiers**: `ChallengeId`, `DonationId`, `CommentId`
//! - **Challenges**: `Challenge`, `ChallengeStatus`
//! - **Donations**: `Donation` (append-only ledger records)
//! - **Aggregation**: `progress::compute`, `ProgressSummary`
//! - **Comments**: `Comment`
//!
//! # Amounts
//!
//! Donation amounts and goals are integer currency units stored as `i64`.
//! The cached `raised_amount`/`progress_percent` fields on a challenge are
//! always derived from the full donation ledger by [`progress::compute`] —
//! never incremented in place.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod challenge;
pub mod comment;
pub mod donation;
pub mod ids;
pub mod progress;

pub use challenge::{normalize_images, Challenge, ChallengeStatus, CHALLENGE_DURATION_DAYS};
pub use comment::Comment;
pub use donation::Donation;
pub use ids::{ChallengeId, CommentId, DonationId, IdError};
pub use progress::{compute, ProgressSummary, FULLY_FUNDED_PERCENT};
