//! `RocksDB` storage layer for Idoit.
//!
//! This crate provides persistent storage for challenges, the append-only
//! donation ledger, and comments, using `RocksDB` with column families for
//! efficient indexing.
//!
//! # Architecture
//!
//! The storage uses the following column families:
//!
//! - `challenges`: Primary challenge records, keyed by `challenge_id`
//! - `challenges_by_time`: Index for listing challenges newest first
//! - `donations`: Donation ledger records, keyed by `donation_id` (ULID)
//! - `donations_by_challenge`: Index for listing a challenge's ledger in
//!   `created_at`-ascending order
//! - `comments`: Comment records, keyed by `comment_id` (ULID)
//! - `comments_by_challenge`: Index for listing a challenge's comments
//!
//! # Example
//!
//! ```no_run
//! use idoit_store::{RocksStore, Store};
//! use idoit_core::{Challenge, Donation};
//!
//! let store = RocksStore::open("/tmp/idoit-db").unwrap();
//!
//! let challenge = Challenge::new("Jae".into(), "jae@example.com".into(), "Run!".into());
//! store.put_challenge(&challenge).unwrap();
//!
//! store.append_donation(&Donation::new(challenge.id, 500)).unwrap();
//! let ledger = store.list_donations_by_challenge(&challenge.id).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use idoit_core::{Challenge, ChallengeId, Comment, Donation, DonationId};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations (e.g., `RocksDB`, in-memory for testing). It is the
/// injected dependency of the donation intake service; there is no
/// process-global store handle.
pub trait Store: Send + Sync {
    // =========================================================================
    // Challenge Operations
    // =========================================================================

    /// Insert or update a challenge record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_challenge(&self, challenge: &Challenge) -> Result<()>;

    /// Get a challenge by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_challenge(&self, challenge_id: &ChallengeId) -> Result<Option<Challenge>>;

    /// List all challenges, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_challenges(&self) -> Result<Vec<Challenge>>;

    /// Increment a challenge's like counter.
    ///
    /// Returns the new like count.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the challenge doesn't exist.
    fn bump_likes(&self, challenge_id: &ChallengeId) -> Result<i64>;

    /// Persist aggregated totals onto a challenge's denormalized fields.
    ///
    /// Idempotent: re-applying the current `(raised_amount,
    /// progress_percent)` pair performs no write, so retries and duplicate
    /// update triggers never corrupt the figures. A failure here never rolls
    /// back ledger records; the ledger is the source of truth and a later
    /// aggregation pass self-heals these fields.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the challenge doesn't exist.
    fn apply_progress(
        &self,
        challenge_id: &ChallengeId,
        raised_amount: i64,
        progress_percent: i64,
    ) -> Result<()>;

    // =========================================================================
    // Donation Ledger Operations
    // =========================================================================

    /// Append one donation to the ledger.
    ///
    /// The ledger is append-only: records are never mutated or deleted.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidAmount` (and writes nothing) if the
    /// amount is not positive; `StoreError::Database` on write failure.
    fn append_donation(&self, donation: &Donation) -> Result<()>;

    /// Get a donation by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_donation(&self, donation_id: &DonationId) -> Result<Option<Donation>>;

    /// List a challenge's full donation ledger, `created_at` ascending.
    ///
    /// Returns an empty vec, not an error, when the challenge has no
    /// donations. The order is deterministic (ULID index order).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_donations_by_challenge(&self, challenge_id: &ChallengeId) -> Result<Vec<Donation>>;

    // =========================================================================
    // Comment Operations
    // =========================================================================

    /// Insert a comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_comment(&self, comment: &Comment) -> Result<()>;

    /// List a challenge's comments, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_comments_by_challenge(&self, challenge_id: &ChallengeId) -> Result<Vec<Comment>>;
}
