//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Primary challenge records, keyed by `challenge_id` (UUID).
    pub const CHALLENGES: &str = "challenges";

    /// Index: challenges by creation time, keyed by
    /// `created_at_millis (8 bytes BE) || challenge_id`. Value is empty.
    pub const CHALLENGES_BY_TIME: &str = "challenges_by_time";

    /// Donation ledger records, keyed by `donation_id` (ULID).
    pub const DONATIONS: &str = "donations";

    /// Index: donations by challenge, keyed by
    /// `challenge_id || donation_id`. Value is empty (index only).
    pub const DONATIONS_BY_CHALLENGE: &str = "donations_by_challenge";

    /// Comment records, keyed by `comment_id` (ULID).
    pub const COMMENTS: &str = "comments";

    /// Index: comments by challenge, keyed by
    /// `challenge_id || comment_id`. Value is empty.
    pub const COMMENTS_BY_CHALLENGE: &str = "comments_by_challenge";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::CHALLENGES,
        cf::CHALLENGES_BY_TIME,
        cf::DONATIONS,
        cf::DONATIONS_BY_CHALLENGE,
        cf::COMMENTS,
        cf::COMMENTS_BY_CHALLENGE,
    ]
}
