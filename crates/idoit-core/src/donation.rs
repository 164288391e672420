//! Donation ledger records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ChallengeId, DonationId};

/// A single monetary pledge for one challenge.
///
/// Donations form an append-only ledger: once written they are never mutated
/// or deleted. The cached totals on [`crate::Challenge`] are always derived
/// by re-summing this ledger, never by incrementing in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donation {
    /// Unique donation ID (ULID for time-ordering).
    pub id: DonationId,

    /// The challenge this pledge supports.
    pub challenge_id: ChallengeId,

    /// Pledged amount in integer currency units. Always positive.
    pub amount: i64,

    /// When the donation was recorded.
    pub created_at: DateTime<Utc>,
}

impl Donation {
    /// Create a new donation record with a fresh ID and timestamp.
    ///
    /// Amount validation happens at the store boundary; this constructor
    /// does not reject non-positive amounts so that tests can build
    /// malformed records.
    #[must_use]
    pub fn new(challenge_id: ChallengeId, amount: i64) -> Self {
        Self {
            id: DonationId::generate(),
            challenge_id,
            amount,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn donation_serde_roundtrip() {
        let donation = Donation::new(ChallengeId::generate(), 500);
        let json = serde_json::to_string(&donation).unwrap();
        let parsed: Donation = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, donation.id);
        assert_eq!(parsed.challenge_id, donation.challenge_id);
        assert_eq!(parsed.amount, 500);
    }
}
