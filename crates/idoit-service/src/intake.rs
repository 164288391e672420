//! Donation intake orchestration.
//!
//! A submission moves through validate → append → aggregate → apply. The
//! append is the commit point: validation failures reject before any write,
//! an append failure aborts the whole submission (nothing recorded, safe to
//! retry), and any failure *after* the append is reported as a soft
//! staleness warning on a successful result — the pledge is durably in the
//! ledger and a later aggregation pass brings the cached totals back in
//! line. Resubmitting after a post-append failure would double-count; the
//! recovery path is [`DonationIntake::reconcile`].

use idoit_core::{progress, ChallengeId, Donation, ProgressSummary};
use idoit_store::{Result, Store, StoreError};

/// Result of a donation submission.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    /// The recorded donation.
    pub donation: Donation,

    /// Total raised across the full ledger.
    pub raised_amount: i64,

    /// Percent progress towards the goal (uncapped).
    pub progress_percent: i64,

    /// True when the donation was recorded but the aggregate/update step
    /// failed, so the displayed totals may momentarily lag the ledger.
    pub totals_stale: bool,
}

/// Orchestrates donation submissions against an injected [`Store`].
///
/// Holds no state of its own; construct one per request.
pub struct DonationIntake<'a, S: Store + ?Sized> {
    store: &'a S,
}

impl<'a, S: Store + ?Sized> DonationIntake<'a, S> {
    /// Create an intake service over the given store.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Submit a donation end-to-end.
    ///
    /// On success the returned totals reflect the full ledger including this
    /// donation, unless `totals_stale` is set, in which case the freshest
    /// figures available are returned and the cached challenge fields may
    /// lag until the next aggregation pass.
    ///
    /// # Errors
    ///
    /// - `StoreError::InvalidAmount` if `amount` is not positive (no write).
    /// - `StoreError::NotFound` if the challenge does not exist (no write).
    /// - `StoreError::Database` if the append itself fails (no donation
    ///   recorded, safe to retry the submission).
    pub fn submit(&self, challenge_id: ChallengeId, amount: i64) -> Result<SubmitOutcome> {
        if amount <= 0 {
            return Err(StoreError::InvalidAmount { amount });
        }

        let challenge =
            self.store
                .get_challenge(&challenge_id)?
                .ok_or_else(|| StoreError::NotFound {
                    entity: "challenge",
                    id: challenge_id.to_string(),
                })?;

        let donation = Donation::new(challenge_id, amount);
        self.store.append_donation(&donation)?;

        tracing::info!(
            challenge_id = %challenge_id,
            donation_id = %donation.id,
            amount = %amount,
            "Donation recorded"
        );

        // Past the commit point. Failures below must not fail the
        // submission: the ledger has the pledge, the cache self-heals.
        let mut totals_stale = false;
        let summary = match self.aggregate_and_apply(&challenge_id, challenge.goal_amount) {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!(
                    challenge_id = %challenge_id,
                    donation_id = %donation.id,
                    error = %err,
                    "Progress update failed after donation was recorded; totals are stale"
                );
                totals_stale = true;
                // Best effort: the cached pre-submission figures.
                ProgressSummary {
                    raised_amount: challenge.raised_amount,
                    progress_percent: challenge.progress_percent,
                }
            }
        };

        Ok(SubmitOutcome {
            donation,
            raised_amount: summary.raised_amount,
            progress_percent: summary.progress_percent,
            totals_stale,
        })
    }

    /// Re-run aggregation and update alone.
    ///
    /// This is the recovery path after a post-append failure (or a
    /// duplicate update trigger): it re-reads the full ledger and reapplies,
    /// never touching the ledger itself.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if the challenge does not exist; storage
    /// errors propagate and the call is safe to retry.
    pub fn reconcile(&self, challenge_id: &ChallengeId) -> Result<ProgressSummary> {
        let challenge =
            self.store
                .get_challenge(challenge_id)?
                .ok_or_else(|| StoreError::NotFound {
                    entity: "challenge",
                    id: challenge_id.to_string(),
                })?;

        self.aggregate_and_apply(challenge_id, challenge.goal_amount)
    }

    /// Read the raised total straight from the ledger, without writing.
    ///
    /// An unknown challenge simply has an empty ledger and totals 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger read fails.
    pub fn total(&self, challenge_id: &ChallengeId) -> Result<i64> {
        let ledger = self.store.list_donations_by_challenge(challenge_id)?;
        // The goal is irrelevant to the raised sum.
        Ok(progress::compute(&ledger, 0).raised_amount)
    }

    /// Recompute totals from the full ledger and persist them.
    fn aggregate_and_apply(
        &self,
        challenge_id: &ChallengeId,
        goal_amount: i64,
    ) -> Result<ProgressSummary> {
        let ledger = self.store.list_donations_by_challenge(challenge_id)?;
        let summary = progress::compute(&ledger, goal_amount);

        self.store
            .apply_progress(challenge_id, summary.raised_amount, summary.progress_percent)?;

        Ok(summary)
    }
}
