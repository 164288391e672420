//! Donation aggregation.
//!
//! [`compute`] is the single source of truth for a challenge's raised total
//! and percent progress. It is pure: callers read the full donation ledger
//! and hand it in, so concurrent donors can never produce a lost update the
//! way an increment-in-place scheme would.

use serde::{Deserialize, Serialize};

use crate::Donation;

/// Percent value assigned to goal-less challenges.
///
/// A goal of 0 (or below) means "no fixed goal"; such challenges always read
/// as fully funded. Policy choice carried over from the original service.
pub const FULLY_FUNDED_PERCENT: i64 = 100;

/// Aggregated totals for one challenge's donation ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// Sum of all donation amounts.
    pub raised_amount: i64,

    /// Percent of the goal raised, rounded half-up. Uncapped: over-funded
    /// challenges read above 100; clamping a progress bar is a rendering
    /// concern, not an aggregation one.
    pub progress_percent: i64,
}

/// Compute the raised total and percent progress for a donation ledger.
///
/// Deterministic and side-effect free given the same inputs. An empty ledger
/// sums to 0; a non-positive `goal_amount` pins the percent at
/// [`FULLY_FUNDED_PERCENT`] regardless of the total.
pub fn compute<'a, I>(donations: I, goal_amount: i64) -> ProgressSummary
where
    I: IntoIterator<Item = &'a Donation>,
{
    let raised_amount: i64 = donations.into_iter().map(|d| d.amount).sum();

    ProgressSummary {
        raised_amount,
        progress_percent: percent_of_goal(raised_amount, goal_amount),
    }
}

/// Round-half-up integer percent of `raised` against `goal`.
///
/// `floor((200 * raised + goal) / (2 * goal))` equals
/// `round(raised / goal * 100)` with ties rounding up, for non-negative
/// `raised` and positive `goal`. Widening to i128 keeps the scaled
/// numerator exact for any representable ledger sum.
fn percent_of_goal(raised: i64, goal: i64) -> i64 {
    if goal <= 0 {
        return FULLY_FUNDED_PERCENT;
    }

    let percent = (i128::from(raised) * 200 + i128::from(goal)) / (i128::from(goal) * 2);
    i64::try_from(percent).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChallengeId;

    fn ledger(amounts: &[i64]) -> Vec<Donation> {
        let challenge_id = ChallengeId::generate();
        amounts
            .iter()
            .map(|&amount| Donation::new(challenge_id, amount))
            .collect()
    }

    #[test]
    fn empty_ledger_sums_to_zero() {
        let summary = compute(&ledger(&[]), 100);
        assert_eq!(summary.raised_amount, 0);
        assert_eq!(summary.progress_percent, 0);
    }

    #[test]
    fn raised_amount_is_exact_sum() {
        let summary = compute(&ledger(&[40, 40]), 100);
        assert_eq!(summary.raised_amount, 80);
        assert_eq!(summary.progress_percent, 80);
    }

    #[test]
    fn goalless_challenge_is_fully_funded() {
        assert_eq!(compute(&ledger(&[]), 0).progress_percent, 100);
        assert_eq!(compute(&ledger(&[5]), 0).progress_percent, 100);
        assert_eq!(compute(&ledger(&[5]), 0).raised_amount, 5);
        assert_eq!(compute(&ledger(&[1]), -7).progress_percent, 100);
    }

    #[test]
    fn overfunding_is_uncapped() {
        let summary = compute(&ledger(&[60]), 50);
        assert_eq!(summary.raised_amount, 60);
        assert_eq!(summary.progress_percent, 120);
    }

    #[test]
    fn percent_rounds_half_up() {
        // 12.5% -> 13
        assert_eq!(compute(&ledger(&[1]), 8).progress_percent, 13);
        // 0.5% -> 1
        assert_eq!(compute(&ledger(&[1]), 200).progress_percent, 1);
        // 33.33% -> 33
        assert_eq!(compute(&ledger(&[1]), 3).progress_percent, 33);
        // 66.67% -> 67
        assert_eq!(compute(&ledger(&[2]), 3).progress_percent, 67);
        // 0.49% -> 0
        assert_eq!(compute(&ledger(&[49]), 10_000).progress_percent, 0);
    }

    #[test]
    fn exact_goal_is_one_hundred_percent() {
        let summary = compute(&ledger(&[30, 30, 40]), 100);
        assert_eq!(summary.raised_amount, 100);
        assert_eq!(summary.progress_percent, 100);
    }

    #[test]
    fn order_of_donations_does_not_matter() {
        let forward = compute(&ledger(&[10, 20, 30]), 120);
        let backward = compute(&ledger(&[30, 20, 10]), 120);
        assert_eq!(forward, backward);
    }

    #[test]
    fn large_ledger_does_not_overflow_percent_math() {
        let summary = compute(&ledger(&[i64::MAX / 200 + 1]), 100);
        assert!(summary.progress_percent > 0);
    }

    #[test]
    fn summary_matches_manual_round_for_many_ratios() {
        for goal in 1..=40i64 {
            for raised in 0..=80i64 {
                let scaled = f64::from(u32::try_from(raised).unwrap()) * 100.0
                    / f64::from(u32::try_from(goal).unwrap());
                // f64::round is half-away-from-zero, which matches half-up
                // for non-negative ratios.
                #[allow(clippy::cast_possible_truncation)]
                let expected = scaled.round() as i64;
                let summary = compute(&ledger(&[raised]), goal);
                assert_eq!(
                    summary.progress_percent, expected,
                    "raised={raised} goal={goal}"
                );
            }
        }
    }
}
