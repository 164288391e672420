//! Wire types for the Idoit API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Donation submission request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportRequest {
    /// Challenge to support.
    pub challenge_id: String,
    /// Pledged amount in integer currency units.
    pub amount: i64,
}

/// A recorded donation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRecord {
    /// Donation ID.
    pub id: String,
    /// Challenge the pledge supports.
    pub challenge_id: String,
    /// Pledged amount.
    pub amount: i64,
    /// When the donation was recorded.
    pub created_at: DateTime<Utc>,
}

/// Donation submission result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportResult {
    /// Whether the donation was recorded.
    pub success: bool,
    /// The recorded donation.
    pub donation: DonationRecord,
    /// Total raised across the full ledger.
    pub raised_amount: i64,
    /// Percent progress towards the goal (uncapped).
    pub progress_percent: i64,
    /// True when displayed totals may momentarily lag the ledger. The
    /// pledge itself was durably recorded either way.
    pub totals_stale: bool,
}

/// Raised-total response.
#[derive(Debug, Clone, Deserialize)]
pub struct TotalResult {
    /// Sum of all donations for the challenge.
    pub total: i64,
}

/// Reconciliation result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileResult {
    /// Whether the pass completed.
    pub success: bool,
    /// Total raised across the full ledger.
    pub raised_amount: i64,
    /// Percent progress towards the goal (uncapped).
    pub progress_percent: i64,
}

/// A challenge as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRecord {
    /// Challenge ID.
    pub id: String,
    /// Challenge title.
    pub title: String,
    /// Lifecycle status string ("In Progress", "Completed", "Fallen").
    pub status: String,
    /// Funding goal.
    pub goal_amount: i64,
    /// Cached raised total.
    pub raised_amount: i64,
    /// Cached percent progress (uncapped).
    pub progress_percent: i64,
    /// Like count.
    pub likes: i64,
    /// Image URLs.
    pub images: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Error response body from the API.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    /// Error details.
    pub error: ApiErrorBody,
}

/// Error payload within an error response.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}
