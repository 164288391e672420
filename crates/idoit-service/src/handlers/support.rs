//! Donation (support) handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use idoit_core::{ChallengeId, Donation};

use crate::error::ApiError;
use crate::intake::DonationIntake;
use crate::state::AppState;

/// Donation submission request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportRequest {
    /// Challenge to support.
    pub challenge_id: String,
    /// Pledged amount. Accepted as a JSON number or a numeric string.
    pub amount: serde_json::Value,
}

/// A donation as returned to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationResponse {
    /// Donation ID.
    pub id: String,
    /// Challenge the pledge supports.
    pub challenge_id: String,
    /// Pledged amount.
    pub amount: i64,
    /// Timestamp.
    pub created_at: String,
}

impl From<&Donation> for DonationResponse {
    fn from(donation: &Donation) -> Self {
        Self {
            id: donation.id.to_string(),
            challenge_id: donation.challenge_id.to_string(),
            amount: donation.amount,
            created_at: donation.created_at.to_rfc3339(),
        }
    }
}

/// Donation submission response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportResponse {
    /// Whether the donation was recorded.
    pub success: bool,
    /// The recorded donation.
    pub donation: DonationResponse,
    /// Total raised across the full ledger.
    pub raised_amount: i64,
    /// Percent progress towards the goal (uncapped).
    pub progress_percent: i64,
    /// True when the recorded donation is not yet reflected in the cached
    /// challenge totals. The pledge itself succeeded either way.
    pub totals_stale: bool,
}

/// Submit a donation.
pub async fn submit_support(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SupportRequest>,
) -> Result<Json<SupportResponse>, ApiError> {
    let challenge_id = parse_challenge_id(&body.challenge_id)?;

    let amount = parse_amount(&body.amount)
        .ok_or_else(|| ApiError::BadRequest("Invalid support amount".into()))?;

    let intake = DonationIntake::new(state.store.as_ref());
    let outcome = intake.submit(challenge_id, amount)?;

    Ok(Json(SupportResponse {
        success: true,
        donation: DonationResponse::from(&outcome.donation),
        raised_amount: outcome.raised_amount,
        progress_percent: outcome.progress_percent,
        totals_stale: outcome.totals_stale,
    }))
}

/// Support total query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalQuery {
    /// Challenge to sum donations for.
    pub challenge_id: String,
}

/// Support total response.
#[derive(Debug, Serialize)]
pub struct TotalResponse {
    /// Sum of all donations for the challenge.
    pub total: i64,
}

/// Read the raised total for a challenge straight from the ledger.
///
/// A challenge with no donations (including one that doesn't exist) has a
/// total of 0. This path never writes.
pub async fn support_total(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TotalQuery>,
) -> Result<Json<TotalResponse>, ApiError> {
    let challenge_id = parse_challenge_id(&query.challenge_id)?;

    let intake = DonationIntake::new(state.store.as_ref());
    let total = intake.total(&challenge_id)?;

    Ok(Json(TotalResponse { total }))
}

/// Reconciliation request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileRequest {
    /// Challenge whose cached totals should be recomputed.
    pub challenge_id: String,
}

/// Reconciliation response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileResponse {
    /// Whether the pass completed.
    pub success: bool,
    /// Total raised across the full ledger.
    pub raised_amount: i64,
    /// Percent progress towards the goal (uncapped).
    pub progress_percent: i64,
}

/// Re-run aggregation and update for one challenge.
///
/// Recovery path for a submission that failed after its donation was
/// recorded; never resubmit the donation itself, that double-counts.
pub async fn reconcile_support(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ReconcileRequest>,
) -> Result<Json<ReconcileResponse>, ApiError> {
    let challenge_id = parse_challenge_id(&body.challenge_id)?;

    let intake = DonationIntake::new(state.store.as_ref());
    let summary = intake.reconcile(&challenge_id)?;

    tracing::info!(
        challenge_id = %challenge_id,
        raised_amount = %summary.raised_amount,
        "Reconciliation pass completed"
    );

    Ok(Json(ReconcileResponse {
        success: true,
        raised_amount: summary.raised_amount,
        progress_percent: summary.progress_percent,
    }))
}

fn parse_challenge_id(raw: &str) -> Result<ChallengeId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid challenge ID".into()))
}

/// Parse a raw amount value from a request body.
///
/// Clients send amounts either as JSON numbers or as numeric strings;
/// both are accepted. Anything non-integral is rejected.
fn parse_amount(raw: &serde_json::Value) -> Option<i64> {
    match raw {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
