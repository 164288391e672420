//! Challenge handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use idoit_core::{normalize_images, Challenge, ChallengeId, ChallengeStatus};
use idoit_store::Store;

use crate::error::ApiError;
use crate::state::AppState;

/// Number of challenges returned by the popular listing.
const POPULAR_LIMIT: usize = 3;

/// Challenge creation request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChallengeRequest {
    /// Challenger's display name.
    pub name: String,
    /// Challenger's contact email.
    pub email: String,
    /// Challenge title.
    pub title: String,
    /// Why the challenger is doing this.
    #[serde(default)]
    pub motivation: Option<String>,
    /// How the challenger intends to pull it off.
    #[serde(default)]
    pub plan: Option<String>,
    /// Initial status. Defaults to "In Progress".
    #[serde(default)]
    pub status: Option<ChallengeStatus>,
    /// Funding goal. Defaults to 0 ("no fixed goal").
    #[serde(default)]
    pub goal_amount: Option<i64>,
    /// Image URLs: a JSON array or a JSON-encoded string of one.
    #[serde(default)]
    pub images: serde_json::Value,
}

/// A challenge as returned to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResponse {
    /// Challenge ID.
    pub id: String,
    /// Challenger's display name.
    pub name: String,
    /// Challenger's contact email.
    pub email: String,
    /// Challenge title.
    pub title: String,
    /// Why the challenger is doing this.
    pub motivation: String,
    /// How the challenger intends to pull it off.
    pub plan: String,
    /// Lifecycle status.
    pub status: ChallengeStatus,
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
    /// First day of the challenge (ISO date).
    pub start_date: String,
    /// Last day of the challenge (ISO date).
    pub end_date: String,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<&Challenge> for ChallengeResponse {
    fn from(challenge: &Challenge) -> Self {
        Self {
            id: challenge.id.to_string(),
            name: challenge.name.clone(),
            email: challenge.email.clone(),
            title: challenge.title.clone(),
            motivation: challenge.motivation.clone(),
            plan: challenge.plan.clone(),
            status: challenge.status,
            goal_amount: challenge.goal_amount,
            raised_amount: challenge.raised_amount,
            progress_percent: challenge.progress_percent,
            likes: challenge.likes,
            images: challenge.images.clone(),
            start_date: challenge.start_date.to_string(),
            end_date: challenge.end_date.to_string(),
            created_at: challenge.created_at.to_rfc3339(),
        }
    }
}

/// Create a new challenge.
pub async fn create_challenge(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateChallengeRequest>,
) -> Result<(StatusCode, Json<ChallengeResponse>), ApiError> {
    if body.name.trim().is_empty() || body.email.trim().is_empty() || body.title.trim().is_empty()
    {
        return Err(ApiError::BadRequest(
            "name, email, and title are required".into(),
        ));
    }

    let goal_amount = body.goal_amount.unwrap_or(0);
    if goal_amount < 0 {
        return Err(ApiError::BadRequest("Goal amount cannot be negative".into()));
    }

    let images = normalize_images(&body.images)
        .ok_or_else(|| ApiError::BadRequest("At least one image is required".into()))?;

    let mut challenge = Challenge::new(body.name, body.email, body.title);
    challenge.motivation = body.motivation.unwrap_or_default();
    challenge.plan = body.plan.unwrap_or_default();
    challenge.status = body.status.unwrap_or_default();
    challenge.goal_amount = goal_amount;
    challenge.images = images;

    state.store.put_challenge(&challenge)?;

    tracing::info!(
        challenge_id = %challenge.id,
        title = %challenge.title,
        goal_amount = %goal_amount,
        "Challenge created"
    );

    Ok((StatusCode::CREATED, Json(ChallengeResponse::from(&challenge))))
}

/// Challenge listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListChallengesQuery {
    /// Listing variant: `popular`, `fallen`, or `today`. Omitted means all.
    #[serde(rename = "type")]
    pub list_type: Option<String>,
}

/// List challenges.
///
/// Without a `type` parameter, returns every challenge newest first. The
/// `today` variant returns a single challenge (or `null`) rather than a
/// list, matching the original API shape.
pub async fn list_challenges(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListChallengesQuery>,
) -> Result<Response, ApiError> {
    let challenges = state.store.list_challenges()?;

    match query.list_type.as_deref() {
        None => Ok(Json(to_responses(&challenges)).into_response()),
        Some("popular") => {
            let mut popular = challenges;
            popular.sort_by(|a, b| b.likes.cmp(&a.likes));
            popular.truncate(POPULAR_LIMIT);
            Ok(Json(to_responses(&popular)).into_response())
        }
        Some("fallen") => {
            let fallen: Vec<_> = challenges
                .into_iter()
                .filter(|c| c.status == ChallengeStatus::Fallen)
                .collect();
            Ok(Json(to_responses(&fallen)).into_response())
        }
        Some("today") => {
            let pick = todays_challenge(&challenges);
            Ok(Json(pick.map(ChallengeResponse::from)).into_response())
        }
        Some(other) => Err(ApiError::BadRequest(format!(
            "Unknown challenge listing type: {other}"
        ))),
    }
}

/// Get a single challenge by ID.
pub async fn get_challenge(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ChallengeResponse>, ApiError> {
    let challenge_id: ChallengeId = id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid challenge ID".into()))?;

    let challenge = state
        .store
        .get_challenge(&challenge_id)?
        .ok_or_else(|| ApiError::NotFound("Challenge not found".into()))?;

    Ok(Json(ChallengeResponse::from(&challenge)))
}

/// Like response.
#[derive(Debug, Serialize)]
pub struct LikeResponse {
    /// Whether the like was recorded.
    pub success: bool,
    /// New like count.
    pub likes: i64,
}

/// Increment a challenge's like counter.
pub async fn like_challenge(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LikeResponse>, ApiError> {
    let challenge_id: ChallengeId = id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid challenge ID".into()))?;

    let likes = state.store.bump_likes(&challenge_id)?;

    Ok(Json(LikeResponse {
        success: true,
        likes,
    }))
}

/// Pick today's challenge from the full listing (newest first).
///
/// Among challenges created today (UTC) the pick is seeded by the date, so
/// it stays stable for the whole day instead of changing per request. Falls
/// back to the most recent challenge when nothing was created today.
fn todays_challenge(challenges: &[Challenge]) -> Option<&Challenge> {
    let today = Utc::now().date_naive();

    let candidates: Vec<&Challenge> = challenges
        .iter()
        .filter(|c| c.created_at.date_naive() == today)
        .collect();

    if candidates.is_empty() {
        return challenges.first();
    }

    let seed = usize::try_from(today.num_days_from_ce()).unwrap_or(0);
    Some(candidates[seed % candidates.len()])
}

fn to_responses(challenges: &[Challenge]) -> Vec<ChallengeResponse> {
    challenges.iter().map(ChallengeResponse::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn challenge_created_at(created_at: chrono::DateTime<Utc>) -> Challenge {
        let mut challenge =
            Challenge::new("Jae".into(), "jae@example.com".into(), "Sing on stage".into());
        challenge.created_at = created_at;
        challenge
    }

    #[test]
    fn todays_challenge_prefers_todays_entries() {
        let today = challenge_created_at(Utc::now());
        let last_week = challenge_created_at(Utc::now() - chrono::Duration::days(7));
        let challenges = vec![today.clone(), last_week];

        let pick = todays_challenge(&challenges).unwrap();
        assert_eq!(pick.id, today.id);
    }

    #[test]
    fn todays_challenge_is_stable_within_a_day() {
        let challenges = vec![
            challenge_created_at(Utc::now()),
            challenge_created_at(Utc::now()),
            challenge_created_at(Utc::now()),
        ];

        let first = todays_challenge(&challenges).unwrap().id;
        let second = todays_challenge(&challenges).unwrap().id;
        assert_eq!(first, second);
    }

    #[test]
    fn todays_challenge_falls_back_to_most_recent() {
        let newest = challenge_created_at(Utc::now() - chrono::Duration::days(2));
        let oldest = challenge_created_at(Utc::now() - chrono::Duration::days(9));
        // Listing order is newest first.
        let challenges = vec![newest.clone(), oldest];

        let pick = todays_challenge(&challenges).unwrap();
        assert_eq!(pick.id, newest.id);
    }

    #[test]
    fn todays_challenge_empty_store_is_none() {
        assert!(todays_challenge(&[]).is_none());
    }
}
