//! Comment handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use idoit_core::{ChallengeId, Comment};
use idoit_store::Store;

use crate::error::ApiError;
use crate::state::AppState;

/// Comment creation request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    /// Challenge being commented on.
    pub challenge_id: String,
    /// Comment body.
    pub content: String,
}

/// A comment as returned to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    /// Comment ID.
    pub id: String,
    /// Challenge the comment belongs to.
    pub challenge_id: String,
    /// Comment body.
    pub content: String,
    /// Timestamp.
    pub created_at: String,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            challenge_id: comment.challenge_id.to_string(),
            content: comment.content.clone(),
            created_at: comment.created_at.to_rfc3339(),
        }
    }
}

/// Post a comment on a challenge.
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let challenge_id: ChallengeId = body
        .challenge_id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid challenge ID".into()))?;

    let content = body.content.trim();
    if content.is_empty() {
        return Err(ApiError::BadRequest("Comment content is required".into()));
    }

    // The comment must attach to an existing challenge.
    state
        .store
        .get_challenge(&challenge_id)?
        .ok_or_else(|| ApiError::NotFound("Challenge not found".into()))?;

    let comment = Comment::new(challenge_id, content.to_string());
    state.store.put_comment(&comment)?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(&comment))))
}

/// Comment listing query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommentsQuery {
    /// Challenge to list comments for.
    pub challenge_id: String,
}

/// List a challenge's comments, oldest first.
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListCommentsQuery>,
) -> Result<Json<Vec<CommentResponse>>, ApiError> {
    let challenge_id: ChallengeId = query
        .challenge_id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid challenge ID".into()))?;

    let comments = state.store.list_comments_by_challenge(&challenge_id)?;

    Ok(Json(comments.iter().map(CommentResponse::from).collect()))
}
