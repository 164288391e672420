//! Comments attached to challenges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ChallengeId, CommentId};

/// A comment posted on a challenge page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment ID (ULID for time-ordering).
    pub id: CommentId,

    /// The challenge being commented on.
    pub challenge_id: ChallengeId,

    /// Comment body.
    pub content: String,

    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment with a fresh ID and timestamp.
    #[must_use]
    pub fn new(challenge_id: ChallengeId, content: String) -> Self {
        Self {
            id: CommentId::generate(),
            challenge_id,
            content,
            created_at: Utc::now(),
        }
    }
}
