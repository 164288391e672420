//! Challenge entity and status lifecycle.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ChallengeId;

/// Number of days a challenge runs for, counted from its submission date.
pub const CHALLENGE_DURATION_DAYS: u64 = 14;

/// A user-submitted public pledge-to-act entity that can receive donations.
///
/// `raised_amount` and `progress_percent` are denormalized caches of the
/// donation ledger and are mutated only by the progress updater; everything
/// else is set at creation or by dedicated endpoints (`likes`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    /// Unique challenge ID, assigned at creation.
    pub id: ChallengeId,

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

    /// Lifecycle status, set externally by admin action.
    pub status: ChallengeStatus,

    /// Funding goal in integer currency units. 0 means "no fixed goal".
    pub goal_amount: i64,

    /// Cached sum of all donations for this challenge.
    pub raised_amount: i64,

    /// Cached percent progress towards the goal. Uncapped; may exceed 100.
    pub progress_percent: i64,

    /// Like counter.
    pub likes: i64,

    /// Image URLs attached at submission time.
    pub images: Vec<String>,

    /// First day of the challenge.
    pub start_date: NaiveDate,

    /// Last day of the challenge.
    pub end_date: NaiveDate,

    /// When the challenge was created.
    pub created_at: DateTime<Utc>,

    /// When the challenge record was last written.
    pub updated_at: DateTime<Utc>,
}

impl Challenge {
    /// Create a new challenge starting today and running for
    /// [`CHALLENGE_DURATION_DAYS`].
    #[must_use]
    pub fn new(name: String, email: String, title: String) -> Self {
        let now = Utc::now();
        let start_date = now.date_naive();
        let end_date = start_date + Days::new(CHALLENGE_DURATION_DAYS);

        Self {
            id: ChallengeId::generate(),
            name,
            email,
            title,
            motivation: String::new(),
            plan: String::new(),
            status: ChallengeStatus::InProgress,
            goal_amount: 0,
            raised_amount: 0,
            progress_percent: 0,
            likes: 0,
            images: Vec::new(),
            start_date,
            end_date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Challenge lifecycle status.
///
/// The wire representation keeps the original display strings
/// (`"In Progress"`, `"Completed"`, `"Fallen"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeStatus {
    /// The challenge is running.
    #[default]
    #[serde(rename = "In Progress")]
    InProgress,

    /// The challenge finished successfully.
    Completed,

    /// The challenge was abandoned or failed.
    Fallen,
}

/// Normalize the `images` field of a challenge submission.
///
/// Clients send images either as a JSON array of URL strings or as a
/// JSON-encoded string containing such an array; both forms are accepted and
/// produce the same `Vec<String>`. Returns `None` for anything else,
/// including an empty array (at least one image is required).
#[must_use]
pub fn normalize_images(raw: &serde_json::Value) -> Option<Vec<String>> {
    let images = match raw {
        serde_json::Value::Array(_) => collect_urls(raw)?,
        serde_json::Value::String(encoded) => {
            let parsed: serde_json::Value = serde_json::from_str(encoded).ok()?;
            collect_urls(&parsed)?
        }
        _ => return None,
    };

    if images.is_empty() {
        return None;
    }

    Some(images)
}

fn collect_urls(value: &serde_json::Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(ToString::to_string))
        .collect()
}
