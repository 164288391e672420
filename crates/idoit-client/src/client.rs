//! Idoit HTTP client implementation.

use reqwest::Client;
use std::time::Duration;

use crate::error::ClientError;
use crate::types::{
    ApiErrorResponse, ChallengeRecord, ReconcileResult, SupportRequest, SupportResult, TotalResult,
};

/// Options for constructing an [`IdoitClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

/// Idoit API client.
///
/// Provides methods for submitting donations and reading challenge totals.
#[derive(Debug, Clone)]
pub struct IdoitClient {
    client: Client,
    base_url: String,
}

impl IdoitClient {
    /// Create a new idoit client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the idoit service (e.g., `"http://idoit:8080"`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new idoit client with custom options.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    #[must_use]
    pub fn with_options(base_url: impl Into<String>, options: ClientOptions) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Submit a donation for a challenge.
    ///
    /// A successful result may still carry `totals_stale = true`; the pledge
    /// was recorded but the displayed totals may lag until the service's
    /// next aggregation pass. Do not resubmit in that case — that would
    /// double-count. Use [`IdoitClient::reconcile`] instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn submit_support(
        &self,
        challenge_id: impl Into<String>,
        amount: i64,
    ) -> Result<SupportResult, ClientError> {
        let url = format!("{}/support", self.base_url);
        let request = SupportRequest {
            challenge_id: challenge_id.into(),
            amount,
        };

        let response = self.client.post(&url).json(&request).send().await?;

        self.handle_response(response).await
    }

    /// Read the raised total for a challenge straight from the ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn support_total(
        &self,
        challenge_id: impl AsRef<str>,
    ) -> Result<TotalResult, ClientError> {
        let url = format!("{}/support/total", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("challengeId", challenge_id.as_ref())])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Re-run aggregation and update for a challenge.
    ///
    /// The recovery path after a submission reported stale totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn reconcile(
        &self,
        challenge_id: impl Into<String>,
    ) -> Result<ReconcileResult, ClientError> {
        let url = format!("{}/support/reconcile", self.base_url);
        let body = serde_json::json!({ "challengeId": challenge_id.into() });

        let response = self.client.post(&url).json(&body).send().await?;

        self.handle_response(response).await
    }

    /// Fetch a single challenge.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_challenge(
        &self,
        challenge_id: impl AsRef<str>,
    ) -> Result<ChallengeRecord, ClientError> {
        let url = format!("{}/challenges/{}", self.base_url, challenge_id.as_ref());

        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => {
                tracing::debug!(
                    code = %api_error.error.code,
                    status = %status,
                    "API returned an error"
                );

                match api_error.error.code.as_str() {
                    "not_found" => Err(ClientError::ChallengeNotFound {
                        message: api_error.error.message,
                    }),
                    "bad_request" => Err(ClientError::InvalidRequest {
                        message: api_error.error.message,
                    }),
                    _ => Err(ClientError::Api {
                        code: api_error.error.code,
                        message: api_error.error.message,
                        status: status.as_u16(),
                    }),
                }
            }
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}
