//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{challenges, comments, health, support};
use crate::state::AppState;

// ============================================================================
// Concurrency Limiting Constants
// ============================================================================

/// Maximum concurrent requests for support (donation) endpoints.
/// Donation bursts around a popular challenge are the hottest path.
const SUPPORT_MAX_CONCURRENT_REQUESTS: usize = 100;

/// Maximum concurrent requests for general API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Challenges
/// - `POST /challenges` - Create challenge
/// - `GET /challenges` - List challenges (`?type=popular|fallen|today`)
/// - `GET /challenges/{id}` - Challenge detail
/// - `POST /challenges/{id}/like` - Increment like counter
///
/// ## Support (donations, with their own concurrency limit)
/// - `POST /support` - Submit a donation
/// - `GET /support/total?challengeId=` - Raised total from the ledger
/// - `POST /support/reconcile` - Re-run aggregation + update
///
/// ## Comments
/// - `POST /comments` - Post a comment
/// - `GET /comments?challengeId=` - List a challenge's comments
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    // Build CORS layer
    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    // Donation endpoints absorb burst traffic, so they get a higher
    // concurrency limit but are still protected from overload.
    let support_routes = Router::new()
        .route("/", post(support::submit_support))
        .route("/total", get(support::support_total))
        .route("/reconcile", post(support::reconcile_support))
        .layer(ConcurrencyLimitLayer::new(SUPPORT_MAX_CONCURRENT_REQUESTS));

    let api_routes = Router::new()
        // Challenges
        .route(
            "/challenges",
            get(challenges::list_challenges).post(challenges::create_challenge),
        )
        .route("/challenges/:id", get(challenges::get_challenge))
        .route("/challenges/:id/like", post(challenges::like_challenge))
        // Comments
        .route(
            "/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        // Support routes (with their own concurrency limit)
        .nest("/support", support_routes)
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no rate limit)
        .route("/health", get(health::health))
        .merge(api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
