//! Idoit HTTP API Service.
//!
//! This crate provides the HTTP API for the Idoit challenge platform,
//! including:
//!
//! - Challenge creation and listings (all / popular / fallen / today)
//! - Donation (support) submission, totals, and reconciliation
//! - Likes and comments
//!
//! # Donation flow
//!
//! Donation submissions run through [`intake::DonationIntake`]: validate,
//! append to the ledger, recompute the aggregate over the full ledger, and
//! persist the totals onto the challenge. Handlers are stateless; concurrent
//! submissions stay correct because the ledger is append-only and totals are
//! always recomputed from a full read, never incremented in place.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers need async for routing consistency

pub mod config;
pub mod error;
pub mod handlers;
pub mod intake;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use intake::{DonationIntake, SubmitOutcome};
pub use routes::create_router;
pub use state::AppState;
