//! Idoit Client SDK.
//!
//! This crate provides a client library for services to interact with the
//! Idoit API.
//!
//! # Example
//!
//! ```no_run
//! use idoit_client::IdoitClient;
//!
//! # async fn example() -> Result<(), idoit_client::ClientError> {
//! let client = IdoitClient::new("http://idoit.challenges.svc:8080");
//!
//! // Pledge 500 to a challenge
//! let result = client
//!     .submit_support("7aa1cd7f-55a9-4b7e-a92a-3be6c5d64cbd", 500)
//!     .await?;
//!
//! println!(
//!     "Raised {} ({}%)",
//!     result.raised_amount, result.progress_percent
//! );
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, IdoitClient};
pub use error::ClientError;
pub use types::*;
