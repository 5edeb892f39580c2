//! # SIMRS API
//!
//! HTTPS transport for the SIMRS REST backend.
//!
//! Handles:
//! - Rendering a [`simrs_types::ListQuery`] into the backend's wire form
//! - Decoding the `{ success, message, data }` envelope and the
//!   Laravel-style pagination body into a checked
//!   [`simrs_types::ResourcePage`]
//! - Mapping transport, validation, and server failures onto the client's
//!   error taxonomy
//!
//! **No interaction concerns**: stale-response suppression, invalidation,
//! and auto-refresh belong in `simrs-core`. This crate only speaks HTTP.

#![warn(rust_2018_idioms)]

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;

pub use client::{ApiClient, MutationAck};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, GENERIC_FAILURE_MESSAGE};
