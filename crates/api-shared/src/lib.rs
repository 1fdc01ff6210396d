//! # API Shared
//!
//! Shared definitions for the medpredict HTTP APIs.
//!
//! Contains:
//! - JSON request/response types with OpenAPI schemas (`types` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and by anything else that speaks the prediction API.

pub mod health;
pub mod types;

pub use health::HealthService;
pub use types::*;
