//! Request and response types for the metadata validation service.
//!
//! This crate encodes the HTTP API contract of `ddvalidator-node` as Rust
//! types, so the service, its tests and any client agree on the wire format.
//!
//! # Endpoints covered
//!
//! | Method | Path | Type |
//! |--------|------|------|
//! | GET | `/currentversion` | → [`CurrentVersionResponse`] |
//! | GET | `/versions` | → [`VersionsResponse`] |
//! | GET | `/validate` | [`ValidateQuery`] → [`ValidationResponse`] |
//!
//! Every error response carries an [`ErrorResponse`] body.

pub mod error;
pub mod validation;
pub mod version;

pub use error::ErrorResponse;
pub use validation::{ValidateQuery, ValidationResponse};
pub use version::{CurrentVersionResponse, VersionsResponse};
