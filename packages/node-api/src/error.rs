//! Standard error response body.

use serde::{Deserialize, Serialize};

/// The JSON body returned for all error responses.
///
/// ```json
/// { "error": "Invalid URL", "code": "invalid_url" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Human-readable description of the problem.
    pub error: String,

    /// Machine-readable error code.
    ///
    /// | `code` | HTTP status |
    /// |--------|------------|
    /// | `invalid_url` | 400 |
    /// | `unknown_version` | 400 |
    /// | `source_unavailable` | 400 |
    /// | `unsafe_content` | 400 |
    /// | `schema_error` | 422 |
    /// | `internal_error` | 500 |
    pub code: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a static code and message.
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            error: error.into(),
        }
    }
}

/// Well-known error codes.
pub mod codes {
    pub const INVALID_URL: &str = "invalid_url";
    pub const UNKNOWN_VERSION: &str = "unknown_version";
    pub const SOURCE_UNAVAILABLE: &str = "source_unavailable";
    pub const UNSAFE_CONTENT: &str = "unsafe_content";
    pub const SCHEMA_ERROR: &str = "schema_error";
    pub const INTERNAL_ERROR: &str = "internal_error";
}
