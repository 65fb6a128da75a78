//! Validation request and response types.

use serde::{Deserialize, Serialize};

use ddvalidator::ValidationReport;

/// Query parameters for `GET /validate`.
///
/// `url` is the service root (or its `$metadata` document). When `version`
/// is absent the node's current version is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidateQuery {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Response body for a completed validation.
///
/// A schema that breaks the rule set is still a `200`; `valid` is `false`
/// and `diagnostics` lists every problem.
///
/// ```json
/// {
///   "url": "https://example.org/odata/$metadata",
///   "version": "v3",
///   "valid": false,
///   "diagnostics": [
///     "Required property Id not found in entity DigitaleDelta.Observation."
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationResponse {
    /// The metadata document that was validated.
    pub url: String,

    /// The rule set version it was validated against.
    pub version: String,

    /// `true` exactly when `diagnostics` is empty.
    pub valid: bool,

    pub diagnostics: Vec<String>,
}

impl ValidationResponse {
    pub fn from_report(
        url: impl Into<String>,
        version: impl Into<String>,
        report: &ValidationReport,
    ) -> Self {
        Self {
            url: url.into(),
            version: version.into(),
            valid: report.is_valid(),
            diagnostics: report.messages(),
        }
    }
}
