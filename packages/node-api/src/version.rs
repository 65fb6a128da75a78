//! Rule set version listing types.

use serde::{Deserialize, Serialize};

/// Response body for `GET /currentversion`.
///
/// ```json
/// { "current_version": "v3" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentVersionResponse {
    /// The version `/validate` uses when the request names none.
    pub current_version: String,
}

/// Response body for `GET /versions`.
///
/// ```json
/// { "versions": ["v2", "v3"] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionsResponse {
    /// Every available rule set version, sorted.
    pub versions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_on_the_wire() {
        let current = CurrentVersionResponse {
            current_version: "v3".into(),
        };
        assert_eq!(
            serde_json::to_string(&current).unwrap(),
            r#"{"current_version":"v3"}"#
        );

        let versions: VersionsResponse =
            serde_json::from_str(r#"{"versions":["v2","v3"]}"#).unwrap();
        assert_eq!(versions.versions, vec!["v2", "v3"]);
    }
}
