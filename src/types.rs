/// Shared serializable output types.
///
/// Tags themselves are serialized straight from `crate::tags::Tag`; this module
/// holds the envelope written to stderr when a command fails.
use serde::{Deserialize, Serialize};

use crate::tags::TagError;

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (`snake_case`).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Command usage text, for usage errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
}

impl ErrorOutput {
    /// Construct from a `TagError`, attaching `usage` only to usage errors.
    #[must_use]
    pub fn from_tag_error(err: &TagError, usage: Option<String>) -> Self {
        let usage = match err {
            TagError::Usage { .. } => usage,
            _ => None,
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
                usage,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::RestError;

    #[test]
    fn test_usage_attached_only_to_usage_errors() {
        let usage = TagError::Usage {
            message: "expected exactly 1 argument (TAGID), got 0".to_owned(),
        };
        let out = ErrorOutput::from_tag_error(&usage, Some("Usage: tagctl info".to_owned()));
        assert_eq!(out.error.code, "usage");
        assert!(out.error.usage.is_some());

        let service = TagError::from(RestError::Session("no username configured".to_owned()));
        let out = ErrorOutput::from_tag_error(&service, Some("Usage: tagctl info".to_owned()));
        assert_eq!(out.error.code, "session_error");
        assert!(out.error.usage.is_none());
        let json = serde_json::to_string(&out).unwrap();
        assert!(!json.contains("usage"));
    }
}
