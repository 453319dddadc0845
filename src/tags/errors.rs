/// Errors from the tag command layer.
use thiserror::Error;

use crate::rest::RestError;

/// Errors that can occur while looking up and printing tags.
#[derive(Debug, Error)]
pub enum TagError {
    /// Wrong number of positional arguments for the selected mode.
    #[error("{message}")]
    Usage {
        /// What was expected.
        message: String,
    },

    /// Failure reported by the tagging service or its transport, unchanged.
    #[error(transparent)]
    Rest(#[from] RestError),

    /// Writing the rendered output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Serializing tags for a JSON format failed.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Exit code mapping for `TagError` variants.
impl TagError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage { .. } => 2,
            Self::Rest(RestError::NotFound { .. }) => 4,
            Self::Rest(_) | Self::Output(_) | Self::Serialize(_) => 1,
        }
    }

    /// Machine-readable code for the JSON error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usage { .. } => "usage",
            Self::Rest(rest) => match rest {
                RestError::NotFound { .. } => "not_found",
                RestError::Service { .. } => "service_error",
                RestError::Http(_) => "transport_error",
                RestError::MissingUrl | RestError::InvalidUrl(_) => "invalid_url",
                RestError::Session(_) => "session_error",
            },
            Self::Output(_) | Self::Serialize(_) => "output_error",
        }
    }
}
