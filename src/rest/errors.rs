/// Errors from the tagging REST client layer.
use serde::Deserialize;
use thiserror::Error;

/// Typed errors from the REST layer.
#[derive(Debug, Error)]
pub enum RestError {
    /// The service has no tag with this ID.
    #[error("Tag '{id}' not found")]
    NotFound {
        /// The tag ID that was requested.
        id: String,
    },

    /// The service answered with a non-success status.
    #[error("{message} ({status})")]
    Service {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body, or the status reason.
        message: String,
    },

    /// Connection, TLS, timeout, or body decoding failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// No service URL was given on the command line or in the environment.
    #[error("No service URL configured; set --url or TAGCTL_URL")]
    MissingUrl,

    /// The configured service URL could not be used.
    #[error("Invalid service URL '{0}'")]
    InvalidUrl(String),

    /// Login was rejected or returned no session.
    #[error("Session error: {0}")]
    Session(String),
}

/// Error body shape returned by the vAPI REST endpoints.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    kind: Option<String>,
    value: Option<ErrorValue>,
}

#[derive(Debug, Deserialize)]
struct ErrorValue {
    #[serde(default)]
    messages: Vec<ErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    default_message: String,
}

/// Pull a readable message out of an error response body.
///
/// Falls back to the error `type` and then to `fallback` when the body
/// carries no localizable messages.
#[must_use]
pub fn service_message(body: &str, fallback: &str) -> String {
    let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
        return fallback.to_owned();
    };

    let messages: Vec<String> = parsed
        .value
        .map(|v| v.messages.into_iter().map(|m| m.default_message).collect())
        .unwrap_or_default();

    if !messages.is_empty() {
        return messages.join("; ");
    }

    parsed.kind.map_or_else(
        || fallback.to_owned(),
        |k| k.rsplit('.').next().unwrap_or(&k).to_owned(),
    )
}
