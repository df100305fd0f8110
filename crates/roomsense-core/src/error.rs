// ── Core error types ──
//
// User-facing errors from roomsense-core. Consumers never see raw HTTP or
// JSON failures; the `From<roomsense_api::Error>` impl translates them.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach sensor API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Sensor API request timed out")]
    Timeout,

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Sensor API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Whether a later request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout => true,
            Self::Api { status, .. } => status.is_some_and(|s| s >= 500),
            _ => false,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<roomsense_api::Error> for CoreError {
    fn from(err: roomsense_api::Error) -> Self {
        match err {
            roomsense_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            roomsense_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            roomsense_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            roomsense_api::Error::Status { status, body } => CoreError::Api {
                message: if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    format!("HTTP {status}: {body}")
                },
                status: Some(status),
            },
            roomsense_api::Error::Deserialization { message, body: _ } => {
                CoreError::MalformedResponse { message }
            }
            roomsense_api::Error::MissingResult { endpoint } => CoreError::MalformedResponse {
                message: format!("no `result` field in /{endpoint} response"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_to_api_with_status() {
        let err: CoreError = roomsense_api::Error::Status {
            status: 502,
            body: "bad gateway".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Api { status: Some(502), .. }));
        assert!(err.is_transient());
        assert_eq!(err.to_string(), "Sensor API error: HTTP 502: bad gateway");
    }

    #[test]
    fn missing_result_is_malformed() {
        let err: CoreError = roomsense_api::Error::MissingResult { endpoint: "devices" }.into();
        assert!(matches!(err, CoreError::MalformedResponse { .. }));
        assert!(!err.is_transient());
        assert!(err.to_string().contains("/devices"));
    }
}
