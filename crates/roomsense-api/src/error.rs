use thiserror::Error;

/// Top-level error type for the `roomsense-api` crate.
///
/// Covers every way a fetch can fail: transport, HTTP status, and the
/// `{ result }` envelope. `roomsense-core` maps these into user-facing
/// diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── HTTP ────────────────────────────────────────────────────────
    /// The API answered with a non-success status code.
    #[error("HTTP {status} from sensor API")]
    Status { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// The body parsed as JSON but carried no `result` field.
    #[error("Response from /{endpoint} has no `result` field")]
    MissingResult { endpoint: &'static str },
}

impl Error {
    /// Returns `true` for failures a later attempt might not hit.
    ///
    /// Only used for log classification; nothing in this workspace retries.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
