// Sensor API HTTP client
//
// Wraps `reqwest::Client` with URL construction and `{ result }` envelope
// unwrapping. The per-endpoint fetchers live in `sensors.rs` as inherent
// methods so this module stays focused on transport mechanics.

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::ResultEnvelope;
use crate::transport::TransportConfig;

/// Raw HTTP client for the sensor REST API.
///
/// All fetchers return the unwrapped `result` payload; the envelope is
/// stripped before the caller sees it. Cloning is cheap (the inner
/// `reqwest::Client` is reference counted).
#[derive(Debug, Clone)]
pub struct SensorClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SensorClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the API root, e.g.
    /// `https://fedex-sensor-api.staging.agiledigital.co`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{endpoint}?{query}` with URL-encoded query values.
    pub(crate) fn endpoint_url(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Url, Error> {
        let full = format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), endpoint);
        let mut url = Url::parse(&full)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the `{ result }` envelope.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &[(&str, &str)],
    ) -> Result<T, Error> {
        let url = self.endpoint_url(endpoint, query)?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_envelope(endpoint, resp).await
    }

    /// Parse the `{ result }` envelope, returning `result` on success.
    async fn parse_envelope<T: DeserializeOwned>(
        endpoint: &'static str,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ResultEnvelope<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        envelope.result.ok_or(Error::MissingResult { endpoint })
    }
}
