// Sensor API response types
//
// Every endpoint wraps its payload in `{ "result": ... }`. Sample and device
// objects keep undocumented fields in `extra` so they survive a pass through
// the transformers untouched.

use serde::{Deserialize, Deserializer, Serialize};

// ── Response Envelope ────────────────────────────────────────────────

/// Standard sensor API response envelope.
///
/// ```json
/// { "result": [...] }
/// ```
///
/// `result` is optional here so a body without it can be reported as
/// [`Error::MissingResult`](crate::Error::MissingResult) instead of a
/// generic parse failure.
#[derive(Debug, Deserialize)]
pub struct ResultEnvelope<T> {
    pub result: Option<T>,
}

// ── Samples ──────────────────────────────────────────────────────────

/// Timestamp of a sample, kept in whatever form the API sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SampleTime {
    /// Epoch milliseconds.
    Millis(i64),
    /// ISO-8601 / RFC 3339 text (usually `2020-01-01T00:00:00Z`).
    Text(String),
}

impl From<&str> for SampleTime {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<i64> for SampleTime {
    fn from(ms: i64) -> Self {
        Self::Millis(ms)
    }
}

/// One raw reading from a series endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: SampleTime,
    pub value: f64,
    /// Catch-all for extra fields the API attaches to a reading.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Sample {
    pub fn new(time: impl Into<SampleTime>, value: f64) -> Self {
        Self {
            time: time.into(),
            value,
            extra: serde_json::Map::new(),
        }
    }
}

// ── Devices ──────────────────────────────────────────────────────────

/// A device as listed by `GET /devices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub id: String,
    /// Room the device is installed in. Missing or `null` becomes `""`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub room: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DeviceDescriptor {
    pub fn new(id: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            room: room.into(),
            name: None,
            device_type: None,
            extra: serde_json::Map::new(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
