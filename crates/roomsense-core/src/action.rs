//! Inbound request actions and outbound result actions.
//!
//! Both serialize as `{ "type": "...", "payload": { ... } }` so a UI can
//! exchange them as JSON without a translation layer.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::{BusynessMap, DeviceGroups, SeriesMap};

/// Which concurrency policy a request kind is served under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPolicy {
    /// Every request gets its own run, overlapping runs allowed.
    ServeEvery,
    /// A new request abandons any in-flight run of the same kind.
    LatestOnly,
}

/// One end of a query window, forwarded to the API verbatim.
///
/// Accepts either a string or a number on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TimeBound(String);

impl TimeBound {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DateTime<Utc>> for TimeBound {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl<'de> Deserialize<'de> for TimeBound {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(d)? {
            Raw::Text(s) => Self(s),
            Raw::Number(n) => Self(n.to_string()),
        })
    }
}

/// Payload of a series request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceQuery {
    /// Device name for temperature/humidity, device id for motion/busyness.
    #[serde(rename = "deviceName", alias = "deviceId")]
    pub device: String,
    #[serde(default)]
    pub room: String,
    pub from: TimeBound,
    pub to: TimeBound,
}

impl DeviceQuery {
    pub fn new(
        device: impl Into<String>,
        room: impl Into<String>,
        from: impl Into<TimeBound>,
        to: impl Into<TimeBound>,
    ) -> Self {
        Self {
            device: device.into(),
            room: room.into(),
            from: from.into(),
            to: to.into(),
        }
    }
}

impl From<&str> for TimeBound {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A request action consumed from the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Request {
    #[serde(rename = "getTemperatures")]
    Temperatures(DeviceQuery),
    #[serde(rename = "getHumidity")]
    Humidity(DeviceQuery),
    #[serde(rename = "getMotions")]
    Motions(DeviceQuery),
    #[serde(rename = "getBusyness")]
    Busyness(DeviceQuery),
    #[serde(rename = "getDevices")]
    Devices,
}

impl Request {
    /// The wire name of this action.
    pub fn action_type(&self) -> &'static str {
        match self {
            Self::Temperatures(_) => "getTemperatures",
            Self::Humidity(_) => "getHumidity",
            Self::Motions(_) => "getMotions",
            Self::Busyness(_) => "getBusyness",
            Self::Devices => "getDevices",
        }
    }

    /// Policy this request kind is registered under.
    pub fn policy(&self) -> DispatchPolicy {
        match self {
            Self::Devices => DispatchPolicy::LatestOnly,
            Self::Temperatures(_) | Self::Humidity(_) | Self::Motions(_) | Self::Busyness(_) => {
                DispatchPolicy::ServeEvery
            }
        }
    }
}

/// A result action produced for the UI's state layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Update {
    #[serde(rename = "setTemperatures", rename_all = "camelCase")]
    Temperatures { room_temperatures: SeriesMap },
    #[serde(rename = "setHumidity", rename_all = "camelCase")]
    Humidity { room_humidity: SeriesMap },
    #[serde(rename = "setMotions", rename_all = "camelCase")]
    Motions { room_motions: SeriesMap },
    #[serde(rename = "setBusyness", rename_all = "camelCase")]
    Busyness { room_busyness: BusynessMap },
    #[serde(rename = "setDevices")]
    Devices { devices: DeviceGroups },
}

impl Update {
    /// The wire name of this action.
    pub fn action_type(&self) -> &'static str {
        match self {
            Self::Temperatures { .. } => "setTemperatures",
            Self::Humidity { .. } => "setHumidity",
            Self::Motions { .. } => "setMotions",
            Self::Busyness { .. } => "setBusyness",
            Self::Devices { .. } => "setDevices",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn temperature_request_from_json() {
        let request: Request = serde_json::from_value(json!({
            "type": "getTemperatures",
            "payload": {
                "deviceName": "room1-temp",
                "room": "101",
                "from": "2020-01-01T00:00:00Z",
                "to": "2020-01-02T00:00:00Z"
            }
        }))
        .unwrap();

        assert_eq!(
            request,
            Request::Temperatures(DeviceQuery::new(
                "room1-temp",
                "101",
                "2020-01-01T00:00:00Z",
                "2020-01-02T00:00:00Z",
            ))
        );
        assert_eq!(request.policy(), DispatchPolicy::ServeEvery);
    }

    #[test]
    fn motion_request_accepts_device_id_and_numeric_bounds() {
        let request: Request = serde_json::from_value(json!({
            "type": "getMotions",
            "payload": { "deviceId": "pir-7", "room": "lobby", "from": 1_577_836_800_000_i64, "to": 1_577_923_200_000_i64 }
        }))
        .unwrap();

        let Request::Motions(query) = request else {
            panic!("expected getMotions, got {request:?}");
        };
        assert_eq!(query.device, "pir-7");
        assert_eq!(query.from.as_str(), "1577836800000");
        assert_eq!(query.to.to_string(), "1577923200000");
    }

    #[test]
    fn devices_request_has_no_payload() {
        let request: Request = serde_json::from_value(json!({ "type": "getDevices" })).unwrap();
        assert_eq!(request, Request::Devices);
        assert_eq!(request.policy(), DispatchPolicy::LatestOnly);
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({ "type": "getDevices" }));
    }

    #[test]
    fn unknown_action_is_rejected() {
        let result: Result<Request, _> =
            serde_json::from_value(json!({ "type": "getPressure", "payload": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn update_payload_field_names() {
        let update = Update::Temperatures {
            room_temperatures: SeriesMap::new(),
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "type": "setTemperatures", "payload": { "roomTemperatures": {} } })
        );

        let update = Update::Busyness {
            room_busyness: BusynessMap::new(),
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "type": "setBusyness", "payload": { "roomBusyness": {} } })
        );

        let update = Update::Devices {
            devices: DeviceGroups::new(),
        };
        assert_eq!(update.action_type(), "setDevices");
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "type": "setDevices", "payload": { "devices": {} } })
        );
    }

    #[test]
    fn time_bound_from_datetime_uses_millis() {
        let dt = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(TimeBound::from(dt).as_str(), "2020-01-01T00:00:00.000Z");
    }
}
