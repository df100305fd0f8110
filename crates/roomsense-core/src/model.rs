// ── Domain model ──
//
// UI-ready shapes built from raw API payloads. Every value here is created
// fresh per response and handed to an `Update`; nothing is mutated after
// construction.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

pub use roomsense_api::{DeviceDescriptor, Sample, SampleTime};

/// Column labels every series record carries, in point order.
pub const SERIES_COLUMNS: [&str; 2] = ["time", "value"];

/// Kind of sensor series.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SeriesType {
    Temperature,
    Humidity,
    Motion,
}

/// One chart point: `[epoch-millis, value]`.
///
/// The timestamp is `None` (serialized `null`) when the sample's `time`
/// could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point(pub Option<i64>, pub f64);

/// A named, typed series for one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub room: String,
    /// Device name (temperature, humidity) or device id (motion).
    pub name: String,
    #[serde(rename = "type")]
    pub series_type: SeriesType,
    pub columns: Vec<String>,
    /// Most recent sample; `{}` on the wire when the series is empty.
    #[serde(with = "latest_or_empty")]
    pub latest: Option<Sample>,
    pub points: Vec<Point>,
}

/// Busyness for one device, passed through as the API computed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusynessRecord {
    pub room: String,
    #[serde(rename = "deviceId")]
    pub device_id: String,
    pub busyness: serde_json::Value,
}

/// Series records keyed by device name or id.
pub type SeriesMap = BTreeMap<String, SeriesRecord>;

/// Busyness records keyed by device id.
pub type BusynessMap = BTreeMap<String, BusynessRecord>;

/// Devices grouped by room. Rooms keep first-seen order.
pub type DeviceGroups = IndexMap<String, Vec<DeviceDescriptor>>;

mod latest_or_empty {
    use serde::de::Error as _;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Sample;

    pub fn serialize<S: Serializer>(latest: &Option<Sample>, s: S) -> Result<S::Ok, S::Error> {
        match latest {
            Some(sample) => sample.serialize(s),
            None => s.serialize_map(Some(0))?.end(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Sample>, D::Error> {
        let value = serde_json::Value::deserialize(d)?;
        match value {
            serde_json::Value::Object(ref map) if map.is_empty() => Ok(None),
            serde_json::Value::Null => Ok(None),
            other => serde_json::from_value(other).map(Some).map_err(D::Error::custom),
        }
    }
}
