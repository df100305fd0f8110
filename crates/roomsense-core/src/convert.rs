// ── Response reshaping ──
//
// Pure functions turning raw API payloads into the UI-ready records in
// `model`. No I/O, no allocation beyond the output.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::model::{
    DeviceDescriptor, DeviceGroups, Point, SERIES_COLUMNS, Sample, SampleTime, SeriesRecord,
    SeriesType,
};

/// Zone-less datetime layouts, read as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a sample timestamp into epoch milliseconds.
///
/// Numbers are already epoch millis. Text is tried as RFC 3339, then as a
/// zone-less datetime or bare date in UTC, then as a decimal millis count.
pub fn parse_epoch_millis(time: &SampleTime) -> Option<i64> {
    match time {
        SampleTime::Millis(ms) => Some(*ms),
        SampleTime::Text(text) => parse_text_millis(text.trim()),
    }
}

fn parse_text_millis(text: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc().timestamp_millis());
    }

    text.parse::<i64>().ok()
}

/// The last sample of a series, if any.
pub fn latest_sample(samples: &[Sample]) -> Option<Sample> {
    samples.last().cloned()
}

/// Map every sample to a `[millis, value]` point, preserving order.
pub fn to_points(samples: &[Sample]) -> Vec<Point> {
    samples
        .iter()
        .map(|s| Point(parse_epoch_millis(&s.time), s.value))
        .collect()
}

/// Build the chart-ready record for one device's series.
pub fn series_record(
    series_type: SeriesType,
    name: impl Into<String>,
    room: impl Into<String>,
    samples: &[Sample],
) -> SeriesRecord {
    SeriesRecord {
        room: room.into(),
        name: name.into(),
        series_type,
        columns: SERIES_COLUMNS.map(String::from).to_vec(),
        latest: latest_sample(samples),
        points: to_points(samples),
    }
}

/// Partition a flat device list by `room`.
///
/// Every device lands in exactly one group; rooms appear in first-seen
/// order and devices keep their input order within a room.
pub fn group_by_room(devices: Vec<DeviceDescriptor>) -> DeviceGroups {
    let mut groups = DeviceGroups::new();
    for device in devices {
        groups.entry(device.room.clone()).or_default().push(device);
    }
    groups
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    // ── Timestamps ──────────────────────────────────────────────────

    #[test]
    fn rfc3339_text_parses_to_millis() {
        assert_eq!(
            parse_epoch_millis(&"2020-01-01T00:00:00Z".into()),
            Some(1_577_836_800_000)
        );
        assert_eq!(
            parse_epoch_millis(&"2020-01-01T10:00:00.250+10:00".into()),
            Some(1_577_836_800_250)
        );
    }

    #[test]
    fn zone_less_text_is_utc() {
        assert_eq!(
            parse_epoch_millis(&"2020-01-01T00:00:01".into()),
            Some(1_577_836_801_000)
        );
        assert_eq!(
            parse_epoch_millis(&"2020-01-01 00:00:00.5".into()),
            Some(1_577_836_800_500)
        );
        assert_eq!(parse_epoch_millis(&"2020-01-01".into()), Some(1_577_836_800_000));
    }

    #[test]
    fn numeric_times_are_millis() {
        assert_eq!(
            parse_epoch_millis(&SampleTime::Millis(1_577_836_800_000)),
            Some(1_577_836_800_000)
        );
        assert_eq!(
            parse_epoch_millis(&"1577836800000".into()),
            Some(1_577_836_800_000)
        );
    }

    #[test]
    fn garbage_time_is_none() {
        assert_eq!(parse_epoch_millis(&"yesterday-ish".into()), None);
    }

    // ── Series ──────────────────────────────────────────────────────

    #[test]
    fn single_temperature_sample() {
        let samples = vec![Sample::new("2020-01-01T00:00:00Z", 21.5)];

        let record = series_record(SeriesType::Temperature, "room1-temp", "101", &samples);

        assert_eq!(record.points, vec![Point(Some(1_577_836_800_000), 21.5)]);
        assert_eq!(record.latest, Some(Sample::new("2020-01-01T00:00:00Z", 21.5)));
        assert_eq!(record.name, "room1-temp");
        assert_eq!(record.room, "101");
        assert_eq!(record.series_type, SeriesType::Temperature);
        assert_eq!(record.columns, vec!["time".to_owned(), "value".to_owned()]);
    }

    #[test]
    fn empty_series_has_no_points_and_empty_latest() {
        let record = series_record(SeriesType::Humidity, "room2-hum", "102", &[]);

        assert!(record.points.is_empty());
        assert!(record.latest.is_none());
        assert_eq!(serde_json::to_value(&record).unwrap()["latest"], json!({}));
    }

    #[test]
    fn points_keep_length_and_order() {
        let samples = vec![
            Sample::new("2020-01-01T00:10:00Z", 3.0),
            Sample::new("2020-01-01T00:00:00Z", 1.0),
            Sample::new("not a time", 2.0),
            Sample::new(1_577_836_860_000, 4.0),
        ];

        let points = to_points(&samples);

        assert_eq!(points.len(), samples.len());
        assert_eq!(
            points,
            vec![
                Point(Some(1_577_837_400_000), 3.0),
                Point(Some(1_577_836_800_000), 1.0),
                Point(None, 2.0),
                Point(Some(1_577_836_860_000), 4.0),
            ]
        );
        assert_eq!(latest_sample(&samples), Some(Sample::new(1_577_836_860_000, 4.0)));
    }

    // ── Devices ─────────────────────────────────────────────────────

    #[test]
    fn two_rooms_two_groups() {
        let groups = group_by_room(vec![
            DeviceDescriptor::new("a", "101"),
            DeviceDescriptor::new("b", "102"),
        ]);

        assert_eq!(
            serde_json::to_value(&groups).unwrap(),
            json!({ "101": [{ "id": "a", "room": "101" }], "102": [{ "id": "b", "room": "102" }] })
        );
    }

    #[test]
    fn grouping_keeps_relative_order_and_every_device() {
        let input = vec![
            DeviceDescriptor::new("t1", "kitchen"),
            DeviceDescriptor::new("m1", "lobby"),
            DeviceDescriptor::new("t2", "kitchen"),
            DeviceDescriptor::new("h1", "lobby"),
            DeviceDescriptor::new("x1", ""),
        ];

        let groups = group_by_room(input.clone());

        assert_eq!(
            groups.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["kitchen", "lobby", ""]
        );
        let ids = |room: &str| -> Vec<String> {
            groups[room].iter().map(|d| d.id.clone()).collect()
        };
        assert_eq!(ids("kitchen"), vec!["t1", "t2"]);
        assert_eq!(ids("lobby"), vec!["m1", "h1"]);
        assert_eq!(ids(""), vec!["x1"]);

        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, input.len());
        for (room, devices) in &groups {
            assert!(devices.iter().all(|d| &d.room == room));
        }
    }

    #[test]
    fn empty_device_list_has_no_groups() {
        assert!(group_by_room(Vec::new()).is_empty());
    }
}
