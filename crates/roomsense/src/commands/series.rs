//! Series command handlers: temperature, humidity, motion, busyness.

use chrono::{DateTime, Duration, Utc};
use tabled::Tabled;

use roomsense_core::handler;
use roomsense_core::{
    BusynessMap, DeviceQuery, Point, SeriesMap, ServiceConfig, TimeBound, Update,
};

use crate::cli::{GlobalOpts, SeriesArgs};
use crate::error::CliError;
use crate::output;

/// Which chart series a command fetches.
#[derive(Debug, Clone, Copy)]
pub enum SeriesKind {
    Temperature,
    Humidity,
    Motion,
}

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct PointRow {
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Room")]
    room: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn format_millis(millis: Option<i64>) -> String {
    millis
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map_or_else(|| "-".into(), |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

fn point_rows(series: &SeriesMap) -> Vec<PointRow> {
    series
        .values()
        .flat_map(|record| {
            record.points.iter().map(move |Point(millis, value)| PointRow {
                device: record.name.clone(),
                room: record.room.clone(),
                time: format_millis(*millis),
                value: value.to_string(),
            })
        })
        .collect()
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Build the query, defaulting an omitted window to the last 24 hours.
fn build_query(args: SeriesArgs, now: DateTime<Utc>) -> DeviceQuery {
    let from = args
        .from
        .map_or_else(|| TimeBound::from(now - Duration::hours(24)), TimeBound::new);
    let to = args.to.map_or_else(|| TimeBound::from(now), TimeBound::new);
    DeviceQuery::new(args.device, args.room, from, to)
}

fn series_of(update: Update) -> Result<SeriesMap, CliError> {
    match update {
        Update::Temperatures { room_temperatures } => Ok(room_temperatures),
        Update::Humidity { room_humidity } => Ok(room_humidity),
        Update::Motions { room_motions } => Ok(room_motions),
        other => Err(CliError::Internal(format!(
            "expected a series update, got {}",
            other.action_type()
        ))),
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle(
    service: &ServiceConfig,
    kind: SeriesKind,
    args: SeriesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let client = service.build_client()?;
    let query = build_query(args, Utc::now());

    let update = match kind {
        SeriesKind::Temperature => handler::fetch_temperatures(&client, &query).await?,
        SeriesKind::Humidity => handler::fetch_humidity(&client, &query).await?,
        SeriesKind::Motion => handler::fetch_motions(&client, &query).await?,
    };
    let series = series_of(update)?;

    let out = output::render(&global.output, &series, point_rows)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle_busyness(
    service: &ServiceConfig,
    args: SeriesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let client = service.build_client()?;
    let query = build_query(args, Utc::now());

    let busyness: BusynessMap = match handler::fetch_busyness(&client, &query).await? {
        Update::Busyness { room_busyness } => room_busyness,
        other => {
            return Err(CliError::Internal(format!(
                "expected setBusyness, got {}",
                other.action_type()
            )));
        }
    };

    let out = output::render_value(&global.output, &busyness)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use roomsense_core::{Sample, SeriesType, convert};

    use super::*;

    fn args(from: Option<&str>, to: Option<&str>) -> SeriesArgs {
        SeriesArgs {
            device: "room1-temp".into(),
            room: "101".into(),
            from: from.map(Into::into),
            to: to.map(Into::into),
        }
    }

    #[test]
    fn explicit_bounds_pass_through() {
        let now = Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
        let query = build_query(args(Some("yesterday"), Some("1577923200000")), now);
        assert_eq!(query.from.as_str(), "yesterday");
        assert_eq!(query.to.as_str(), "1577923200000");
        assert_eq!(query.device, "room1-temp");
        assert_eq!(query.room, "101");
    }

    #[test]
    fn omitted_bounds_cover_last_day() {
        let now = Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
        let query = build_query(args(None, None), now);
        assert_eq!(query.from.as_str(), "2020-01-01T00:00:00.000Z");
        assert_eq!(query.to.as_str(), "2020-01-02T00:00:00.000Z");
    }

    #[test]
    fn rows_flatten_points() {
        let record = convert::series_record(
            SeriesType::Temperature,
            "room1-temp",
            "101",
            &[
                Sample::new("2020-01-01T00:00:00Z", 21.5),
                Sample::new("garbage", 22.0),
            ],
        );
        let series = SeriesMap::from([("room1-temp".to_owned(), record)]);

        let rows = point_rows(&series);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].time, "2020-01-01 00:00:00");
        assert_eq!(rows[0].value, "21.5");
        assert_eq!(rows[1].time, "-");
    }
}
