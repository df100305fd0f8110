// ── Request handlers ──
//
// One handler per request kind: fetch, reshape, return the result action.
// `handle` runs them behind `with_error_handler`, so a failed fetch is
// logged and produces nothing instead of surfacing to the caller.

use std::future::Future;

use tracing::error;

use roomsense_api::SensorClient;

use crate::action::{DeviceQuery, Request, Update};
use crate::convert;
use crate::error::CoreError;
use crate::model::{BusynessMap, BusynessRecord, SeriesMap, SeriesType};

/// Await `operation`, logging and discarding any error.
///
/// Returns `Some(payload)` on success and `None` once the failure has been
/// logged under `context`. Nothing escapes this boundary.
pub async fn with_error_handler<T, F>(context: &'static str, operation: F) -> Option<T>
where
    F: Future<Output = Result<T, CoreError>>,
{
    match operation.await {
        Ok(value) => Some(value),
        Err(e) => {
            error!(error = %e, transient = e.is_transient(), "{context}");
            None
        }
    }
}

/// Static log label for a request kind.
pub fn context(request: &Request) -> &'static str {
    match request {
        Request::Temperatures(_) => "Fetching temperatures.",
        Request::Humidity(_) => "Fetching humidity.",
        Request::Motions(_) => "Fetching motions.",
        Request::Busyness(_) => "Fetching busyness.",
        Request::Devices => "Fetching devices.",
    }
}

/// Serve one request end to end. `None` means the run failed and was logged.
pub async fn handle(client: &SensorClient, request: &Request) -> Option<Update> {
    let label = context(request);
    match request {
        Request::Temperatures(query) => with_error_handler(label, fetch_temperatures(client, query)).await,
        Request::Humidity(query) => with_error_handler(label, fetch_humidity(client, query)).await,
        Request::Motions(query) => with_error_handler(label, fetch_motions(client, query)).await,
        Request::Busyness(query) => with_error_handler(label, fetch_busyness(client, query)).await,
        Request::Devices => with_error_handler(label, fetch_devices(client)).await,
    }
}

// ── Individual handlers ──────────────────────────────────────────────

pub async fn fetch_temperatures(
    client: &SensorClient,
    query: &DeviceQuery,
) -> Result<Update, CoreError> {
    let samples = client
        .temperatures(&query.device, query.from.as_str(), query.to.as_str())
        .await?;
    Ok(Update::Temperatures {
        room_temperatures: keyed_series(SeriesType::Temperature, query, &samples),
    })
}

pub async fn fetch_humidity(
    client: &SensorClient,
    query: &DeviceQuery,
) -> Result<Update, CoreError> {
    let samples = client
        .humidity(&query.device, query.from.as_str(), query.to.as_str())
        .await?;
    Ok(Update::Humidity {
        room_humidity: keyed_series(SeriesType::Humidity, query, &samples),
    })
}

pub async fn fetch_motions(client: &SensorClient, query: &DeviceQuery) -> Result<Update, CoreError> {
    let samples = client
        .motions(&query.device, query.from.as_str(), query.to.as_str())
        .await?;
    Ok(Update::Motions {
        room_motions: keyed_series(SeriesType::Motion, query, &samples),
    })
}

pub async fn fetch_busyness(
    client: &SensorClient,
    query: &DeviceQuery,
) -> Result<Update, CoreError> {
    let busyness = client
        .busyness(&query.device, query.from.as_str(), query.to.as_str())
        .await?;

    let mut room_busyness = BusynessMap::new();
    room_busyness.insert(
        query.device.clone(),
        BusynessRecord {
            room: query.room.clone(),
            device_id: query.device.clone(),
            busyness,
        },
    );
    Ok(Update::Busyness { room_busyness })
}

pub async fn fetch_devices(client: &SensorClient) -> Result<Update, CoreError> {
    let devices = client.devices().await?;
    Ok(Update::Devices {
        devices: convert::group_by_room(devices),
    })
}

fn keyed_series(
    series_type: SeriesType,
    query: &DeviceQuery,
    samples: &[roomsense_api::Sample],
) -> SeriesMap {
    let record = convert::series_record(series_type, query.device.clone(), query.room.clone(), samples);
    SeriesMap::from([(query.device.clone(), record)])
}
