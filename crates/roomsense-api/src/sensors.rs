// Sensor API endpoints
//
// One GET per endpoint. Series endpoints take a device identifier plus a
// `from`/`to` window that is forwarded verbatim; three of them also ask for
// the `type=list` shape.

use tracing::debug;

use crate::client::SensorClient;
use crate::error::Error;
use crate::models::{DeviceDescriptor, Sample};

impl SensorClient {
    /// Temperature samples for one device.
    ///
    /// `GET /temperature?deviceName={name}&type=list&from={from}&to={to}`
    pub async fn temperatures(
        &self,
        device_name: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<Sample>, Error> {
        debug!(device_name, from, to, "fetching temperatures");
        self.get(
            "temperature",
            &[
                ("deviceName", device_name),
                ("type", "list"),
                ("from", from),
                ("to", to),
            ],
        )
        .await
    }

    /// Humidity samples for one device.
    ///
    /// `GET /humidity?deviceName={name}&type=list&from={from}&to={to}`
    pub async fn humidity(
        &self,
        device_name: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<Sample>, Error> {
        debug!(device_name, from, to, "fetching humidity");
        self.get(
            "humidity",
            &[
                ("deviceName", device_name),
                ("type", "list"),
                ("from", from),
                ("to", to),
            ],
        )
        .await
    }

    /// Motion samples for one device.
    ///
    /// `GET /motion?deviceId={id}&type=list&from={from}&to={to}`
    pub async fn motions(&self, device_id: &str, from: &str, to: &str) -> Result<Vec<Sample>, Error> {
        debug!(device_id, from, to, "fetching motions");
        self.get(
            "motion",
            &[
                ("deviceId", device_id),
                ("type", "list"),
                ("from", from),
                ("to", to),
            ],
        )
        .await
    }

    /// Busyness for one device.
    ///
    /// `GET /busyness?deviceId={id}&from={from}&to={to}`
    ///
    /// The metric is derived server-side and its shape is not fixed, so it
    /// comes back as loosely-typed JSON.
    pub async fn busyness(
        &self,
        device_id: &str,
        from: &str,
        to: &str,
    ) -> Result<serde_json::Value, Error> {
        debug!(device_id, from, to, "fetching busyness");
        self.get("busyness", &[("deviceId", device_id), ("from", from), ("to", to)])
            .await
    }

    /// Every known device.
    ///
    /// `GET /devices`
    pub async fn devices(&self) -> Result<Vec<DeviceDescriptor>, Error> {
        debug!("listing devices");
        self.get("devices", &[]).await
    }
}
