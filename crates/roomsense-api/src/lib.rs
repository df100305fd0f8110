// roomsense-api: Async Rust client for the room sensor REST API

pub mod client;
pub mod error;
pub mod models;
pub mod sensors;
pub mod transport;

pub use client::SensorClient;
pub use error::Error;
pub use models::{DeviceDescriptor, ResultEnvelope, Sample, SampleTime};
pub use transport::{TlsMode, TransportConfig};

/// Host the sensor API is served from when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://fedex-sensor-api.staging.agiledigital.co";
