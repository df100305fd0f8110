// roomsense-core: Request handling and response shaping between roomsense-api
// and consumers (UI bridge / CLI).

pub mod action;
pub mod config;
pub mod convert;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod model;

// ── Primary re-exports ──────────────────────────────────────────────
pub use action::{DeviceQuery, DispatchPolicy, Request, TimeBound, Update};
pub use config::{ServiceConfig, TlsVerification};
pub use dispatcher::Dispatcher;
pub use error::CoreError;
pub use handler::with_error_handler;
pub use roomsense_api::DEFAULT_BASE_URL;

pub use model::{
    BusynessMap, BusynessRecord, DeviceDescriptor, DeviceGroups, Point, Sample, SampleTime,
    SeriesMap, SeriesRecord, SeriesType,
};
