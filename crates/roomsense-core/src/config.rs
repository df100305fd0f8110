// ── Runtime connection configuration ──
//
// Describes *how* to reach the sensor API. Never touches disk: the CLI
// (via roomsense-config) builds a `ServiceConfig` and hands it in.

use std::time::Duration;

use url::Url;

use roomsense_api::transport::{TlsMode, TransportConfig};
use roomsense_api::SensorClient;

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed staging hosts).
    DangerAcceptInvalid,
}

/// Configuration for talking to one sensor API deployment.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// API root (e.g., `https://fedex-sensor-api.staging.agiledigital.co`).
    pub base_url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout. `None` = wait as long as the server takes.
    pub timeout: Option<Duration>,
    /// Override for the `User-Agent` header.
    pub user_agent: Option<String>,
}

impl ServiceConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            tls: TlsVerification::default(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Build the HTTP client described by this configuration.
    pub fn build_client(&self) -> Result<SensorClient, CoreError> {
        let transport = build_transport(self);
        Ok(SensorClient::new(self.base_url.clone(), &transport)?)
    }
}

/// Build a [`TransportConfig`] from the service configuration.
fn build_transport(config: &ServiceConfig) -> TransportConfig {
    let mut transport = TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
        ..TransportConfig::default()
    };
    if let Some(ref agent) = config.user_agent {
        transport.user_agent.clone_from(agent);
    }
    transport
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn transport_carries_overrides() {
        let mut config = ServiceConfig::new(Url::parse("https://sensors.example.com").unwrap());
        config.tls = TlsVerification::DangerAcceptInvalid;
        config.timeout = Some(Duration::from_secs(5));
        config.user_agent = Some("dashboard/2.0".into());

        let transport = build_transport(&config);

        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
        assert_eq!(transport.timeout, Some(Duration::from_secs(5)));
        assert_eq!(transport.user_agent, "dashboard/2.0");
    }

    #[test]
    fn build_client_keeps_base_url() {
        let config = ServiceConfig::new(Url::parse("https://sensors.example.com/v1").unwrap());
        let client = config.build_client().unwrap();
        assert_eq!(client.base_url().as_str(), "https://sensors.example.com/v1");
    }
}
