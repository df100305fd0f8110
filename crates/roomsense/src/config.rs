//! CLI configuration: thin wrapper around `roomsense_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--config, --api-url, --timeout, --insecure).

use std::path::PathBuf;

use roomsense_core::ServiceConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use roomsense_config::{Config, load_config, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// The config file in effect: `--config` if given, else the platform path.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(roomsense_config::config_path)
}

/// Load the config file + environment, then apply flag overrides.
pub fn resolve_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = load_config(&config_path(global))?;

    if let Some(ref url) = global.api_url {
        cfg.api.base_url.clone_from(url);
    }
    if let Some(secs) = global.timeout {
        cfg.api.timeout = Some(secs);
    }
    if global.insecure {
        cfg.api.insecure = true;
    }

    Ok(cfg)
}

/// Build the `ServiceConfig` the commands run against.
pub fn resolve_service_config(global: &GlobalOpts) -> Result<ServiceConfig, CliError> {
    Ok(resolve_config(global)?.to_service_config()?)
}
