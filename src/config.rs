//! Tool configuration.
//!
//! Handles loading, validating, and layering `geosort.toml`. Every key is
//! optional: stock defaults are overridden by the config file, which is in
//! turn overridden by command-line flags.
//!
//! ## Config File Location
//!
//! `geosort.toml` in the working directory is picked up automatically when it
//! exists. `--config <FILE>` points somewhere else; in that case the file must
//! exist.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! output_dir = "sorted_images"       # Root of the destination tree
//! case_sensitive_extensions = false  # Only match lowercase .jpg/.jpeg/.png
//!
//! [geocoder]
//! endpoint = "https://nominatim.openstreetmap.org/reverse"
//! zoom = 10                          # Administrative granularity (0-18)
//! user_agent = "geosort/0.1.0"       # Sent with every request
//! timeout_secs = 30                  # Per-request deadline
//! min_interval_ms = 1000             # Minimum gap between requests
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// File picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "geosort.toml";

/// Public Nominatim reverse-geocoding endpoint.
pub const NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org/reverse";

/// Highest zoom level the reverse endpoint accepts.
const MAX_ZOOM: u8 = 18;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `geosort.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SorterConfig {
    /// Root of the `country/state/state_district/county` destination tree.
    pub output_dir: String,
    /// When false, `.JPG` and friends are treated like their lowercase forms.
    pub case_sensitive_extensions: bool,
    /// Reverse-geocoding service settings.
    pub geocoder: GeocoderConfig,
}

impl Default for SorterConfig {
    fn default() -> Self {
        Self {
            output_dir: "sorted_images".to_string(),
            case_sensitive_extensions: false,
            geocoder: GeocoderConfig::default(),
        }
    }
}

impl SorterConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output_dir must not be empty".into(),
            ));
        }
        self.geocoder.validate()
    }
}

/// Reverse-geocoding service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeocoderConfig {
    /// Reverse endpoint; the query string is appended to it.
    pub endpoint: String,
    /// Nominatim zoom level. 10 resolves down to county/city level.
    pub zoom: u8,
    /// User-Agent header; the public service rejects anonymous clients.
    pub user_agent: String,
    /// Whole-request deadline in seconds.
    pub timeout_secs: u64,
    /// Minimum milliseconds between the starts of two requests.
    pub min_interval_ms: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: NOMINATIM_ENDPOINT.to_string(),
            zoom: 10,
            user_agent: default_user_agent(),
            timeout_secs: 30,
            min_interval_ms: 1000,
        }
    }
}

impl GeocoderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "geocoder.endpoint must be an http:// or https:// URL".into(),
            ));
        }
        if self.zoom > MAX_ZOOM {
            return Err(ConfigError::Validation(format!(
                "geocoder.zoom must be 0-{MAX_ZOOM}"
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "geocoder.user_agent must not be empty".into(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "geocoder.timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// True when requests go to the shared public instance, whose usage
    /// policy allows at most one request per second.
    pub fn is_public_endpoint(&self) -> bool {
        self.endpoint.starts_with(NOMINATIM_ENDPOINT)
    }
}

fn default_user_agent() -> String {
    format!("geosort/{}", env!("CARGO_PKG_VERSION"))
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer that file and command-line overrides merge onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SorterConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// With `explicit = false` a missing file is `Ok(None)`; with
/// `explicit = true` it is [`ConfigError::NotFound`].
pub fn load_raw_config(path: &Path, explicit: bool) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        if explicit {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge the optional overlays onto a base value in order, then deserialize
/// and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = Option<toml::Value>>,
) -> Result<SorterConfig, ConfigError> {
    let merged = overlays
        .into_iter()
        .flatten()
        .fold(base, merge_toml);
    let config: SorterConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load configuration: stock defaults, then the config file, then `cli`.
///
/// `path` is the `--config` value; `None` means look for
/// [`DEFAULT_CONFIG_FILE`] in the working directory.
pub fn load_config(
    path: Option<&Path>,
    cli: Option<toml::Value>,
) -> Result<SorterConfig, ConfigError> {
    let file = match path {
        Some(p) => load_raw_config(p, true)?,
        None => load_raw_config(Path::new(DEFAULT_CONFIG_FILE), false)?,
    };
    resolve_config(stock_defaults_value(), [file, cli])
}

/// Returns a fully-commented stock `geosort.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> String {
    format!(
        r##"# geosort configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# The file is read from ./geosort.toml, or from the path given with --config.
# Command-line flags override values set here.
# Unknown keys will cause an error.

# Root of the destination tree. Photos end up in
#   <output_dir>/<country>/<state>/<state_district>/<county>/
output_dir = "sorted_images"

# Match .jpg/.jpeg/.png extensions exactly as written.
# false also picks up .JPG, .Jpeg, .PNG and so on.
case_sensitive_extensions = false

# ---------------------------------------------------------------------------
# Reverse geocoding
# ---------------------------------------------------------------------------
[geocoder]
# Reverse endpoint. A self-hosted Nominatim works too.
endpoint = "{endpoint}"

# Administrative granularity: 3 = country, 5 = state, 8 = county,
# 10 = city. Highest accepted value is 18.
zoom = 10

# Identifies this tool to the service. The public instance blocks
# requests without a descriptive User-Agent.
user_agent = "{user_agent}"

# Give up on a request after this many seconds.
timeout_secs = 30

# Minimum milliseconds between two requests. The public instance allows
# at most one request per second.
min_interval_ms = 1000
"##,
        endpoint = NOMINATIM_ENDPOINT,
        user_agent = default_user_agent(),
    )
}
