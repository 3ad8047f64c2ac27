//! Reverse geocoding: coordinate in, four-level [`Place`] out.
//!
//! The driver depends only on the [`Geocoder`] trait. The production
//! implementation is [`NominatimClient`], which issues one blocking
//! `GET <endpoint>?format=json&lat=<lat>&lon=<lon>&zoom=<zoom>` per image
//! against an OpenStreetMap Nominatim instance.
//!
//! ## Response handling
//!
//! 1. Any status other than 200 fails with `API error: <status>`. No retry.
//! 2. The body must be JSON with an `address` object, otherwise the request
//!    fails with `invalid address data`.
//! 3. `country`, `state`, `state_district` and `county` are read from the
//!    address. A missing key, a JSON `null` or an empty string becomes
//!    [`UNKNOWN`]; numbers and booleans use their plain text form; nested
//!    arrays and objects are kept as compact JSON.
//!
//! A response whose address has none of the four keys (open ocean) is a
//! success with every field `Unknown`.
//!
//! ## Politeness
//!
//! Requests carry the configured User-Agent and a per-request timeout, and a
//! [`Throttle`] keeps at least `min_interval` between the start of two
//! consecutive requests.

use crate::config::GeocoderConfig;
use crate::types::{Coordinate, Place, UNKNOWN};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde_json::{Map, Value};
use std::cell::Cell;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API error: {0}")]
    Status(u16),
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid address data")]
    InvalidAddress,
}

/// Anything that can turn a coordinate into a [`Place`].
pub trait Geocoder {
    fn locate(&self, coordinate: Coordinate) -> Result<Place, GeocodeError>;
}

// ============================================================================
// Response processing
// ============================================================================

/// Fail unless the service answered `200 OK`.
pub fn check_status(status: u16) -> Result<(), GeocodeError> {
    if status == StatusCode::OK.as_u16() {
        Ok(())
    } else {
        Err(GeocodeError::Status(status))
    }
}

/// Status check followed by [`parse_place`].
pub fn place_from_response(status: u16, body: &str) -> Result<Place, GeocodeError> {
    check_status(status)?;
    parse_place(body)
}

/// Parse a Nominatim `format=json` reverse response body.
pub fn parse_place(body: &str) -> Result<Place, GeocodeError> {
    let data: Value = serde_json::from_str(body)?;
    let address = data
        .get("address")
        .and_then(Value::as_object)
        .ok_or(GeocodeError::InvalidAddress)?;

    Ok(Place {
        country: address_field(address, "country"),
        state: address_field(address, "state"),
        state_district: address_field(address, "state_district"),
        county: address_field(address, "county"),
    })
}

fn address_field(address: &Map<String, Value>, key: &str) -> String {
    match address.get(key) {
        None | Some(Value::Null) => UNKNOWN.to_string(),
        Some(Value::String(s)) if s.is_empty() => UNKNOWN.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// ============================================================================
// Throttle
// ============================================================================

/// Enforces a minimum gap between the starts of consecutive requests.
///
/// The first call never waits.
#[derive(Debug)]
pub struct Throttle {
    min_interval: Duration,
    last: Cell<Option<Instant>>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: Cell::new(None),
        }
    }

    /// Sleep until `min_interval` has passed since the previous call.
    /// Returns how long it slept.
    pub fn wait(&self) -> Duration {
        let delay = match self.last.get() {
            Some(previous) => self.min_interval.saturating_sub(previous.elapsed()),
            None => Duration::ZERO,
        };
        if !delay.is_zero() {
            log::trace!("throttling geocoder for {delay:?}");
            std::thread::sleep(delay);
        }
        self.last.set(Some(Instant::now()));
        delay
    }
}

// ============================================================================
// Nominatim client
// ============================================================================

/// Blocking client for a Nominatim `/reverse` endpoint.
pub struct NominatimClient {
    http: Client,
    endpoint: String,
    zoom: u8,
    throttle: Throttle,
}

impl NominatimClient {
    /// Build a client with the configured User-Agent and timeout.
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()?;
        Ok(Self::with_http_client(config, http))
    }

    /// Use an already-built HTTP client; headers and timeouts are whatever
    /// that client was built with.
    pub fn with_http_client(config: &GeocoderConfig, http: Client) -> Self {
        if config.is_public_endpoint() && config.min_interval() < Duration::from_secs(1) {
            log::warn!(
                "min_interval_ms = {} is below the public Nominatim limit of one request per second",
                config.min_interval_ms
            );
        }
        Self {
            http,
            endpoint: config.endpoint.clone(),
            zoom: config.zoom,
            throttle: Throttle::new(config.min_interval()),
        }
    }

    /// Full request URL for a coordinate, six fractional digits per axis.
    pub fn request_url(&self, coordinate: Coordinate) -> String {
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        format!(
            "{}{}format=json&lat={:.6}&lon={:.6}&zoom={}",
            self.endpoint, separator, coordinate.latitude, coordinate.longitude, self.zoom
        )
    }
}

impl Geocoder for NominatimClient {
    fn locate(&self, coordinate: Coordinate) -> Result<Place, GeocodeError> {
        self.throttle.wait();
        let url = self.request_url(coordinate);
        log::debug!("GET {url}");

        let response = self.http.get(&url).send()?;
        check_status(response.status().as_u16())?;
        let body = response.text()?;
        parse_place(&body)
    }
}
