//! IP geolocation over HTTP.
//!
//! Speaks the ip-api.com response dialect: `{"status": "success", "lat": ..,
//! "lon": ..}` on a fix, `{"status": "fail", "message": ..}` when the
//! service cannot locate the caller. Transport and payload failures collapse
//! into the small [`LocationError`] taxonomy; the distinction only matters
//! for logs.

use std::time::Duration;

use reqwest::{header, Client, StatusCode, Url};
use serde::Deserialize;

use atlas_core::types::Coordinates;

use crate::error::LocationError;

/// Response envelope of the IP lookup service.
#[derive(Debug, Deserialize)]
struct LookupResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

/// HTTP position source backed by an ip-api style endpoint.
#[derive(Debug, Clone)]
pub struct IpLookupService {
    client: Client,
    endpoint: Url,
}

impl IpLookupService {
    /// Creates a lookup service against `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::Unsupported`] when the endpoint URL does not
    /// parse or the HTTP client cannot be constructed; the environment then
    /// simply has no usable position source.
    pub fn new(endpoint: &str) -> Result<Self, LocationError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent("atlas/0.1 (geolocation)")
            .build()
            .map_err(|_| LocationError::Unsupported)?;

        let mut endpoint = Url::parse(endpoint).map_err(|_| LocationError::Unsupported)?;
        // Ask only for the fields we consume.
        endpoint
            .query_pairs_mut()
            .append_pair("fields", "status,message,lat,lon");

        Ok(Self { client, endpoint })
    }

    /// Requests one fresh position fix from the service.
    ///
    /// The request forbids caches; a stale position defeats the point of
    /// asking. No timeout is applied here, the [`crate::Acquirer`] bounds
    /// the whole call.
    pub(crate) async fn fix(&self) -> Result<Coordinates, LocationError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "position lookup failed at transport level");
                LocationError::PositionUnavailable
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LocationError::PermissionDenied);
        }
        if !status.is_success() {
            tracing::debug!(%status, "position lookup returned non-success status");
            return Err(LocationError::PositionUnavailable);
        }

        let lookup: LookupResponse = response.json().await.map_err(|e| {
            tracing::debug!(error = %e, "position lookup body did not parse");
            LocationError::PositionUnavailable
        })?;

        coordinates_from(&lookup)
    }
}

/// Maps a parsed lookup payload to coordinates or a typed failure.
fn coordinates_from(lookup: &LookupResponse) -> Result<Coordinates, LocationError> {
    if lookup.status != "success" {
        tracing::debug!(
            message = lookup.message.as_deref().unwrap_or("none"),
            "position lookup refused a fix"
        );
        return Err(LocationError::PositionUnavailable);
    }
    match (lookup.lat, lookup.lon) {
        (Some(latitude), Some(longitude)) => Ok(Coordinates {
            latitude,
            longitude,
        }),
        _ => Err(LocationError::PositionUnavailable),
    }
}
