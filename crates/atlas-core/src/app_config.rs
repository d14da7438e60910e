use std::path::PathBuf;

use crate::types::Coordinates;

/// Where the client obtains the user position from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationProviderKind {
    /// IP geolocation over HTTP.
    Service,
    /// Static coordinates supplied through configuration.
    Fixed,
    /// No position source at all.
    Disabled,
}

impl std::fmt::Display for LocationProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationProviderKind::Service => write!(f, "service"),
            LocationProviderKind::Fixed => write!(f, "fixed"),
            LocationProviderKind::Disabled => write!(f, "none"),
        }
    }
}

/// Runtime configuration for the Atlas client, resolved from environment
/// variables (plus command-line overrides applied by the binary).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the Atlas search service.
    pub server_url: String,
    /// Per-request timeout for search and history calls, in seconds.
    pub http_timeout_secs: u64,
    pub location_provider: LocationProviderKind,
    /// Endpoint of the IP geolocation service (ip-api.com compatible).
    pub geolocate_url: String,
    /// How long to wait for one position fix, in seconds.
    pub location_timeout_secs: u64,
    /// Static position; required when `location_provider` is `Fixed`.
    pub fixed_position: Option<Coordinates>,
    /// Initially selected search radius in meters. Always one of
    /// [`crate::types::RADIUS_OPTIONS_M`].
    pub default_radius_m: u32,
    pub log_level: String,
    /// Log destination. The terminal itself belongs to the interface, so
    /// logs go to a file.
    pub log_file: PathBuf,
}
