use crate::app_config::{AppConfig, LocationProviderKind};
use crate::types::{Coordinates, RADIUS_OPTIONS_M};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_opt_f64 = |var: &str| -> Result<Option<f64>, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .parse::<f64>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(None),
        }
    };

    let server_url = or_default("ATLAS_SERVER_URL", "http://127.0.0.1:8000");
    let http_timeout_secs = parse_u64("ATLAS_HTTP_TIMEOUT_SECS", "30")?;

    let location_provider =
        parse_provider("ATLAS_LOCATION_PROVIDER", &or_default("ATLAS_LOCATION_PROVIDER", "service"))?;
    let geolocate_url = or_default("ATLAS_GEOLOCATE_URL", "http://ip-api.com/json");
    let location_timeout_secs = parse_u64("ATLAS_LOCATION_TIMEOUT_SECS", "10")?;

    let latitude = parse_opt_f64("ATLAS_LAT")?;
    let longitude = parse_opt_f64("ATLAS_LNG")?;
    let fixed_position = match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => {
            if !(-90.0..=90.0).contains(&latitude) {
                return Err(ConfigError::InvalidEnvVar {
                    var: "ATLAS_LAT".to_string(),
                    reason: format!("latitude {latitude} is outside [-90, 90]"),
                });
            }
            if !(-180.0..=180.0).contains(&longitude) {
                return Err(ConfigError::InvalidEnvVar {
                    var: "ATLAS_LNG".to_string(),
                    reason: format!("longitude {longitude} is outside [-180, 180]"),
                });
            }
            Some(Coordinates {
                latitude,
                longitude,
            })
        }
        (None, None) => None,
        // A lone half of the pair is always a mistake; fail loudly.
        (Some(_), None) => return Err(ConfigError::MissingEnvVar("ATLAS_LNG".to_string())),
        (None, Some(_)) => return Err(ConfigError::MissingEnvVar("ATLAS_LAT".to_string())),
    };
    if location_provider == LocationProviderKind::Fixed && fixed_position.is_none() {
        return Err(ConfigError::MissingEnvVar("ATLAS_LAT".to_string()));
    }

    let default_radius_m = parse_u32("ATLAS_DEFAULT_RADIUS_M", "5000")?;
    if !RADIUS_OPTIONS_M.contains(&default_radius_m) {
        return Err(ConfigError::InvalidEnvVar {
            var: "ATLAS_DEFAULT_RADIUS_M".to_string(),
            reason: format!("{default_radius_m} is not one of the selectable radii {RADIUS_OPTIONS_M:?}"),
        });
    }

    let log_level = or_default("ATLAS_LOG_LEVEL", "info");
    let log_file = PathBuf::from(or_default("ATLAS_LOG_FILE", "atlas.log"));

    Ok(AppConfig {
        server_url,
        http_timeout_secs,
        location_provider,
        geolocate_url,
        location_timeout_secs,
        fixed_position,
        default_radius_m,
        log_level,
        log_file,
    })
}

/// Parse a string into a [`LocationProviderKind`].
///
/// Unlike freeform settings, a typo here silently changes where positions
/// come from, so unknown values are rejected.
fn parse_provider(var: &str, raw: &str) -> Result<LocationProviderKind, ConfigError> {
    match raw {
        "service" => Ok(LocationProviderKind::Service),
        "fixed" => Ok(LocationProviderKind::Fixed),
        "none" => Ok(LocationProviderKind::Disabled),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("unknown provider '{other}' (expected service, fixed, or none)"),
        }),
    }
}
