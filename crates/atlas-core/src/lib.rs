//! Shared types, formatting rules, and configuration for the Atlas client.

pub mod app_config;
pub mod config;
pub mod error;
pub mod format;
pub mod types;

pub use app_config::{AppConfig, LocationProviderKind};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use types::{
    Coordinates, Establishment, HistoryEntry, HistoryResponse, SearchRequest, SearchResponse,
    HISTORY_LIMIT, RADIUS_OPTIONS_M,
};
