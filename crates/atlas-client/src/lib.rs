//! HTTP client for the Atlas establishment-search service.

pub mod client;
pub mod error;

pub use client::AtlasClient;
pub use error::ApiError;
