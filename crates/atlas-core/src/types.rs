//! Atlas API request and response types.
//!
//! All types model the JSON exchanged with the Atlas search service:
//! `POST /api/search` and `GET /api/history`. Field names match the wire
//! format, so no renames are needed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Body of `POST /api/search`.
///
/// The query is trimmed by the caller before it gets here; a fresh request
/// is built for every attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Search radius in meters.
    pub radius: u32,
}

/// A single establishment returned by the search service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Establishment {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Average rating on a 0 to 5 scale, when the service knows it.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Distance from the search position in meters, when computed.
    #[serde(default)]
    pub distance: Option<f64>,
}

/// Response of `POST /api/search`.
///
/// `count` is the authoritative result count. Empty-state handling keys on
/// it rather than on `results.len()`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: u32,
    pub results: Vec<Establishment>,
}

/// One persisted past search. The service returns entries newest first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    pub results_count: u32,
    /// Radius the search ran with, in meters.
    pub radius: u32,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub timestamp: NaiveDateTime,
}

/// Envelope of `GET /api/history`: `{ "history": [ ... ] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
}

/// Radius choices offered by the search form, in meters.
pub const RADIUS_OPTIONS_M: &[u32] = &[1000, 2000, 5000, 10_000, 20_000, 50_000];

/// How many history entries are requested and rendered.
pub const HISTORY_LIMIT: usize = 10;

/// Timestamp deserialization tolerant of the formats the service actually
/// emits: RFC 3339 (with or without offset) and the `SQLite` default
/// `YYYY-MM-DD HH:MM:SS` form.
///
/// Values carrying an offset are taken as-is with the offset dropped; the
/// client renders wall-clock time without timezone conversion.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer};

    const FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("unrecognized timestamp format: '{raw}'"))
        })
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDateTime> {
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
            return Some(with_offset.naive_local());
        }
        FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    }
}
