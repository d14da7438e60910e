//! Display formatting for search results and history entries.
//!
//! Every user-visible formatting rule lives here, free of any UI
//! dependency, so the rules stay testable on their own and the rendering
//! layer only places prebuilt text on screen.

use chrono::NaiveDateTime;

use crate::types::Coordinates;

/// Placeholder shown when an establishment has no phone number.
pub const PHONE_PLACEHOLDER: &str = "Telefone não disponível";

/// Distance label: meters below 1 km ("850 m"), kilometers with one
/// decimal at or above it ("1.2 km").
#[must_use]
pub fn distance_label(distance_m: Option<f64>) -> Option<String> {
    let distance_m = distance_m?;
    if distance_m >= 1000.0 {
        Some(format!("{:.1} km", distance_m / 1000.0))
    } else {
        Some(format!("{:.0} m", distance_m.round()))
    }
}

/// Rating label with one decimal: "⭐ 4.5".
#[must_use]
pub fn rating_label(rating: Option<f64>) -> Option<String> {
    rating.map(|rating| format!("⭐ {rating:.1}"))
}

/// Result-count label, pluralized strictly above one: "1 encontrado",
/// "7 encontrados".
#[must_use]
pub fn count_label(count: u32) -> String {
    if count > 1 {
        format!("{count} encontrados")
    } else {
        format!("{count} encontrado")
    }
}

/// Notification body for a completed search with results.
#[must_use]
pub fn search_success_message(count: u32, query: &str) -> String {
    format!("Encontrados {count} estabelecimento(s) para \"{query}\"")
}

/// Radius in kilometers with one decimal: 5000 → "5.0 km".
#[must_use]
pub fn radius_km_label(radius_m: u32) -> String {
    format!("{:.1} km", f64::from(radius_m) / 1000.0)
}

/// Timestamp in Brazilian day-first order with a 24h clock:
/// "26/08/2026, 14:30".
#[must_use]
pub fn timestamp_label(timestamp: NaiveDateTime) -> String {
    timestamp.format("%d/%m/%Y, %H:%M").to_string()
}

/// Meta line of a history entry: count, radius, and when it ran.
#[must_use]
pub fn history_meta_label(results_count: u32, radius_m: u32, timestamp: NaiveDateTime) -> String {
    format!(
        "{results_count} resultado(s) • Raio: {} • {}",
        radius_km_label(radius_m),
        timestamp_label(timestamp)
    )
}

/// Coordinate pair with four decimal places: "-23.5505, -46.6333".
#[must_use]
pub fn coordinates_label(position: Coordinates) -> String {
    format!("{:.4}, {:.4}", position.latitude, position.longitude)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn distance_below_one_km_rounds_to_whole_meters() {
        assert_eq!(distance_label(Some(850.0)).as_deref(), Some("850 m"));
        assert_eq!(distance_label(Some(999.4)).as_deref(), Some("999 m"));
        assert_eq!(distance_label(Some(0.0)).as_deref(), Some("0 m"));
    }

    #[test]
    fn distance_at_or_above_one_km_uses_one_decimal() {
        assert_eq!(distance_label(Some(1000.0)).as_deref(), Some("1.0 km"));
        assert_eq!(distance_label(Some(1234.0)).as_deref(), Some("1.2 km"));
        assert_eq!(distance_label(Some(12_345.0)).as_deref(), Some("12.3 km"));
    }

    #[test]
    fn distance_unknown_yields_no_label() {
        assert_eq!(distance_label(None), None);
    }

    #[test]
    fn rating_uses_one_decimal() {
        assert_eq!(rating_label(Some(4.0)).as_deref(), Some("⭐ 4.0"));
        assert_eq!(rating_label(Some(4.666)).as_deref(), Some("⭐ 4.7"));
        assert_eq!(rating_label(None), None);
    }

    #[test]
    fn count_label_pluralizes_strictly_above_one() {
        assert_eq!(count_label(1), "1 encontrado");
        assert_eq!(count_label(2), "2 encontrados");
        assert_eq!(count_label(15), "15 encontrados");
    }

    #[test]
    fn search_success_message_embeds_query() {
        assert_eq!(
            search_success_message(3, "pizzaria"),
            "Encontrados 3 estabelecimento(s) para \"pizzaria\""
        );
    }

    #[test]
    fn radius_label_converts_meters_to_km() {
        assert_eq!(radius_km_label(1000), "1.0 km");
        assert_eq!(radius_km_label(5000), "5.0 km");
        assert_eq!(radius_km_label(50_000), "50.0 km");
    }

    #[test]
    fn timestamp_label_is_day_first() {
        let timestamp = NaiveDate::from_ymd_opt(2026, 8, 26)
            .and_then(|date| date.and_hms_opt(14, 30, 5))
            .expect("valid date");
        assert_eq!(timestamp_label(timestamp), "26/08/2026, 14:30");
    }

    #[test]
    fn history_meta_label_joins_with_bullets() {
        let timestamp = NaiveDate::from_ymd_opt(2026, 1, 3)
            .and_then(|date| date.and_hms_opt(9, 5, 0))
            .expect("valid date");
        assert_eq!(
            history_meta_label(2, 5000, timestamp),
            "2 resultado(s) • Raio: 5.0 km • 03/01/2026, 09:05"
        );
    }

    #[test]
    fn coordinates_label_uses_four_decimals() {
        let position = Coordinates {
            latitude: -23.5505,
            longitude: -46.6333,
        };
        assert_eq!(coordinates_label(position), "-23.5505, -46.6333");
    }

    #[test]
    fn coordinates_label_pads_short_fractions() {
        let position = Coordinates {
            latitude: -23.55,
            longitude: -46.6,
        };
        assert_eq!(coordinates_label(position), "-23.5500, -46.6000");
    }
}
