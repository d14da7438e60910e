//! Display-ready projections of search results and history entries.
//!
//! Builders here turn wire types into the exact text the interface shows,
//! using the formatting rules from `atlas_core::format`. Drawing lives in
//! `ui`; keeping the projections as plain data makes them testable without
//! a terminal.

use atlas_client::ApiError;
use atlas_core::format;
use atlas_core::types::{Establishment, HistoryEntry, SearchResponse, HISTORY_LIMIT};
use atlas_geo::LocationError;

/// One rendered establishment card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    /// Numbered title, e.g. "3. Pizzaria Bella Napoli".
    pub title: String,
    pub rating: Option<String>,
    pub distance: Option<String>,
    pub address: String,
    /// Phone or the fixed placeholder; always present.
    pub phone: String,
    /// Whether `phone` is the placeholder, for dimmed styling.
    pub phone_missing: bool,
}

impl ResultCard {
    #[must_use]
    pub fn build(position: usize, establishment: &Establishment) -> Self {
        let phone_missing = establishment.phone.is_none();
        Self {
            title: format!("{position}. {}", establishment.name),
            rating: format::rating_label(establishment.rating),
            distance: format::distance_label(establishment.distance),
            address: format!("📍 {}", establishment.address),
            phone: establishment
                .phone
                .clone()
                .unwrap_or_else(|| format::PHONE_PLACEHOLDER.to_owned()),
            phone_missing,
        }
    }
}

/// The visible results region: count label plus ordered cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub count_label: String,
    pub cards: Vec<ResultCard>,
    /// Index of the selected card; navigation stays inside `cards`.
    pub selected: usize,
}

impl ResultsView {
    /// Builds the region from a response with results, preserving service
    /// order and numbering from one.
    #[must_use]
    pub fn build(response: &SearchResponse) -> Self {
        let cards = response
            .results
            .iter()
            .enumerate()
            .map(|(index, establishment)| ResultCard::build(index + 1, establishment))
            .collect();
        Self {
            count_label: format::count_label(response.count),
            cards,
            selected: 0,
        }
    }
}

/// One rendered history line pair: the query and its meta line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    pub query: String,
    pub meta: String,
}

/// Builds display items for the history panel: service order, capped at
/// [`HISTORY_LIMIT`] entries.
#[must_use]
pub fn history_items(entries: &[HistoryEntry]) -> Vec<HistoryItem> {
    entries
        .iter()
        .take(HISTORY_LIMIT)
        .map(|entry| HistoryItem {
            query: entry.query.clone(),
            meta: format::history_meta_label(entry.results_count, entry.radius, entry.timestamp),
        })
        .collect()
}

/// User-facing message for a failed search: the service's `detail` when it
/// sent one, the generic message otherwise.
#[must_use]
pub fn search_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Service {
            detail: Some(detail),
            ..
        } => detail.clone(),
        _ => "Erro ao buscar estabelecimentos".to_owned(),
    }
}

/// Notification text for a failed position acquisition.
#[must_use]
pub fn location_error_notice(error: LocationError) -> &'static str {
    match error {
        LocationError::PermissionDenied => "Permissão de localização negada",
        LocationError::PositionUnavailable => "Localização indisponível",
        LocationError::Timeout => "Tempo esgotado ao obter localização",
        LocationError::Unsupported => "Geolocalização não é suportada neste ambiente",
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn establishment(name: &str) -> Establishment {
        Establishment {
            name: name.to_string(),
            address: "Av. Paulista, 1500".to_string(),
            phone: Some("(11) 3255-1234".to_string()),
            rating: Some(4.5),
            distance: Some(850.0),
        }
    }

    #[test]
    fn result_card_renders_all_fields() {
        let card = ResultCard::build(1, &establishment("Pizzaria Bella Napoli"));
        assert_eq!(card.title, "1. Pizzaria Bella Napoli");
        assert_eq!(card.rating.as_deref(), Some("⭐ 4.5"));
        assert_eq!(card.distance.as_deref(), Some("850 m"));
        assert_eq!(card.address, "📍 Av. Paulista, 1500");
        assert_eq!(card.phone, "(11) 3255-1234");
        assert!(!card.phone_missing);
    }

    #[test]
    fn result_card_substitutes_missing_phone() {
        let mut base = establishment("Pizza Prime");
        base.phone = None;
        base.rating = None;
        base.distance = None;

        let card = ResultCard::build(2, &base);
        assert_eq!(card.phone, "Telefone não disponível");
        assert!(card.phone_missing);
        assert!(card.rating.is_none());
        assert!(card.distance.is_none());
    }

    #[test]
    fn results_view_numbers_cards_in_service_order() {
        let response = SearchResponse {
            query: "pizzaria".to_string(),
            count: 3,
            results: vec![
                establishment("Primeira"),
                establishment("Segunda"),
                establishment("Terceira"),
            ],
        };
        let view = ResultsView::build(&response);
        assert_eq!(view.count_label, "3 encontrados");
        assert_eq!(view.selected, 0);
        let titles: Vec<&str> = view.cards.iter().map(|card| card.title.as_str()).collect();
        assert_eq!(titles, ["1. Primeira", "2. Segunda", "3. Terceira"]);
    }

    #[test]
    fn results_view_singular_count_label() {
        let response = SearchResponse {
            query: "padaria".to_string(),
            count: 1,
            results: vec![establishment("Padaria Estrela")],
        };
        assert_eq!(ResultsView::build(&response).count_label, "1 encontrado");
    }

    fn history_entry(query: &str) -> HistoryEntry {
        HistoryEntry {
            query: query.to_string(),
            results_count: 2,
            radius: 5000,
            timestamp: NaiveDate::from_ymd_opt(2026, 1, 3)
                .and_then(|date| date.and_hms_opt(9, 5, 0))
                .expect("valid date"),
        }
    }

    #[test]
    fn history_items_render_query_and_meta() {
        let items = history_items(&[history_entry("pizzaria")]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].query, "pizzaria");
        assert_eq!(
            items[0].meta,
            "2 resultado(s) • Raio: 5.0 km • 03/01/2026, 09:05"
        );
    }

    #[test]
    fn history_items_cap_at_limit_preserving_order() {
        let entries: Vec<HistoryEntry> = (1..=12)
            .map(|index| history_entry(&format!("busca {index}")))
            .collect();
        let items = history_items(&entries);
        assert_eq!(items.len(), HISTORY_LIMIT);
        assert_eq!(items[0].query, "busca 1");
        assert_eq!(items[9].query, "busca 10");
    }

    #[test]
    fn search_error_message_prefers_service_detail() {
        let error = ApiError::Service {
            status: 503,
            detail: Some("Serviço de busca indisponível".to_string()),
        };
        assert_eq!(search_error_message(&error), "Serviço de busca indisponível");
    }

    #[test]
    fn search_error_message_falls_back_to_generic_text() {
        let error = ApiError::Service {
            status: 500,
            detail: None,
        };
        assert_eq!(search_error_message(&error), "Erro ao buscar estabelecimentos");
    }

    #[test]
    fn location_error_notices_are_distinct() {
        let errors = [
            LocationError::PermissionDenied,
            LocationError::PositionUnavailable,
            LocationError::Timeout,
            LocationError::Unsupported,
        ];
        let notices: Vec<&str> = errors.iter().map(|e| location_error_notice(*e)).collect();
        for (index, notice) in notices.iter().enumerate() {
            for other in &notices[index + 1..] {
                assert_ne!(notice, other);
            }
        }
        assert_eq!(
            location_error_notice(LocationError::PermissionDenied),
            "Permissão de localização negada"
        );
    }
}
