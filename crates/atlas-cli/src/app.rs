//! Interactive application state and the search orchestration driving it.
//!
//! The app is single-threaded: keyboard input, completed network tasks, and
//! the notification tick all arrive as [`AppMessage`]s multiplexed by
//! [`run`]'s `tokio::select!`. Network work runs in spawned tasks that
//! report back over the channel, so the interface never blocks and busy
//! state is restored on every completion path.

use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use atlas_client::{ApiError, AtlasClient};
use atlas_core::format;
use atlas_core::types::{
    Coordinates, HistoryEntry, SearchRequest, SearchResponse, HISTORY_LIMIT, RADIUS_OPTIONS_M,
};
use atlas_geo::{Acquirer, LocationError};

use crate::toast::Toast;
use crate::ui;
use crate::view::{self, HistoryItem, ResultsView};

/// Everything that can wake the event loop.
#[derive(Debug)]
pub enum AppMessage {
    Input(Event),
    LocationResolved(Result<Coordinates, LocationError>),
    SearchFinished(Result<SearchResponse, ApiError>),
    HistoryLoaded(Result<Vec<HistoryEntry>, ApiError>),
}

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Results,
}

/// Lifecycle of the user position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationStatus {
    /// Acquisition is running; searches wait for it.
    Pending,
    Acquired(Coordinates),
    Failed(LocationError),
}

impl LocationStatus {
    #[must_use]
    pub(crate) fn coordinates(&self) -> Option<Coordinates> {
        match self {
            LocationStatus::Acquired(position) => Some(*position),
            _ => None,
        }
    }

    /// Status-line text for the location indicator.
    #[must_use]
    pub(crate) fn text(&self) -> String {
        match self {
            LocationStatus::Pending => "Obtendo sua localização...".to_owned(),
            LocationStatus::Acquired(position) => {
                format!("Localização obtida ({})", format::coordinates_label(*position))
            }
            LocationStatus::Failed(LocationError::Unsupported) => {
                "Geolocalização não disponível".to_owned()
            }
            LocationStatus::Failed(error) => view::location_error_notice(*error).to_owned(),
        }
    }
}

pub struct App {
    client: AtlasClient,
    acquirer: Acquirer,
    tx: mpsc::Sender<AppMessage>,

    pub(crate) query: String,
    pub(crate) radius_idx: usize,
    pub(crate) location: LocationStatus,
    /// One search in flight at a time; checked before dispatching.
    pub(crate) searching: bool,
    /// Results region; `None` means hidden.
    pub(crate) results: Option<ResultsView>,
    pub(crate) history: Vec<HistoryItem>,
    pub(crate) toast: Toast,
    pub(crate) focus: Focus,
    pub(crate) should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(
        client: AtlasClient,
        acquirer: Acquirer,
        default_radius_m: u32,
        tx: mpsc::Sender<AppMessage>,
    ) -> Self {
        let radius_idx = RADIUS_OPTIONS_M
            .iter()
            .position(|&radius| radius == default_radius_m)
            .unwrap_or(0);
        Self {
            client,
            acquirer,
            tx,
            query: String::new(),
            radius_idx,
            location: LocationStatus::Pending,
            searching: false,
            results: None,
            history: Vec::new(),
            toast: Toast::default(),
            focus: Focus::Input,
            should_quit: false,
        }
    }

    /// Startup work: fire-and-forget position acquisition and the initial
    /// history fetch.
    pub fn bootstrap(&mut self) {
        self.request_location();
        self.refresh_history();
    }

    #[must_use]
    pub(crate) fn radius_m(&self) -> u32 {
        RADIUS_OPTIONS_M[self.radius_idx]
    }

    pub(crate) fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::Input(Event::Key(key)) => self.handle_key(key),
            AppMessage::Input(_) => {}
            AppMessage::LocationResolved(outcome) => self.on_location_resolved(outcome),
            AppMessage::SearchFinished(outcome) => self.on_search_finished(outcome),
            AppMessage::HistoryLoaded(outcome) => self.on_history_loaded(outcome),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.request_location();
            }
            KeyCode::Enter => self.submit_search(),
            KeyCode::Left => self.radius_idx = self.radius_idx.saturating_sub(1),
            KeyCode::Right => {
                self.radius_idx = (self.radius_idx + 1).min(RADIUS_OPTIONS_M.len() - 1);
            }
            KeyCode::Up => self.select_previous(),
            KeyCode::Down => self.select_next(),
            KeyCode::Backspace => {
                self.query.pop();
                self.focus = Focus::Input;
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.query.push(c);
                self.focus = Focus::Input;
            }
            _ => {}
        }
    }

    fn select_previous(&mut self) {
        if let Some(results) = self.results.as_mut() {
            results.selected = results.selected.saturating_sub(1);
            self.focus = Focus::Results;
        }
    }

    fn select_next(&mut self) {
        if let Some(results) = self.results.as_mut() {
            if results.selected + 1 < results.cards.len() {
                results.selected += 1;
            }
            self.focus = Focus::Results;
        }
    }

    /// Validates preconditions and dispatches one search.
    ///
    /// The checks run in a fixed order and nothing is sent, nor busy state
    /// touched, unless every one passes: non-empty trimmed query, then a
    /// known position, then no search already in flight.
    pub(crate) fn submit_search(&mut self) {
        let query = self.query.trim().to_owned();
        if query.is_empty() {
            self.toast
                .error("Por favor, digite o tipo de estabelecimento que deseja buscar");
            self.focus = Focus::Input;
            return;
        }

        let Some(position) = self.location.coordinates() else {
            self.toast
                .error("Aguardando sua localização. Por favor, permita o acesso à localização.");
            // A blocked submit retriggers acquisition.
            self.request_location();
            return;
        };

        // One search in flight at a time.
        if self.searching {
            return;
        }

        self.searching = true;
        self.results = None;
        let request = SearchRequest {
            query,
            latitude: position.latitude,
            longitude: position.longitude,
            radius: self.radius_m(),
        };
        tracing::info!(query = %request.query, radius = request.radius, "dispatching search");

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = client.search(&request).await;
            let _ = tx.send(AppMessage::SearchFinished(outcome)).await;
        });
    }

    /// Kicks off a fresh position acquisition. Every call performs a new
    /// lookup and the latest outcome wins.
    pub(crate) fn request_location(&mut self) {
        self.location = LocationStatus::Pending;
        let acquirer = self.acquirer.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = acquirer.acquire().await;
            let _ = tx.send(AppMessage::LocationResolved(outcome)).await;
        });
    }

    fn refresh_history(&self) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = client.history(HISTORY_LIMIT).await;
            let _ = tx.send(AppMessage::HistoryLoaded(outcome)).await;
        });
    }

    fn on_location_resolved(&mut self, outcome: Result<Coordinates, LocationError>) {
        match outcome {
            Ok(position) => {
                tracing::info!(
                    latitude = position.latitude,
                    longitude = position.longitude,
                    "position acquired"
                );
                self.location = LocationStatus::Acquired(position);
            }
            Err(error) => {
                tracing::warn!(error = %error, "position acquisition failed");
                self.location = LocationStatus::Failed(error);
                self.toast.error(view::location_error_notice(error));
            }
        }
    }

    fn on_search_finished(&mut self, outcome: Result<SearchResponse, ApiError>) {
        // Idle state is restored before looking at the outcome so no path
        // can leave the trigger disabled.
        self.searching = false;
        match outcome {
            Ok(response) => {
                self.apply_results(&response);
                self.refresh_history();
            }
            Err(error) => {
                tracing::error!(error = %error, "search request failed");
                self.toast
                    .error(format!("Erro: {}", view::search_error_message(&error)));
            }
        }
    }

    fn apply_results(&mut self, response: &SearchResponse) {
        // `count` is the service's authoritative figure; an inconsistent
        // `results` array must not resurrect the region.
        if response.count == 0 {
            self.toast.info(
                "Nenhum estabelecimento encontrado. Tente aumentar o raio de busca ou usar termos diferentes.",
            );
            self.results = None;
            return;
        }
        self.results = Some(ResultsView::build(response));
        self.focus = Focus::Results;
        self.toast
            .success(format::search_success_message(response.count, &response.query));
    }

    fn on_history_loaded(&mut self, outcome: Result<Vec<HistoryEntry>, ApiError>) {
        match outcome {
            Ok(entries) => self.history = view::history_items(&entries),
            // Never surfaced: a stale history panel must not block the
            // rest of the interface.
            Err(error) => tracing::warn!(error = %error, "history refresh failed"),
        }
    }
}

/// Forwards crossterm events into the app channel from a blocking reader.
///
/// The reader polls rather than parking in `read`: a dropped receiver is
/// noticed within one poll interval, so shutdown never waits for one last
/// key press.
pub fn spawn_input_reader(tx: mpsc::Sender<AppMessage>) {
    tokio::task::spawn_blocking(move || {
        forward_input_events(&tx, crossterm::event::poll, crossterm::event::read);
    });
}

/// Reader loop with the event source injected, so it can be exercised
/// without a real terminal.
fn forward_input_events<P, R>(tx: &mpsc::Sender<AppMessage>, mut poll: P, mut read: R)
where
    P: FnMut(Duration) -> std::io::Result<bool>,
    R: FnMut() -> std::io::Result<Event>,
{
    while !tx.is_closed() {
        match poll(Duration::from_millis(100)) {
            Ok(true) => {
                let Ok(event) = read() else { break };
                if tx.blocking_send(AppMessage::Input(event)).is_err() {
                    break;
                }
            }
            Ok(false) => {}
            Err(_) => break,
        }
    }
}

/// Drives the application: draw a frame, then wait for the next message or
/// the notification tick.
///
/// # Errors
///
/// Returns an error when the terminal cannot be drawn to.
pub async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut rx: mpsc::Receiver<AppMessage>,
) -> anyhow::Result<()>
where
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let mut tick = tokio::time::interval(Duration::from_millis(200));
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;
        if app.should_quit {
            break;
        }
        tokio::select! {
            Some(message) = rx.recv() => app.handle_message(message),
            _ = tick.tick() => app.toast.tick(Instant::now()),
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
