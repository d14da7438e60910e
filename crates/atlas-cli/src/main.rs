mod app;
mod toast;
mod ui;
mod view;

use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use atlas_client::AtlasClient;
use atlas_core::types::{Coordinates, RADIUS_OPTIONS_M};
use atlas_core::{AppConfig, LocationProviderKind};
use atlas_geo::{Acquirer, IpLookupService, Provider};

use crate::app::App;

#[derive(Debug, Parser)]
#[command(name = "atlas")]
#[command(about = "Terminal client for the Atlas establishment search service")]
struct Cli {
    /// Atlas service base URL.
    #[arg(long)]
    server: Option<String>,

    /// Fixed latitude; skips the IP lookup. Requires --lng.
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Fixed longitude; skips the IP lookup. Requires --lat.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,

    /// Initial search radius in meters.
    #[arg(long)]
    radius: Option<u32>,

    /// Log level filter written to the log file.
    #[arg(long)]
    log_level: Option<String>,
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) -> anyhow::Result<()> {
    if let Some(server) = &cli.server {
        config.server_url.clone_from(server);
    }
    if let (Some(latitude), Some(longitude)) = (cli.lat, cli.lng) {
        config.fixed_position = Some(Coordinates {
            latitude,
            longitude,
        });
        config.location_provider = LocationProviderKind::Fixed;
    }
    if let Some(radius) = cli.radius {
        anyhow::ensure!(
            RADIUS_OPTIONS_M.contains(&radius),
            "--radius must be one of {RADIUS_OPTIONS_M:?} (got {radius})"
        );
        config.default_radius_m = radius;
    }
    if let Some(level) = &cli.log_level {
        config.log_level.clone_from(level);
    }
    Ok(())
}

/// Sends log output to a file. The interface owns the terminal, so nothing
/// may write to stdout or stderr while it runs.
fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("opening log file {}", config.log_file.display()))?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn build_provider(config: &AppConfig) -> Provider {
    match config.location_provider {
        LocationProviderKind::Fixed => config
            .fixed_position
            .map_or(Provider::Disabled, Provider::Fixed),
        LocationProviderKind::Disabled => Provider::Disabled,
        LocationProviderKind::Service => match IpLookupService::new(&config.geolocate_url) {
            Ok(service) => Provider::Service(service),
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    url = %config.geolocate_url,
                    "geolocation service unusable, position lookups disabled"
                );
                Provider::Disabled
            }
        },
    }
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = atlas_core::load_app_config()?;
    apply_overrides(&mut config, &cli)?;
    init_tracing(&config)?;
    tracing::info!(
        server = %config.server_url,
        provider = %config.location_provider,
        radius = config.default_radius_m,
        "atlas starting"
    );

    let client = AtlasClient::new(&config.server_url, config.http_timeout_secs)?;
    let acquirer = Acquirer::new(
        build_provider(&config),
        Duration::from_secs(config.location_timeout_secs),
    );

    let (tx, rx) = mpsc::channel(64);
    let mut app = App::new(client, acquirer, config.default_radius_m, tx.clone());
    app.bootstrap();
    app::spawn_input_reader(tx);

    let mut terminal = setup_terminal()?;
    let result = app::run(&mut terminal, app, rx).await;
    let restored = restore_terminal(&mut terminal);
    result.and(restored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            server_url: "http://127.0.0.1:8000".to_string(),
            http_timeout_secs: 30,
            location_provider: LocationProviderKind::Service,
            geolocate_url: "http://ip-api.com/json".to_string(),
            location_timeout_secs: 10,
            fixed_position: None,
            default_radius_m: 5000,
            log_level: "info".to_string(),
            log_file: "atlas.log".into(),
        }
    }

    #[test]
    fn coordinate_flags_switch_to_a_fixed_position() {
        let cli = Cli::parse_from(["atlas", "--lat", "-23.5505", "--lng", "-46.6333"]);
        let mut config = base_config();
        apply_overrides(&mut config, &cli).expect("overrides should apply");
        assert_eq!(config.location_provider, LocationProviderKind::Fixed);
        let position = config.fixed_position.expect("position should be set");
        assert!((position.latitude - -23.5505).abs() < f64::EPSILON);
        assert!((position.longitude - -46.6333).abs() < f64::EPSILON);
    }

    #[test]
    fn lat_without_lng_is_rejected_at_parse_time() {
        let parsed = Cli::try_parse_from(["atlas", "--lat", "-23.5505"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn radius_override_must_be_a_known_option() {
        let cli = Cli::parse_from(["atlas", "--radius", "3000"]);
        let mut config = base_config();
        let error = apply_overrides(&mut config, &cli).expect_err("3000 is not an option");
        assert!(error.to_string().contains("--radius"));

        let cli = Cli::parse_from(["atlas", "--radius", "20000"]);
        apply_overrides(&mut config, &cli).expect("20000 is an option");
        assert_eq!(config.default_radius_m, 20_000);
    }

    #[test]
    fn server_and_log_level_overrides_apply() {
        let cli = Cli::parse_from([
            "atlas",
            "--server",
            "http://10.0.0.5:9000",
            "--log-level",
            "debug",
        ]);
        let mut config = base_config();
        apply_overrides(&mut config, &cli).expect("overrides should apply");
        assert_eq!(config.server_url, "http://10.0.0.5:9000");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn fixed_provider_without_position_disables_lookups() {
        let mut config = base_config();
        config.location_provider = LocationProviderKind::Fixed;
        assert!(matches!(build_provider(&config), Provider::Disabled));

        config.fixed_position = Some(Coordinates {
            latitude: -23.5505,
            longitude: -46.6333,
        });
        assert!(matches!(build_provider(&config), Provider::Fixed(_)));
    }
}
