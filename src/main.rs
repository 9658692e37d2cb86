//! Wikipedia Places CLI - List named places with Wikipedia links
//!
//! Fetches the places document once (or periodically with `--watch`) and
//! prints one line per place.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use wikiplaces::app::App;
use wikiplaces::cli::{Cli, RunConfig};
use wikiplaces::config::{ConfigKey, Configuration};
use wikiplaces::logging::init_logging;
use wikiplaces::network::{NetworkManager, PlacesService, PlacesServing};
use wikiplaces::refresh::{RefreshConfig, RefreshHandle, RefreshMessage};

/// Prints the current place list, or the load error, for the app
fn print_app(app: &App, run_config: &RunConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(message) = app.error_message() {
        eprintln!("{}", message);
        return Ok(());
    }
    let output = app.render(run_config.format)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

/// Runs the watch loop until Ctrl-C
async fn watch(
    app: &mut App,
    places_service: Arc<dyn PlacesServing>,
    run_config: &RunConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(interval) = run_config.watch_interval else {
        return Ok(());
    };

    let mut handle = RefreshHandle::spawn(
        places_service,
        RefreshConfig {
            interval,
            enabled: true,
        },
    );

    loop {
        tokio::select! {
            message = handle.recv() => {
                match message {
                    Some(RefreshMessage::PlacesUpdated(places)) => {
                        app.apply_result(Ok(places));
                        print_app(app, run_config)?;
                    }
                    Some(RefreshMessage::RefreshError(error)) => {
                        app.apply_result(Err(error));
                        print_app(app, run_config)?;
                    }
                    Some(RefreshMessage::RefreshStarted) => {
                        tracing::info!("Refreshing places");
                    }
                    Some(RefreshMessage::RefreshCompleted) => {
                        tracing::info!("Refresh completed");
                    }
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                handle.shutdown().await;
                break;
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let run_config = match RunConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    init_logging(run_config.verbosity);

    let mut configuration = match Configuration::load(run_config.config_path.as_deref()) {
        Ok(configuration) => configuration,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };
    if let Some(base_url) = &run_config.base_url {
        configuration = configuration.with_value(ConfigKey::BaseUrlPlaces, base_url.clone());
    }
    let schema_url = configuration
        .value(ConfigKey::SchemaUrlWikipedia)
        .map(str::to_string);

    let network_manager = Arc::new(NetworkManager::new(Arc::new(configuration)));
    let places_service: Arc<dyn PlacesServing> = Arc::new(
        PlacesService::new(network_manager).with_cache_config(run_config.cache_config),
    );

    let mut app = App::new(Arc::clone(&places_service), schema_url);

    // Initial load
    app.load_places().await;
    print_app(&app, &run_config)?;

    if run_config.watch_interval.is_some() {
        watch(&mut app, places_service, &run_config).await?;
        return Ok(ExitCode::SUCCESS);
    }

    if app.last_error.is_some() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
