mod app;
mod carousel;
mod config;
mod fetcher;
mod model;
mod rail;
mod transform;
mod utils;
mod views;

use std::fs::OpenOptions;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use app::{App, terminal};
use config::{AppConfig, config_path, load_config};
use fetcher::{CheapSharkClient, DealSource};
use tracing::{Level, error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let (config, config_error) = match load_config(&config_path()) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    let config = Arc::new(config);

    // The terminal belongs to the UI, so logs go to a file.
    init_logging(&config);
    if let Some(e) = config_error {
        warn!("Config load error, using defaults: {}", e);
    }

    std::panic::set_hook(Box::new(|panic_info| {
        let _ = terminal::restore();
        error!("Panic occurred: {}", panic_info);
        eprintln!("Panic occurred: {}", panic_info);
    }));

    let source: Arc<dyn DealSource> = match CheapSharkClient::new(&config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            eprintln!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut tui = match terminal::init() {
        Ok(t) => t,
        Err(e) => {
            error!("Terminal setup failed: {}", e);
            eprintln!("Terminal setup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("SteamSaver+ started");
    let result = App::new(config.clone(), source).run(&mut tui).await;

    if let Err(e) = terminal::restore() {
        warn!("Terminal restore failed: {}", e);
    }
    match result {
        Ok(()) => {
            info!("SteamSaver+ exited");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Fatal: {}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &AppConfig) {
    let level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);
    match OpenOptions::new().create(true).append(true).open(&config.log_file) {
        Ok(file) => tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(level)
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_max_level(level)
            .init(),
    }
}
