use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use edc_settings::cli::{self, Command};
use edc_settings::{config, FileStore, SettingsController, SettingsError, SettingsEvent, UnitSystem};

/// Preset settings for the enhanced driver camera
#[derive(Parser)]
#[command(name = "edc-settings")]
#[command(about = "Enhanced driver camera settings (line commands on stdin, `help` lists them)")]
#[command(version)]
struct Args {
    /// Config file to use instead of the standard location
    #[arg(long, env = "EDC_SETTINGS_CONFIG")]
    config: Option<PathBuf>,

    /// Initial display units (metric or imperial)
    #[arg(long)]
    units: Option<UnitSystem>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => config::load(),
    };
    if let Some(units) = args.units {
        config.units = units;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let runtime = tokio::runtime::Runtime::new()?;
    let store = FileStore::new(config.storage.clone(), runtime.handle().clone())?;

    let mut controller = SettingsController::new(store.clone(), config.units);
    let updates = controller.subscribe();
    let handle = controller.handle();

    controller.fetch_defaults(config.defaults_source(), runtime.handle());

    let printer = std::thread::spawn(move || {
        for view in updates.iter() {
            println!("{}", cli::render(&view));
        }
    });

    let input = std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match cli::parse_command(&line) {
                Ok(Command::Event(event)) => {
                    if handle.send(event).is_err() {
                        break;
                    }
                }
                Ok(Command::Quit) => break,
                Err(SettingsError::Usage(e)) => {
                    let _ = e.print();
                }
                Err(e) => warn!("{}", e),
            }
        }
        let _ = handle.send(SettingsEvent::Shutdown);
    });

    info!("Enhanced driver camera settings started");
    controller.run();

    runtime.block_on(store.flush());
    drop(controller);
    let _ = input.join();
    let _ = printer.join();
    Ok(())
}
