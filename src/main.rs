// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Load config, gather the search inputs, run the harvest

mod config;
mod errors;
mod handlers;
mod models;
mod services;

use clap::Parser;
use config::Config;
use dotenv::dotenv;
use handlers::{harvest, Cli, HarvestOutcome};
use services::{exporter, CollectionObserver, GooglePlacesClient, LogProgress, NoProgress};
use std::io;
use std::process;
use validator::Validate;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    let cli = Cli::parse();

    // 2. Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", &config.log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("{}", e);
        process::exit(1);
    }

    // 4. Gather and validate the search inputs
    let request = {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        cli.search_request(&mut stdin.lock(), &mut stdout)
    };
    let request = match request {
        Ok(request) => request,
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    };
    if let Err(e) = request.validate() {
        log::error!("Invalid input: {}", e);
        process::exit(1);
    }

    // 5. Build the API client once and run the pipeline
    let client = GooglePlacesClient::from_config(&config)?;
    let destination = cli.output.clone().unwrap_or_else(|| {
        exporter::default_output_path(&config.output_dir, &request.query, &request.location)
    });

    let mut observer: Box<dyn CollectionObserver> = if cli.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(LogProgress)
    };

    match harvest(
        &client,
        &request,
        &destination,
        config.page_delay(),
        observer.as_mut(),
    )
    .await
    {
        Ok(HarvestOutcome::Exported { path, stats }) => {
            log::info!(
                "Saved {} places to {}",
                stats.places_collected,
                path.display()
            );
            Ok(())
        }
        Ok(HarvestOutcome::NoData { stats }) => {
            log::info!(
                "Nothing to export after {} API requests; no file written",
                stats.api_requests
            );
            Ok(())
        }
        Ok(HarvestOutcome::ExportFailed { error, stats }) => {
            log::error!(
                "Export failed, {} collected places were not saved: {}",
                stats.places_collected,
                error
            );
            process::exit(1);
        }
        Err(e) if e.is_configuration() => {
            log::error!("Invalid input: {}", e);
            process::exit(1);
        }
        Err(e) => {
            log::error!("Harvest failed: {}", e);
            process::exit(1);
        }
    }
}
