//! Slot Watch CLI
//!
//! Polls the appointment calendar and alerts when a day opens up.

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use slot_watch::{
    error::Result,
    models::Config,
    pipeline::{self, Watcher},
    services::{Alerter, CalendarClassifier, HttpFetcher, Reporter},
};

/// slot-watch - Appointment Slot Watcher
#[derive(Parser, Debug)]
#[command(
    name = "slot-watch",
    version,
    about = "Watches an appointment calendar for open slots"
)]

struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "slot-watch.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check every configured month on a fixed interval, forever
    Watch,

    /// Check every configured month once and exit
    Check {
        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Classify a saved calendar page
    Classify {
        /// HTML file to read
        file: PathBuf,

        /// Month number the page belongs to
        #[arg(long, default_value_t = 1)]
        month: u32,

        /// Year the page belongs to
        #[arg(long, default_value_t = 2025)]
        year: i32,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::debug!("Using configuration from {}", cli.config.display());

    match cli.command.unwrap_or(Command::Watch) {
        Command::Watch => {
            config.validate()?;
            log::info!(
                "Watching {} months every {}s",
                config.months.len(),
                config.schedule.interval_secs
            );

            let fetcher = HttpFetcher::new(&config)?;
            let alerter = Alerter::from_config(&config.alert);
            let mut watcher = Watcher::new(config, Box::new(fetcher), alerter, io::stdout())?;
            watcher.run().await?;
        }

        Command::Check { json } => {
            config.validate()?;
            let fetcher = HttpFetcher::new(&config)?;
            let classifier = CalendarClassifier::new()?;
            let result = pipeline::run_check(&config.months, &fetcher, &classifier).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                Reporter::new(config.target.clone()).render(&result, &mut io::stdout())?;
            }
        }

        Command::Classify { file, month, year } => {
            let html = fs::read_to_string(&file)?;
            let classifier = CalendarClassifier::new()?;
            let report = classifier.classify(month, year, &html);

            log::info!(
                "Classified {} entries from {}",
                report.status_counts.total(),
                file.display()
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({} months)", config.months.len());
        }
    }

    Ok(())
}
