use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use classrail_core::AppConfig;

mod commands;

/// Environment switch equivalent to `--reduce-motion`
const REDUCE_MOTION_ENV: &str = "CLASSRAIL_REDUCE_MOTION";

#[derive(Parser)]
#[command(name = "classrail")]
#[command(author, version, about = "Pick your class from a momentum-scrolling card rail")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Disable idle auto-scroll (reduced-motion preference)
    #[arg(long, global = true)]
    reduce_motion: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// List the class catalog
    Cards {
        /// Show a single class by name
        name: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear the local sign-in flag
    Logout,
    /// Show the effective configuration
    Config {
        /// Write the default configuration file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    init_logging(&config)?;

    match cli.command {
        Some(Commands::Run) | None => {
            let env = std::env::var(REDUCE_MOTION_ENV).ok();
            let reduce_motion = reduced_motion(cli.reduce_motion, env.as_deref(), &config);
            commands::run::run(config, reduce_motion)
        }
        Some(Commands::Cards { name, json }) => commands::cards::run(name.as_deref(), json),
        Some(Commands::Logout) => commands::logout::run(&config),
        Some(Commands::Config { init }) => commands::config::run(&config, init),
    }
}

/// Log to a file under the data directory; stdout belongs to the TUI
fn init_logging(config: &AppConfig) -> Result<()> {
    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&log_path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}

/// The flag, the environment and the config file can each request reduced motion
fn reduced_motion(flag: bool, env: Option<&str>, config: &AppConfig) -> bool {
    let from_env = matches!(env.map(str::trim), Some("1") | Some("true") | Some("yes"));
    flag || from_env || config.ui.reduce_motion
}
