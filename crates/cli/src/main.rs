//! PhoneHub CLI - currency conversion and headless event replay.
//!
//! # Usage
//!
//! ```bash
//! # Convert an amount with the built-in rate table
//! phonehub convert 100 USD VND
//!
//! # Replay a scripted sequence of page events and print the final page state
//! phonehub replay script.json
//!
//! # Same, in real time and with JSON logs
//! phonehub --log-json replay script.json --realtime
//! ```
//!
//! # Commands
//!
//! - `convert` - Convert an amount between VND, USD and EUR
//! - `replay` - Run a replay script against an in-memory page

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "phonehub")]
#[command(author, version, about = "PhoneHub page engine tools")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between currencies
    Convert {
        /// Amount to convert
        amount: String,

        /// Source currency code
        from: String,

        /// Destination currency code
        to: String,
    },
    /// Replay page events from a JSON script
    Replay {
        /// Path to the replay script
        script: PathBuf,

        /// Time to let timers and animations run after the last event
        #[arg(long, default_value_t = 4000)]
        settle_ms: u64,

        /// Wait in real time instead of on a virtual clock
        #[arg(long)]
        realtime: bool,
    },
}

fn init_tracing(json: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "phonehub_storefront=info,phonehub_cli=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Convert { amount, from, to } => {
            println!("{}", commands::convert::run(&amount, &from, &to)?);
        }
        Commands::Replay {
            script,
            settle_ms,
            realtime,
        } => {
            let report = commands::replay::run_file(&script, settle_ms, realtime)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
