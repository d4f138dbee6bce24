//! Meal Train CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! mealtrain migrate
//!
//! # Seed the pickup-location calendar (hubs x allowed dates, idempotent)
//! mealtrain seed locations
//!
//! # Remove pickup locations with zero signups (destructive, gated)
//! mealtrain seed clear --confirm
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mealtrain")]
#[command(author, version, about = "Meal Train CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed or prune the pickup-location calendar
    Seed {
        #[command(subcommand)]
        action: SeedAction,
    },
}

#[derive(Subcommand)]
enum SeedAction {
    /// Insert the hub x allowed-date calendar, skipping existing pairs
    Locations,
    /// Delete every pickup location with zero signups
    Clear {
        /// Required; the command refuses to run without it
        #[arg(long)]
        confirm: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { action } => match action {
            SeedAction::Locations => commands::seed::locations().await?,
            SeedAction::Clear { confirm } => commands::seed::clear(confirm).await?,
        },
    }
    Ok(())
}
