//! Chefbook CLI - build-time tools.
//!
//! # Usage
//!
//! ```bash
//! # Print every chef profile path, one per line
//! chefbook-cli routes chefs
//!
//! # Same, as a JSON array of route params
//! chefbook-cli routes chefs --json
//! ```
//!
//! # Commands
//!
//! - `routes chefs` - Enumerate chef profile paths for static generation

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "chefbook-cli")]
#[command(author, version, about = "Chefbook CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate page routes from the content store
    Routes {
        #[command(subcommand)]
        target: RoutesTarget,
    },
}

#[derive(Subcommand)]
enum RoutesTarget {
    /// Chef profile paths
    Chefs {
        /// Print route params as JSON instead of paths
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Routes { target } => match target {
            RoutesTarget::Chefs { json } => commands::routes::chefs(json).await?,
        },
    }
    Ok(())
}
