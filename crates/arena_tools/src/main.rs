//! Arena development tools.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arena_tools::{catalog::Catalog, validate::validate_scenario_directory};

#[derive(Parser)]
#[command(name = "arena-tools")]
#[command(about = "Development tools for the arena")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate scenario files
    Validate {
        /// Directory holding .ron scenarios
        #[arg(default_value = "crates/arena_headless/scenarios")]
        path: PathBuf,
    },
    /// Print the weapon and class tables
    Catalog {
        /// Emit RON instead of text tables
        #[arg(long)]
        ron: bool,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path } => {
            tracing::info!("Validating scenarios in: {}", path.display());
            match validate_scenario_directory(&path) {
                Ok(count) => tracing::info!("Validation passed ({count} files)"),
                Err(e) => {
                    tracing::error!("Validation failed: {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Catalog { ron } => {
            let catalog = Catalog::collect();
            if ron {
                match catalog.to_ron() {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        tracing::error!("Failed to serialize catalog: {e}");
                        std::process::exit(1);
                    }
                }
            } else {
                print!("{}", catalog.to_text());
            }
        }
    }
}
