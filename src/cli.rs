use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

#[derive(Parser)]
#[command(name = "idxpulse")]
#[command(about = "IDX market snapshot pipeline", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape all symbols once and rebuild the JSON cache
    Scrape {
        /// Path to a symbol registry JSON file (default: built-in IDX list)
        #[arg(short, long)]
        symbols: Option<PathBuf>,
    },
    /// Render the static dashboard HTML from the cached data
    Generate {
        /// Output file (default: index.html under the data root)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Start the dashboard server with a background refresh worker
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 8686)]
        port: u16,
    },
    /// Show cache status
    Status,
}

pub fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape { symbols } => {
            commands::scrape::run(symbols);
        }
        Commands::Generate { output } => {
            commands::generate::run(output);
        }
        Commands::Serve { port } => {
            commands::serve::run(port);
        }
        Commands::Status => {
            commands::status::run();
        }
    }
}
