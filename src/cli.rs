use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;
use crate::constants::DEFAULT_PORT;
use crate::error::Result;

#[derive(Parser)]
#[command(name = "finmap")]
#[command(about = "Taiwan stock trading-value treemap server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the treemap server
    Serve {
        /// HTTP listen port
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Fetch one snapshot and write the rendered treemap to a file
    Render {
        /// Output path for the HTML document
        #[arg(short, long, default_value = "treemap.html")]
        output: PathBuf,
    },
}

pub async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await,
        Commands::Render { output } => commands::render::run(output).await,
    }
}
