mod cli;
mod commands;
mod config;
mod constants;
mod error;
mod models;
mod render;
mod server;
mod services;
mod worker;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
