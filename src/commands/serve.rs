use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::StockCatalog;
use crate::server;
use crate::services::{new_shared_health_stats, FinMindClient, LatestView};
use crate::worker;

/// Startup sequence: validate config, load the catalog once, start the
/// periodic snapshot worker, then serve HTTP. Config or catalog failures are
/// fatal — the process must not begin serving without them.
pub async fn run(port: u16) -> Result<()> {
    println!("🚀 Starting finmap server on port {}", port);

    let config = Config::from_env()?;
    let client = FinMindClient::new(&config)?;

    println!("📚 Loading stock info catalog from FinMind...");
    let rows = client.stock_info().await?;
    if rows.is_empty() {
        return Err(AppError::Remote(
            "stock info catalog came back empty".to_string(),
        ));
    }
    let catalog = StockCatalog::from_rows(rows);
    println!("✅ Catalog loaded: {} stocks", catalog.len());

    let latest = LatestView::new();
    let health = new_shared_health_stats();

    tokio::spawn(worker::run_snapshot_worker(
        client,
        catalog,
        latest.clone(),
        health.clone(),
    ));

    server::serve(latest, health, port).await
}
