use crate::config::Config;
use crate::error::Result;
use crate::models::StockCatalog;
use crate::render::render_treemap;
use crate::services::{build_plot_rows, FinMindClient};
use std::path::PathBuf;

/// One-shot refresh: fetch a snapshot, run the pipeline, write the rendered
/// treemap to disk. Exercises the whole chain without the server.
pub async fn run(output: PathBuf) -> Result<()> {
    let config = Config::from_env()?;
    let client = FinMindClient::new(&config)?;

    println!("📚 Loading stock info catalog from FinMind...");
    let catalog = StockCatalog::from_rows(client.stock_info().await?);
    println!("✅ Catalog loaded: {} stocks", catalog.len());

    println!("📈 Fetching tick snapshot...");
    let snapshot = client.tick_snapshot().await?;
    let table = build_plot_rows(&snapshot, &catalog)?;
    if table.dropped_unmatched > 0 {
        println!(
            "⚠️  {} snapshot rows had no catalog entry and were dropped",
            table.dropped_unmatched
        );
    }

    let html = render_treemap(&table);
    tokio::fs::write(&output, &html).await?;

    println!(
        "✅ Wrote treemap ({} stocks, as of {}) to {}",
        table.rows.len(),
        table.as_of.format("%Y-%m-%d %H:%M:%S"),
        output.display()
    );

    Ok(())
}
