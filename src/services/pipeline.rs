//! Feature pipeline: turns one raw tick snapshot plus the stock catalog into
//! plot-ready rows for the treemap.
//!
//! Pure transformation, no IO. Deterministic for identical inputs; aggregate
//! sums follow the snapshot's row order.

use crate::constants::{is_reserved_category, TOP_STOCKS_PER_INDUSTRY};
use crate::error::{AppError, Result};
use crate::models::{PlotRow, PlotTable, StockCatalog, TickSnapshot};
use std::collections::HashMap;

/// Build the plot-ready row set from a snapshot and the reference catalog.
///
/// - As-of time is the maximum timestamp observed across the snapshot; an
///   empty snapshot is an error (`EmptySnapshot`), not a panic.
/// - Snapshot rows with no catalog entry are dropped and counted in
///   `dropped_unmatched` (inner-join semantics, non-fatal).
/// - Rows in reserved categories (market aggregates) are excluded.
/// - `industry_trading_money` is summed per category before the top-5 filter,
///   so it covers every matched stock of the category, retained or not.
/// - Within each category the top 5 rows by `trading_money` survive. The
///   ranking is a stable descending sort: on an exact tie, rows earlier in
///   the snapshot win. Output rows come back in that ranking order.
pub fn build_plot_rows(snapshot: &[TickSnapshot], catalog: &StockCatalog) -> Result<PlotTable> {
    if snapshot.is_empty() {
        return Err(AppError::EmptySnapshot);
    }

    let as_of = snapshot
        .iter()
        .map(|row| row.date)
        .max()
        .ok_or(AppError::EmptySnapshot)?;

    // Join with the catalog and drop reserved categories.
    let mut rows: Vec<PlotRow> = Vec::with_capacity(snapshot.len());
    let mut dropped_unmatched = 0usize;

    for tick in snapshot {
        let Some(info) = catalog.get(&tick.stock_id) else {
            dropped_unmatched += 1;
            continue;
        };
        if is_reserved_category(&info.industry_category) {
            continue;
        }
        rows.push(PlotRow {
            stock_id: tick.stock_id.clone(),
            industry_category: info.industry_category.clone(),
            stock_name: info.stock_name.clone(),
            trading_money: tick.total_amount,
            change_pct: tick.change_rate,
            close: tick.close,
            industry_trading_money: 0.0,
            change_pct_label: String::new(),
        });
    }

    // Per-industry trading value over the full (pre-filter) row set,
    // broadcast back onto every row of the group.
    let mut industry_totals: HashMap<String, f64> = HashMap::new();
    for row in &rows {
        *industry_totals
            .entry(row.industry_category.clone())
            .or_insert(0.0) += row.trading_money;
    }
    for row in &mut rows {
        if let Some(total) = industry_totals.get(&row.industry_category) {
            row.industry_trading_money = *total;
        }
    }

    // Stable descending rank by trading value; ties keep snapshot order.
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| rows[b].trading_money.total_cmp(&rows[a].trading_money));

    // Keep at most the top 5 per category, walking in rank order.
    let mut kept_per_industry: HashMap<String, usize> = HashMap::new();
    let mut plot_rows: Vec<PlotRow> = Vec::new();

    for &idx in &order {
        let count = kept_per_industry
            .entry(rows[idx].industry_category.clone())
            .or_insert(0);
        if *count < TOP_STOCKS_PER_INDUSTRY {
            *count += 1;
            let mut row = rows[idx].clone();
            row.stock_name = format!("{} {}", row.stock_id, row.stock_name);
            row.change_pct_label = row.change_pct.to_string();
            plot_rows.push(row);
        }
    }

    Ok(PlotTable {
        rows: plot_rows,
        as_of,
        dropped_unmatched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StockInfo;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 29)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn tick(stock_id: &str, total_amount: f64, change_rate: f64, close: f64) -> TickSnapshot {
        TickSnapshot {
            stock_id: stock_id.to_string(),
            date: at(13, 30),
            total_amount,
            change_rate,
            close,
        }
    }

    fn info(stock_id: &str, industry_category: &str, stock_name: &str) -> StockInfo {
        StockInfo {
            stock_id: stock_id.to_string(),
            industry_category: industry_category.to_string(),
            stock_name: stock_name.to_string(),
        }
    }

    #[test]
    fn test_single_stock_exact_values() {
        let snapshot = vec![tick("2330", 1_000_000.0, 1.5, 550.0)];
        let catalog = StockCatalog::from_rows(vec![info("2330", "半導體業", "台積電")]);

        let table = build_plot_rows(&snapshot, &catalog).unwrap();
        assert_eq!(table.rows.len(), 1);

        let row = &table.rows[0];
        assert_eq!(row.trading_money, 1_000_000.0);
        assert_eq!(row.industry_trading_money, 1_000_000.0);
        assert_eq!(row.stock_name, "2330 台積電");
        assert_eq!(row.change_pct_label, "1.5");
        assert_eq!(row.close, 550.0);
        assert_eq!(table.dropped_unmatched, 0);
    }

    #[test]
    fn test_empty_snapshot_is_an_error() {
        let catalog = StockCatalog::from_rows(vec![info("2330", "半導體業", "台積電")]);
        assert!(matches!(
            build_plot_rows(&[], &catalog),
            Err(AppError::EmptySnapshot)
        ));
    }

    #[test]
    fn test_as_of_is_max_timestamp() {
        let mut early = tick("2330", 1.0, 0.0, 1.0);
        early.date = at(9, 5);
        let mut late = tick("2317", 1.0, 0.0, 1.0);
        late.date = at(13, 25);

        let catalog = StockCatalog::from_rows(vec![
            info("2330", "半導體業", "台積電"),
            info("2317", "其他電子業", "鴻海"),
        ]);

        let table = build_plot_rows(&[early, late], &catalog).unwrap();
        assert_eq!(table.as_of, at(13, 25));
    }

    #[test]
    fn test_unmatched_rows_are_dropped_and_counted() {
        let snapshot = vec![
            tick("2330", 100.0, 0.5, 10.0),
            tick("0000", 999.0, 0.5, 10.0),
        ];
        let catalog = StockCatalog::from_rows(vec![info("2330", "半導體業", "台積電")]);

        let table = build_plot_rows(&snapshot, &catalog).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.dropped_unmatched, 1);
        assert_eq!(table.rows[0].stock_id, "2330");
    }

    #[test]
    fn test_reserved_categories_never_survive() {
        let snapshot = vec![
            tick("TAIEX", 9_999.0, 0.1, 1.0),
            tick("TPEx", 8_888.0, 0.1, 1.0),
            tick("2330", 100.0, 0.5, 10.0),
        ];
        let catalog = StockCatalog::from_rows(vec![
            info("TAIEX", "Index", "加權指數"),
            info("TPEx", "大盤", "櫃買指數"),
            info("2330", "半導體業", "台積電"),
        ]);

        let table = build_plot_rows(&snapshot, &catalog).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert!(table
            .rows
            .iter()
            .all(|r| !crate::constants::is_reserved_category(&r.industry_category)));
        // Reserved rows are excluded, not unmatched.
        assert_eq!(table.dropped_unmatched, 0);
    }

    #[test]
    fn test_top_five_of_eight_survive() {
        let snapshot: Vec<TickSnapshot> = (1..=8)
            .map(|i| tick(&format!("{:04}", i), (i as f64) * 100.0, 0.0, 1.0))
            .collect();
        let catalog = StockCatalog::from_rows(
            (1..=8)
                .map(|i| info(&format!("{:04}", i), "電機機械", &format!("股票{}", i)))
                .collect(),
        );

        let table = build_plot_rows(&snapshot, &catalog).unwrap();
        assert_eq!(table.rows.len(), 5);

        // The five largest by trading value, in descending order.
        let ids: Vec<&str> = table.rows.iter().map(|r| r.stock_id.as_str()).collect();
        assert_eq!(ids, vec!["0008", "0007", "0006", "0005", "0004"]);
    }

    #[test]
    fn test_tie_at_cutoff_keeps_earlier_snapshot_row() {
        // Six stocks; the 5th and 6th by rank tie on trading value. The one
        // earlier in the snapshot must win the last slot.
        let snapshot = vec![
            tick("A", 600.0, 0.0, 1.0),
            tick("B", 500.0, 0.0, 1.0),
            tick("C", 400.0, 0.0, 1.0),
            tick("D", 300.0, 0.0, 1.0),
            tick("E", 200.0, 0.0, 1.0),
            tick("F", 200.0, 0.0, 1.0),
        ];
        let catalog = StockCatalog::from_rows(
            ["A", "B", "C", "D", "E", "F"]
                .iter()
                .map(|id| info(id, "水泥工業", id))
                .collect(),
        );

        let table = build_plot_rows(&snapshot, &catalog).unwrap();
        let ids: Vec<&str> = table.rows.iter().map(|r| r.stock_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C", "D", "E"]);
        assert!(!ids.contains(&"F"));
    }

    #[test]
    fn test_industry_total_covers_filtered_out_rows() {
        // Six stocks in one category: the top-5 filter drops one, but the
        // category total still includes it, and every survivor carries the
        // same total.
        let snapshot: Vec<TickSnapshot> = (1..=6)
            .map(|i| tick(&format!("{:04}", i), (i as f64) * 10.0, 0.0, 1.0))
            .collect();
        let catalog = StockCatalog::from_rows(
            (1..=6)
                .map(|i| info(&format!("{:04}", i), "食品工業", &format!("股票{}", i)))
                .collect(),
        );

        let table = build_plot_rows(&snapshot, &catalog).unwrap();
        assert_eq!(table.rows.len(), 5);

        let expected_total: f64 = (1..=6).map(|i| (i as f64) * 10.0).sum();
        for row in &table.rows {
            assert!((row.industry_trading_money - expected_total).abs() < 1e-9);
        }
    }

    #[test]
    fn test_row_count_formula_across_categories() {
        // 3 semiconductor stocks, 7 food stocks, 1 reserved index row:
        // expect 3 + 5 rows.
        let mut snapshot = Vec::new();
        let mut catalog_rows = Vec::new();
        for i in 1..=3 {
            let id = format!("1{:03}", i);
            snapshot.push(tick(&id, (i as f64) * 7.0, 0.0, 1.0));
            catalog_rows.push(info(&id, "半導體業", &format!("半導{}", i)));
        }
        for i in 1..=7 {
            let id = format!("2{:03}", i);
            snapshot.push(tick(&id, (i as f64) * 3.0, 0.0, 1.0));
            catalog_rows.push(info(&id, "食品工業", &format!("食品{}", i)));
        }
        snapshot.push(tick("TAIEX", 1_000_000.0, 0.0, 1.0));
        catalog_rows.push(info("TAIEX", "Index", "加權指數"));

        let table =
            build_plot_rows(&snapshot, &StockCatalog::from_rows(catalog_rows)).unwrap();
        assert_eq!(table.rows.len(), 8);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let snapshot: Vec<TickSnapshot> = (1..=20)
            .map(|i| tick(&format!("{:04}", i), 0.1 * (i as f64) + 0.01, 0.0, 1.0))
            .collect();
        let catalog = StockCatalog::from_rows(
            (1..=20)
                .map(|i| {
                    let industry = if i % 2 == 0 { "光電業" } else { "電子零組件業" };
                    info(&format!("{:04}", i), industry, &format!("股票{}", i))
                })
                .collect(),
        );

        let first = build_plot_rows(&snapshot, &catalog).unwrap();
        let second = build_plot_rows(&snapshot, &catalog).unwrap();

        assert_eq!(first.rows.len(), second.rows.len());
        for (a, b) in first.rows.iter().zip(second.rows.iter()) {
            assert_eq!(a.industry_trading_money, b.industry_trading_money);
        }
    }

    #[test]
    fn test_output_is_descending_by_trading_money() {
        let snapshot = vec![
            tick("A", 10.0, 0.0, 1.0),
            tick("B", 30.0, 0.0, 1.0),
            tick("C", 20.0, 0.0, 1.0),
        ];
        let catalog = StockCatalog::from_rows(vec![
            info("A", "水泥工業", "甲"),
            info("B", "食品工業", "乙"),
            info("C", "水泥工業", "丙"),
        ]);

        let table = build_plot_rows(&snapshot, &catalog).unwrap();
        let money: Vec<f64> = table.rows.iter().map(|r| r.trading_money).collect();
        assert_eq!(money, vec![30.0, 20.0, 10.0]);
    }
}
