use chrono::NaiveDateTime;
use serde::Serialize;

/// One plot-ready row: a stock that survived the join, the reserved-category
/// exclusion and the per-industry top-5 filter.
#[derive(Debug, Clone, Serialize)]
pub struct PlotRow {
    pub stock_id: String,
    pub industry_category: String,

    /// Display form: `"{stock_id} {stock_name}"`.
    pub stock_name: String,

    /// Cumulative traded value for the stock (TWD).
    pub trading_money: f64,

    /// Percent price change versus the prior reference price.
    pub change_pct: f64,

    pub close: f64,

    /// Sum of `trading_money` over every matched, non-reserved stock of this
    /// industry, computed before the top-5 filter. Identical across all
    /// surviving rows of a category.
    pub industry_trading_money: f64,

    /// Display rendering of `change_pct`.
    pub change_pct_label: String,
}

/// Feature-pipeline output: plot rows plus the snapshot's as-of time.
#[derive(Debug, Clone)]
pub struct PlotTable {
    /// Rows ordered by `trading_money` descending; ties keep snapshot order.
    pub rows: Vec<PlotRow>,

    /// Maximum timestamp observed across the snapshot.
    pub as_of: NaiveDateTime,

    /// Snapshot rows dropped for lack of a catalog entry. Non-fatal, surfaced
    /// for diagnosis.
    pub dropped_unmatched: usize,
}
