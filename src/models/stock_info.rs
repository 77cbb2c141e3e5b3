use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static per-stock metadata from the FinMind `TaiwanStockInfo` dataset.
///
/// The dataset also carries `type` and `date` columns; they play no part in
/// the analysis and are dropped on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockInfo {
    pub stock_id: String,
    pub industry_category: String,
    pub stock_name: String,
}

/// The reference catalog, indexed by stock id. Loaded once at startup and
/// held for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct StockCatalog {
    by_id: HashMap<String, StockInfo>,
}

impl StockCatalog {
    /// Index catalog rows by stock id. Duplicate ids keep the last row seen.
    pub fn from_rows(rows: Vec<StockInfo>) -> Self {
        let by_id = rows
            .into_iter()
            .map(|row| (row.stock_id.clone(), row))
            .collect();
        Self { by_id }
    }

    pub fn get(&self, stock_id: &str) -> Option<&StockInfo> {
        self.by_id.get(stock_id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
