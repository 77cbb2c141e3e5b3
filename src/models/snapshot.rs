use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One stock's current tick data from the FinMind snapshot endpoint.
///
/// The wire rows carry more fields (bid/ask, intraday volume, tick type);
/// only the columns the feature pipeline consumes are modeled here and the
/// rest are ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickSnapshot {
    pub stock_id: String,

    /// Exchange-local snapshot timestamp, `YYYY-MM-DD HH:MM:SS` on the wire.
    #[serde(with = "finmind_datetime")]
    pub date: NaiveDateTime,

    /// Cumulative traded value in TWD as of snapshot time.
    pub total_amount: f64,

    /// Percent price change versus the prior reference price.
    pub change_rate: f64,

    /// Last traded price.
    pub close: f64,
}

/// Serde adapter for FinMind's `YYYY-MM-DD HH:MM:SS` timestamps.
mod finmind_datetime {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_snapshot_row() {
        let json = r#"{
            "date": "2024-05-29 13:30:00",
            "stock_id": "2330",
            "change_price": 8.0,
            "change_rate": 1.5,
            "close": 550.0,
            "tick_type": 1,
            "total_amount": 1000000.0,
            "total_volume": 1818
        }"#;

        let row: TickSnapshot = serde_json::from_str(json).expect("row should parse");
        assert_eq!(row.stock_id, "2330");
        assert_eq!(row.total_amount, 1000000.0);
        assert_eq!(row.change_rate, 1.5);
        assert_eq!(row.close, 550.0);
        assert_eq!(row.date.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-05-29 13:30:00");
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let json = r#"{
            "date": "2024/05/29",
            "stock_id": "2330",
            "change_rate": 0.0,
            "close": 0.0,
            "total_amount": 0.0
        }"#;

        assert!(serde_json::from_str::<TickSnapshot>(json).is_err());
    }
}
