//! Trade records appended to the ledger's transaction log.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// A committed buy or sell.
///
/// Immutable once created. The ledger's trade log is an append-only sequence
/// of these, in exactly the order the trades committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    symbol: String,
    side: Side,
    shares: u64,
    price: f64,
    timestamp: i64,
}

impl TradeRecord {
    pub(crate) fn new(symbol: impl Into<String>, side: Side, shares: u64, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            shares,
            price,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn shares(&self) -> u64 {
        self.shares
    }

    /// The execution price: whatever the caller observed when placing the
    /// trade, not the live price at commit time.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Commit time in Unix epoch milliseconds.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

impl fmt::Display for TradeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let when = DateTime::from_timestamp_millis(self.timestamp).unwrap_or_default();
        write!(
            f,
            "[{}] {} {} shares of {} at ${:.2}",
            when.format("%Y-%m-%d %H:%M:%S UTC"),
            self.side,
            self.shares,
            self.symbol,
            self.price
        )
    }
}
