//! Caller-facing error taxonomy for trading operations.

use thiserror::Error;

/// Recoverable trade failures returned to callers as values.
///
/// Nothing here is process-fatal, and lock contention is never surfaced as
/// an error: callers block briefly on the ledger's single lock instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradeError {
    #[error("Insufficient funds: need ${required:.2}, have ${available:.2}")]
    InsufficientFunds { required: f64, available: f64 },

    #[error("Insufficient shares of {symbol}: requested {requested}, holding {held}")]
    InsufficientShares {
        symbol: String,
        requested: u64,
        held: u64,
    },

    #[error("Unknown symbol: {0}")]
    SymbolNotFound(String),

    #[error("Invalid quantity: {shares} shares at price {price}")]
    InvalidQuantity { shares: u64, price: f64 },
}
