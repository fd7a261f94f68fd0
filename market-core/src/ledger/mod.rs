//! The portfolio ledger: cash, holdings and the append-only trade log.
//!
//! All three live behind one mutex. Splitting the lock (cash separate from
//! holdings, say) would let a concurrent caller observe a half-applied
//! trade, which is exactly the race the atomicity contract rules out.

use crate::error::TradeError;
use crate::model::trade::{Side, TradeRecord};
use log::debug;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct LedgerState {
    cash: f64,
    holdings: HashMap<String, u64>,
    trades: Vec<TradeRecord>,
}

/// Cash balance, per-symbol share counts and the trade log.
///
/// Buy/sell are linearizable: each call takes effect atomically under the
/// single lock, and the trade log records exactly that commit order. Share
/// counts are unsigned, so a holding can never go negative.
pub struct Ledger {
    state: Mutex<LedgerState>,
}

impl Ledger {
    pub fn new(initial_cash: f64) -> Self {
        Self {
            state: Mutex::new(LedgerState {
                cash: initial_cash,
                holdings: HashMap::new(),
                trades: Vec::new(),
            }),
        }
    }

    /// Buys `shares` of `symbol` at the caller-observed `price`.
    ///
    /// The read-check-mutate-log sequence is one atomic unit: no concurrent
    /// caller can see the cash debited but the holding not yet credited.
    /// The ledger never re-reads a live quote, so the trade executes at the
    /// price the caller saw even if the market has ticked since.
    pub fn buy(&self, symbol: &str, price: f64, shares: u64) -> Result<TradeRecord, TradeError> {
        validate(price, shares)?;
        let mut state = self.state.lock().unwrap();

        let cost = price * shares as f64;
        if cost > state.cash {
            return Err(TradeError::InsufficientFunds {
                required: cost,
                available: state.cash,
            });
        }

        state.cash -= cost;
        *state.holdings.entry(symbol.to_string()).or_insert(0) += shares;
        let record = TradeRecord::new(symbol, Side::Buy, shares, price);
        state.trades.push(record.clone());
        debug!("BUY {} x{} @ {:.2}, cash {:.2}", symbol, shares, price, state.cash);
        Ok(record)
    }

    /// Sells `shares` of `symbol` at the caller-observed `price`.
    pub fn sell(&self, symbol: &str, price: f64, shares: u64) -> Result<TradeRecord, TradeError> {
        validate(price, shares)?;
        let mut state = self.state.lock().unwrap();

        let held = state.holdings.get(symbol).copied().unwrap_or(0);
        if held < shares {
            return Err(TradeError::InsufficientShares {
                symbol: symbol.to_string(),
                requested: shares,
                held,
            });
        }

        state.cash += price * shares as f64;
        state.holdings.insert(symbol.to_string(), held - shares);
        let record = TradeRecord::new(symbol, Side::Sell, shares, price);
        state.trades.push(record.clone());
        debug!("SELL {} x{} @ {:.2}, cash {:.2}", symbol, shares, price, state.cash);
        Ok(record)
    }

    pub fn cash(&self) -> f64 {
        self.state.lock().unwrap().cash
    }

    /// Shares currently held for `symbol`; absent entries mean zero.
    pub fn position(&self, symbol: &str) -> u64 {
        self.state
            .lock()
            .unwrap()
            .holdings
            .get(symbol)
            .copied()
            .unwrap_or(0)
    }

    /// Independent copy of the holdings map. Mutating the copy never
    /// affects the ledger, and the copy never shows a half-applied trade.
    pub fn snapshot_holdings(&self) -> HashMap<String, u64> {
        self.state.lock().unwrap().holdings.clone()
    }

    /// Independent copy of the trade log, in commit order.
    pub fn snapshot_history(&self) -> Vec<TradeRecord> {
        self.state.lock().unwrap().trades.clone()
    }
}

fn validate(price: f64, shares: u64) -> Result<(), TradeError> {
    if shares == 0 || !price.is_finite() || price <= 0.0 {
        return Err(TradeError::InvalidQuantity { shares, price });
    }
    Ok(())
}
