//! Price state for a single tradable symbol.

use serde::{Deserialize, Serialize};

/// Hard floor for simulated prices. The random walk can never push an
/// instrument to zero or below.
pub const MIN_PRICE: f64 = 0.01;

/// A single symbol's price/volatility/range state.
///
/// Owned and mutated exclusively by the `PriceEngine` on the feed thread.
/// Every other thread only ever sees clones taken under the engine lock, so
/// a snapshot is always internally consistent: the price, previous price and
/// day range all belong to the same tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    symbol: String,
    price: f64,
    previous_price: f64,
    volatility: f64,
    day_high: f64,
    day_low: f64,
}

impl Instrument {
    /// Creates a new instrument seeded at `seed_price`.
    ///
    /// The seed is clamped to `MIN_PRICE` and becomes the initial previous
    /// price, day high and day low.
    pub fn new(symbol: impl Into<String>, seed_price: f64, volatility: f64) -> Self {
        let price = seed_price.max(MIN_PRICE);
        Self {
            symbol: symbol.into(),
            price,
            previous_price: price,
            volatility,
            day_high: price,
            day_low: price,
        }
    }

    /// Applies one price step: `price * (1 + noise)`, clamped to `MIN_PRICE`.
    ///
    /// Records the outgoing price as the previous price and widens the day
    /// range if the new price escapes it.
    pub(crate) fn advance(&mut self, noise: f64) {
        self.previous_price = self.price;
        self.price = (self.price * (1.0 + noise)).max(MIN_PRICE);
        self.day_high = self.day_high.max(self.price);
        self.day_low = self.day_low.min(self.price);
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn previous_price(&self) -> f64 {
        self.previous_price
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn day_high(&self) -> f64 {
        self.day_high
    }

    pub fn day_low(&self) -> f64 {
        self.day_low
    }

    /// Absolute price change since the previous tick.
    pub fn change(&self) -> f64 {
        self.price - self.previous_price
    }

    /// Percent price change since the previous tick.
    pub fn change_pct(&self) -> f64 {
        if self.previous_price == 0.0 {
            0.0
        } else {
            self.change() / self.previous_price * 100.0
        }
    }
}
