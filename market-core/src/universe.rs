//! Instrument universe definition and loading.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Seed definition for one instrument: where its walk starts and how hard
/// it swings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentSpec {
    pub symbol: String,
    pub seed_price: f64,
    pub volatility: f64,
}

impl InstrumentSpec {
    pub fn new(symbol: impl Into<String>, seed_price: f64, volatility: f64) -> Self {
        Self {
            symbol: symbol.into(),
            seed_price,
            volatility,
        }
    }
}

/// The built-in universe used when no file is supplied.
pub fn default_universe() -> Vec<InstrumentSpec> {
    vec![
        InstrumentSpec::new("AAPL", 150.0, 0.02),
        InstrumentSpec::new("GOOGL", 2800.0, 0.015),
        InstrumentSpec::new("MSFT", 280.0, 0.018),
        InstrumentSpec::new("AMZN", 3300.0, 0.025),
    ]
}

/// Loads an instrument universe from a JSON file.
pub fn load_universe(path: &Path) -> Result<Vec<InstrumentSpec>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read universe file {:?}", path))?;
    parse_universe(&raw).with_context(|| format!("Failed to parse universe file {:?}", path))
}

fn parse_universe(raw: &str) -> Result<Vec<InstrumentSpec>> {
    let specs: Vec<InstrumentSpec> = serde_json::from_str(raw)?;
    if specs.is_empty() {
        bail!("Universe contains no instruments");
    }
    for spec in &specs {
        if !spec.seed_price.is_finite() || spec.seed_price <= 0.0 {
            bail!("Invalid seed price {} for {}", spec.seed_price, spec.symbol);
        }
        if !spec.volatility.is_finite() || spec.volatility < 0.0 {
            bail!("Invalid volatility {} for {}", spec.volatility, spec.symbol);
        }
    }
    Ok(specs)
}
