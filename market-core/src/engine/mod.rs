//! The price engine: advances every instrument on a configurable random walk.

use crate::model::instrument::Instrument;
use crate::universe::InstrumentSpec;
use rand::Rng;

/// A source of per-tick relative price moves.
///
/// Implementations return a fractional change (e.g. `0.01` for +1%) already
/// scaled by the instrument's volatility coefficient. The numeric transform
/// is total: any finite return value yields a finite, positive price after
/// the floor clamp.
pub trait Noise: Send {
    fn sample(&mut self, volatility: f64) -> f64;
}

/// Default noise source: a uniform walk in `(-0.5, 0.5) * volatility`.
#[derive(Debug, Default)]
pub struct UniformNoise;

impl Noise for UniformNoise {
    fn sample(&mut self, volatility: f64) -> f64 {
        let mut rng = rand::thread_rng();
        rng.gen_range(-0.5..0.5) * volatility
    }
}

/// Owns the instrument set and applies the per-tick price transform.
///
/// Single-writer rule: only the market feed's worker thread calls
/// `advance_at`. Readers go through `lookup`, which clones under the same
/// lock the feed holds while writing, so a snapshot never mixes fields from
/// two different ticks.
pub struct PriceEngine {
    instruments: Vec<Instrument>,
    noise: Box<dyn Noise>,
}

impl PriceEngine {
    /// Builds an engine over `universe` with the default noise source.
    /// Registration order is preserved for sweeps and notifications.
    pub fn new(universe: &[InstrumentSpec]) -> Self {
        Self::with_noise(universe, Box::new(UniformNoise))
    }

    pub fn with_noise(universe: &[InstrumentSpec], noise: Box<dyn Noise>) -> Self {
        let instruments = universe
            .iter()
            .map(|spec| Instrument::new(&spec.symbol, spec.seed_price, spec.volatility))
            .collect();
        Self { instruments, noise }
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Registered symbols, in registration order.
    pub fn symbols(&self) -> Vec<String> {
        self.instruments
            .iter()
            .map(|i| i.symbol().to_string())
            .collect()
    }

    /// Advances the instrument at `index` by one tick and returns its new
    /// snapshot, or `None` if the index is out of range.
    pub fn advance_at(&mut self, index: usize) -> Option<Instrument> {
        let instrument = self.instruments.get_mut(index)?;
        let noise = self.noise.sample(instrument.volatility());
        instrument.advance(noise);
        Some(instrument.clone())
    }

    /// Snapshot of the instrument matching `symbol`, if registered.
    pub fn lookup(&self, symbol: &str) -> Option<Instrument> {
        self.instruments
            .iter()
            .find(|i| i.symbol() == symbol)
            .cloned()
    }
}
