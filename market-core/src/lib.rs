pub mod engine;
pub mod error;
pub mod feed;
pub mod ledger;
pub mod model;
pub mod universe;

pub use engine::{Noise, PriceEngine, UniformNoise};
pub use error::TradeError;
pub use feed::{MarketFeed, MarketObserver};
pub use ledger::Ledger;
pub use model::instrument::{Instrument, MIN_PRICE};
pub use model::trade::{Side, TradeRecord};
pub use universe::InstrumentSpec;
