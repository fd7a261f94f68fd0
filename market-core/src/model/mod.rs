pub mod instrument;
pub mod trade;

pub use instrument::*;
pub use trade::*;

#[cfg(test)]
mod tests;
