use super::instrument::{Instrument, MIN_PRICE};
use super::trade::{Side, TradeRecord};

#[test]
fn new_instrument_seeds_previous_price_and_range() {
    let stock = Instrument::new("AAPL", 150.0, 0.02);
    assert_eq!(stock.symbol(), "AAPL");
    assert_eq!(stock.price(), 150.0);
    assert_eq!(stock.previous_price(), 150.0);
    assert_eq!(stock.day_high(), 150.0);
    assert_eq!(stock.day_low(), 150.0);
    assert_eq!(stock.volatility(), 0.02);
    assert_eq!(stock.change(), 0.0);
}

#[test]
fn seed_price_is_clamped_to_floor() {
    let stock = Instrument::new("PENNY", -5.0, 0.02);
    assert_eq!(stock.price(), MIN_PRICE);
    assert_eq!(stock.day_low(), MIN_PRICE);
}

#[test]
fn advance_tracks_change_and_range() {
    let mut stock = Instrument::new("TEST", 200.0, 0.02);
    stock.advance(0.05);

    assert_eq!(stock.previous_price(), 200.0);
    assert!((stock.price() - 210.0).abs() < 1e-9);
    assert!((stock.change() - 10.0).abs() < 1e-9);
    assert!((stock.change_pct() - 5.0).abs() < 1e-9);
    assert!((stock.day_high() - 210.0).abs() < 1e-9);
    assert_eq!(stock.day_low(), 200.0);

    stock.advance(-0.5);
    assert!((stock.price() - 105.0).abs() < 1e-9);
    assert_eq!(stock.day_low(), 105.0);
    assert!((stock.day_high() - 210.0).abs() < 1e-9);
}

#[test]
fn advance_never_goes_below_floor() {
    let mut stock = Instrument::new("TEST", 0.02, 0.02);
    stock.advance(-0.99);
    assert_eq!(stock.price(), MIN_PRICE);
}

#[test]
fn side_renders_upper_case() {
    assert_eq!(Side::Buy.to_string(), "BUY");
    assert_eq!(Side::Sell.to_string(), "SELL");
}

#[test]
fn trade_record_display_includes_the_fill() {
    let record = TradeRecord::new("AAPL", Side::Buy, 10, 150.0);
    let line = record.to_string();
    assert!(line.contains("BUY 10 shares of AAPL at $150.00"), "{line}");
    assert!(record.timestamp() > 0);
}
