use super::*;
use crate::engine::{Noise, PriceEngine};
use crate::universe::default_universe;
use anyhow::anyhow;
use std::time::Instant;

struct FixedNoise(f64);

impl Noise for FixedNoise {
    fn sample(&mut self, _volatility: f64) -> f64 {
        self.0
    }
}

#[derive(Default)]
struct Collector {
    seen: Mutex<Vec<String>>,
}

impl Collector {
    fn len(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    fn symbols(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl MarketObserver for Collector {
    fn on_update(&self, quote: &Instrument) -> Result<()> {
        self.seen.lock().unwrap().push(quote.symbol().to_string());
        Ok(())
    }
}

fn test_feed() -> MarketFeed {
    let engine = PriceEngine::with_noise(&default_universe(), Box::new(FixedNoise(0.01)));
    MarketFeed::new(engine, Duration::from_millis(10))
}

fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    cond()
}

#[test]
fn sweeps_notify_in_registration_order_and_finish_on_stop() {
    let mut feed = test_feed();
    let collector = Arc::new(Collector::default());
    feed.register_observer(collector.clone());

    feed.start();
    assert!(wait_until(Duration::from_secs(2), || collector.len() >= 8));
    feed.shutdown();

    let seen = collector.symbols();
    // A stop may land mid-sweep, but the sweep always completes: the log
    // holds whole sweeps only.
    assert_eq!(seen.len() % 4, 0);
    for sweep in seen.chunks(4) {
        assert_eq!(sweep, ["AAPL", "GOOGL", "MSFT", "AMZN"]);
    }
}

#[test]
fn no_sweep_starts_after_shutdown() {
    let mut feed = test_feed();
    let collector = Arc::new(Collector::default());
    feed.register_observer(collector.clone());

    feed.start();
    assert!(wait_until(Duration::from_secs(2), || collector.len() >= 4));
    feed.shutdown();
    assert!(!feed.is_running());

    let settled = collector.len();
    thread::sleep(Duration::from_millis(60));
    assert_eq!(collector.len(), settled);
}

#[test]
fn observer_error_does_not_halt_the_sweep() {
    let mut feed = test_feed();
    let failing: Arc<dyn MarketObserver> =
        Arc::new(|_: &Instrument| -> Result<()> { Err(anyhow!("boom")) });
    let collector = Arc::new(Collector::default());
    feed.register_observer(failing);
    feed.register_observer(collector.clone());

    feed.start();
    assert!(wait_until(Duration::from_secs(2), || collector.len() >= 4));
    feed.shutdown();
}

#[test]
fn registration_during_run_joins_the_next_sweep() {
    let mut feed = test_feed();
    let first = Arc::new(Collector::default());
    feed.register_observer(first.clone());

    feed.start();
    assert!(wait_until(Duration::from_secs(2), || first.len() >= 4));

    let late = Arc::new(Collector::default());
    feed.register_observer(late.clone());
    assert!(wait_until(Duration::from_secs(2), || late.len() >= 4));
    feed.shutdown();
}

#[test]
fn start_while_running_is_a_noop() {
    let mut feed = test_feed();
    feed.start();
    assert!(feed.is_running());
    feed.start();
    assert!(feed.is_running());
    feed.shutdown();
    assert!(!feed.is_running());
}

#[test]
fn stop_on_a_stopped_feed_is_a_noop() {
    let feed = test_feed();
    feed.stop();
    assert!(!feed.is_running());
}

#[test]
fn feed_can_restart_after_shutdown() {
    let mut feed = test_feed();
    let collector = Arc::new(Collector::default());
    feed.register_observer(collector.clone());

    feed.start();
    assert!(wait_until(Duration::from_secs(2), || collector.len() >= 4));
    feed.shutdown();
    let after_first_run = collector.len();

    feed.start();
    assert!(wait_until(Duration::from_secs(2), || {
        collector.len() > after_first_run
    }));
    feed.shutdown();
}

#[test]
fn lookup_and_quote_work_without_a_running_feed() {
    let feed = test_feed();
    let quote = feed.lookup("AAPL").unwrap();
    assert_eq!(quote.price(), 150.0);

    assert_eq!(
        feed.quote("TSLA").unwrap_err(),
        TradeError::SymbolNotFound("TSLA".to_string())
    );
    assert_eq!(feed.symbols(), vec!["AAPL", "GOOGL", "MSFT", "AMZN"]);
}
