//! Colored tick rendering for the terminal.

use anyhow::Result;
use market_core::{Instrument, Ledger, MarketObserver};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const ANSI_RESET: &str = "\u{1b}[0m";
const ANSI_GREEN: &str = "\u{1b}[32m";
const ANSI_RED: &str = "\u{1b}[31m";
const ANSI_YELLOW: &str = "\u{1b}[33m";
const ANSI_BOLD: &str = "\u{1b}[1m";

/// Per-symbol minimum delay between printed updates.
const UPDATE_THROTTLE: Duration = Duration::from_millis(1000);

/// Prints market updates as colored one-liners.
///
/// Runs on the feed thread, so its state is either locked or atomic: the
/// throttle map sits behind a mutex and visibility is a flag the command
/// loop flips from its own thread.
pub struct Ticker {
    ledger: Arc<Ledger>,
    visible: AtomicBool,
    last_printed: Mutex<HashMap<String, Instant>>,
    last_symbol: String,
}

impl Ticker {
    /// `last_symbol` marks the end of a sweep; a separator row is printed
    /// after it.
    pub fn new(ledger: Arc<Ledger>, last_symbol: String) -> Self {
        Self {
            ledger,
            visible: AtomicBool::new(true),
            last_printed: Mutex::new(HashMap::new()),
            last_symbol,
        }
    }

    pub fn show(&self) {
        self.visible.store(true, Ordering::SeqCst);
    }

    pub fn hide(&self) {
        self.visible.store(false, Ordering::SeqCst);
    }

    /// Records the print attempt and reports whether this symbol updated
    /// too recently. The throttle advances even while hidden.
    fn throttled(&self, symbol: &str) -> bool {
        let mut last = self.last_printed.lock().unwrap();
        let now = Instant::now();
        match last.get(symbol) {
            Some(at) if now.duration_since(*at) < UPDATE_THROTTLE => true,
            _ => {
                last.insert(symbol.to_string(), now);
                false
            }
        }
    }
}

impl MarketObserver for Ticker {
    fn on_update(&self, quote: &Instrument) -> Result<()> {
        if self.throttled(quote.symbol()) {
            return Ok(());
        }
        if !self.visible.load(Ordering::SeqCst) {
            return Ok(());
        }

        let change = quote.change();
        let (arrow, color) = if change > 0.0 {
            ("▲", ANSI_GREEN)
        } else if change < 0.0 {
            ("▼", ANSI_RED)
        } else {
            ("═", ANSI_YELLOW)
        };

        let mut line = format!(
            "{ANSI_BOLD}{}{ANSI_RESET} {color}${:.2} {arrow} ({:+.2}%){ANSI_RESET} H: {:.2} L: {:.2}",
            quote.symbol(),
            quote.price(),
            quote.change_pct(),
            quote.day_high(),
            quote.day_low()
        );

        let shares = self.ledger.position(quote.symbol());
        if shares > 0 {
            let value = shares as f64 * quote.price();
            let delta = shares as f64 * change;
            line.push_str(&format!(
                "{color} | Position: {shares} shares (${value:.2}) {delta:+.2}{ANSI_RESET}"
            ));
        }

        println!("{line}");

        if quote.symbol() == self.last_symbol {
            println!("{}", "-".repeat(80));
        }
        Ok(())
    }
}
