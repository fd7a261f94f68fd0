//! The market feed: drives the price engine on a timer and fans updates out
//! to registered observers.
//!
//! One dedicated worker thread owns the tick loop (the teacher pattern for
//! this kind of source: spawn a thread, run a tokio interval inside it, and
//! poll a stop signal between sweeps). Everything else in the process only
//! reads instrument snapshots through the engine lock.

use crate::engine::PriceEngine;
use crate::error::TradeError;
use crate::model::instrument::Instrument;
use anyhow::Result;
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A consumer of price updates.
///
/// `on_update` runs synchronously on the feed's worker thread, once per
/// instrument per sweep, in registration order. A slow observer therefore
/// delays the rest of the sweep; that is an accepted trade-off, not a bug.
/// Returning an error skips this observer for the current update only and
/// the sweep continues.
pub trait MarketObserver: Send + Sync {
    fn on_update(&self, quote: &Instrument) -> Result<()>;
}

/// Plain closures work as observers directly.
impl<F> MarketObserver for F
where
    F: Fn(&Instrument) -> Result<()> + Send + Sync,
{
    fn on_update(&self, quote: &Instrument) -> Result<()> {
        self(quote)
    }
}

/// Periodic market sweep driver: Stopped -> Running -> Stopped.
///
/// `start` spawns the worker, `stop` requests a halt at the next tick
/// boundary without blocking, `shutdown` additionally joins the worker.
/// A sweep already in progress always runs to completion.
pub struct MarketFeed {
    engine: Arc<Mutex<PriceEngine>>,
    observers: Arc<Mutex<Vec<Arc<dyn MarketObserver>>>>,
    tick: Duration,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl MarketFeed {
    pub fn new(engine: PriceEngine, tick: Duration) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            observers: Arc::new(Mutex::new(Vec::new())),
            tick,
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    /// Appends an observer. Safe before or after `start`: the worker
    /// snapshots the observer list at each sweep start, so a registration
    /// during a run takes effect at the next sweep.
    pub fn register_observer(&self, observer: Arc<dyn MarketObserver>) {
        self.observers.lock().unwrap().push(observer);
    }

    /// Snapshot of the instrument matching `symbol`.
    pub fn lookup(&self, symbol: &str) -> Option<Instrument> {
        self.engine.lock().unwrap().lookup(symbol)
    }

    /// Like `lookup`, with a missing symbol folded into the trade error
    /// taxonomy.
    pub fn quote(&self, symbol: &str) -> Result<Instrument, TradeError> {
        self.lookup(symbol)
            .ok_or_else(|| TradeError::SymbolNotFound(symbol.to_string()))
    }

    /// Registered symbols, in sweep order.
    pub fn symbols(&self) -> Vec<String> {
        self.engine.lock().unwrap().symbols()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Starts the tick loop on a dedicated worker thread.
    ///
    /// Calling `start` while the feed is already running is a logged no-op.
    /// Starting again after a stop is allowed; the previous worker is joined
    /// first so two loops can never run at once.
    pub fn start(&mut self) {
        if self.running.load(Ordering::SeqCst) {
            warn!("Market feed already running, start() ignored");
            return;
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        self.running.store(true, Ordering::SeqCst);

        let engine = Arc::clone(&self.engine);
        let observers = Arc::clone(&self.observers);
        let running = Arc::clone(&self.running);
        let tick = self.tick;

        self.worker = Some(thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async move {
                info!("Market feed started ({} ms tick)", tick.as_millis());
                let mut ticker = tokio::time::interval(tick);
                loop {
                    ticker.tick().await;
                    // Stop is observed at the tick boundary only: a sweep in
                    // progress always runs to completion.
                    if !running.load(Ordering::SeqCst) {
                        break;
                    }
                    run_sweep(&engine, &observers);
                }
                info!("Market feed stopped");
            });
        }));
    }

    /// Requests the loop to stop at the next tick boundary.
    ///
    /// Never blocks and never waits for in-flight callbacks; safe to call
    /// from any thread. A no-op if the feed is already stopped.
    pub fn stop(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            info!("Market feed stop requested");
        }
    }

    /// Stops the feed and waits for the worker thread to exit.
    pub fn shutdown(&mut self) {
        self.stop();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for MarketFeed {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// One full pass: advance every instrument in registration order and notify
/// every observer, per instrument, before moving to the next.
fn run_sweep(
    engine: &Arc<Mutex<PriceEngine>>,
    observers: &Arc<Mutex<Vec<Arc<dyn MarketObserver>>>>,
) {
    let observers: Vec<Arc<dyn MarketObserver>> = observers.lock().unwrap().clone();
    let count = engine.lock().unwrap().len();

    for index in 0..count {
        // Hold the engine lock only for the numeric update; callbacks run
        // with the lock released so concurrent lookups stay cheap.
        let quote = engine.lock().unwrap().advance_at(index);
        let Some(quote) = quote else { break };

        for observer in &observers {
            if let Err(err) = observer.on_update(&quote) {
                warn!("Observer failed on {}: {:#}", quote.symbol(), err);
            }
        }
    }
}

#[cfg(test)]
mod tests;
