//! Interactive trading terminal over the market-core simulator.
//!
//! Thin I/O wrapper around the library: reads commands from stdin, executes
//! buy/sell against the ledger at the price the caller just observed, and
//! prints colored tick updates through the `Ticker` observer.

mod display;

use anyhow::Result;
use clap::Parser;
use display::Ticker;
use log::info;
use market_core::universe::{self, InstrumentSpec};
use market_core::{Ledger, MarketFeed, PriceEngine, Side};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Starting cash balance
    #[arg(long, default_value_t = 10_000.0)]
    cash: f64,

    /// Milliseconds between market sweeps
    #[arg(long, default_value_t = 2000)]
    tick_ms: u64,

    /// Optional JSON file describing the instrument universe
    #[arg(long)]
    universe: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let specs: Vec<InstrumentSpec> = match &args.universe {
        Some(path) => universe::load_universe(path)?,
        None => universe::default_universe(),
    };
    let last_symbol = specs.last().map(|s| s.symbol.clone()).unwrap_or_default();
    info!("Universe loaded: {} instruments", specs.len());

    let engine = PriceEngine::new(&specs);
    let mut feed = MarketFeed::new(engine, Duration::from_millis(args.tick_ms));
    let ledger = Arc::new(Ledger::new(args.cash));

    let ticker = Arc::new(Ticker::new(Arc::clone(&ledger), last_symbol));
    feed.register_observer(ticker.clone());

    feed.start();

    println!("Welcome to the Stock Trading Simulator!");
    println!("Available commands: buy, sell, portfolio, history, prices, show, hide, exit");

    loop {
        let Some(command) = prompt("\nEnter command: ")? else {
            break;
        };

        match command.to_lowercase().as_str() {
            "buy" => execute_order(&feed, &ledger, Side::Buy)?,
            "sell" => execute_order(&feed, &ledger, Side::Sell)?,
            "portfolio" => display_portfolio(&feed, &ledger),
            "history" => display_history(&ledger),
            "prices" => display_prices(&feed),
            "show" => {
                ticker.show();
                println!("Price updates enabled.");
            }
            "hide" => {
                ticker.hide();
                println!("Price updates disabled.");
            }
            "exit" => break,
            "" => {}
            _ => println!("Unknown command. Try again."),
        }
    }

    feed.shutdown();
    println!("Thank you for trading!");
    Ok(())
}

/// Prints `message` and reads one trimmed line. `None` means stdin closed.
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn execute_order(feed: &MarketFeed, ledger: &Ledger, side: Side) -> Result<()> {
    let Some(symbol) = prompt("Enter stock symbol: ")? else {
        return Ok(());
    };
    let symbol = symbol.to_uppercase();

    let quote = match feed.quote(&symbol) {
        Ok(quote) => quote,
        Err(err) => {
            println!("{err}");
            return Ok(());
        }
    };

    let Some(raw) = prompt("Enter number of shares: ")? else {
        return Ok(());
    };
    let shares: u64 = match raw.parse() {
        Ok(shares) => shares,
        Err(_) => {
            println!("Invalid share count: {raw}");
            return Ok(());
        }
    };

    // The trade executes at the price observed here, even if the market
    // ticks again before the ledger commits.
    let result = match side {
        Side::Buy => ledger.buy(&symbol, quote.price(), shares),
        Side::Sell => ledger.sell(&symbol, quote.price(), shares),
    };

    match result {
        Ok(record) => {
            let verb = match record.side() {
                Side::Buy => "bought",
                Side::Sell => "sold",
            };
            println!(
                "Successfully {} {} shares of {} at ${:.2}",
                verb,
                record.shares(),
                record.symbol(),
                record.price()
            );
        }
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn display_portfolio(feed: &MarketFeed, ledger: &Ledger) {
    println!("\nCurrent Portfolio:");
    println!("Cash: ${:.2}", ledger.cash());
    println!("\nHoldings:");

    let holdings = ledger.snapshot_holdings();
    let mut owned: Vec<_> = holdings.iter().filter(|(_, &shares)| shares > 0).collect();
    owned.sort_by(|a, b| a.0.cmp(b.0));

    if owned.is_empty() {
        println!("No stocks owned.");
        return;
    }
    for (symbol, &shares) in owned {
        if let Some(quote) = feed.lookup(symbol) {
            let value = quote.price() * shares as f64;
            println!("{symbol}: {shares} shares (Current value: ${value:.2})");
        }
    }
}

fn display_history(ledger: &Ledger) {
    println!("\nTransaction History:");
    let history = ledger.snapshot_history();
    if history.is_empty() {
        println!("No transactions yet.");
        return;
    }
    for record in history {
        println!("{record}");
    }
}

fn display_prices(feed: &MarketFeed) {
    println!("\nCurrent Stock Prices:");
    for symbol in feed.symbols() {
        if let Some(quote) = feed.lookup(&symbol) {
            println!("{}: ${:.2}", symbol, quote.price());
        }
    }
}
