//! Demo 1: Market Watch
//!
//! Showcases: signed public requests, summary unwrapping, order book sides
//!
//! Run: BITTREX_API_KEY=... BITTREX_API_SECRET=... cargo run --bin market_watch
//!
//! Set `RUST_LOG=bittrex_rest::http=debug` to see the raw requests and bodies.

use bittrex_rest::{BittrexRestClient, OrderBookType};
use colored::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

const MARKETS: [&str; 3] = ["BTC-LTC", "BTC-ETH", "USDT-BTC"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(70).cyan());
    println!("{}", "  BITTREX MARKET WATCH".cyan().bold());
    println!("{}", "═".repeat(70).cyan());
    println!();

    let client = BittrexRestClient::from_env()?;

    println!(
        "  {:<10} {:>14} {:>14} {:>14} {:>10}",
        "MARKET".white().bold(),
        "BID".white().bold(),
        "ASK".white().bold(),
        "LAST".white().bold(),
        "24H".white().bold()
    );
    println!("  {}", "─".repeat(66));

    for market in MARKETS {
        let ticker = match client.get_ticker(market).await {
            Ok(ticker) => ticker,
            Err(e) => {
                println!("  {:<10} {}", market.cyan(), e.to_string().red());
                continue;
            }
        };
        let change = client
            .get_market_summary(market)
            .await
            .ok()
            .and_then(|s| Some((s.last?, s.prev_day?)))
            .filter(|(_, prev)| !prev.is_zero())
            .map(|(last, prev)| (last - prev) / prev * dec!(100));

        let change = match change {
            Some(pct) if pct >= Decimal::ZERO => format!("{:+.2}%", pct).green(),
            Some(pct) => format!("{:+.2}%", pct).red(),
            None => "-".white(),
        };

        println!(
            "  {:<10} {:>14} {:>14} {:>14} {:>10}",
            market.cyan(),
            ticker.bid,
            ticker.ask,
            ticker.last,
            change
        );
    }

    println!();
    let book = client
        .public()
        .get_order_book(MARKETS[0], OrderBookType::Both)
        .await?;

    println!("  {} {}", "Order book".white().bold(), MARKETS[0].cyan());
    for level in book.sell.iter().take(5).rev() {
        println!("    {:>14} {:>16}", level.rate.to_string().red(), level.quantity);
    }
    println!("    {}", "─".repeat(31));
    for level in book.buy.iter().take(5) {
        println!("    {:>14} {:>16}", level.rate.to_string().green(), level.quantity);
    }

    Ok(())
}
