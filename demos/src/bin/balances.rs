//! Demo 2: Account Balances
//!
//! Showcases: signed account requests, API error handling
//!
//! Run: BITTREX_API_KEY=... BITTREX_API_SECRET=... cargo run --bin balances

use bittrex_rest::{BittrexRestClient, ErrorKind};
use colored::*;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = BittrexRestClient::from_env()?;

    let balances = match client.get_balances().await {
        Ok(balances) => balances,
        Err(e) if e.kind() == ErrorKind::Api => {
            println!("{} {}", "Exchange rejected the request:".red(), e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "  {:<8} {:>18} {:>18} {:>18}",
        "CURRENCY".white().bold(),
        "BALANCE".white().bold(),
        "AVAILABLE".white().bold(),
        "PENDING".white().bold()
    );
    println!("  {}", "─".repeat(66));

    for balance in balances.iter().filter(|b| b.balance > Decimal::ZERO) {
        let pending = if balance.pending > Decimal::ZERO {
            balance.pending.to_string().yellow()
        } else {
            balance.pending.to_string().white()
        };
        println!(
            "  {:<8} {:>18} {:>18} {:>18}",
            balance.currency.cyan(),
            balance.balance,
            balance.available,
            pending
        );
    }

    let open = client.market().get_open_orders(None).await?;
    println!();
    println!("  {} open order(s)", open.len().to_string().bold());
    for order in &open {
        println!(
            "    {} {} {} @ {}",
            order.exchange.cyan(),
            order.order_type,
            order.quantity_remaining,
            order.limit
        );
    }

    Ok(())
}
