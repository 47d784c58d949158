//! Types for Bittrex REST API requests and responses

use crate::error::{RestError, RestResult};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Response Envelope
// ============================================================================

/// Standard Bittrex response wrapper
///
/// When `success` is false, `result` carries no meaning and `message`
/// holds the failure reason.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Envelope {
    /// Whether the exchange accepted the request
    pub success: bool,
    /// Failure reason, empty on success
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    /// Endpoint-specific payload
    #[serde(default)]
    pub result: Value,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A successful response: the envelope plus transport metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeResponse {
    /// HTTP status code (always 200 for a successful response)
    pub status: u16,
    /// Status text as supplied by the transport
    pub status_text: Option<String>,
    /// Response headers
    pub headers: BTreeMap<String, String>,
    /// Decoded envelope
    pub envelope: Envelope,
}

impl ExchangeResponse {
    /// Borrow the raw `result` payload
    pub fn result(&self) -> &Value {
        &self.envelope.result
    }

    /// Decode `result` into the endpoint's response shape
    pub fn into_result<T: DeserializeOwned>(self) -> RestResult<T> {
        serde_json::from_value(self.envelope.result)
            .map_err(|e| RestError::Decode(format!("unexpected result shape: {}", e)))
    }

    /// Decode the first element of an array `result`
    ///
    /// Used by endpoints whose exchange response wraps a single logical
    /// object in a one-element array.
    pub fn into_first<T: DeserializeOwned>(self) -> RestResult<T> {
        match self.envelope.result {
            Value::Array(items) => {
                let first = items
                    .into_iter()
                    .next()
                    .ok_or_else(|| RestError::Decode("result array is empty".to_string()))?;
                serde_json::from_value(first)
                    .map_err(|e| RestError::Decode(format!("unexpected result shape: {}", e)))
            }
            other => Err(RestError::Decode(format!(
                "expected an array result, got {}",
                json_type(&other)
            ))),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Public Market Data Types
// ============================================================================

/// Tradable market
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Market {
    /// Traded currency (e.g. "LTC")
    pub market_currency: String,
    /// Quote currency (e.g. "BTC")
    pub base_currency: String,
    pub market_currency_long: String,
    pub base_currency_long: String,
    /// Minimum order quantity
    pub min_trade_size: Decimal,
    /// Market name (e.g. "BTC-LTC")
    pub market_name: String,
    pub is_active: bool,
    pub created: String,
    #[serde(default)]
    pub notice: Option<String>,
    #[serde(default)]
    pub is_sponsored: Option<bool>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Supported currency
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Currency {
    /// Currency code (e.g. "BTC")
    pub currency: String,
    pub currency_long: String,
    /// Confirmations required for deposits
    pub min_confirmation: u32,
    /// Withdrawal fee
    pub tx_fee: Decimal,
    pub is_active: bool,
    pub coin_type: String,
    #[serde(default)]
    pub base_address: Option<String>,
    #[serde(default)]
    pub notice: Option<String>,
}

/// Current bid, ask and last price
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ticker {
    pub bid: Decimal,
    pub ask: Decimal,
    pub last: Decimal,
}

impl Ticker {
    /// Mid price (average of bid and ask)
    pub fn mid_price(&self) -> Decimal {
        (self.bid + self.ask) / Decimal::TWO
    }

    /// Spread in basis points
    pub fn spread_bps(&self) -> Option<Decimal> {
        let mid = self.mid_price();
        if mid.is_zero() {
            return None;
        }
        Some((self.ask - self.bid) / mid * Decimal::from(10000))
    }
}

/// 24h market summary
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MarketSummary {
    pub market_name: String,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub volume: Option<Decimal>,
    pub last: Option<Decimal>,
    /// Volume in the base currency
    pub base_volume: Option<Decimal>,
    pub time_stamp: String,
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
    #[serde(default)]
    pub open_buy_orders: Option<u64>,
    #[serde(default)]
    pub open_sell_orders: Option<u64>,
    /// Price 24h ago
    #[serde(default)]
    pub prev_day: Option<Decimal>,
    #[serde(default)]
    pub created: Option<String>,
}

/// Which side(s) of the book to request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBookType {
    Buy,
    Sell,
    #[default]
    Both,
}

impl OrderBookType {
    /// Query parameter value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for OrderBookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single price level
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderBookEntry {
    pub quantity: Decimal,
    pub rate: Decimal,
}

/// Order book snapshot
///
/// A one-sided request leaves the other side empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OrderBook {
    #[serde(default)]
    pub buy: Vec<OrderBookEntry>,
    #[serde(default)]
    pub sell: Vec<OrderBookEntry>,
}

impl OrderBook {
    /// Highest bid
    pub fn best_bid(&self) -> Option<&OrderBookEntry> {
        self.buy.first()
    }

    /// Lowest ask
    pub fn best_ask(&self) -> Option<&OrderBookEntry> {
        self.sell.first()
    }
}

/// Recent trade in a market
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MarketTrade {
    pub id: u64,
    pub time_stamp: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub total: Decimal,
    /// FILL or PARTIAL_FILL
    pub fill_type: String,
    /// BUY or SELL
    pub order_type: String,
}

// ============================================================================
// Trading Types
// ============================================================================

/// Identifier returned when an order or withdrawal is accepted
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OrderUuid {
    pub uuid: String,
}

/// Open order
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OpenOrder {
    #[serde(default)]
    pub uuid: Option<String>,
    pub order_uuid: String,
    /// Market name
    pub exchange: String,
    /// LIMIT_BUY or LIMIT_SELL
    pub order_type: String,
    pub quantity: Decimal,
    pub quantity_remaining: Decimal,
    pub limit: Decimal,
    pub commission_paid: Decimal,
    pub price: Decimal,
    #[serde(default)]
    pub price_per_unit: Option<Decimal>,
    pub opened: String,
    #[serde(default)]
    pub closed: Option<String>,
    pub cancel_initiated: bool,
    pub immediate_or_cancel: bool,
    pub is_conditional: bool,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub condition_target: Option<Decimal>,
}

// ============================================================================
// Account Types
// ============================================================================

/// Balance of one currency
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Balance {
    pub currency: String,
    pub balance: Decimal,
    pub available: Decimal,
    pub pending: Decimal,
    #[serde(default)]
    pub crypto_address: Option<String>,
    #[serde(default)]
    pub requested: Option<bool>,
    #[serde(default)]
    pub uuid: Option<String>,
}

/// Deposit address for a currency
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepositAddress {
    pub currency: String,
    pub address: String,
}

/// Single order, open or closed
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Order {
    #[serde(default)]
    pub account_id: Option<String>,
    pub order_uuid: String,
    pub exchange: String,
    #[serde(rename = "Type")]
    pub order_type: String,
    pub quantity: Decimal,
    pub quantity_remaining: Decimal,
    pub limit: Decimal,
    #[serde(default)]
    pub reserved: Option<Decimal>,
    #[serde(default)]
    pub reserve_remaining: Option<Decimal>,
    #[serde(default)]
    pub commission_reserved: Option<Decimal>,
    #[serde(default)]
    pub commission_reserve_remaining: Option<Decimal>,
    pub commission_paid: Decimal,
    pub price: Decimal,
    #[serde(default)]
    pub price_per_unit: Option<Decimal>,
    pub opened: String,
    #[serde(default)]
    pub closed: Option<String>,
    pub is_open: bool,
    #[serde(default)]
    pub sentinel: Option<String>,
    pub cancel_initiated: bool,
    pub immediate_or_cancel: bool,
    pub is_conditional: bool,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub condition_target: Option<Decimal>,
}

/// Completed order from the order history
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderHistoryEntry {
    pub order_uuid: String,
    pub exchange: String,
    pub time_stamp: String,
    pub order_type: String,
    pub limit: Decimal,
    pub quantity: Decimal,
    pub quantity_remaining: Decimal,
    pub commission: Decimal,
    pub price: Decimal,
    #[serde(default)]
    pub price_per_unit: Option<Decimal>,
    pub is_conditional: bool,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub condition_target: Option<Decimal>,
    pub immediate_or_cancel: bool,
    #[serde(default)]
    pub closed: Option<String>,
}

/// Withdrawal record
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Withdrawal {
    pub payment_uuid: String,
    pub currency: String,
    pub amount: Decimal,
    pub address: String,
    pub opened: String,
    pub authorized: bool,
    pub pending_payment: bool,
    pub tx_cost: Decimal,
    #[serde(default)]
    pub tx_id: Option<String>,
    pub canceled: bool,
    pub invalid_address: bool,
}

/// Deposit record
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Deposit {
    pub id: u64,
    pub amount: Decimal,
    pub currency: String,
    pub confirmations: u32,
    pub last_updated: String,
    pub tx_id: String,
    pub crypto_address: String,
}
