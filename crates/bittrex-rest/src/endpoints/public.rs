//! Public market data endpoints

use crate::client::BittrexRestClient;
use crate::error::RestResult;
use crate::types::{
    Currency, Market, MarketSummary, MarketTrade, OrderBook, OrderBookType, Ticker,
};
use tracing::instrument;

/// Public market data endpoints
pub struct PublicEndpoints<'a> {
    client: &'a BittrexRestClient,
}

impl<'a> PublicEndpoints<'a> {
    pub fn new(client: &'a BittrexRestClient) -> Self {
        Self { client }
    }

    /// Get all open and available markets
    #[instrument(skip(self))]
    pub async fn get_markets(&self) -> RestResult<Vec<Market>> {
        self.client
            .execute("public/getmarkets", &[])
            .await?
            .into_result()
    }

    /// Get all supported currencies
    #[instrument(skip(self))]
    pub async fn get_currencies(&self) -> RestResult<Vec<Currency>> {
        self.client
            .execute("public/getcurrencies", &[])
            .await?
            .into_result()
    }

    /// Get the current tick values for a market
    ///
    /// # Arguments
    /// * `market` - Market name (e.g. "BTC-LTC")
    #[instrument(skip(self))]
    pub async fn get_ticker(&self, market: &str) -> RestResult<Ticker> {
        self.client
            .execute("public/getticker", &[("market", market)])
            .await?
            .into_result()
    }

    /// Get the last 24h summary of all active markets
    #[instrument(skip(self))]
    pub async fn get_market_summaries(&self) -> RestResult<Vec<MarketSummary>> {
        self.client
            .execute("public/getmarketsummaries", &[])
            .await?
            .into_result()
    }

    /// Get the last 24h summary of one market
    ///
    /// The exchange wraps the summary in a one-element array; this returns
    /// the element itself.
    #[instrument(skip(self))]
    pub async fn get_market_summary(&self, market: &str) -> RestResult<MarketSummary> {
        self.client
            .execute("public/getmarketsummary", &[("market", market)])
            .await?
            .into_first()
    }

    /// Get the order book for a market
    ///
    /// # Arguments
    /// * `market` - Market name (e.g. "BTC-LTC")
    /// * `book_type` - Buy side, sell side or both
    #[instrument(skip(self))]
    pub async fn get_order_book(
        &self,
        market: &str,
        book_type: OrderBookType,
    ) -> RestResult<OrderBook> {
        let response = self
            .client
            .execute(
                "public/getorderbook",
                &[("market", market), ("type", book_type.as_str())],
            )
            .await?;

        match book_type {
            OrderBookType::Both => response.into_result(),
            OrderBookType::Buy => Ok(OrderBook {
                buy: response.into_result()?,
                sell: Vec::new(),
            }),
            OrderBookType::Sell => Ok(OrderBook {
                buy: Vec::new(),
                sell: response.into_result()?,
            }),
        }
    }

    /// Get the latest trades for a market
    #[instrument(skip(self))]
    pub async fn get_market_history(&self, market: &str) -> RestResult<Vec<MarketTrade>> {
        self.client
            .execute("public/getmarkethistory", &[("market", market)])
            .await?
            .into_result()
    }
}
