//! Order placement endpoints

use crate::client::{BittrexRestClient, HTTP_LOG_TARGET};
use crate::error::RestResult;
use crate::types::{OpenOrder, OrderUuid};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Order placement and cancellation endpoints
pub struct MarketEndpoints<'a> {
    client: &'a BittrexRestClient,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a BittrexRestClient) -> Self {
        Self { client }
    }

    async fn limit_order(
        &self,
        path: &str,
        market: &str,
        quantity: Decimal,
        rate: Decimal,
    ) -> RestResult<OrderUuid> {
        let quantity = quantity.to_string();
        let rate = rate.to_string();
        debug!(
            target: HTTP_LOG_TARGET,
            "Placing {} {} @ {} on {}", path, quantity, rate, market
        );

        self.client
            .execute(
                path,
                &[
                    ("market", market),
                    ("quantity", quantity.as_str()),
                    ("rate", rate.as_str()),
                ],
            )
            .await?
            .into_result()
    }

    /// Place a limit buy order
    ///
    /// # Arguments
    /// * `market` - Market name (e.g. "BTC-LTC")
    /// * `quantity` - Amount to buy
    /// * `rate` - Limit price
    #[instrument(skip(self))]
    pub async fn buy_limit(
        &self,
        market: &str,
        quantity: Decimal,
        rate: Decimal,
    ) -> RestResult<OrderUuid> {
        self.limit_order("market/buylimit", market, quantity, rate).await
    }

    /// Place a limit sell order
    #[instrument(skip(self))]
    pub async fn sell_limit(
        &self,
        market: &str,
        quantity: Decimal,
        rate: Decimal,
    ) -> RestResult<OrderUuid> {
        self.limit_order("market/selllimit", market, quantity, rate).await
    }

    /// Cancel an open order
    #[instrument(skip(self))]
    pub async fn cancel(&self, uuid: &str) -> RestResult<()> {
        self.client
            .execute("market/cancel", &[("uuid", uuid)])
            .await?
            .into_result()
    }

    /// Get open orders, optionally for one market only
    #[instrument(skip(self))]
    pub async fn get_open_orders(&self, market: Option<&str>) -> RestResult<Vec<OpenOrder>> {
        let params: Vec<(&str, &str)> = market.map(|m| ("market", m)).into_iter().collect();

        self.client
            .execute("market/getopenorders", &params)
            .await?
            .into_result()
    }
}
