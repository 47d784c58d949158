//! Account endpoints
//!
//! Balances, deposits, withdrawals and order lookups.

use crate::client::BittrexRestClient;
use crate::error::RestResult;
use crate::types::{Balance, Deposit, DepositAddress, Order, OrderHistoryEntry, OrderUuid, Withdrawal};
use rust_decimal::Decimal;
use tracing::instrument;

/// Account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a BittrexRestClient,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a BittrexRestClient) -> Self {
        Self { client }
    }

    /// Get balances for all currencies
    #[instrument(skip(self))]
    pub async fn get_balances(&self) -> RestResult<Vec<Balance>> {
        self.client
            .execute("account/getbalances", &[])
            .await?
            .into_result()
    }

    /// Get the balance of one currency
    ///
    /// # Arguments
    /// * `currency` - Currency code (e.g. "BTC")
    #[instrument(skip(self))]
    pub async fn get_balance(&self, currency: &str) -> RestResult<Balance> {
        self.client
            .execute("account/getbalance", &[("currency", currency)])
            .await?
            .into_result()
    }

    /// Get or generate a deposit address
    #[instrument(skip(self))]
    pub async fn get_deposit_address(&self, currency: &str) -> RestResult<DepositAddress> {
        self.client
            .execute("account/getdepositaddress", &[("currency", currency)])
            .await?
            .into_result()
    }

    /// Withdraw funds to an external address
    ///
    /// # Arguments
    /// * `currency` - Currency code
    /// * `quantity` - Amount to withdraw
    /// * `address` - Destination address
    /// * `payment_id` - Memo / tag / payment id, for currencies that need one
    #[instrument(skip(self))]
    pub async fn withdraw(
        &self,
        currency: &str,
        quantity: Decimal,
        address: &str,
        payment_id: Option<&str>,
    ) -> RestResult<OrderUuid> {
        let quantity = quantity.to_string();
        let mut params: Vec<(&str, &str)> = vec![
            ("currency", currency),
            ("quantity", quantity.as_str()),
            ("address", address),
        ];
        if let Some(payment_id) = payment_id {
            params.push(("paymentid", payment_id));
        }

        self.client
            .execute("account/withdraw", &params)
            .await?
            .into_result()
    }

    /// Get a single order by uuid
    #[instrument(skip(self))]
    pub async fn get_order(&self, uuid: &str) -> RestResult<Order> {
        self.client
            .execute("account/getorder", &[("uuid", uuid)])
            .await?
            .into_result()
    }

    /// Get order history, optionally for one market only
    #[instrument(skip(self))]
    pub async fn get_order_history(
        &self,
        market: Option<&str>,
    ) -> RestResult<Vec<OrderHistoryEntry>> {
        let params: Vec<(&str, &str)> = market.map(|m| ("market", m)).into_iter().collect();

        self.client
            .execute("account/getorderhistory", &params)
            .await?
            .into_result()
    }

    /// Get withdrawal history, optionally for one currency only
    #[instrument(skip(self))]
    pub async fn get_withdrawal_history(
        &self,
        currency: Option<&str>,
    ) -> RestResult<Vec<Withdrawal>> {
        let params: Vec<(&str, &str)> = currency.map(|c| ("currency", c)).into_iter().collect();

        self.client
            .execute("account/getwithdrawalhistory", &params)
            .await?
            .into_result()
    }

    /// Get deposit history, optionally for one currency only
    #[instrument(skip(self))]
    pub async fn get_deposit_history(&self, currency: Option<&str>) -> RestResult<Vec<Deposit>> {
        let params: Vec<(&str, &str)> = currency.map(|c| ("currency", c)).into_iter().collect();

        self.client
            .execute("account/getdeposithistory", &params)
            .await?
            .into_result()
    }
}
