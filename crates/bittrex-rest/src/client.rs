//! Main REST client implementation

use crate::endpoints::{AccountEndpoints, MarketEndpoints, PublicEndpoints};
use crate::error::{HttpFailure, RestError, RestResult};
use crate::transport::{
    ReqwestTransport, Transport, TransportOptions, TransportRequest, TransportResponse,
};
use crate::types::{Balance, Envelope, ExchangeResponse, MarketSummary, OrderUuid, Ticker};
use bittrex_auth::{Credentials, RequestSigner};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Default API host and prefix
pub const DEFAULT_BASE_URL: &str = "https://bittrex.com/api";

/// Default API version path segment
pub const DEFAULT_API_VERSION: &str = "v1.1";

/// Header carrying the request signature
pub const API_SIGN_HEADER: &str = "apisign";

/// Log target for request/response lines
pub const HTTP_LOG_TARGET: &str = "bittrex_rest::http";

const API_KEY_PARAM: &str = "apikey";
const NONCE_PARAM: &str = "nonce";

/// Client configuration
///
/// Immutable once handed to [`BittrexRestClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials
    pub credentials: Credentials,
    /// API version path segment
    pub api_version: String,
    /// Scheme, host and `/api` prefix
    pub base_url: String,
    /// Client-level transport overrides
    pub transport: TransportOptions,
}

impl ClientConfig {
    /// Create a configuration with default version and host
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_version: DEFAULT_API_VERSION.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            transport: TransportOptions::default(),
        }
    }

    /// Load credentials from the environment
    pub fn from_env() -> RestResult<Self> {
        Ok(Self::new(Credentials::from_env()?))
    }

    /// Set API version
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.transport.timeout = Some(timeout);
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.transport.user_agent = Some(user_agent.into());
        self
    }

    /// Add an extra header sent with every request
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.transport = self.transport.with_header(name, value);
        self
    }

    /// Replace the client-level transport overrides
    pub fn with_transport_options(mut self, options: TransportOptions) -> Self {
        self.transport = options;
        self
    }
}

/// Bittrex REST API client
///
/// Every request is signed: the query string carries `apikey` and a fresh
/// `nonce`, and the `apisign` header carries the HMAC-SHA512 of the full URL.
///
/// # Example
///
/// ```no_run
/// use bittrex_rest::{BittrexRestClient, ClientConfig, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let creds = Credentials::from_env()?;
///     let client = BittrexRestClient::new(ClientConfig::new(creds));
///
///     let ticker = client.get_ticker("BTC-LTC").await?;
///     println!("BTC-LTC last: {}", ticker.last);
///
///     let balances = client.get_balances().await?;
///     println!("{} balances", balances.len());
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BittrexRestClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl BittrexRestClient {
    /// Create a client using the `reqwest` transport
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client from `BITTREX_API_KEY` / `BITTREX_API_SECRET`
    pub fn from_env() -> RestResult<Self> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    /// Create a client with a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        info!(
            base_url = %config.base_url,
            api_version = %config.api_version,
            "Created Bittrex REST client"
        );

        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issue a signed GET with the client's transport options
    pub async fn execute(&self, path: &str, params: &[(&str, &str)]) -> RestResult<ExchangeResponse> {
        self.request(path, params, &TransportOptions::default()).await
    }

    /// Issue a signed GET
    ///
    /// `options` override the client-level transport options for this call
    /// only.
    ///
    /// # Errors
    /// - `RestError::Http` if the transport fails or the status is not 200
    /// - `RestError::Api` if the envelope reports `success: false`
    /// - `RestError::Decode` if the body is not an envelope
    pub async fn request(
        &self,
        path: &str,
        params: &[(&str, &str)],
        options: &TransportOptions,
    ) -> RestResult<ExchangeResponse> {
        let signer = RequestSigner::new(&self.config.credentials);
        let query = build_query(params, signer.api_key(), signer.nonce())?;
        let url = build_url(&self.config.base_url, &self.config.api_version, path, &query);
        let signature = signer.sign(&url);

        let mut headers = BTreeMap::new();
        headers.insert(API_SIGN_HEADER.to_string(), signature);

        let request = TransportRequest {
            url,
            headers,
            options: TransportOptions::defaults()
                .merge(&self.config.transport)
                .merge(options),
            reject_error_status: false,
        };

        debug!(target: HTTP_LOG_TARGET, url = %request.url, "GET");

        let response = self
            .transport
            .get(request)
            .await
            .map_err(HttpFailure::from_transport)?;

        debug!(
            target: HTTP_LOG_TARGET,
            status = response.status,
            body = %response.body,
            "Response received"
        );

        normalize(response)
    }

    // ========================================================================
    // Endpoint groups
    // ========================================================================

    /// Public market data endpoints
    pub fn public(&self) -> PublicEndpoints<'_> {
        PublicEndpoints::new(self)
    }

    /// Order placement endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Account endpoints
    pub fn account(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(self)
    }

    // ========================================================================
    // Shortcuts
    // ========================================================================

    /// Get the ticker for a market (e.g. "BTC-LTC")
    pub async fn get_ticker(&self, market: &str) -> RestResult<Ticker> {
        self.public().get_ticker(market).await
    }

    /// Get the 24h summary for a market
    pub async fn get_market_summary(&self, market: &str) -> RestResult<MarketSummary> {
        self.public().get_market_summary(market).await
    }

    /// Get all balances
    pub async fn get_balances(&self) -> RestResult<Vec<Balance>> {
        self.account().get_balances().await
    }

    /// Place a limit buy order
    pub async fn buy_limit(
        &self,
        market: &str,
        quantity: Decimal,
        rate: Decimal,
    ) -> RestResult<OrderUuid> {
        self.market().buy_limit(market, quantity, rate).await
    }

    /// Place a limit sell order
    pub async fn sell_limit(
        &self,
        market: &str,
        quantity: Decimal,
        rate: Decimal,
    ) -> RestResult<OrderUuid> {
        self.market().sell_limit(market, quantity, rate).await
    }

    /// Cancel an order
    pub async fn cancel_order(&self, uuid: &str) -> RestResult<()> {
        self.market().cancel(uuid).await
    }
}

impl std::fmt::Debug for BittrexRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BittrexRestClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Serialize the caller's params plus the mandatory `apikey` and `nonce`
///
/// Caller-supplied `apikey`/`nonce` pairs are dropped so the injected values
/// always win.
pub(crate) fn build_query(params: &[(&str, &str)], api_key: &str, nonce: &str) -> RestResult<String> {
    let mut pairs: Vec<(&str, &str)> = params
        .iter()
        .filter(|(key, _)| *key != API_KEY_PARAM && *key != NONCE_PARAM)
        .copied()
        .collect();
    pairs.push((API_KEY_PARAM, api_key));
    pairs.push((NONCE_PARAM, nonce));

    serde_urlencoded::to_string(&pairs).map_err(|e| RestError::Encode(e.to_string()))
}

/// Join base, version and path with exactly one `/` between segments
pub(crate) fn build_url(base_url: &str, api_version: &str, path: &str, query: &str) -> String {
    let mut url = base_url.trim_end_matches('/').to_string();
    for segment in [api_version, path] {
        let segment = segment.trim_matches('/');
        if !segment.is_empty() {
            url.push('/');
            url.push_str(segment);
        }
    }
    if !query.is_empty() {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// Turn a transport response into a successful response or a typed failure
fn normalize(response: TransportResponse) -> RestResult<ExchangeResponse> {
    let TransportResponse {
        status,
        status_text,
        headers,
        body,
    } = response;

    if status != 200 {
        return Err(HttpFailure::from_status(status, status_text).into());
    }

    let envelope: Envelope = serde_json::from_value(body)
        .map_err(|e| RestError::Decode(format!("invalid response envelope: {}", e)))?;

    if !envelope.success {
        return Err(RestError::api(envelope.message));
    }

    Ok(ExchangeResponse {
        status,
        status_text,
        headers,
        envelope,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::{json, Value};

    #[test]
    fn test_build_url_separators() {
        let expected = "https://bittrex.com/api/v1.1/public/getmarkets?apikey=k";
        for (base, version, path) in [
            ("https://bittrex.com/api", "v1.1", "public/getmarkets"),
            ("https://bittrex.com/api/", "v1.1", "/public/getmarkets"),
            ("https://bittrex.com/api", "/v1.1/", "public/getmarkets/"),
            ("https://bittrex.com/api/", "v1.1/", "//public/getmarkets"),
        ] {
            assert_eq!(build_url(base, version, path, "apikey=k"), expected);
        }
    }

    #[test]
    fn test_build_url_without_query() {
        assert_eq!(
            build_url("https://bittrex.com/api", "v1.1", "public/getmarkets", ""),
            "https://bittrex.com/api/v1.1/public/getmarkets"
        );
    }

    #[test]
    fn test_build_query_injects_mandatory_params() {
        let query = build_query(&[], "key", "nonce123").unwrap();
        assert_eq!(query, "apikey=key&nonce=nonce123");
    }

    #[test]
    fn test_build_query_cannot_override_mandatory_params() {
        let query = build_query(
            &[("market", "BTC-LTC"), ("apikey", "evil"), ("nonce", "reused")],
            "key",
            "fresh",
        )
        .unwrap();
        assert_eq!(query, "market=BTC-LTC&apikey=key&nonce=fresh");
    }

    #[test]
    fn test_build_query_encodes_values() {
        let query = build_query(&[("address", "a b&c")], "key", "ab+/cd==").unwrap();
        assert_eq!(query, "address=a+b%26c&apikey=key&nonce=ab%2B%2Fcd%3D%3D");
    }

    #[test]
    fn test_normalize_success() {
        let response = normalize(TransportResponse::ok(
            json!({"success": true, "message": "", "result": [1, 2]}),
        ))
        .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.result(), &json!([1, 2]));
    }

    #[test]
    fn test_normalize_status_failure() {
        let err = normalize(TransportResponse::new(502, Some("Bad Gateway"), Value::Null)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Http);
        assert!(err
            .to_string()
            .contains("received status code 502 and text \"Bad Gateway\""));
    }

    #[test]
    fn test_normalize_api_failure() {
        let err = normalize(TransportResponse::ok(
            json!({"success": false, "message": "MARKET_NOT_PROVIDED", "result": null}),
        ))
        .unwrap_err();
        assert_eq!(err.api_message(), Some("MARKET_NOT_PROVIDED"));
    }

    #[test]
    fn test_normalize_non_envelope_body() {
        let err = normalize(TransportResponse::ok(Value::String("<html>".into()))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_config_builder() {
        let creds = Credentials::new("key", "secret").unwrap();
        let config = ClientConfig::new(creds)
            .with_api_version("v2.0")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent")
            .with_header("x-trace", "1");

        assert_eq!(config.api_version, "v2.0");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.transport.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.transport.user_agent.as_deref(), Some("test-agent"));
        assert_eq!(config.transport.headers.as_ref().map(|h| h.len()), Some(1));
    }

    #[test]
    fn test_client_debug_hides_secret() {
        let creds = Credentials::new("key", "super_secret").unwrap();
        let client = BittrexRestClient::new(ClientConfig::new(creds));
        let debug = format!("{:?}", client);
        assert!(!debug.contains("super_secret"));
    }
}
