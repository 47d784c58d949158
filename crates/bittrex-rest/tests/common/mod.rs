//! Common test utilities and fixtures for integration tests
//!
//! Sample payloads follow the shapes returned by the live v1.1 API.

#![allow(dead_code)]

use bittrex_rest::transport::TransportRequest;
use bittrex_rest::{BittrexRestClient, ClientConfig, Credentials, MockTransport};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub const API_KEY: &str = "test_api_key";
pub const API_SECRET: &str = "test_api_secret";

/// Sample getmarketsummary result (one-element array)
pub const MARKET_SUMMARY_RESULT: &str = r#"[{
    "MarketName": "BTC-LTC",
    "High": 0.01350000,
    "Low": 0.01200000,
    "Volume": 3833.97619253,
    "Last": 0.01349998,
    "BaseVolume": 47.03987026,
    "TimeStamp": "2014-07-09T07:22:16.72",
    "Bid": 0.01271001,
    "Ask": 0.01291100,
    "OpenBuyOrders": 45,
    "OpenSellOrders": 45,
    "PrevDay": 0.01229501,
    "Created": "2014-02-13T00:00:00"
}]"#;

/// Sample getorderbook?type=both result
pub const ORDER_BOOK_RESULT: &str = r#"{
    "buy": [
        {"Quantity": 12.37000000, "Rate": 0.02525000},
        {"Quantity": 32.55412402, "Rate": 0.02540000}
    ],
    "sell": [
        {"Quantity": 38.37000000, "Rate": 0.02560000},
        {"Quantity": 10.00000000, "Rate": 0.02570000}
    ]
}"#;

/// Sample getbalances result
pub const BALANCES_RESULT: &str = r#"[
    {
        "Currency": "DOGE",
        "Balance": 0.00000000,
        "Available": 0.00000000,
        "Pending": 0.00000000,
        "CryptoAddress": "DLxcEt3AatMyr2NTatzjsfHNoB9NT62HiF",
        "Requested": false,
        "Uuid": null
    },
    {
        "Currency": "BTC",
        "Balance": 14.21549076,
        "Available": 14.21549076,
        "Pending": 0.00000000,
        "CryptoAddress": "1Mrcdr6715hjda34pdXuLqXcju6qgwHA31",
        "Requested": false,
        "Uuid": null
    }
]"#;

/// Sample getwithdrawalhistory result
pub const WITHDRAWAL_HISTORY_RESULT: &str = r#"[{
    "PaymentUuid": "b52c7a5c-90c6-4c6e-835c-e16df12708b1",
    "Currency": "BTC",
    "Amount": 17.00000000,
    "Address": "1DeaaFBdbB5nrHj87x3NHS4onvw1GPNyAu",
    "Opened": "2014-07-09T04:24:47.217",
    "Authorized": true,
    "PendingPayment": false,
    "TxCost": 0.00020000,
    "TxId": null,
    "Canceled": true,
    "InvalidAddress": false
}]"#;

/// Sample getdeposithistory result
pub const DEPOSIT_HISTORY_RESULT: &str = r#"[{
    "Id": 1,
    "Amount": 0.00156121,
    "Currency": "BTC",
    "Confirmations": 2,
    "LastUpdated": "2014-02-13T07:38:53.883",
    "TxId": "e26d3b33fcfc2cb0c74d0938034956ea590339170bf4102f080eab4b85da9bde",
    "CryptoAddress": "15VyEAT4uf7ycrNWZVb1eGMzrs21BH95Xb"
}]"#;

/// Sample getopenorders result
pub const OPEN_ORDERS_RESULT: &str = r#"[{
    "Uuid": null,
    "OrderUuid": "09aa5bb6-8232-41aa-9b78-a5a1093e0211",
    "Exchange": "BTC-LTC",
    "OrderType": "LIMIT_SELL",
    "Quantity": 5.00000000,
    "QuantityRemaining": 5.00000000,
    "Limit": 2.00000000,
    "CommissionPaid": 0.00000000,
    "Price": 0.00000000,
    "PricePerUnit": null,
    "Opened": "2014-07-09T03:55:48.77",
    "Closed": null,
    "CancelInitiated": false,
    "ImmediateOrCancel": false,
    "IsConditional": false,
    "Condition": null,
    "ConditionTarget": null
}]"#;

/// Build a successful envelope around `result`
pub fn envelope(result: Value) -> Value {
    json!({ "success": true, "message": "", "result": result })
}

/// Build a successful envelope from a raw JSON fixture
pub fn envelope_str(result: &str) -> Value {
    envelope(serde_json::from_str(result).expect("fixture is valid JSON"))
}

pub fn credentials() -> Credentials {
    Credentials::new(API_KEY, API_SECRET).expect("valid test credentials")
}

/// Client wired to a mock transport
pub fn mock_client() -> (BittrexRestClient, Arc<MockTransport>) {
    mock_client_with(ClientConfig::new(credentials()))
}

pub fn mock_client_with(config: ClientConfig) -> (BittrexRestClient, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new());
    let client = BittrexRestClient::with_transport(config, transport.clone());
    (client, transport)
}

/// Split a request URL into its path and decoded query pairs
pub fn split_url(url: &str) -> (String, HashMap<String, String>) {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    let pairs: Vec<(String, String)> =
        serde_urlencoded::from_str(query).expect("query string decodes");
    (path.to_string(), pairs.into_iter().collect())
}

/// Query pairs of a captured request
pub fn query_of(request: &TransportRequest) -> HashMap<String, String> {
    split_url(&request.url).1
}

/// Serve exactly one raw HTTP response on a loopback port
///
/// Returns the base URL to point the client at.
pub async fn serve_once(raw_response: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 8192];
        let _ = socket.read(&mut buf).await;
        socket.write_all(raw_response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });

    format!("http://{}/api", addr)
}

/// Serve one raw HTTP response and hand back the raw request bytes
pub async fn serve_recording(raw_response: String) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 8192];
        let n = socket.read(&mut buf).await.unwrap_or(0);
        let _ = tx.send(String::from_utf8_lossy(&buf[..n]).into_owned());
        socket.write_all(raw_response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });

    (format!("http://{}/api", addr), rx)
}

/// Header lines of a raw request matching `name` (case-insensitive)
pub fn header_lines<'a>(raw_request: &'a str, name: &str) -> Vec<&'a str> {
    raw_request
        .lines()
        .filter_map(|line| line.split_once(':'))
        .filter(|(key, _)| key.trim().eq_ignore_ascii_case(name))
        .map(|(_, value)| value.trim())
        .collect()
}

/// Accept one connection and never answer it
pub async fn serve_silent(hold_for: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(hold_for).await;
        drop(socket);
    });

    format!("http://{}/api", addr)
}

/// Raw HTTP/1.1 response with a body
pub fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    )
}
