//! HTTP transport abstraction
//!
//! The executor never talks to `reqwest` directly. It hands a fully signed
//! [`TransportRequest`] to a [`Transport`] and inspects whatever comes back,
//! which lets executor logic be unit tested without network calls.
//!
//! # Layered options
//!
//! [`TransportOptions`] are merged per request from three tiers:
//! built-in defaults, client-level overrides and per-call overrides.
//! Each key set on a higher tier replaces the lower value entirely.
//!
//! ```
//! use bittrex_rest::transport::TransportOptions;
//! use std::time::Duration;
//!
//! let client = TransportOptions::new().with_timeout(Duration::from_secs(5));
//! let call = TransportOptions::new().with_user_agent("my-bot/1.0");
//!
//! let effective = TransportOptions::defaults().merge(&client).merge(&call);
//! assert_eq!(effective.timeout, Some(Duration::from_secs(5)));
//! assert_eq!(effective.user_agent.as_deref(), Some("my-bot/1.0"));
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use tracing::instrument;

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default user agent
pub const DEFAULT_USER_AGENT: &str = concat!("bittrex-rest/", env!("CARGO_PKG_VERSION"));

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Transport layer errors
#[derive(Error, Debug)]
pub enum TransportError {
    /// Request did not complete within the configured timeout
    #[error("timeout of {}ms exceeded", .0.as_millis())]
    Timeout(Duration),

    /// Connection could not be established
    #[error("connection failed: {message}")]
    Connect {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Request failed for another reason (invalid URL, TLS, body read)
    #[error("request failed: {message}")]
    Request {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Status code rejected by the transport
    ///
    /// Only produced when `TransportRequest::reject_error_status` is set.
    #[error("request rejected with status code {status}")]
    Status {
        status: u16,
        status_text: Option<String>,
    },
}

impl TransportError {
    /// Connection error without an underlying cause
    pub fn connect(message: impl Into<String>) -> Self {
        Self::Connect {
            message: message.into(),
            source: None,
        }
    }

    /// Request error without an underlying cause
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
            source: None,
        }
    }

    /// Check if this is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    fn from_reqwest(err: reqwest::Error, timeout: Option<Duration>) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)))
        } else if err.is_connect() {
            Self::Connect {
                message: err.to_string(),
                source: Some(Box::new(err)),
            }
        } else {
            Self::Request {
                message: err.to_string(),
                source: Some(Box::new(err)),
            }
        }
    }
}

/// Per-request transport settings
///
/// Every field is optional so that a value can act as an override layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOptions {
    /// Total request timeout
    pub timeout: Option<Duration>,
    /// User agent header
    pub user_agent: Option<String>,
    /// Extra request headers (replaced as a whole when merged)
    pub headers: Option<BTreeMap<String, String>>,
}

impl TransportOptions {
    /// Empty option layer
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in defaults applied beneath every other layer
    pub fn defaults() -> Self {
        Self {
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            headers: None,
        }
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Add an extra header to this layer
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Merge a higher-priority layer on top of this one
    pub fn merge(&self, higher: &TransportOptions) -> TransportOptions {
        TransportOptions {
            timeout: higher.timeout.or(self.timeout),
            user_agent: higher
                .user_agent
                .clone()
                .or_else(|| self.user_agent.clone()),
            headers: higher.headers.clone().or_else(|| self.headers.clone()),
        }
    }
}

/// A fully prepared GET request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// Absolute URL including the query string
    pub url: String,
    /// Request headers (replace same-named entries from `options`)
    pub headers: BTreeMap<String, String>,
    /// Effective transport options
    pub options: TransportOptions,
    /// Whether a non-2xx status should fail at the transport level
    pub reject_error_status: bool,
}

/// Raw response handed back to the executor
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Status text, if the transport supplies one
    pub status_text: Option<String>,
    /// Response headers
    pub headers: BTreeMap<String, String>,
    /// Parsed body. Empty bodies are `Null`, non-JSON bodies are `String`.
    pub body: Value,
}

impl TransportResponse {
    /// Create a response without headers
    pub fn new(status: u16, status_text: Option<&str>, body: Value) -> Self {
        Self {
            status,
            status_text: status_text.map(str::to_string),
            headers: BTreeMap::new(),
            body,
        }
    }

    /// `200 OK` response with a JSON body
    pub fn ok(body: Value) -> Self {
        Self::new(200, Some("OK"), body)
    }
}

/// Parse a raw body the way the executor expects it
pub(crate) fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
    }
}

/// Trait for HTTP transport abstraction
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a GET request
    async fn get(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Production transport backed by `reqwest`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a fresh connection pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing `reqwest` client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(timeout = ?request.options.timeout))]
    async fn get(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let timeout = request.options.timeout;
        let mut builder = self.client.get(&request.url);

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder = builder.headers(header_map(&request)?);

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, timeout))?;

        let status = response.status();
        let status_text = status.canonical_reason().map(str::to_string);

        if request.reject_error_status && !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                status_text,
            });
        }

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let text = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(e, timeout))?;

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text,
            headers,
            body: parse_body(&text),
        })
    }
}

/// Collapse option headers, user agent and request headers into one map
///
/// Later sources replace earlier ones; request headers are applied last.
fn header_map(request: &TransportRequest) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::new();

    if let Some(headers) = &request.options.headers {
        for (name, value) in headers {
            map.insert(header_name(name)?, header_value(value)?);
        }
    }
    if let Some(user_agent) = &request.options.user_agent {
        map.insert(USER_AGENT, header_value(user_agent)?);
    }
    for (name, value) in &request.headers {
        map.insert(header_name(name)?, header_value(value)?);
    }

    Ok(map)
}

fn header_name(name: &str) -> Result<HeaderName, TransportError> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|e| TransportError::Request {
        message: format!("invalid header name {:?}", name),
        source: Some(Box::new(e)),
    })
}

fn header_value(value: &str) -> Result<HeaderValue, TransportError> {
    HeaderValue::from_str(value).map_err(|e| TransportError::Request {
        message: "invalid header value".to_string(),
        source: Some(Box::new(e)),
    })
}

/// A queued reply for [`MockTransport`]
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug)]
enum MockReply {
    Respond {
        delay: Option<Duration>,
        response: TransportResponse,
    },
    Fail(TransportError),
}

/// Mock transport for testing
///
/// Replies are returned in the order they were queued and every request is
/// captured for inspection. A delayed reply honours the request timeout the
/// same way a real transport would.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: parking_lot::Mutex<std::collections::VecDeque<MockReply>>,
    requests: parking_lot::Mutex<Vec<TransportRequest>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response
    pub fn push_response(&self, response: TransportResponse) {
        self.replies.lock().push_back(MockReply::Respond {
            delay: None,
            response,
        });
    }

    /// Queue a `200 OK` JSON response
    pub fn push_json(&self, body: Value) {
        self.push_response(TransportResponse::ok(body));
    }

    /// Queue a response delivered after `delay`
    pub fn push_delayed(&self, delay: Duration, response: TransportResponse) {
        self.replies.lock().push_back(MockReply::Respond {
            delay: Some(delay),
            response,
        });
    }

    /// Queue a transport failure
    pub fn push_error(&self, error: TransportError) {
        self.replies.lock().push_back(MockReply::Fail(error));
    }

    /// All requests seen so far
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().clone()
    }

    /// The most recent request
    pub fn last_request(&self) -> Option<TransportRequest> {
        self.requests.lock().last().cloned()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let timeout = request.options.timeout;
        let reject_error_status = request.reject_error_status;
        self.requests.lock().push(request);

        let reply = self.replies.lock().pop_front();
        let response = match reply {
            Some(MockReply::Respond { delay, response }) => {
                if let Some(delay) = delay {
                    match timeout {
                        Some(timeout) if timeout < delay => {
                            tokio::time::sleep(timeout).await;
                            return Err(TransportError::Timeout(timeout));
                        }
                        _ => tokio::time::sleep(delay).await,
                    }
                }
                response
            }
            Some(MockReply::Fail(error)) => return Err(error),
            None => return Err(TransportError::connect("mock transport has no queued reply")),
        };

        if reject_error_status && !(200..300).contains(&response.status) {
            return Err(TransportError::Status {
                status: response.status,
                status_text: response.status_text,
            });
        }
        Ok(response)
    }
}
