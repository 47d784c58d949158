//! Error types for REST API operations
//!
//! Two failure kinds matter to callers: [`RestError::Http`] when the request
//! did not produce a `200` (or never completed), and [`RestError::Api`] when
//! the exchange answered `200` with `success: false`. Use [`RestError::kind`]
//! to branch on them.

use crate::transport::TransportError;
use bittrex_auth::AuthError;
use std::fmt;

/// Discriminant of a [`RestError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Transport failure or non-200 status
    Http,
    /// Envelope reported `success: false`
    Api,
    /// Response could not be decoded into the expected shape
    Decode,
    /// Query parameters could not be encoded
    Encode,
    /// Credentials missing or invalid
    Credentials,
}

/// HTTP-level failure
///
/// Either wraps a transport error (the request never completed) or carries
/// the status code and text of a non-200 response.
#[derive(Debug, thiserror::Error)]
pub struct HttpFailure {
    /// HTTP status code, when a response was received
    pub status_code: Option<u16>,
    /// Status text as supplied by the transport
    pub status_text: Option<String>,
    /// Underlying transport error
    #[source]
    pub cause: Option<TransportError>,
}

impl HttpFailure {
    /// Failure for a response with a non-200 status
    pub fn from_status(status_code: u16, status_text: Option<String>) -> Self {
        Self {
            status_code: Some(status_code),
            status_text,
            cause: None,
        }
    }

    /// Failure for a request that never completed
    pub fn from_transport(cause: TransportError) -> Self {
        let (status_code, status_text) = match &cause {
            TransportError::Status {
                status,
                status_text,
            } => (Some(*status), status_text.clone()),
            _ => (None, None),
        };

        Self {
            status_code,
            status_text,
            cause: Some(cause),
        }
    }

    /// Check if the request timed out
    pub fn is_timeout(&self) -> bool {
        self.cause.as_ref().is_some_and(TransportError::is_timeout)
    }
}

impl fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.cause, self.status_code) {
            (Some(cause), _) => write!(f, "HTTP request failed: {}", cause),
            (None, Some(code)) => write!(
                f,
                "HTTP request failed: received status code {} and text \"{}\"",
                code,
                self.status_text.as_deref().unwrap_or("null")
            ),
            (None, None) => write!(f, "HTTP request failed"),
        }
    }
}

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Transport failure or non-200 status
    #[error(transparent)]
    Http(#[from] HttpFailure),

    /// Exchange reported `success: false`
    #[error("API request failed: {message}")]
    Api {
        /// Message from the response envelope
        message: String,
    },

    /// Response did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Query parameters could not be encoded
    #[error("Failed to encode query: {0}")]
    Encode(String),

    /// Credentials missing or invalid
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl From<TransportError> for RestError {
    fn from(err: TransportError) -> Self {
        Self::Http(HttpFailure::from_transport(err))
    }
}

impl RestError {
    /// Create an API error from the envelope message
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// The discriminant of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(_) => ErrorKind::Http,
            Self::Api { .. } => ErrorKind::Api,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Encode(_) => ErrorKind::Encode,
            Self::Auth(_) => ErrorKind::Credentials,
        }
    }

    /// Check if this is an HTTP failure
    pub fn is_http(&self) -> bool {
        self.kind() == ErrorKind::Http
    }

    /// Check if this is an API failure
    pub fn is_api(&self) -> bool {
        self.kind() == ErrorKind::Api
    }

    /// Status code of an HTTP failure, if one was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http(failure) => failure.status_code,
            _ => None,
        }
    }

    /// Envelope message of an API failure
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api { message } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
