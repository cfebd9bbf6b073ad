//! Error taxonomy for the fetch pipeline.
//!
//! Location and network failures stay typed all the way to the
//! orchestrator, which classifies whichever error occurred into a single
//! user-facing message via [`FetchError::user_message`].

use thiserror::Error;

/// Failures reported by the location platform during an active request.
///
/// Permission denial alone is not an error; the resolver answers it with
/// the fallback coordinate.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("permission denied")]
    Denied,

    #[error("access restricted")]
    Restricted,

    /// The platform reported completion without delivering a fix.
    #[error("no location fix was delivered")]
    NoFix,

    /// A second fix was requested while one was still pending.
    #[error("a location request is already in flight")]
    RequestInFlight,

    #[error("{0}")]
    Unknown(String),
}

/// Failures in the weather HTTP client.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("invalid request URL")]
    InvalidUrl,

    /// Transport-level failure: the request never produced a usable body.
    #[error("no response data: {0}")]
    NoData(String),

    #[error("decoding failed: {0}")]
    Decoding(String),

    /// The API's own error envelope (`{"error":{"message":...}}`).
    #[error("server reported: {0}")]
    Server(String),

    #[error("HTTP status {0}")]
    Http(u16),
}

/// Single tagged union at the orchestrator boundary.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("location error: {0}")]
    Location(#[from] LocationError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),
}

impl FetchError {
    /// User-facing message shown in the Error view state.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Network(NetworkError::InvalidUrl) => {
                "Invalid URL configuration".to_string()
            }
            FetchError::Network(NetworkError::Server(message)) => {
                format!("Server error: {message}")
            }
            FetchError::Network(NetworkError::Decoding(detail)) => {
                format!("Failed to process weather data: {detail}")
            }
            FetchError::Network(NetworkError::Http(code)) => format!("HTTP error: {code}"),
            FetchError::Location(error) => format!("Location error: {error}"),
            FetchError::Network(NetworkError::NoData(detail)) => {
                format!("Failed to load weather data: {detail}")
            }
        }
    }
}
