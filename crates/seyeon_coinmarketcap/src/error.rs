use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Which configured limit expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutPhase {
    Connect,
    Request,
}

impl fmt::Display for TimeoutPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeoutPhase::Connect => write!(f, "connect"),
            TimeoutPhase::Request => write!(f, "request"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CoinmarketcapError {
    /// The host could not be reached or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// `limit` is the configured duration for `phase`.
    #[error("{phase} to {url} timed out after {limit:?}")]
    Timeout {
        url: String,
        phase: TimeoutPhase,
        limit: Duration,
    },

    #[error("{url} answered with status {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    /// The body arrived but did not have the shape the endpoint promises.
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{endpoint} response contained no ticker")]
    EmptyResponse { endpoint: String },

    #[error("base url cannot carry path segments: {0}")]
    InvalidBaseUrl(String),

    /// Rejected before any request is sent.
    #[error("invalid path segment {0:?}")]
    InvalidPathSegment(String),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("unsupported conversion currency: {0}")]
    InvalidCurrency(String),
}

impl CoinmarketcapError {
    /// True when the server was never reached or refused to answer with a success.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CoinmarketcapError::Transport { .. }
                | CoinmarketcapError::Timeout { .. }
                | CoinmarketcapError::Status { .. }
        )
    }

    /// True when a response body was received but could not be turned into the expected type.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            CoinmarketcapError::Decode { .. } | CoinmarketcapError::EmptyResponse { .. }
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, CoinmarketcapError::Timeout { .. })
    }

    pub(crate) fn from_reqwest(url: &str, timeouts: &Timeouts, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            let phase = if source.is_connect() {
                TimeoutPhase::Connect
            } else {
                TimeoutPhase::Request
            };

            CoinmarketcapError::timed_out(url, phase, timeouts)
        } else {
            CoinmarketcapError::Transport {
                url: url.to_string(),
                source,
            }
        }
    }

    pub(crate) fn timed_out(url: &str, phase: TimeoutPhase, timeouts: &Timeouts) -> Self {
        CoinmarketcapError::Timeout {
            url: url.to_string(),
            phase,
            limit: timeouts.limit(phase),
        }
    }
}

/// The two limits a client is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request: Duration,
    pub connect: Duration,
}

impl Timeouts {
    pub fn limit(&self, phase: TimeoutPhase) -> Duration {
        match phase {
            TimeoutPhase::Connect => self.connect,
            TimeoutPhase::Request => self.request,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoinmarketcapError>;
