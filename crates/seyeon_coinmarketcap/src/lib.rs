pub mod currency;
pub mod error;
pub mod global_data;
pub mod method;
pub mod serde_parsers;
pub mod ticker;

pub use currency::Currency;
pub use error::{CoinmarketcapError, Result, TimeoutPhase, Timeouts};
pub use global_data::{Global, GlobalData};
pub use method::Method;
pub use ticker::{Tick, TickerById, TickerParams, Tickers, Ticks};

use bytes::Bytes;
use reqwest::{Client, ClientBuilder, Url};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

// Base URL for CoinMarketCap public API
pub const BASE_URL: &str = "https://api.coinmarketcap.com";
pub const API_VERSION: &str = "v1";

const STATUS_BODY_SNIPPET: usize = 512;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_version: String,
    /// Whole-request timeout, including reading the body.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            api_version: API_VERSION.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Client for the CoinMarketCap v1 public API.
///
/// Cloning is cheap and clones share one connection pool. The underlying
/// `reqwest::Client` is safe to use from many tasks at once, so a single
/// instance can be handed to every caller. Dropping a pending call's future
/// aborts the request.
#[derive(Debug, Clone)]
pub struct CoinmarketcapClient {
    reqwest: Client,
    base_url: Url,
    api_version: String,
    timeouts: Timeouts,
}

impl CoinmarketcapClient {
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(CoinmarketcapError::InvalidBaseUrl(config.base_url));
        }

        let reqwest = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(CoinmarketcapError::Client)?;

        Ok(Self {
            reqwest,
            base_url,
            api_version: config.api_version,
            timeouts: Timeouts {
                request: config.timeout,
                connect: config.connect_timeout,
            },
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeouts.request
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    // All tickers, in the order the server ranks them
    pub async fn get_tickers(&self) -> Result<Ticks> {
        self.call(&Tickers::default()).await
    }

    // Top `limit` tickers; the limit is not checked locally
    pub async fn get_tickers_limit(&self, limit: i64) -> Result<Ticks> {
        let params = TickerParams::builder().limit(limit).build();
        self.call(&Tickers { params }).await
    }

    // Tickers with any combination of `limit` and `convert`
    pub async fn get_tickers_with(&self, params: TickerParams) -> Result<Ticks> {
        self.call(&Tickers { params }).await
    }

    /// Single asset by its slug id, e.g. `bitcoin`.
    ///
    /// The endpoint answers with a one-element array; an empty array is reported as
    /// [`CoinmarketcapError::EmptyResponse`].
    pub async fn get_ticker(&self, id: &str) -> Result<Tick> {
        let method = TickerById { id: id.to_string() };
        let ticks = self.call(&method).await?;

        ticks
            .into_iter()
            .next()
            .ok_or_else(|| CoinmarketcapError::EmptyResponse {
                endpoint: method.endpoint(),
            })
    }

    // Global market snapshot
    pub async fn get_global_data(&self) -> Result<GlobalData> {
        self.call(&Global::default()).await
    }

    // Global market snapshot with totals also given in `currency`
    pub async fn get_global_data_convert(&self, currency: Currency) -> Result<GlobalData> {
        self.call(&Global {
            convert: Some(currency),
        })
        .await
    }

    pub async fn call<M: Method>(&self, method: &M) -> Result<M::Response> {
        let params = method.params();
        let url = self.endpoint_url(method.segments(), params.as_ref())?;

        let body = self.send(url).await?;

        decode(&method.endpoint(), &body)
    }

    /// GET `{base_url}/{api_version}/{endpoint}/` with `params` as the query string and
    /// return the raw body. `endpoint` is split on `/`; each piece becomes one path segment.
    ///
    /// Connection failures and timeouts are transport errors; a non-success status is
    /// reported as [`CoinmarketcapError::Status`]. No retry is attempted.
    pub async fn fetch(
        &self,
        endpoint: &str,
        params: Option<&HashMap<String, String>>,
    ) -> Result<Bytes> {
        let segments = endpoint.split('/').filter(|segment| !segment.is_empty());
        let url = self.endpoint_url(segments, params)?;

        self.send(url).await
    }

    async fn send(&self, url: Url) -> Result<Bytes> {
        debug!(%url, "coinmarketcap request");

        let response = self
            .reqwest
            .get(url.clone())
            .send()
            .await
            .map_err(|e| CoinmarketcapError::from_reqwest(url.as_str(), &self.timeouts, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| CoinmarketcapError::from_reqwest(url.as_str(), &self.timeouts, e))?;

        debug!(%url, %status, bytes = body.len(), "coinmarketcap response");

        if !status.is_success() {
            let snippet = &body[..body.len().min(STATUS_BODY_SNIPPET)];
            return Err(CoinmarketcapError::Status {
                url: url.to_string(),
                status,
                body: String::from_utf8_lossy(snippet).into_owned(),
            });
        }

        Ok(body)
    }

    // Segments are pushed one by one, percent-encoded; `.`, `..` and empty ones are refused
    // since the url would resolve them away.
    fn endpoint_url<I>(&self, segments: I, params: Option<&HashMap<String, String>>) -> Result<Url>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();

        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| CoinmarketcapError::InvalidBaseUrl(self.base_url.to_string()))?;
            path.pop_if_empty().push(&self.api_version);

            for segment in segments {
                let segment = segment.as_ref();
                if matches!(segment, "" | "." | "..") {
                    return Err(CoinmarketcapError::InvalidPathSegment(segment.to_string()));
                }
                path.push(segment);
            }

            path.push("");
        }

        if let Some(params) = params.filter(|params| !params.is_empty()) {
            url.query_pairs_mut().extend_pairs(params);
        }

        Ok(url)
    }
}

fn decode<R: DeserializeOwned>(endpoint: &str, body: &[u8]) -> Result<R> {
    serde_json::from_slice(body).map_err(|source| CoinmarketcapError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}
