//! Shared fixtures for the coinmarketcap integration tests

#![allow(dead_code)]

use seyeon_coinmarketcap::{ClientConfig, CoinmarketcapClient, CoinmarketcapError};
use serde_json::{Value, json};
use std::net::TcpListener;
use std::time::Duration;
use wiremock::MockServer;

pub const GLOBAL_SAMPLE: &str = r#"{"total_market_cap_usd":12756692479.0,"total_24h_volume_usd":135078435.0,"bitcoin_percentage_of_market_cap":83.34,"active_currencies":653,"active_assets":59,"active_markets":1995}"#;

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn client_for(server: &MockServer) -> CoinmarketcapClient {
    client_with_base(&server.uri(), Duration::from_secs(5))
}

pub fn client_with_base(base_url: &str, timeout: Duration) -> CoinmarketcapClient {
    CoinmarketcapClient::with_config(ClientConfig {
        base_url: base_url.to_string(),
        timeout,
        connect_timeout: timeout,
        ..ClientConfig::default()
    })
    .expect("client init")
}

/// A base url nothing listens on.
pub fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);

    format!("http://127.0.0.1:{port}")
}

pub fn tick_json(id: &str, symbol: &str, rank: u32) -> Value {
    json!({
        "id": id,
        "name": id[..1].to_uppercase() + &id[1..],
        "symbol": symbol,
        "rank": rank.to_string(),
        "price_usd": "573.137",
        "price_btc": "1.0",
        "24h_volume_usd": "72855700.0",
        "market_cap_usd": "9080883500.0",
        "available_supply": "15844176.0",
        "total_supply": "15844176.0",
        "percent_change_1h": "0.04",
        "percent_change_24h": "-0.3",
        "percent_change_7d": "-0.57",
        "last_updated": "1472762067"
    })
}

/// Which public wrapper a shared test case drives.
#[derive(Debug, Clone, Copy)]
pub enum Wrapper {
    Tickers,
    TickersLimit,
    Ticker,
    Global,
}

impl Wrapper {
    pub async fn run(self, client: &CoinmarketcapClient) -> Result<(), CoinmarketcapError> {
        match self {
            Wrapper::Tickers => client.get_tickers().await.map(|_| ()),
            Wrapper::TickersLimit => client.get_tickers_limit(10).await.map(|_| ()),
            Wrapper::Ticker => client.get_ticker("bitcoin").await.map(|_| ()),
            Wrapper::Global => client.get_global_data().await.map(|_| ()),
        }
    }
}
