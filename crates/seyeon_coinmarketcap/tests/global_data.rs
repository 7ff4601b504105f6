mod common;

use common::{GLOBAL_SAMPLE, client_for, setup_mock_server};
use seyeon_coinmarketcap::Currency;
use serde_json::json;
use tokio::test;
use tokio_test::assert_ok;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[test]
pub async fn fetch_global_data() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/v1/global/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(GLOBAL_SAMPLE, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let data = assert_ok!(client_for(&server).get_global_data().await);

    assert_eq!(data.total_market_cap_usd, 12756692479.0);
    assert_eq!(data.total_24h_volume_usd, 135078435.0);
    assert_eq!(data.bitcoin_percentage_of_market_cap, 83.34);
    assert_eq!(data.active_currencies, 653);
    assert_eq!(data.active_assets, 59);
    assert_eq!(data.active_markets, 1995);
}

#[test]
pub async fn fetch_global_data_converted() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/v1/global/"))
        .and(query_param("convert", "EUR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_market_cap_usd": 12756692479.0,
            "total_24h_volume_usd": 135078435.0,
            "bitcoin_percentage_of_market_cap": 83.34,
            "active_currencies": 653,
            "active_assets": 59,
            "active_markets": 1995,
            "total_market_cap_eur": 11400000000.0,
            "total_24h_volume_eur": 120700000.0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let data = assert_ok!(
        client_for(&server)
            .get_global_data_convert(Currency::Eur)
            .await
    );

    assert_eq!(data.total_market_cap_in(Currency::Eur), Some(11400000000.0));
    assert_eq!(data.active_assets, 59);
}

#[test]
pub async fn global_data_inside_array_is_rejected() {
    let server = setup_mock_server().await;
    let wrapped = format!("[{GLOBAL_SAMPLE}]");
    Mock::given(method("GET"))
        .and(path("/v1/global/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(wrapped, "application/json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_global_data()
        .await
        .expect_err("global snapshot is a bare object");

    assert!(err.is_decode());
}
