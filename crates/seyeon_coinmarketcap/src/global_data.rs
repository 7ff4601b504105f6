use crate::currency::Currency;
use crate::method::Method;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Aggregate market snapshot from `/global/`. Unlike tickers, numbers arrive as JSON numbers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GlobalData {
    pub total_market_cap_usd: f64,
    pub total_24h_volume_usd: f64,
    pub bitcoin_percentage_of_market_cap: f64,
    pub active_currencies: i64,
    pub active_assets: i64,
    pub active_markets: i64,
    /// `total_market_cap_<cur>` and `total_24h_volume_<cur>` when `convert` is used.
    #[serde(flatten)]
    pub converted: BTreeMap<String, serde_json::Value>,
}

impl GlobalData {
    pub fn total_market_cap_in(&self, currency: Currency) -> Option<f64> {
        let key = format!("total_market_cap_{}", currency.code().to_lowercase());
        self.converted.get(&key).and_then(|value| value.as_f64())
    }
}

/// `GET /global/`
#[derive(Debug, Clone, Default)]
pub struct Global {
    pub convert: Option<Currency>,
}

impl Method for Global {
    const PATH: &'static str = "global";

    type Response = GlobalData;

    fn params(&self) -> Option<HashMap<String, String>> {
        self.convert.map(|currency| {
            HashMap::from([(String::from("convert"), currency.code().to_string())])
        })
    }
}
