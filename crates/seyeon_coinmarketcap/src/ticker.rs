use crate::currency::Currency;
use crate::method::Method;
use crate::serde_parsers::stringified;
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

pub type Ticks = Vec<Tick>;

/// One asset as returned by `/ticker/`. Every number travels as a JSON string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Tick {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(with = "stringified")]
    pub rank: i64,
    #[serde(with = "stringified")]
    pub price_usd: f64,
    #[serde(with = "stringified")]
    pub price_btc: f64,
    #[serde(rename = "24h_volume_usd", with = "stringified")]
    pub day_volume_usd: f64,
    #[serde(with = "stringified")]
    pub market_cap_usd: f64,
    #[serde(with = "stringified")]
    pub available_supply: f64,
    #[serde(with = "stringified")]
    pub total_supply: f64,
    #[serde(with = "stringified")]
    pub percent_change_1h: f64,
    #[serde(with = "stringified")]
    pub percent_change_24h: f64,
    #[serde(with = "stringified")]
    pub percent_change_7d: f64,
    /// Unix timestamp, seconds.
    #[serde(with = "stringified")]
    pub last_updated: i64,
    /// Fields added by `convert`, e.g. `price_eur`, kept as received.
    #[serde(flatten)]
    pub converted: BTreeMap<String, serde_json::Value>,
}

impl Tick {
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.last_updated, 0)
    }

    /// Price in a converted currency, present only when the request used `convert`.
    pub fn price_in(&self, currency: Currency) -> Option<f64> {
        let key = format!("price_{}", currency.code().to_lowercase());

        self.converted
            .get(&key)
            .and_then(|value| value.as_str())
            .and_then(|raw| raw.parse().ok())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Builder)]
pub struct TickerParams {
    /// Only the top `limit` assets. Sent as-is; the server decides what zero or negative means.
    pub limit: Option<i64>,
    pub convert: Option<Currency>,
}

impl TickerParams {
    pub(crate) fn to_query(&self) -> Option<HashMap<String, String>> {
        let mut params = HashMap::new();

        if let Some(limit) = self.limit {
            params.insert(String::from("limit"), limit.to_string());
        }

        if let Some(convert) = self.convert {
            params.insert(String::from("convert"), convert.code().to_string());
        }

        if params.is_empty() { None } else { Some(params) }
    }
}

/// `GET /ticker/`
#[derive(Debug, Clone, Default)]
pub struct Tickers {
    pub params: TickerParams,
}

impl Method for Tickers {
    const PATH: &'static str = "ticker";

    type Response = Ticks;

    fn params(&self) -> Option<HashMap<String, String>> {
        self.params.to_query()
    }
}

/// `GET /ticker/{id}/`. The server wraps the single asset in an array.
#[derive(Debug, Clone)]
pub struct TickerById {
    pub id: String,
}

impl Method for TickerById {
    const PATH: &'static str = "ticker";

    type Response = Ticks;

    fn segments(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(Self::PATH), Cow::Borrowed(self.id.as_str())]
    }
}
