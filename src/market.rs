use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;

pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const VS_CURRENCY: &str = "usd";
pub const PER_PAGE: u32 = 10;
pub const CHART_DAYS: u32 = 30;

/// Row of the `/coins/markets` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSummary {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub image: String,
    pub current_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinImage {
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub small: String,
    #[serde(default)]
    pub large: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    #[serde(default)]
    pub current_price: HashMap<String, f64>,
    #[serde(default)]
    pub market_cap: HashMap<String, f64>,
}

/// Response of `/coins/{id}`, reduced to what the detail page shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDetail {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub image: CoinImage,
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub market_data: MarketData,
}

impl CoinDetail {
    pub fn current_price(&self) -> Option<f64> {
        self.market_data.current_price.get(VS_CURRENCY).copied()
    }

    pub fn market_cap(&self) -> Option<f64> {
        self.market_data.market_cap.get(VS_CURRENCY).copied()
    }
}

/// `[timestamp_ms, price]` pair as sent by the API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint(pub i64, pub f64);

impl PricePoint {
    pub fn timestamp_ms(&self) -> i64 {
        self.0
    }

    pub fn price(&self) -> f64 {
        self.1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub prices: Vec<PricePoint>,
}

#[async_trait]
pub trait MarketApi: Send + Sync {
    /// One page of coins ordered by market cap, `PER_PAGE` at a time.
    async fn markets(&self, page: u32) -> Result<Vec<CoinSummary>>;
    /// Market rows filtered to a single identifier.
    async fn markets_by_id(&self, id: &str) -> Result<Vec<CoinSummary>>;
    async fn coin(&self, id: &str) -> Result<CoinDetail>;
    async fn market_chart(&self, id: &str, days: u32) -> Result<PriceHistory>;
}

pub fn markets_url(base: &str, page: u32) -> String {
    format!(
        "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page={}&sparkline=false",
        base, VS_CURRENCY, PER_PAGE, page
    )
}

pub fn markets_by_id_url(base: &str, id: &str) -> String {
    format!(
        "{}/coins/markets?vs_currency={}&ids={}",
        base,
        VS_CURRENCY,
        urlencoding::encode(id)
    )
}

pub fn coin_url(base: &str, id: &str) -> String {
    format!("{}/coins/{}", base, urlencoding::encode(id))
}

pub fn market_chart_url(base: &str, id: &str, days: u32) -> String {
    format!(
        "{}/coins/{}/market_chart?vs_currency={}&days={}",
        base,
        urlencoding::encode(id),
        VS_CURRENCY,
        days
    )
}

/// CoinGecko REST client.
pub struct CoinGecko {
    base_url: String,
    http: reqwest::Client,
}

impl CoinGecko {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("coinboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T> {
        debug!("GET {}", url);
        let body = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl MarketApi for CoinGecko {
    async fn markets(&self, page: u32) -> Result<Vec<CoinSummary>> {
        self.get(markets_url(&self.base_url, page)).await
    }

    async fn markets_by_id(&self, id: &str) -> Result<Vec<CoinSummary>> {
        self.get(markets_by_id_url(&self.base_url, id)).await
    }

    async fn coin(&self, id: &str) -> Result<CoinDetail> {
        self.get(coin_url(&self.base_url, id)).await
    }

    async fn market_chart(&self, id: &str, days: u32) -> Result<PriceHistory> {
        self.get(market_chart_url(&self.base_url, id, days)).await
    }
}
