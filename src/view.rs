//! Pure mapping from market data to what a screen shows.

use chrono::DateTime;
use serde::Serialize;

use crate::market::{CoinDetail, CoinSummary, PriceHistory};
use crate::router::detail_location;

pub const LOADING_TEXT: &str = "Loading.....Please Wait";
pub const CHART_LABEL: &str = "Price (USD)";
pub const CHART_BORDER_COLOR: &str = "rgba(75, 192, 192, 1)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowAction {
    AddFavorite,
    RemoveFavorite,
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::AddFavorite => "Add to Favorites",
            RowAction::RemoveFavorite => "Remove from Favorites",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinRow {
    pub id: String,
    pub image: String,
    pub name: String,
    pub symbol: String,
    pub price: String,
    pub link: String,
    pub action: RowAction,
}

impl std::fmt::Display for CoinRow {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({}) - {}", self.name, self.symbol, self.price)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub id: String,
    pub image: String,
    pub name: String,
    pub symbol: String,
    pub rank: String,
    pub price: String,
    pub market_cap: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeUnit {
    Day,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub border_width: u32,
}

/// Chart description handed to whatever draws it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub x_unit: TimeUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum View {
    Loading,
    Coins(Vec<CoinRow>),
    Detail(DetailView),
    Chart(ChartConfig),
}

pub fn format_usd(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("${}", value),
        None => String::from("N/A"),
    }
}

/// `M/D/YYYY` in UTC.
pub fn format_day(timestamp_ms: i64) -> String {
    match DateTime::from_timestamp_millis(timestamp_ms) {
        Some(at) => at.format("%-m/%-d/%Y").to_string(),
        None => String::from("Invalid Date"),
    }
}

pub fn coin_rows(coins: &[CoinSummary], action: RowAction) -> Vec<CoinRow> {
    coins
        .iter()
        .map(|coin| CoinRow {
            id: coin.id.clone(),
            image: coin.image.clone(),
            name: coin.name.clone(),
            symbol: coin.symbol.to_uppercase(),
            price: format_usd(coin.current_price),
            link: detail_location(&coin.id),
            action,
        })
        .collect()
}

pub fn coin_detail(detail: &CoinDetail) -> DetailView {
    DetailView {
        id: detail.id.clone(),
        image: detail.image.large.clone(),
        name: detail.name.clone(),
        symbol: detail.symbol.to_uppercase(),
        rank: detail
            .market_cap_rank
            .map(|rank| rank.to_string())
            .unwrap_or_else(|| String::from("N/A")),
        price: format_usd(detail.current_price()),
        market_cap: format_usd(detail.market_cap()),
    }
}

pub fn price_chart(history: &PriceHistory) -> ChartConfig {
    let labels = history
        .prices
        .iter()
        .map(|point| format_day(point.timestamp_ms()))
        .collect();
    let data = history.prices.iter().map(|point| point.price()).collect();

    ChartConfig {
        kind: ChartKind::Line,
        labels,
        datasets: vec![Dataset {
            label: CHART_LABEL.to_string(),
            data,
            border_color: CHART_BORDER_COLOR.to_string(),
            border_width: 1,
        }],
        x_unit: TimeUnit::Day,
    }
}
