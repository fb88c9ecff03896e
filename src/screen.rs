use colored::Colorize;
use std::collections::HashSet;

use crate::router::Page;
use crate::view::{ChartConfig, CoinRow, DetailView, View, LOADING_TEXT};

/// Named regions a page may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    SearchInput,
    CryptoList,
    FavoriteList,
    CoinDetails,
    PriceChart,
}

impl Element {
    pub fn id(&self) -> &'static str {
        match self {
            Element::SearchInput => "search-input",
            Element::CryptoList => "crypto-list",
            Element::FavoriteList => "favorite-list",
            Element::CoinDetails => "coin-details",
            Element::PriceChart => "price-chart",
        }
    }
}

/// Rendering surface for the flows.
pub trait Screen {
    fn contains(&self, element: Element) -> bool;
    fn show(&mut self, element: Element, view: View);
}

/// Elements each page carries before anything is rendered.
pub fn page_elements(page: Page) -> HashSet<Element> {
    match page {
        Page::Listing => HashSet::from([Element::SearchInput, Element::CryptoList]),
        Page::Favorites => HashSet::from([Element::FavoriteList]),
        Page::CoinDetail => HashSet::from([Element::CoinDetails]),
    }
}

/// Prints views to stdout and keeps the last rendered rows for the picker.
pub struct TerminalScreen {
    elements: HashSet<Element>,
    rows: Vec<CoinRow>,
}

impl TerminalScreen {
    pub fn new(elements: HashSet<Element>) -> Self {
        Self {
            elements,
            rows: Vec::new(),
        }
    }

    pub fn for_page(page: Option<Page>) -> Self {
        Self::new(page.map(page_elements).unwrap_or_default())
    }

    pub fn rows(&self) -> &[CoinRow] {
        &self.rows
    }
}

impl Screen for TerminalScreen {
    fn contains(&self, element: Element) -> bool {
        self.elements.contains(&element)
    }

    fn show(&mut self, element: Element, view: View) {
        match view {
            View::Loading => println!("{}", LOADING_TEXT.yellow()),
            View::Coins(rows) => {
                println!("{}", format_rows(&rows));
                self.rows = rows;
            }
            View::Detail(detail) => {
                println!("{}", format_detail(&detail));
                // the detail markup carries the chart canvas
                self.elements.insert(Element::PriceChart);
            }
            View::Chart(chart) => println!("{}", format_chart(&chart)),
        }
        log::debug!("rendered #{}", element.id());
    }
}

fn format_rows(rows: &[CoinRow]) -> String {
    let mut result = String::new();
    for (idx, row) in rows.iter().enumerate() {
        result.push_str(&format!(
            "{} {} ({}) - {}  [{}]\n",
            format!("[{}]", idx + 1).yellow().bold(),
            row.name.white().bold(),
            row.symbol.cyan(),
            row.price.green(),
            row.action.label().bright_black()
        ));
    }
    result
}

fn format_detail(detail: &DetailView) -> String {
    format!(
        "\n{} ({})\n  {}: {}\n  {}: {}\n  {}: {}\n  {}: {}\n",
        detail.name.white().bold(),
        detail.symbol.cyan(),
        "Rank".green(),
        detail.rank,
        "Current Price".green(),
        detail.price.bright_yellow(),
        "Market Cap".green(),
        detail.market_cap.bright_yellow(),
        "Image".green(),
        detail.image.cyan().underline()
    )
}

const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const SPARK_WIDTH: usize = 60;

/// One-line sparkline of the first dataset, one column per bucket of points.
pub fn sparkline(data: &[f64]) -> String {
    if data.is_empty() {
        return String::new();
    }
    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let bucket = data.len().div_ceil(SPARK_WIDTH);

    data.chunks(bucket)
        .map(|chunk| {
            let avg = chunk.iter().sum::<f64>() / chunk.len() as f64;
            let level = if span > 0.0 {
                (((avg - min) / span) * (SPARKS.len() - 1) as f64).round() as usize
            } else {
                0
            };
            SPARKS[level.min(SPARKS.len() - 1)]
        })
        .collect()
}

fn format_chart(chart: &ChartConfig) -> String {
    let Some(dataset) = chart.datasets.first() else {
        return String::new();
    };
    let first = chart.labels.first().map(String::as_str).unwrap_or("");
    let last = chart.labels.last().map(String::as_str).unwrap_or("");
    format!(
        "  {} {} → {}\n  {}\n",
        dataset.label.green(),
        first,
        last,
        sparkline(&dataset.data).cyan()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_ids() {
        assert_eq!(Element::SearchInput.id(), "search-input");
        assert_eq!(Element::CryptoList.id(), "crypto-list");
        assert_eq!(Element::FavoriteList.id(), "favorite-list");
        assert_eq!(Element::CoinDetails.id(), "coin-details");
        assert_eq!(Element::PriceChart.id(), "price-chart");
    }

    #[test]
    fn test_unrouted_page_has_no_elements() {
        let screen = TerminalScreen::for_page(None);
        assert!(!screen.contains(Element::CryptoList));
        assert!(!screen.contains(Element::SearchInput));
    }

    #[test]
    fn test_detail_render_adds_chart_canvas() {
        let mut screen = TerminalScreen::for_page(Some(Page::CoinDetail));
        assert!(!screen.contains(Element::PriceChart));
        screen.show(
            Element::CoinDetails,
            View::Detail(DetailView {
                id: "bitcoin".to_string(),
                image: String::new(),
                name: "Bitcoin".to_string(),
                symbol: "BTC".to_string(),
                rank: "1".to_string(),
                price: "$1".to_string(),
                market_cap: "$2".to_string(),
            }),
        );
        assert!(screen.contains(Element::PriceChart));
    }

    #[test]
    fn test_sparkline_width_and_range() {
        let data: Vec<f64> = (0..720).map(|i| i as f64).collect();
        let line = sparkline(&data);
        assert_eq!(line.chars().count(), SPARK_WIDTH);
        assert_eq!(line.chars().next(), Some('▁'));
        assert_eq!(line.chars().last(), Some('█'));
    }

    #[test]
    fn test_sparkline_flat_and_empty() {
        assert_eq!(sparkline(&[]), "");
        assert_eq!(sparkline(&[5.0, 5.0, 5.0]), "▁▁▁");
    }
}
