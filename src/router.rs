use std::collections::HashMap;

pub const LISTING_PAGE: &str = "index.html";
pub const FAVORITES_PAGE: &str = "favorites.html";
pub const DETAIL_PAGE: &str = "coins.html";

/// A page path plus its decoded query parameters, e.g. `coins.html?id=bitcoin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    query: HashMap<String, String>,
}

impl Location {
    pub fn parse(text: &str) -> Self {
        let text = text.split('#').next().unwrap_or_default();
        let (path, query) = match text.split_once('?') {
            Some((path, query)) => (path, query),
            None => (text, ""),
        };

        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode(key), decode(value))
            })
            .collect();

        Self {
            path: path.to_string(),
            query,
        }
    }

    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

fn decode(text: &str) -> String {
    let text = text.replace('+', " ");
    match urlencoding::decode(&text) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => text.clone(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Listing,
    Favorites,
    CoinDetail,
}

impl Page {
    /// Matches on the path suffix; unknown pages get no route.
    pub fn route(location: &Location) -> Option<Page> {
        if location.path.ends_with(LISTING_PAGE) {
            Some(Page::Listing)
        } else if location.path.ends_with(FAVORITES_PAGE) {
            Some(Page::Favorites)
        } else if location.path.ends_with(DETAIL_PAGE) {
            Some(Page::CoinDetail)
        } else {
            None
        }
    }
}

/// Where a click on a coin row leads.
pub fn detail_location(id: &str) -> String {
    format!("{}?id={}", DETAIL_PAGE, urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_known_pages() {
        assert_eq!(
            Page::route(&Location::parse("/site/index.html")),
            Some(Page::Listing)
        );
        assert_eq!(
            Page::route(&Location::parse("favorites.html")),
            Some(Page::Favorites)
        );
        assert_eq!(
            Page::route(&Location::parse("https://example.com/coins.html?id=bitcoin")),
            Some(Page::CoinDetail)
        );
    }

    #[test]
    fn test_route_unknown_page() {
        assert_eq!(Page::route(&Location::parse("/")), None);
        assert_eq!(Page::route(&Location::parse("about.html")), None);
        assert_eq!(Page::route(&Location::parse("index.html.bak")), None);
    }

    #[test]
    fn test_query_parameters() {
        let location = Location::parse("coins.html?id=wrapped%20bitcoin&x=1#top");
        assert_eq!(location.path, "coins.html");
        assert_eq!(location.query("id"), Some("wrapped bitcoin"));
        assert_eq!(location.query("x"), Some("1"));
        assert_eq!(location.query("missing"), None);
    }

    #[test]
    fn test_detail_location_round_trips_id() {
        let link = detail_location("usd-coin");
        assert_eq!(link, "coins.html?id=usd-coin");
        let location = Location::parse(&link);
        assert_eq!(Page::route(&location), Some(Page::CoinDetail));
        assert_eq!(location.query("id"), Some("usd-coin"));
    }
}
