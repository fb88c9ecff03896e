use futures::future::try_join_all;
use log::{debug, info};

use crate::error::{Error, Result};
use crate::favorites::{AddOutcome, Favorites};
use crate::market::{MarketApi, CHART_DAYS};
use crate::router::{Location, Page};
use crate::screen::{Element, Screen};
use crate::store::KeyValueStore;
use crate::view::{self, RowAction, View};

/// Page controller: runs the listing, favorites and detail flows.
pub struct App<A, S> {
    api: A,
    favorites: Favorites<S>,
}

impl<A: MarketApi, S: KeyValueStore> App<A, S> {
    pub fn new(api: A, store: S) -> Self {
        Self {
            api,
            favorites: Favorites::new(store),
        }
    }

    pub fn favorites(&self) -> &Favorites<S> {
        &self.favorites
    }

    /// Routes the location and runs the matching flow. Returns the page that
    /// ran, if any.
    pub async fn on_ready(
        &mut self,
        screen: &mut impl Screen,
        location: &Location,
    ) -> Result<Option<Page>> {
        let page = Page::route(location);
        match page {
            Some(Page::Listing) => self.fetch_cryptos(screen, 1, "").await?,
            Some(Page::Favorites) => self.fetch_favorites(screen).await?,
            Some(Page::CoinDetail) => self.fetch_coin_details(screen, location).await?,
            None => debug!("no page matches {}", location.path),
        }
        Ok(page)
    }

    pub async fn fetch_cryptos(
        &self,
        screen: &mut impl Screen,
        page: u32,
        query: &str,
    ) -> Result<()> {
        // the query is not part of the markets request
        info!("listing page {} (query {:?})", page, query);
        if screen.contains(Element::CryptoList) {
            screen.show(Element::CryptoList, View::Loading);
        }

        let coins = self.api.markets(page).await?;

        if screen.contains(Element::CryptoList) {
            let rows = view::coin_rows(&coins, RowAction::AddFavorite);
            screen.show(Element::CryptoList, View::Coins(rows));
        }
        Ok(())
    }

    pub async fn search(&self, screen: &mut impl Screen, query: &str) -> Result<()> {
        self.fetch_cryptos(screen, 1, query).await
    }

    pub fn add_to_favorites(&mut self, id: &str) -> Result<AddOutcome> {
        self.favorites.add(id)
    }

    pub async fn remove_from_favorites(&mut self, screen: &mut impl Screen, id: &str) -> Result<()> {
        self.favorites.remove(id)?;
        self.fetch_favorites(screen).await
    }

    pub async fn fetch_favorites(&self, screen: &mut impl Screen) -> Result<()> {
        let ids = self.favorites.list()?;
        info!("loading {} favorites", ids.len());
        if screen.contains(Element::FavoriteList) {
            screen.show(Element::FavoriteList, View::Loading);
        }

        let results = try_join_all(ids.iter().map(|id| self.api.markets_by_id(id))).await?;
        let coins: Vec<_> = results.into_iter().flatten().collect();

        if screen.contains(Element::FavoriteList) {
            let rows = view::coin_rows(&coins, RowAction::RemoveFavorite);
            screen.show(Element::FavoriteList, View::Coins(rows));
        }
        Ok(())
    }

    pub async fn fetch_coin_details(
        &self,
        screen: &mut impl Screen,
        location: &Location,
    ) -> Result<()> {
        let id = location.query("id").ok_or(Error::MissingParameter("id"))?;
        info!("loading details for {}", id);
        if screen.contains(Element::CoinDetails) {
            screen.show(Element::CoinDetails, View::Loading);
        }

        let detail = self.api.coin(id).await?;
        let history = self.api.market_chart(id, CHART_DAYS).await?;

        if screen.contains(Element::CoinDetails) {
            screen.show(Element::CoinDetails, View::Detail(view::coin_detail(&detail)));
        }

        if !screen.contains(Element::PriceChart) {
            return Err(Error::MissingElement(Element::PriceChart.id()));
        }
        screen.show(Element::PriceChart, View::Chart(view::price_chart(&history)));
        Ok(())
    }
}
