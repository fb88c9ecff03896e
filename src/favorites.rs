use log::info;

use crate::error::Result;
use crate::store::KeyValueStore;

pub const FAVORITES_KEY: &str = "favorites";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

impl AddOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            AddOutcome::Added => "Added to favorites",
            AddOutcome::AlreadyPresent => "Already in favorites",
        }
    }
}

impl std::fmt::Display for AddOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Ordered list of favorite coin ids, kept as a JSON array in the store.
pub struct Favorites<S> {
    store: S,
}

impl<S: KeyValueStore> Favorites<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// An absent key reads as an empty list.
    pub fn list(&self) -> Result<Vec<String>> {
        match self.store.get(FAVORITES_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.list()?.iter().any(|f| f == id))
    }

    pub fn add(&mut self, id: &str) -> Result<AddOutcome> {
        if self.contains(id)? {
            return Ok(AddOutcome::AlreadyPresent);
        }
        let mut favorites = self.list()?;
        favorites.push(id.to_string());
        self.save(&favorites)?;
        info!("added {} to favorites", id);
        Ok(AddOutcome::Added)
    }

    pub fn remove(&mut self, id: &str) -> Result<()> {
        let favorites: Vec<String> = self.list()?.into_iter().filter(|f| f != id).collect();
        self.save(&favorites)?;
        info!("removed {} from favorites", id);
        Ok(())
    }

    fn save(&mut self, favorites: &[String]) -> Result<()> {
        let raw = serde_json::to_string(favorites)?;
        self.store.set(FAVORITES_KEY, &raw)
    }
}
