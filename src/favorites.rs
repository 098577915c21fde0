use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::Result;
use crate::model::RecipeSummary;
use crate::store::{read_json_or_default, write_json, KeyValueStore, FAVORITES_KEY, NOTES_KEY};

/// Persisted set of favorite recipes, stored as a list of summaries
#[derive(Clone)]
pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
}

impl FavoritesStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<RecipeSummary>> {
        read_json_or_default(self.store.as_ref(), FAVORITES_KEY)
    }

    pub fn contains(&self, id: i64) -> Result<bool> {
        Ok(self.list()?.iter().any(|fav| fav.id == id))
    }

    pub fn get(&self, id: i64) -> Result<Option<RecipeSummary>> {
        Ok(self.list()?.into_iter().find(|fav| fav.id == id))
    }

    /// Flip membership of `recipe` and return whether it is now a favorite.
    ///
    /// Membership is decided from what is stored, so the list never holds
    /// the same id twice.
    pub fn toggle(&self, recipe: &RecipeSummary) -> Result<bool> {
        let mut favorites = self.list()?;
        let before = favorites.len();
        favorites.retain(|fav| fav.id != recipe.id);

        let now_favorite = favorites.len() == before;
        if now_favorite {
            favorites.push(recipe.clone());
        }

        write_json(self.store.as_ref(), FAVORITES_KEY, &favorites)?;
        debug!("Recipe {} favorite: {}", recipe.id, now_favorite);
        Ok(now_favorite)
    }
}

/// Persisted free-text notes keyed by recipe id
#[derive(Clone)]
pub struct NotesStore {
    store: Arc<dyn KeyValueStore>,
}

impl NotesStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn all(&self) -> Result<BTreeMap<String, String>> {
        read_json_or_default(self.store.as_ref(), NOTES_KEY)
    }

    pub fn get(&self, id: i64) -> Result<Option<String>> {
        Ok(self.all()?.remove(&id.to_string()))
    }

    /// Overwrite the note for `id`. An empty note is kept as an empty string.
    pub fn save(&self, id: i64, text: &str) -> Result<()> {
        let mut notes = self.all()?;
        notes.insert(id.to_string(), text.to_string());
        write_json(self.store.as_ref(), NOTES_KEY, &notes)
    }
}
