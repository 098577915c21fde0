use log::debug;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::api::RecipeApi;
use crate::builder::AppStateBuilder;
use crate::card::RecipeCard;
use crate::config::AppConfig;
use crate::credential::CredentialHolder;
use crate::custom::CustomRecipeStore;
use crate::error::Result;
use crate::favorites::{FavoritesStore, NotesStore};
use crate::model::{CustomRecipe, NewRecipeForm, RecipeSummary};
use crate::notify::{Notification, Notifier};
use crate::presenter::{CardMarks, CollectionView};
use crate::search::SearchController;
use crate::store::{read_json_or_default, write_json, KeyValueStore, LAST_RESULTS_KEY};

/// Everything the views need, passed around explicitly.
///
/// Cloning is cheap; clones share the store, the API client and the
/// credential.
#[derive(Clone)]
pub struct AppState {
    config: AppConfig,
    store: Arc<dyn KeyValueStore>,
    api: Arc<dyn RecipeApi>,
    notifier: Arc<dyn Notifier>,
    credential: Arc<CredentialHolder>,
}

impl AppState {
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::default()
    }

    pub(crate) fn assemble(
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
        api: Arc<dyn RecipeApi>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let credential = CredentialHolder::mount(store.clone(), notifier.clone())?;
        Ok(Self {
            config,
            store,
            api,
            notifier,
            credential: Arc::new(credential),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn credential(&self) -> &CredentialHolder {
        &self.credential
    }

    pub fn favorites(&self) -> FavoritesStore {
        FavoritesStore::new(self.store.clone())
    }

    pub fn notes(&self) -> NotesStore {
        NotesStore::new(self.store.clone())
    }

    pub fn custom_recipes(&self) -> CustomRecipeStore {
        CustomRecipeStore::new(self.store.clone())
    }

    pub fn search_controller(&self) -> SearchController {
        SearchController::new(
            self.api.clone(),
            self.credential.clone(),
            self.notifier.clone(),
            self.config.search.results_per_page,
        )
    }

    pub fn card(&self, recipe: RecipeSummary) -> Result<RecipeCard> {
        RecipeCard::mount(
            recipe,
            self.favorites(),
            self.notes(),
            self.api.clone(),
            self.credential.clone(),
        )
    }

    /// Snapshot of favorite flags and notes, for rendering many cards at once
    pub fn card_marks(&self) -> Result<impl Fn(&RecipeSummary) -> CardMarks> {
        let favorite_ids: HashSet<i64> = self.favorites().list()?.iter().map(|f| f.id).collect();
        let notes: BTreeMap<String, String> = self.notes().all()?;

        Ok(move |recipe: &RecipeSummary| CardMarks {
            is_favorite: favorite_ids.contains(&recipe.id),
            note: notes.get(&recipe.id.to_string()).cloned(),
        })
    }

    /// Save a new custom recipe and tell the user
    pub fn create_recipe(&self, form: NewRecipeForm) -> Result<CustomRecipe> {
        let recipe = self.custom_recipes().create(form)?;
        self.notifier.notify(Notification::info(
            "Recipe created",
            "Your recipe has been saved successfully",
        ));
        Ok(recipe)
    }

    pub fn collection(&self) -> Result<CollectionView> {
        Ok(CollectionView {
            favorites: self.favorites().list()?,
            custom: self.custom_recipes().list()?,
        })
    }

    /// Keep the latest search results so a later invocation can refer to them by id
    pub fn remember_results(&self, results: &[RecipeSummary]) -> Result<()> {
        debug!("Remembering {} search results", results.len());
        write_json(self.store.as_ref(), LAST_RESULTS_KEY, results)
    }

    /// Find a recipe summary known locally: favorites, then own recipes,
    /// then the latest search results
    pub fn find_summary(&self, id: i64) -> Result<Option<RecipeSummary>> {
        if let Some(found) = self.favorites().get(id)? {
            return Ok(Some(found));
        }
        if let Some(found) = self.custom_recipes().get(id)? {
            return Ok(Some(found.summary()));
        }
        let last: Vec<RecipeSummary> = read_json_or_default(self.store.as_ref(), LAST_RESULTS_KEY)?;
        Ok(last.into_iter().find(|r| r.id == id))
    }
}
