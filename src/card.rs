use log::{debug, warn};
use std::sync::Arc;

use crate::api::RecipeApi;
use crate::credential::CredentialHolder;
use crate::error::{AppError, Result};
use crate::favorites::{FavoritesStore, NotesStore};
use crate::model::{RecipeDetail, RecipeSummary};

pub const DETAIL_FAILED_MESSAGE: &str = "Failed to load recipe details. Please try again.";

/// Detail pane of one card: `Idle -> Loading -> Loaded | Failed`, and
/// `Failed -> Loading` again on retry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailState {
    #[default]
    Idle,
    Loading,
    Loaded(Box<RecipeDetail>),
    Failed(String),
}

impl DetailState {
    pub fn detail(&self) -> Option<&RecipeDetail> {
        match self {
            DetailState::Loaded(detail) => Some(detail),
            _ => None,
        }
    }
}

/// One recipe as shown in a grid: favorite toggle, personal note and a lazily
/// fetched detail pane.
///
/// The fetched detail lives only while the pane is open. Closing drops it and
/// the next open fetches again.
pub struct RecipeCard {
    recipe: RecipeSummary,
    favorites: FavoritesStore,
    notes: NotesStore,
    api: Arc<dyn RecipeApi>,
    credential: Arc<CredentialHolder>,
    is_favorite: bool,
    note: String,
    detail: DetailState,
}

impl RecipeCard {
    /// Build the card and read its favorite flag and note from the store
    pub fn mount(
        recipe: RecipeSummary,
        favorites: FavoritesStore,
        notes: NotesStore,
        api: Arc<dyn RecipeApi>,
        credential: Arc<CredentialHolder>,
    ) -> Result<Self> {
        let is_favorite = favorites.contains(recipe.id)?;
        let note = notes.get(recipe.id)?.unwrap_or_default();

        Ok(Self {
            recipe,
            favorites,
            notes,
            api,
            credential,
            is_favorite,
            note,
            detail: DetailState::Idle,
        })
    }

    pub fn recipe(&self) -> &RecipeSummary {
        &self.recipe
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn detail_state(&self) -> &DetailState {
        &self.detail
    }

    /// Add or remove this recipe from favorites; returns the new flag
    pub fn toggle_favorite(&mut self) -> Result<bool> {
        self.is_favorite = self.favorites.toggle(&self.recipe)?;
        Ok(self.is_favorite)
    }

    pub fn save_note(&mut self, text: &str) -> Result<()> {
        self.notes.save(self.recipe.id, text)?;
        self.note = text.to_string();
        Ok(())
    }

    /// Open the detail pane, fetching if nothing is loaded yet
    pub async fn open_detail(&mut self) -> &DetailState {
        if self.detail == DetailState::Idle {
            self.load_detail().await;
        }
        &self.detail
    }

    /// Fetch again after a failure
    pub async fn retry_detail(&mut self) -> &DetailState {
        if matches!(self.detail, DetailState::Failed(_)) {
            self.load_detail().await;
        }
        &self.detail
    }

    pub fn close_detail(&mut self) {
        self.detail = DetailState::Idle;
    }

    async fn load_detail(&mut self) {
        self.detail = DetailState::Loading;
        let id = self.recipe.id;
        debug!("Loading detail for recipe {}", id);

        let result = match self.credential.active() {
            Some(api_key) => self.api.recipe_information(&api_key, id).await,
            None => Err(AppError::MissingCredential),
        };

        self.detail = match result {
            Ok(detail) => DetailState::Loaded(Box::new(detail)),
            Err(e) => {
                warn!("Failed to load detail for recipe {}: {}", id, e);
                DetailState::Failed(e.user_message(DETAIL_FAILED_MESSAGE))
            }
        };
    }
}
