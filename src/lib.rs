//! Recipe search against the Spoonacular API with locally kept favorites,
//! notes and self-authored recipes.

pub mod api;
pub mod builder;
pub mod card;
pub mod config;
pub mod credential;
pub mod custom;
pub mod error;
pub mod favorites;
pub mod model;
pub mod notify;
pub mod presenter;
pub mod search;
pub mod state;
pub mod store;

pub use api::{RecipeApi, SearchQuery, SpoonacularClient};
pub use builder::AppStateBuilder;
pub use card::{DetailState, RecipeCard};
pub use config::AppConfig;
pub use credential::CredentialHolder;
pub use custom::CustomRecipeStore;
pub use error::AppError;
pub use favorites::{FavoritesStore, NotesStore};
pub use model::{CustomRecipe, Diet, Ingredient, NewRecipeForm, RecipeDetail, RecipeSummary};
pub use notify::{Level, LogNotifier, Notification, NotificationLog, Notifier};
pub use search::{SearchController, SearchOutcome, SearchState};
pub use state::AppState;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
