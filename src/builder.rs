use std::sync::Arc;

use crate::api::{RecipeApi, SpoonacularClient};
use crate::config::AppConfig;
use crate::error::Result;
use crate::notify::{LogNotifier, Notifier};
use crate::state::AppState;
use crate::store::{JsonFileStore, KeyValueStore};

/// Builder for wiring an [`AppState`]
///
/// Anything not set falls back to what the configuration describes: a
/// [`JsonFileStore`] at `storage.path`, a [`SpoonacularClient`] for
/// `api.base_url` and a [`LogNotifier`].
#[derive(Default)]
pub struct AppStateBuilder {
    config: Option<AppConfig>,
    store: Option<Arc<dyn KeyValueStore>>,
    api: Option<Arc<dyn RecipeApi>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl AppStateBuilder {
    /// Use this configuration instead of the defaults
    ///
    /// # Example
    /// ```
    /// use recipe_finder::{AppConfig, AppState};
    ///
    /// let builder = AppState::builder().config(AppConfig::default());
    /// ```
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Persist into `store` instead of the configured file
    ///
    /// # Example
    /// ```
    /// use recipe_finder::{AppState, MemoryStore};
    /// use std::sync::Arc;
    ///
    /// let state = AppState::builder()
    ///     .store(Arc::new(MemoryStore::new()))
    ///     .build()
    ///     .unwrap();
    /// assert!(!state.credential().is_set());
    /// ```
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Talk to `api` instead of the configured Spoonacular endpoint
    pub fn api(mut self, api: Arc<dyn RecipeApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Deliver user-visible notifications to `notifier`
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Build the state and adopt any saved credential
    ///
    /// # Errors
    /// Returns `AppError` if:
    /// - The HTTP client cannot be created
    /// - The saved credential cannot be read from the store
    pub fn build(self) -> Result<AppState> {
        let config = self.config.unwrap_or_default();

        let store: Arc<dyn KeyValueStore> = match self.store {
            Some(store) => store,
            None => Arc::new(JsonFileStore::new(config.storage.path.clone())),
        };
        let api: Arc<dyn RecipeApi> = match self.api {
            Some(api) => api,
            None => Arc::new(SpoonacularClient::from_config(&config.api)?),
        };
        let notifier: Arc<dyn Notifier> = match self.notifier {
            Some(notifier) => notifier,
            None => Arc::new(LogNotifier),
        };

        AppState::assemble(config, store, api, notifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, CREDENTIAL_KEY};
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_build_with_defaults_uses_configured_file() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::default();
        config.storage.path = dir.path().join("state.json");

        let state = AppState::builder().config(config).build().unwrap();
        state.credential().submit("abc").unwrap();

        let raw = std::fs::read_to_string(dir.path().join("state.json")).unwrap();
        assert!(raw.contains("abc"));
    }

    #[test]
    fn test_build_adopts_saved_credential() {
        let store = Arc::new(MemoryStore::new());
        store.set(CREDENTIAL_KEY, json!("saved")).unwrap();

        let state = AppState::builder().store(store).build().unwrap();
        assert_eq!(state.credential().active().as_deref(), Some("saved"));
        assert_eq!(state.config().search.results_per_page, 12);
    }
}
