use log::{debug, warn};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::{RecipeApi, SearchQuery};
use crate::credential::CredentialHolder;
use crate::model::{Diet, RecipeSummary};
use crate::notify::{Notification, Notifier};

/// Where the result list currently stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    /// No search issued yet
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// The latest request succeeded; the list may be empty
    Loaded(Vec<RecipeSummary>),
    /// The latest request failed; results were cleared
    Failed(String),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }

    /// Results to show; empty unless the latest search succeeded
    pub fn results(&self) -> &[RecipeSummary] {
        match self {
            SearchState::Loaded(results) => results,
            _ => &[],
        }
    }
}

/// What happened to one `search` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results replaced with this many items
    Completed(usize),
    /// The request failed and the user was notified
    Failed,
    /// A newer search was issued before this one answered; its answer was dropped
    Superseded,
    /// No credential is active, nothing was sent
    MissingCredential,
}

pub const SEARCH_FAILED_MESSAGE: &str = "Failed to fetch recipes. Please try again.";

struct Inner {
    generation: u64,
    state: SearchState,
}

/// Issues searches and owns the result list.
///
/// Each call takes a new generation number; an answer is applied only if its
/// generation is still the latest, so a slow stale response cannot overwrite
/// a newer one. Nothing is cancelled, stale requests simply run to completion.
pub struct SearchController {
    api: Arc<dyn RecipeApi>,
    credential: Arc<CredentialHolder>,
    notifier: Arc<dyn Notifier>,
    results_per_page: u32,
    inner: Mutex<Inner>,
}

impl SearchController {
    pub fn new(
        api: Arc<dyn RecipeApi>,
        credential: Arc<CredentialHolder>,
        notifier: Arc<dyn Notifier>,
        results_per_page: u32,
    ) -> Self {
        Self {
            api,
            credential,
            notifier,
            results_per_page,
            inner: Mutex::new(Inner {
                generation: 0,
                state: SearchState::Idle,
            }),
        }
    }

    pub fn state(&self) -> SearchState {
        self.lock().state.clone()
    }

    pub fn results(&self) -> Vec<RecipeSummary> {
        self.lock().state.results().to_vec()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().state.is_loading()
    }

    /// Search for `text` under `diet`. Never fails; failures become notifications.
    pub async fn search(&self, text: &str, diet: Diet) -> SearchOutcome {
        let Some(api_key) = self.credential.active() else {
            self.notifier.notify(Notification::error(
                "API Key Missing",
                "Please enter an API key to search recipes.",
            ));
            return SearchOutcome::MissingCredential;
        };

        let query = SearchQuery::new(text, diet, self.results_per_page);
        let generation = {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.state = SearchState::Loading;
            inner.generation
        };
        debug!("Search #{} for {:?} ({})", generation, text, diet);

        let result = self.api.search(&api_key, &query).await;

        let mut inner = self.lock();
        if inner.generation != generation {
            debug!(
                "Dropping answer to search #{}, latest is #{}",
                generation, inner.generation
            );
            return SearchOutcome::Superseded;
        }

        match result {
            Ok(results) => {
                let count = results.len();
                inner.state = SearchState::Loaded(results);
                SearchOutcome::Completed(count)
            }
            Err(e) => {
                warn!("Search #{} failed: {}", generation, e);
                let description = e.user_message(SEARCH_FAILED_MESSAGE);
                inner.state = SearchState::Failed(description.clone());
                drop(inner);
                self.notifier.notify(Notification::error("Error", description));
                SearchOutcome::Failed
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
