//! In-process stand-in for the recipe API whose answers are fed by the test.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

use super::{RecipeApi, SearchQuery};
use crate::error::{AppError, Result};
use crate::model::{RecipeDetail, RecipeSummary};

type Pending<T> = oneshot::Receiver<Result<T>>;

#[derive(Default)]
pub(crate) struct ScriptedApi {
    searches: Mutex<VecDeque<Pending<Vec<RecipeSummary>>>>,
    details: Mutex<VecDeque<Pending<RecipeDetail>>>,
    queries: Mutex<Vec<(String, SearchQuery)>>,
    detail_calls: AtomicUsize,
}

impl ScriptedApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue an answer for the next search call
    pub(crate) fn answer_search(&self, result: Result<Vec<RecipeSummary>>) {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        self.searches.lock().unwrap().push_back(rx);
    }

    /// Queue a search call whose answer arrives when the returned sender fires
    pub(crate) fn hold_search(&self) -> oneshot::Sender<Result<Vec<RecipeSummary>>> {
        let (tx, rx) = oneshot::channel();
        self.searches.lock().unwrap().push_back(rx);
        tx
    }

    pub(crate) fn answer_detail(&self, result: Result<RecipeDetail>) {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        self.details.lock().unwrap().push_back(rx);
    }

    pub(crate) fn search_calls(&self) -> Vec<(String, SearchQuery)> {
        self.queries.lock().unwrap().clone()
    }

    pub(crate) fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

fn unscripted() -> AppError {
    AppError::ApiError {
        status: 599,
        message: "no scripted answer".to_string(),
    }
}

#[async_trait]
impl RecipeApi for ScriptedApi {
    async fn search(&self, api_key: &str, query: &SearchQuery) -> Result<Vec<RecipeSummary>> {
        self.queries
            .lock()
            .unwrap()
            .push((api_key.to_string(), query.clone()));
        let pending = self.searches.lock().unwrap().pop_front();
        match pending {
            Some(rx) => rx.await.unwrap_or_else(|_| Err(unscripted())),
            None => Err(unscripted()),
        }
    }

    async fn recipe_information(&self, _api_key: &str, _id: i64) -> Result<RecipeDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let pending = self.details.lock().unwrap().pop_front();
        match pending {
            Some(rx) => rx.await.unwrap_or_else(|_| Err(unscripted())),
            None => Err(unscripted()),
        }
    }
}
