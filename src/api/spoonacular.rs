use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

use super::{RecipeApi, SearchQuery};
use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::model::{RecipeDetail, RecipeSummary};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<RecipeSummary>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for the Spoonacular recipe API
pub struct SpoonacularClient {
    client: Client,
    base_url: String,
}

impl SpoonacularClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("recipe-finder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(config.base_url.clone(), Some(config.timeout()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read_body(&self, response: Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await.map_err(|e| e.without_url())?;
        if status.is_success() {
            return Ok(body);
        }

        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
        Err(AppError::ApiError {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl RecipeApi for SpoonacularClient {
    async fn search(&self, api_key: &str, query: &SearchQuery) -> Result<Vec<RecipeSummary>> {
        let url = format!("{}/recipes/complexSearch", self.base_url);
        debug!("GET {} query={:?} diet={:?}", url, query.text, query.diet.as_query_value());

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", api_key)])
            .query(&query.params())
            .send()
            .await
            // The request URL carries the api key
            .map_err(|e| e.without_url())?;

        let body = self.read_body(response).await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        debug!("Search returned {} results", parsed.results.len());
        Ok(parsed.results)
    }

    async fn recipe_information(&self, api_key: &str, id: i64) -> Result<RecipeDetail> {
        let url = format!("{}/recipes/{}/information", self.base_url, id);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", api_key)])
            .send()
            .await
            // The request URL carries the api key
            .map_err(|e| e.without_url())?;

        let body = self.read_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }
}
