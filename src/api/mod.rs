mod spoonacular;
#[cfg(test)]
pub(crate) mod scripted;

pub use spoonacular::SpoonacularClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Diet, RecipeDetail, RecipeSummary};

/// Parameters of one recipe search, minus the credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub diet: Diet,
    pub number: u32,
    pub add_recipe_information: bool,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, diet: Diet, number: u32) -> Self {
        Self {
            text: text.into(),
            diet,
            number,
            add_recipe_information: true,
        }
    }

    /// Query parameters in request order.
    ///
    /// `diet` is always present, empty when no filter is selected.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.text.clone()),
            ("diet", self.diet.as_query_value().to_string()),
            ("number", self.number.to_string()),
            (
                "addRecipeInformation",
                self.add_recipe_information.to_string(),
            ),
        ]
    }
}

/// The external recipe service
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Search recipes; an empty list is a valid answer
    async fn search(&self, api_key: &str, query: &SearchQuery) -> Result<Vec<RecipeSummary>>;

    /// Fetch the full record of one recipe
    async fn recipe_information(&self, api_key: &str, id: i64) -> Result<RecipeDetail>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_always_carry_diet() {
        let query = SearchQuery::new("pasta", Diet::Any, 12);
        let params = query.params();
        assert_eq!(
            params,
            vec![
                ("query", "pasta".to_string()),
                ("diet", "".to_string()),
                ("number", "12".to_string()),
                ("addRecipeInformation", "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_params_with_diet() {
        let query = SearchQuery::new("tofu", Diet::Vegan, 12);
        assert!(query.params().contains(&("diet", "vegan".to_string())));
    }
}
