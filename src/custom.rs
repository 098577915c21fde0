use log::info;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AppError, Result};
use crate::model::{CustomRecipe, NewRecipeForm};
use crate::store::{read_json_or_default, write_json, KeyValueStore, CUSTOM_RECIPES_KEY};

/// Persisted list of user-authored recipes. Append only.
#[derive(Clone)]
pub struct CustomRecipeStore {
    store: Arc<dyn KeyValueStore>,
}

impl CustomRecipeStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<CustomRecipe>> {
        read_json_or_default(self.store.as_ref(), CUSTOM_RECIPES_KEY)
    }

    pub fn get(&self, id: i64) -> Result<Option<CustomRecipe>> {
        Ok(self.list()?.into_iter().find(|r| r.id == id))
    }

    /// Parse `form` and append it with an id taken from the current time.
    ///
    /// Two recipes created within the same millisecond share an id.
    pub fn create(&self, form: NewRecipeForm) -> Result<CustomRecipe> {
        self.create_with_id(form, now_millis())
    }

    fn create_with_id(&self, form: NewRecipeForm, id: i64) -> Result<CustomRecipe> {
        let ready_in_minutes = parse_count("readyInMinutes", &form.ready_in_minutes)?;
        let servings = parse_count("servings", &form.servings)?;

        let recipe = CustomRecipe {
            id,
            title: form.title,
            image: form.image,
            ready_in_minutes,
            servings,
            instructions: form.instructions,
            ingredients: form.ingredients,
        };

        let mut recipes = self.list()?;
        recipes.push(recipe.clone());
        write_json(self.store.as_ref(), CUSTOM_RECIPES_KEY, &recipes)?;
        info!("Created custom recipe {} ({})", recipe.id, recipe.title);
        Ok(recipe)
    }
}

fn parse_count(field: &'static str, value: &str) -> Result<u32> {
    value.trim().parse().map_err(|_| AppError::InvalidField {
        field,
        value: value.to_string(),
    })
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}
