use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Minimal recipe record as returned by search.
///
/// Identity is the API-assigned `id`; two summaries with the same id are the
/// same recipe even if their other fields differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub ready_in_minutes: u32,
    #[serde(default)]
    pub servings: u32,
}

/// One line of a recipe's ingredient list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub id: Option<i64>,
    pub original: String,
}

/// Full recipe record fetched on demand for the detail view.
///
/// `instructions` and `summary` are HTML fragments as delivered by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub summary: RecipeSummary,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub extended_ingredients: Vec<Ingredient>,
    #[serde(default, rename = "summary")]
    pub summary_html: Option<String>,
}

impl RecipeDetail {
    pub fn id(&self) -> i64 {
        self.summary.id
    }
}

impl From<RecipeDetail> for RecipeSummary {
    fn from(detail: RecipeDetail) -> Self {
        detail.summary
    }
}

impl From<RecipeSummary> for RecipeDetail {
    fn from(summary: RecipeSummary) -> Self {
        RecipeDetail {
            summary,
            instructions: None,
            extended_ingredients: Vec::new(),
            summary_html: None,
        }
    }
}

/// A user-authored recipe.
///
/// Ingredients are kept as the raw text the user typed, one per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomRecipe {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub ready_in_minutes: u32,
    pub servings: u32,
    pub instructions: String,
    pub ingredients: String,
}

impl CustomRecipe {
    /// Card-sized view of this recipe
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id,
            title: self.title.clone(),
            image: self.image.clone(),
            ready_in_minutes: self.ready_in_minutes,
            servings: self.servings,
        }
    }
}

/// Raw form input for a new custom recipe, before numeric parsing
#[derive(Debug, Clone, Default)]
pub struct NewRecipeForm {
    pub title: String,
    pub image: String,
    pub ready_in_minutes: String,
    pub servings: String,
    pub instructions: String,
    pub ingredients: String,
}

/// Diet filter offered by the search form.
///
/// `Any` means no filter and is sent to the API as an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Diet {
    #[default]
    Any,
    Vegetarian,
    Vegan,
    GlutenFree,
    Ketogenic,
    Paleo,
}

impl Diet {
    pub const ALL: [Diet; 6] = [
        Diet::Any,
        Diet::Vegetarian,
        Diet::Vegan,
        Diet::GlutenFree,
        Diet::Ketogenic,
        Diet::Paleo,
    ];

    /// Value of the `diet` query parameter
    pub fn as_query_value(&self) -> &'static str {
        match self {
            Diet::Any => "",
            Diet::Vegetarian => "vegetarian",
            Diet::Vegan => "vegan",
            Diet::GlutenFree => "gluten-free",
            Diet::Ketogenic => "ketogenic",
            Diet::Paleo => "paleo",
        }
    }

    /// Label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Diet::Any => "Any",
            Diet::Vegetarian => "Vegetarian",
            Diet::Vegan => "Vegan",
            Diet::GlutenFree => "Gluten Free",
            Diet::Ketogenic => "Keto",
            Diet::Paleo => "Paleo",
        }
    }
}

impl FromStr for Diet {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "" | "any" => Ok(Diet::Any),
            "vegetarian" => Ok(Diet::Vegetarian),
            "vegan" => Ok(Diet::Vegan),
            "gluten-free" | "gluten free" | "glutenfree" => Ok(Diet::GlutenFree),
            "ketogenic" | "keto" => Ok(Diet::Ketogenic),
            "paleo" => Ok(Diet::Paleo),
            _ => Err(AppError::UnknownDiet(s.to_string())),
        }
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_deserializes_camel_case_and_ignores_extra_fields() {
        let json = r#"{
            "id": 715538,
            "title": "Bruschetta",
            "image": "https://img.example.com/715538.jpg",
            "readyInMinutes": 35,
            "servings": 6,
            "vegan": false,
            "healthScore": 12
        }"#;
        let summary: RecipeSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.id, 715538);
        assert_eq!(summary.ready_in_minutes, 35);
        assert_eq!(summary.servings, 6);
    }

    #[test]
    fn test_summary_missing_optional_fields_default() {
        let summary: RecipeSummary =
            serde_json::from_str(r#"{"id": 1, "title": "Plain"}"#).unwrap();
        assert_eq!(summary.image, "");
        assert_eq!(summary.ready_in_minutes, 0);
    }

    #[test]
    fn test_detail_flattens_summary_fields() {
        let json = r#"{
            "id": 42,
            "title": "Pasta",
            "image": "pasta.jpg",
            "readyInMinutes": 20,
            "servings": 2,
            "instructions": "<ol><li>Boil</li></ol>",
            "extendedIngredients": [
                {"id": 20420, "original": "200g pasta"},
                {"id": 1082047, "original": "salt"}
            ],
            "summary": "<b>Quick</b> pasta"
        }"#;
        let detail: RecipeDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.id(), 42);
        assert_eq!(detail.extended_ingredients.len(), 2);
        assert_eq!(detail.extended_ingredients[0].original, "200g pasta");
        assert_eq!(detail.summary_html.as_deref(), Some("<b>Quick</b> pasta"));

        let summary: RecipeSummary = detail.into();
        assert_eq!(summary.title, "Pasta");
    }

    #[test]
    fn test_custom_recipe_serializes_camel_case() {
        let recipe = CustomRecipe {
            id: 1700000000000,
            title: "Toast".to_string(),
            image: "toast.jpg".to_string(),
            ready_in_minutes: 5,
            servings: 1,
            instructions: "Toast the bread".to_string(),
            ingredients: "bread\nbutter".to_string(),
        };
        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["readyInMinutes"], 5);
        assert_eq!(value["ingredients"], "bread\nbutter");
        assert_eq!(recipe.summary().id, 1700000000000);
    }

    #[test]
    fn test_diet_parsing() {
        assert_eq!("".parse::<Diet>().unwrap(), Diet::Any);
        assert_eq!("Vegan".parse::<Diet>().unwrap(), Diet::Vegan);
        assert_eq!("keto".parse::<Diet>().unwrap(), Diet::Ketogenic);
        assert_eq!("gluten-free".parse::<Diet>().unwrap(), Diet::GlutenFree);
        assert!("carnivore".parse::<Diet>().is_err());
    }

    #[test]
    fn test_diet_query_values() {
        assert_eq!(Diet::Any.as_query_value(), "");
        assert_eq!(Diet::GlutenFree.as_query_value(), "gluten-free");
        assert_eq!(Diet::ALL.len(), 6);
    }
}
