//! Text rendering of the search grid, the collection tabs and the detail pane.

use scraper::{Html, Node};
use std::fmt::Write;

use crate::card::DetailState;
use crate::model::{CustomRecipe, RecipeDetail, RecipeSummary};
use crate::search::SearchState;

pub const SEARCH_PROMPT: &str = "Search recipes by ingredients...";
pub const NO_RESULTS_MESSAGE: &str = "No recipes found. Try another search.";
pub const NO_FAVORITES_MESSAGE: &str = "No favorites yet";
pub const NO_CUSTOM_RECIPES_MESSAGE: &str = "No saved recipes yet";

/// What the result area shows for a given search state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView<'a> {
    Prompt,
    Skeletons(usize),
    Grid(&'a [RecipeSummary]),
    Empty,
}

pub fn present(state: &SearchState, skeleton_count: usize) -> ResultView<'_> {
    match state {
        SearchState::Idle => ResultView::Prompt,
        SearchState::Loading => ResultView::Skeletons(skeleton_count),
        SearchState::Loaded(results) if !results.is_empty() => ResultView::Grid(results),
        SearchState::Loaded(_) | SearchState::Failed(_) => ResultView::Empty,
    }
}

/// Per-card decoration read from favorites and notes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardMarks {
    pub is_favorite: bool,
    pub note: Option<String>,
}

pub fn render_card(recipe: &RecipeSummary, marks: &CardMarks) -> String {
    let heart = if marks.is_favorite { "♥" } else { "♡" };
    let mut out = format!(
        "{} {} [#{}]\n   {} mins · {} servings\n",
        heart,
        html_escape::decode_html_entities(&recipe.title),
        recipe.id,
        recipe.ready_in_minutes,
        recipe.servings
    );
    if let Some(note) = marks.note.as_deref().filter(|n| !n.is_empty()) {
        let _ = writeln!(out, "   note: {}", note);
    }
    out
}

/// Render the result area. `marks` looks up favorite/note state per recipe.
pub fn render_results<F>(view: &ResultView<'_>, marks: F) -> String
where
    F: Fn(&RecipeSummary) -> CardMarks,
{
    match view {
        ResultView::Prompt => format!("{}\n", SEARCH_PROMPT),
        ResultView::Skeletons(count) => "░░░░░░░░░░░░░░░░\n".repeat(*count),
        ResultView::Grid(results) => render_grid(results.iter(), marks),
        ResultView::Empty => format!("{}\n", NO_RESULTS_MESSAGE),
    }
}

fn render_grid<'a, I, F>(recipes: I, marks: F) -> String
where
    I: Iterator<Item = &'a RecipeSummary>,
    F: Fn(&RecipeSummary) -> CardMarks,
{
    recipes
        .map(|recipe| render_card(recipe, &marks(recipe)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The two tabs of the collection view
#[derive(Debug, Clone, Default)]
pub struct CollectionView {
    pub favorites: Vec<RecipeSummary>,
    pub custom: Vec<CustomRecipe>,
}

impl CollectionView {
    pub fn render<F>(&self, marks: F) -> String
    where
        F: Fn(&RecipeSummary) -> CardMarks,
    {
        let mut out = String::from("== Favorites ==\n");
        if self.favorites.is_empty() {
            let _ = writeln!(out, "{}", NO_FAVORITES_MESSAGE);
        } else {
            out.push_str(&render_grid(self.favorites.iter(), &marks));
        }

        out.push_str("\n== My Recipes ==\n");
        if self.custom.is_empty() {
            let _ = writeln!(out, "{}", NO_CUSTOM_RECIPES_MESSAGE);
        } else {
            let summaries: Vec<RecipeSummary> = self.custom.iter().map(|r| r.summary()).collect();
            out.push_str(&render_grid(summaries.iter(), &marks));
        }
        out
    }
}

pub fn render_detail(state: &DetailState) -> String {
    match state {
        DetailState::Idle => String::new(),
        DetailState::Loading => "Loading recipe details...\n".to_string(),
        DetailState::Loaded(detail) => render_loaded_detail(detail),
        DetailState::Failed(reason) => format!(
            "Could not load recipe details: {}\nRun the command again to retry.\n",
            reason
        ),
    }
}

fn render_loaded_detail(detail: &RecipeDetail) -> String {
    let mut out = render_card(&detail.summary, &CardMarks::default());

    if let Some(summary) = detail.summary_html.as_deref() {
        let _ = writeln!(out, "\n{}", strip_html(summary));
    }

    if !detail.extended_ingredients.is_empty() {
        out.push_str("\nIngredients:\n");
        for ingredient in &detail.extended_ingredients {
            let _ = writeln!(out, "  - {}", ingredient.original);
        }
    }

    if let Some(instructions) = detail.instructions.as_deref() {
        let _ = writeln!(out, "\nInstructions:\n{}", strip_html(instructions));
    }
    out
}

/// One of the user's own recipes; its ingredients and instructions are
/// stored as typed, so nothing needs fetching
pub fn render_custom_recipe(recipe: &CustomRecipe) -> String {
    let mut out = render_card(&recipe.summary(), &CardMarks::default());

    let ingredients: Vec<&str> = recipe
        .ingredients
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if !ingredients.is_empty() {
        out.push_str("\nIngredients:\n");
        for ingredient in ingredients {
            let _ = writeln!(out, "  - {}", ingredient);
        }
    }

    if !recipe.instructions.trim().is_empty() {
        let _ = writeln!(out, "\nInstructions:\n{}", recipe.instructions.trim());
    }
    out
}

const BLOCK_TAGS: &[&str] = &[
    "p", "br", "div", "li", "ol", "ul", "h1", "h2", "h3", "h4", "h5", "h6", "tr", "td",
];

/// Plain text of an HTML fragment, whitespace collapsed.
///
/// Inline tags join their text directly, block tags separate it.
pub fn strip_html(fragment: &str) -> String {
    let document = Html::parse_fragment(fragment);
    let mut text = String::new();
    for node in document.root_element().descendants() {
        match node.value() {
            Node::Text(chunk) => text.push_str(chunk),
            Node::Element(element) if BLOCK_TAGS.contains(&element.name()) => text.push(' '),
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ingredient;

    fn recipe(id: i64, title: &str) -> RecipeSummary {
        RecipeSummary {
            id,
            title: title.to_string(),
            image: String::new(),
            ready_in_minutes: 30,
            servings: 4,
        }
    }

    #[test]
    fn test_present_states() {
        assert_eq!(present(&SearchState::Idle, 6), ResultView::Prompt);
        assert_eq!(present(&SearchState::Loading, 6), ResultView::Skeletons(6));
        assert_eq!(present(&SearchState::Loaded(vec![]), 6), ResultView::Empty);
        assert_eq!(
            present(&SearchState::Failed("x".to_string()), 6),
            ResultView::Empty
        );

        let loaded = SearchState::Loaded(vec![recipe(1, "A")]);
        assert!(matches!(present(&loaded, 6), ResultView::Grid(r) if r.len() == 1));
    }

    #[test]
    fn test_skeleton_count_is_fixed() {
        let text = render_results(&ResultView::Skeletons(6), |_| CardMarks::default());
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn test_card_shows_time_servings_marks() {
        let marks = CardMarks {
            is_favorite: true,
            note: Some("kids loved it".to_string()),
        };
        let text = render_card(&recipe(5, "Mac &amp; Cheese"), &marks);
        assert!(text.contains("♥ Mac & Cheese [#5]"));
        assert!(text.contains("30 mins"));
        assert!(text.contains("4 servings"));
        assert!(text.contains("note: kids loved it"));
    }

    #[test]
    fn test_empty_note_not_rendered() {
        let marks = CardMarks {
            is_favorite: false,
            note: Some(String::new()),
        };
        assert!(!render_card(&recipe(1, "A"), &marks).contains("note:"));
    }

    #[test]
    fn test_grid_keeps_order() {
        let results = vec![recipe(1, "First"), recipe(2, "Second")];
        let text = render_results(&ResultView::Grid(&results), |_| CardMarks::default());
        let first = text.find("First").unwrap();
        let second = text.find("Second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_collection_empty_states() {
        let text = CollectionView::default().render(|_| CardMarks::default());
        assert!(text.contains(NO_FAVORITES_MESSAGE));
        assert!(text.contains(NO_CUSTOM_RECIPES_MESSAGE));
    }

    #[test]
    fn test_collection_lists_custom_recipes() {
        let view = CollectionView {
            favorites: vec![recipe(1, "Fav")],
            custom: vec![CustomRecipe {
                id: 99,
                title: "Mine".to_string(),
                image: String::new(),
                ready_in_minutes: 10,
                servings: 1,
                instructions: "Do it".to_string(),
                ingredients: "stuff".to_string(),
            }],
        };
        let text = view.render(|_| CardMarks::default());
        assert!(text.contains("Fav [#1]"));
        assert!(text.contains("Mine [#99]"));
        assert!(!text.contains(NO_FAVORITES_MESSAGE));
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("<p>Heat <b>oil</b>.</p>\n<p>Add &amp; stir.</p>"),
            "Heat oil. Add & stir."
        );
        assert_eq!(
            strip_html("Serve warm pan<i>cake</i>s, <a href=\"#\">see here</a>!"),
            "Serve warm pancakes, see here!"
        );
        assert_eq!(strip_html("Mix<br>Bake"), "Mix Bake");
    }

    #[test]
    fn test_render_custom_recipe() {
        let recipe = CustomRecipe {
            id: 99,
            title: "Grandma&#39;s Pie".to_string(),
            image: String::new(),
            ready_in_minutes: 90,
            servings: 8,
            instructions: "Bake until golden.".to_string(),
            ingredients: "2 cups flour\n\n1 cup butter\n".to_string(),
        };
        let text = render_custom_recipe(&recipe);
        assert!(text.contains("Grandma's Pie [#99]"));
        assert!(text.contains("Ingredients:\n  - 2 cups flour\n  - 1 cup butter\n"));
        assert!(text.contains("Instructions:\nBake until golden."));
    }

    #[test]
    fn test_render_detail_states() {
        assert!(render_detail(&DetailState::Loading).contains("Loading"));
        assert!(render_detail(&DetailState::Failed("quota".to_string())).contains("quota"));

        let mut detail = RecipeDetail::from(recipe(3, "Stew"));
        detail.extended_ingredients = vec![Ingredient {
            id: Some(1),
            original: "2 carrots".to_string(),
        }];
        detail.instructions = Some("<ol><li>Chop</li><li>Boil</li></ol>".to_string());
        let text = render_detail(&DetailState::Loaded(Box::new(detail)));
        assert!(text.contains("  - 2 carrots"));
        assert!(text.contains("Chop Boil"));
    }
}
