use clap::{Parser, Subcommand};
use log::debug;
use std::path::PathBuf;
use std::sync::Arc;

use recipe_finder::presenter::{self, CardMarks};
use recipe_finder::{
    AppConfig, AppError, AppState, Diet, NewRecipeForm, NotificationLog, RecipeCard,
    RecipeSummary, SearchOutcome,
};

#[derive(Parser)]
#[command(
    name = "recipe-finder",
    about = "Search recipes and keep your favorites, notes and own recipes",
    long_about = "Search Spoonacular recipes by ingredient and diet. Favorites, notes and \
                  self-authored recipes are kept in a local JSON file."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Store file override (defaults to storage.path from config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Save your Spoonacular API key
    Login {
        /// API key from https://spoonacular.com/food-api/console#Profile
        key: String,
    },

    /// Forget the saved API key
    Logout,

    /// Search recipes by ingredients
    Search {
        /// Free-text query, e.g. "chicken rice"
        query: Vec<String>,

        /// Diet filter: any, vegetarian, vegan, gluten-free, ketogenic, paleo
        #[arg(long, short, default_value = "any")]
        diet: Diet,
    },

    /// Show ingredients, instructions and summary of a recipe
    Show { id: i64 },

    /// Add a recipe to favorites, or remove it if it already is one
    Favorite { id: i64 },

    /// Save a personal note for a recipe (an empty note clears it)
    Note {
        id: i64,
        #[arg(default_value = "")]
        text: Vec<String>,
    },

    /// List favorites and your own recipes
    Collection,

    /// Create your own recipe
    New {
        #[arg(long)]
        title: String,
        /// Image URL
        #[arg(long)]
        image: String,
        /// Cooking time in minutes
        #[arg(long)]
        ready_in_minutes: String,
        #[arg(long)]
        servings: String,
        /// Ingredients, one per line
        #[arg(long)]
        ingredients: String,
        #[arg(long)]
        instructions: String,
    },

    /// List the available diet filters
    Diets,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = AppConfig::load()?;
    if let Some(path) = cli.store {
        config.storage.path = path;
    }
    debug!("Using store {}", config.storage.path.display());

    let notifications = Arc::new(NotificationLog::new());
    let state = AppState::builder()
        .config(config)
        .notifier(notifications.clone())
        .build()?;

    let result = run(&state, cli.command).await;

    for notification in notifications.drain() {
        eprintln!("[{}] {}", notification.title, notification.description);
    }
    result.map_err(Into::into)
}

async fn run(state: &AppState, command: Command) -> Result<(), AppError> {
    match command {
        Command::Login { key } => {
            if !state.credential().submit(&key)? {
                eprintln!("The API key cannot be empty.");
            }
        }

        Command::Logout => state.credential().clear()?,

        Command::Search { query, diet } => {
            let query = query.join(" ");
            let controller = state.search_controller();
            let outcome = controller.search(&query, diet).await;
            if outcome == SearchOutcome::MissingCredential {
                eprintln!("Please enter your Spoonacular API key to get started:");
                eprintln!("  recipe-finder login <KEY>");
                return Ok(());
            }

            let results = controller.results();
            if let SearchOutcome::Completed(_) = outcome {
                state.remember_results(&results)?;
            }

            let search_state = controller.state();
            let view = presenter::present(&search_state, state.config().search.skeleton_count);
            print!("{}", presenter::render_results(&view, state.card_marks()?));
        }

        Command::Show { id } => {
            if let Some(recipe) = state.custom_recipes().get(id)? {
                // Own recipes are complete locally, the API does not know them
                let card = state.card(recipe.summary())?;
                println!("{}", presenter::render_custom_recipe(&recipe));
                print!("{}", render_marks(&card_marks(&card)));
                return Ok(());
            }

            let summary = state.find_summary(id)?.unwrap_or_else(|| placeholder(id));
            let mut card = state.card(summary)?;
            let detail = card.open_detail().await;
            println!("{}", presenter::render_detail(detail));
            print!("{}", render_marks(&card_marks(&card)));
        }

        Command::Favorite { id } => {
            let summary = state.find_summary(id)?.ok_or(AppError::RecipeNotFound(id))?;
            let mut card = state.card(summary)?;
            if card.toggle_favorite()? {
                println!("Added \"{}\" to favorites", card.recipe().title);
            } else {
                println!("Removed \"{}\" from favorites", card.recipe().title);
            }
        }

        Command::Note { id, text } => {
            let summary = state.find_summary(id)?.unwrap_or_else(|| placeholder(id));
            let mut card = state.card(summary)?;
            card.save_note(&text.join(" "))?;
        }

        Command::Collection => {
            print!("{}", state.collection()?.render(state.card_marks()?));
        }

        Command::New {
            title,
            image,
            ready_in_minutes,
            servings,
            ingredients,
            instructions,
        } => {
            state.create_recipe(NewRecipeForm {
                title,
                image,
                ready_in_minutes,
                servings,
                instructions,
                ingredients,
            })?;
            print!("{}", state.collection()?.render(state.card_marks()?));
        }

        Command::Diets => {
            for diet in Diet::ALL {
                let name = match diet {
                    Diet::Any => "any",
                    other => other.as_query_value(),
                };
                println!("{:<12} {}", name, diet.label());
            }
        }
    }
    Ok(())
}

/// Summary for an id we know nothing else about; only the id is used to fetch
fn placeholder(id: i64) -> RecipeSummary {
    RecipeSummary {
        id,
        title: String::new(),
        image: String::new(),
        ready_in_minutes: 0,
        servings: 0,
    }
}

fn card_marks(card: &RecipeCard) -> CardMarks {
    CardMarks {
        is_favorite: card.is_favorite(),
        note: Some(card.note().to_string()),
    }
}

fn render_marks(marks: &CardMarks) -> String {
    let mut out = String::new();
    if marks.is_favorite {
        out.push_str("♥ In your favorites\n");
    }
    if let Some(note) = marks.note.as_deref().filter(|n| !n.is_empty()) {
        out.push_str(&format!("Your note: {}\n", note));
    }
    out
}
