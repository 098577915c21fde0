//! Basic usage of the AppState builder API
//!
//! This example demonstrates:
//! 1. Wiring an in-memory store instead of the JSON file
//! 2. Searching with a diet filter
//! 3. Favoriting a result and listing the collection
//!
//! Set SPOONACULAR_API_KEY before running:
//! `SPOONACULAR_API_KEY=... cargo run --example search_basic`

use recipe_finder::presenter::{self, CardMarks};
use recipe_finder::{AppConfig, AppState, Diet, MemoryStore, NotificationLog, SearchOutcome};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let notifications = Arc::new(NotificationLog::new());
    let state = AppState::builder()
        .config(AppConfig::load()?)
        .store(Arc::new(MemoryStore::new()))
        .notifier(notifications.clone())
        .build()?;

    let key = std::env::var("SPOONACULAR_API_KEY").unwrap_or_default();
    if !state.credential().submit(&key)? {
        eprintln!("SPOONACULAR_API_KEY is not set");
        return Ok(());
    }

    // Search
    println!("=== Vegetarian pasta ===");
    let controller = state.search_controller();
    let outcome = controller.search("pasta", Diet::Vegetarian).await;
    let search_state = controller.state();
    let view = presenter::present(&search_state, state.config().search.skeleton_count);
    print!("{}", presenter::render_results(&view, |_| CardMarks::default()));

    // Favorite the first hit
    if let (SearchOutcome::Completed(_), Some(first)) = (outcome, controller.results().first()) {
        let mut card = state.card(first.clone())?;
        card.toggle_favorite()?;
        card.save_note("try with basil")?;

        println!("\n=== Collection ===");
        print!("{}", state.collection()?.render(state.card_marks()?));
    }

    for notification in notifications.drain() {
        eprintln!("[{}] {}", notification.title, notification.description);
    }
    Ok(())
}
