//! Local key-value persistence.
//!
//! The store mirrors the browser's local storage: string keys, JSON values,
//! synchronous access, no transactions. Every mutation made through the typed
//! helpers is a whole-value read-modify-write, so two processes writing the
//! same key can lose updates. There is no locking.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, Result};

/// Key holding the active API credential
pub const CREDENTIAL_KEY: &str = "spoonacular_api_key";
/// Key holding the favorited recipe summaries
pub const FAVORITES_KEY: &str = "favorites";
/// Key holding the recipe id to note map
pub const NOTES_KEY: &str = "recipe_notes";
/// Key holding user-authored recipes
pub const CUSTOM_RECIPES_KEY: &str = "custom_recipes";
/// Key holding the results of the most recent successful search
pub const LAST_RESULTS_KEY: &str = "last_results";

/// Synchronous string-keyed store of JSON values
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Read and decode the value under `key`
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| AppError::CorruptValue {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}

/// Read the value under `key`, falling back to `T::default()` when absent
pub fn read_json_or_default<T: DeserializeOwned + Default>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<T> {
    Ok(read_json(store, key)?.unwrap_or_default())
}

/// Encode `value` and store it under `key`
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    store.set(key, serde_json::to_value(value)?)
}
