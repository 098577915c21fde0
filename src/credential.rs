use log::{debug, info};
use std::sync::Arc;
use tokio::sync::watch;

use crate::error::Result;
use crate::notify::{Notification, Notifier};
use crate::store::{read_json, write_json, KeyValueStore, CREDENTIAL_KEY};

/// Holds the single API credential and mirrors it to the store.
///
/// The key is opaque: nothing checks its format, a bad key only shows up
/// when a request is rejected.
pub struct CredentialHolder {
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    active: watch::Sender<Option<String>>,
}

impl CredentialHolder {
    /// Create the holder and adopt a previously saved key, if any
    pub fn mount(store: Arc<dyn KeyValueStore>, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let saved: Option<String> = read_json(store.as_ref(), CREDENTIAL_KEY)?;
        let saved = saved.filter(|key| !key.is_empty());
        if saved.is_some() {
            debug!("Adopted saved API key");
        }

        Ok(Self {
            store,
            notifier,
            active: watch::Sender::new(saved),
        })
    }

    /// The currently active key
    pub fn active(&self) -> Option<String> {
        self.active.borrow().clone()
    }

    pub fn is_set(&self) -> bool {
        self.active.borrow().is_some()
    }

    /// Observe credential changes
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.active.subscribe()
    }

    /// Save and adopt `key`.
    ///
    /// Returns `Ok(false)` without touching anything when the key is blank.
    pub fn submit(&self, key: &str) -> Result<bool> {
        let key = key.trim();
        if key.is_empty() {
            debug!("Ignoring blank API key");
            return Ok(false);
        }

        write_json(self.store.as_ref(), CREDENTIAL_KEY, key)?;
        self.active.send_replace(Some(key.to_string()));
        info!("API key saved");
        self.notifier.notify(Notification::info(
            "API Key Saved",
            "Your Spoonacular API key has been saved successfully.",
        ));
        Ok(true)
    }

    /// Forget the active key and remove it from the store
    pub fn clear(&self) -> Result<()> {
        self.store.remove(CREDENTIAL_KEY)?;
        self.active.send_replace(None);
        info!("API key removed");
        Ok(())
    }
}
