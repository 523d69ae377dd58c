//! Process-wide cache of loaded draft models.
//!
//! Each key owns an async once-cell. The first request for a key runs the
//! load on the blocking pool while later requests for the same key wait on
//! that cell, so a key is loaded at most once no matter how many requests
//! race for it. Requests for other keys only touch their own cells.
//!
//! Initialization runs in its own task rather than in the caller's future,
//! so a caller dropped mid-load (a client hanging up) doesn't hand the
//! load to the next waiter and start it over.
//!
//! A failed load leaves its cell empty: the error goes back to the
//! request that triggered it and the next request tries again. The empty
//! slot is dropped once no request is using it.
//!
//! Entries are never evicted. Memory grows with the number of distinct
//! `(set, mode)` pairs served.

use crate::error::{RegistryError, Result};
use crate::key::ModelKey;
use crate::model::DraftModel;
use crate::store::ModelStore;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;
use tracing::{Instrument, Span, info, instrument, warn};

type Slot = Arc<OnceCell<Arc<DraftModel>>>;

pub struct ModelRegistry {
    store: Arc<dyn ModelStore>,
    slots: DashMap<ModelKey, Slot>,
}

impl ModelRegistry {
    pub fn new(store: Arc<dyn ModelStore>) -> Self {
        Self {
            store,
            slots: DashMap::new(),
        }
    }

    /// Return the model for `key`, loading it on first use.
    #[instrument(skip(self), fields(set = %key.set_code, mode = %key.draft_mode))]
    pub async fn resolve(&self, key: &ModelKey) -> Result<Arc<DraftModel>> {
        // Clone the slot out so no map shard lock is held across the await
        let slot: Slot = self.slots.entry(key.clone()).or_default().clone();
        if let Some(model) = slot.get() {
            return Ok(Arc::clone(model));
        }

        let store = Arc::clone(&self.store);
        let task_key = key.clone();
        let init = tokio::spawn(
            async move {
                slot.get_or_try_init(|| load(store, task_key))
                    .await
                    .map(Arc::clone)
            }
            .instrument(Span::current()),
        );

        let resolved = init
            .await
            .map_err(|e| RegistryError::model_load(key, format!("load task failed: {}", e)))
            .and_then(|loaded| loaded);

        if resolved.is_err() {
            // Only the map holds the slot once every in-flight request is done
            self.slots
                .remove_if(key, |_, slot| !slot.initialized() && Arc::strong_count(slot) == 1);
        }
        resolved
    }

    /// Keys whose model is currently resident, sorted
    pub fn loaded_keys(&self) -> Vec<ModelKey> {
        let mut keys: Vec<ModelKey> = self
            .slots
            .iter()
            .filter(|entry| entry.value().initialized())
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        keys
    }

    pub fn is_loaded(&self, key: &ModelKey) -> bool {
        self.slots
            .get(key)
            .map(|slot| slot.initialized())
            .unwrap_or(false)
    }

    /// The artifact store backing this registry
    pub fn store(&self) -> &Arc<dyn ModelStore> {
        &self.store
    }
}

async fn load(store: Arc<dyn ModelStore>, key: ModelKey) -> Result<Arc<DraftModel>> {
    let start = Instant::now();

    let task_key = key.clone();
    let loaded = tokio::task::spawn_blocking(move || store.load(&task_key))
        .await
        .map_err(|e| RegistryError::model_load(&key, format!("load task failed: {}", e)))?;

    match loaded {
        Ok(model) => {
            info!(
                "Loaded model {} ({} cards, {}) in {:.2?}",
                key,
                model.catalog().len(),
                model.scorer_name(),
                start.elapsed()
            );
            Ok(Arc::new(model))
        }
        Err(e) => {
            warn!("Failed to load model {}: {}", key, e);
            Err(e)
        }
    }
}
