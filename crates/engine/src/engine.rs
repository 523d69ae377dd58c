//! # Draft Engine
//!
//! This module coordinates the three operations callers use:
//! 1. List the sets that have a model artifact
//! 2. Rank catalog cards given a partial collection (pick order)
//! 3. Select a deck from a finished pool under color constraints
//!
//! Each request is validated, its model is resolved through the shared
//! registry (loading it on first use), and the CPU work runs on the
//! blocking pool. Nothing request-specific outlives the request.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use card_catalog::ColorSet;
use model_registry::{DraftModel, FsModelStore, ModelKey, ModelRegistry, ModelStore};
use pipeline::RatingRecord;

use crate::config::EngineConfig;
use crate::deck_builder::DeckBuilder;
use crate::error::{EngineError, Result};
use crate::ranker::PickOrderRanker;

/// Input to `get_pick_order`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PickOrderRequest {
    pub set_code: String,
    /// Falls back to the configured default mode
    pub draft_mode: Option<String>,
    /// Cards picked so far; may be empty and may repeat
    pub collection: Vec<String>,
}

impl PickOrderRequest {
    pub fn new(set_code: impl Into<String>) -> Self {
        Self {
            set_code: set_code.into(),
            ..Self::default()
        }
    }

    pub fn with_draft_mode(mut self, draft_mode: impl Into<String>) -> Self {
        self.draft_mode = Some(draft_mode.into());
        self
    }

    pub fn with_collection<S: Into<String>>(mut self, collection: impl IntoIterator<Item = S>) -> Self {
        self.collection = collection.into_iter().map(Into::into).collect();
        self
    }
}

/// Input to `get_deck_recommendation`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckRequest {
    pub set_code: String,
    pub draft_mode: Option<String>,
    /// Every card the drafter holds; must not be empty
    pub pool: Vec<String>,
    /// Color symbols such as `"UW"`; missing or empty means no filter
    pub starting_colors: Option<String>,
}

impl DeckRequest {
    pub fn new(set_code: impl Into<String>) -> Self {
        Self {
            set_code: set_code.into(),
            ..Self::default()
        }
    }

    pub fn with_draft_mode(mut self, draft_mode: impl Into<String>) -> Self {
        self.draft_mode = Some(draft_mode.into());
        self
    }

    pub fn with_pool<S: Into<String>>(mut self, pool: impl IntoIterator<Item = S>) -> Self {
        self.pool = pool.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_starting_colors(mut self, colors: impl Into<String>) -> Self {
        self.starting_colors = Some(colors.into());
        self
    }
}

/// Main engine that serves draft recommendations.
///
/// Cheap to clone; clones share the registry and therefore the loaded
/// models.
#[derive(Clone)]
pub struct DraftEngine {
    registry: Arc<ModelRegistry>,
    config: EngineConfig,
    ranker: Arc<PickOrderRanker>,
    deck_builder: Arc<DeckBuilder>,
}

impl DraftEngine {
    /// Create an engine over an existing registry
    pub fn new(registry: Arc<ModelRegistry>, config: EngineConfig) -> Self {
        let ranker = Arc::new(PickOrderRanker::new(config.pick_order_policy));
        Self {
            registry,
            config,
            ranker,
            deck_builder: Arc::new(DeckBuilder::new()),
        }
    }

    /// Create an engine reading artifacts from `config.data_dir`
    pub fn from_config(config: EngineConfig) -> Self {
        let store = FsModelStore::from_data_dir(&config.data_dir);
        Self::with_store(Arc::new(store), config)
    }

    /// Create an engine with a fresh registry over `store`
    pub fn with_store(store: Arc<dyn ModelStore>, config: EngineConfig) -> Self {
        Self::new(Arc::new(ModelRegistry::new(store)), config)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    /// Set codes with at least one discoverable model artifact, sorted.
    #[instrument(skip(self))]
    pub async fn list_available_sets(&self) -> Result<Vec<String>> {
        let store = Arc::clone(self.registry.store());
        let sets = tokio::task::spawn_blocking(move || store.list_set_codes())
            .await
            .map_err(|e| EngineError::Storage(format!("listing task failed: {}", e)))??;

        info!("Found {} sets with model artifacts", sets.len());
        Ok(sets)
    }

    /// Rank every catalog card given the collection so far.
    ///
    /// # Returns
    /// One record per catalog card (fewer under `ExcludePicked`), sorted
    /// by rating descending, ties by name.
    #[instrument(
        skip(self, request),
        fields(set = %request.set_code, cards = request.collection.len())
    )]
    pub async fn get_pick_order(&self, request: PickOrderRequest) -> Result<Vec<RatingRecord>> {
        let start_time = Instant::now();
        let key = self.model_key(&request.set_code, request.draft_mode.as_deref())?;

        let model = self.registry.resolve(&key).await?;

        let ranker = Arc::clone(&self.ranker);
        let collection = request.collection;
        let records = self
            .run_scoring(&key, model, move |model| ranker.rank(model, &collection))
            .await?;

        info!(
            "Ranked {} cards for {} in {:.2?}",
            records.len(),
            key,
            start_time.elapsed()
        );
        Ok(records)
    }

    /// Select the best color-feasible cards from a finished pool.
    ///
    /// # Returns
    /// One record per compatible physical card in the pool, sorted by
    /// rating descending, ties by name.
    #[instrument(
        skip(self, request),
        fields(set = %request.set_code, cards = request.pool.len())
    )]
    pub async fn get_deck_recommendation(&self, request: DeckRequest) -> Result<Vec<RatingRecord>> {
        let start_time = Instant::now();
        let key = self.model_key(&request.set_code, request.draft_mode.as_deref())?;
        if request.pool.is_empty() {
            return Err(EngineError::validation("pool must not be empty"));
        }
        let starting_colors = parse_starting_colors(request.starting_colors.as_deref())?;

        let model = self.registry.resolve(&key).await?;

        let deck_builder = Arc::clone(&self.deck_builder);
        let pool = request.pool;
        let deck = self
            .run_scoring(&key, model, move |model| {
                deck_builder.build(model, &pool, starting_colors)
            })
            .await?;

        info!(
            "Recommended {} cards for {} in {:.2?}",
            deck.len(),
            key,
            start_time.elapsed()
        );
        Ok(deck)
    }

    /// Validate the request's set and mode and build the cache key
    fn model_key(&self, set_code: &str, draft_mode: Option<&str>) -> Result<ModelKey> {
        validate_code("set_code", set_code)?;
        let draft_mode = draft_mode.unwrap_or(&self.config.default_draft_mode);
        validate_code("draft_mode", draft_mode)?;
        Ok(ModelKey::new(set_code, draft_mode))
    }

    /// Run CPU-bound scoring on the blocking pool
    async fn run_scoring<F>(
        &self,
        key: &ModelKey,
        model: Arc<DraftModel>,
        work: F,
    ) -> Result<Vec<RatingRecord>>
    where
        F: FnOnce(&DraftModel) -> Result<Vec<RatingRecord>> + Send + 'static,
    {
        tokio::task::spawn_blocking(move || work(&model))
            .await
            .map_err(|e| EngineError::ModelLoad {
                key: key.clone(),
                reason: format!("scoring task failed: {}", e),
            })?
    }
}

/// Set codes and draft modes become artifact file names
fn validate_code(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(EngineError::validation(format!("{} is required", field)));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(EngineError::validation(format!(
            "{} must be ASCII letters and digits, got {:?}",
            field, value
        )));
    }
    Ok(())
}

fn parse_starting_colors(colors: Option<&str>) -> Result<ColorSet> {
    match colors {
        None => Ok(ColorSet::empty()),
        Some(symbols) => symbols
            .parse()
            .map_err(|e| EngineError::validation(format!("starting_colors: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_code() {
        assert!(validate_code("set_code", "FDN").is_ok());
        assert!(validate_code("set_code", "fdn2").is_ok());
        assert!(validate_code("set_code", "").is_err());
        assert!(validate_code("set_code", "FD N").is_err());
        assert!(validate_code("set_code", "../FDN").is_err());
        assert!(validate_code("draft_mode", "Premier_Draft").is_err());
    }

    #[test]
    fn test_parse_starting_colors() {
        assert_eq!(parse_starting_colors(None).unwrap(), ColorSet::empty());
        assert_eq!(parse_starting_colors(Some("")).unwrap(), ColorSet::empty());
        assert_eq!(parse_starting_colors(Some("WU")).unwrap().len(), 2);
        assert!(parse_starting_colors(Some("UX")).is_err());
        assert!(parse_starting_colors(Some("wu")).is_err());
    }

    #[test]
    fn test_model_key_uses_default_mode() {
        let engine = DraftEngine::from_config(EngineConfig::default().with_default_draft_mode("Trad"));
        assert_eq!(engine.model_key("FDN", None).unwrap(), ModelKey::new("FDN", "Trad"));
        assert_eq!(
            engine.model_key("FDN", Some("Premier")).unwrap(),
            ModelKey::new("FDN", "Premier")
        );
        assert!(engine.model_key("FDN", Some("")).is_err());
    }
}
