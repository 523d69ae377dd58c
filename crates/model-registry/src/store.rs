//! Where model artifacts come from.
//!
//! The filesystem layout is:
//! ```text
//! <data_dir>/cards/<SET>.csv           catalog record store
//! <data_dir>/models/<SET>_<MODE>.json  weight artifact
//! ```

use crate::error::{RegistryError, Result};
use crate::key::ModelKey;
use crate::model::DraftModel;
use card_catalog::Catalog;
use draft_model::DraftNet;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const MODEL_EXTENSION: &str = "json";
const CATALOG_EXTENSION: &str = "csv";

/// Source of loadable models. `load` may block on I/O.
pub trait ModelStore: Send + Sync {
    /// Every key with a discoverable weight artifact, sorted
    fn list_keys(&self) -> Result<Vec<ModelKey>>;

    /// Load and bind the catalog and scorer for `key`
    fn load(&self, key: &ModelKey) -> Result<DraftModel>;

    /// Distinct set codes across `list_keys`, sorted
    fn list_set_codes(&self) -> Result<Vec<String>> {
        let sets: BTreeSet<String> = self
            .list_keys()?
            .into_iter()
            .map(|key| key.set_code)
            .collect();
        Ok(sets.into_iter().collect())
    }
}

/// Reads catalogs and weight artifacts from a data directory.
#[derive(Debug, Clone)]
pub struct FsModelStore {
    cards_dir: PathBuf,
    models_dir: PathBuf,
}

impl FsModelStore {
    pub fn new(cards_dir: impl Into<PathBuf>, models_dir: impl Into<PathBuf>) -> Self {
        Self {
            cards_dir: cards_dir.into(),
            models_dir: models_dir.into(),
        }
    }

    /// Standard `cards/` + `models/` layout under one directory
    pub fn from_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("cards"), data_dir.join("models"))
    }

    pub fn catalog_path(&self, set_code: &str) -> PathBuf {
        self.cards_dir
            .join(set_code)
            .with_extension(CATALOG_EXTENSION)
    }

    pub fn model_path(&self, key: &ModelKey) -> PathBuf {
        self.models_dir
            .join(key.artifact_stem())
            .with_extension(MODEL_EXTENSION)
    }
}

impl ModelStore for FsModelStore {
    fn list_keys(&self) -> Result<Vec<ModelKey>> {
        let storage_error = |source| RegistryError::Storage {
            path: self.models_dir.clone(),
            source,
        };

        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.models_dir).map_err(storage_error)? {
            let path = entry.map_err(storage_error)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(MODEL_EXTENSION) {
                continue;
            }
            if let Some(key) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(ModelKey::from_artifact_stem)
            {
                keys.push(key);
            }
        }

        keys.sort();
        debug!("Found {} model artifacts in {:?}", keys.len(), self.models_dir);
        Ok(keys)
    }

    fn load(&self, key: &ModelKey) -> Result<DraftModel> {
        let catalog_path = self.catalog_path(&key.set_code);
        let model_path = self.model_path(key);

        let catalog = Catalog::load_from_file(key.set_code.clone(), &catalog_path)
            .map_err(|e| RegistryError::model_load(key, e))?;

        let net = DraftNet::load(&model_path)
            .and_then(|net| net.aligned_to(&catalog.names()))
            .map_err(|e| RegistryError::model_load(key, e))?;

        DraftModel::bind(key.clone(), catalog, Box::new(net))
    }
}
