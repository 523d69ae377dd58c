//! Errors surfaced by model resolution.

use crate::key::ModelKey;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    /// Artifact missing or inconsistent for this key
    #[error("Error loading model {key}: {reason}")]
    ModelLoad { key: ModelKey, reason: String },

    /// The artifact location itself couldn't be read
    #[error("Artifact storage {} is unreadable: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RegistryError {
    pub fn model_load(key: &ModelKey, reason: impl ToString) -> Self {
        RegistryError::ModelLoad {
            key: key.clone(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
