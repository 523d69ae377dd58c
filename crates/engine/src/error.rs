//! The failure taxonomy callers see.

use draft_model::ModelError;
use model_registry::{ModelKey, RegistryError};
use thiserror::Error;

/// Every engine failure carries one of these kinds plus a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    ModelLoad,
    UnknownCard,
    Storage,
}

#[derive(Error, Debug)]
pub enum EngineError {
    /// Missing or malformed request input
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Artifact for the key is missing or inconsistent
    #[error("Error loading model {key}: {reason}")]
    ModelLoad { key: ModelKey, reason: String },

    /// Collection or pool names cards outside the catalog
    #[error("Unknown cards: {}", .names.join(", "))]
    UnknownCard { names: Vec<String> },

    /// Artifact location unreadable
    #[error("Storage error: {0}")]
    Storage(String),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Validation(_) => ErrorKind::Validation,
            EngineError::ModelLoad { .. } => ErrorKind::ModelLoad,
            EngineError::UnknownCard { .. } => ErrorKind::UnknownCard,
            EngineError::Storage(_) => ErrorKind::Storage,
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        EngineError::Validation(message.into())
    }

    /// Classify a scoring failure for an already-loaded model.
    ///
    /// Anything other than unknown input cards means the bound model is
    /// inconsistent, which is a load problem for `key`.
    pub(crate) fn scoring(key: &ModelKey, err: ModelError) -> Self {
        match err {
            ModelError::UnknownCards(names) => EngineError::UnknownCard { names },
            other => EngineError::ModelLoad {
                key: key.clone(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<RegistryError> for EngineError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::ModelLoad { key, reason } => EngineError::ModelLoad { key, reason },
            storage @ RegistryError::Storage { .. } => EngineError::Storage(storage.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_registry_errors_keep_their_kind() {
        let key = ModelKey::new("FDN", "Premier");
        let load: EngineError = RegistryError::model_load(&key, "corrupt weights").into();
        assert_eq!(load.kind(), ErrorKind::ModelLoad);
        assert_eq!(
            load.to_string(),
            "Error loading model FDN/Premier: corrupt weights"
        );

        let storage: EngineError = RegistryError::Storage {
            path: PathBuf::from("/data/models"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        }
        .into();
        assert_eq!(storage.kind(), ErrorKind::Storage);
        assert!(storage.to_string().contains("/data/models"));
    }

    #[test]
    fn test_unknown_cards_name_every_offender() {
        let key = ModelKey::new("FDN", "Premier");
        let err = EngineError::scoring(
            &key,
            ModelError::UnknownCards(vec!["Not-A-Real-Card".into(), "Fake Card".into()]),
        );
        assert_eq!(err.kind(), ErrorKind::UnknownCard);
        assert_eq!(err.to_string(), "Unknown cards: Not-A-Real-Card, Fake Card");
    }

    #[test]
    fn test_other_scoring_failures_are_load_errors() {
        let key = ModelKey::new("FDN", "Premier");
        let err = EngineError::scoring(&key, ModelError::InvalidNetwork("bad shape".into()));
        assert_eq!(err.kind(), ErrorKind::ModelLoad);
    }
}
