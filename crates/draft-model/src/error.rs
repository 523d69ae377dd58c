//! Errors raised while loading or evaluating a scoring model.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed model artifact {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Layer shapes don't chain or don't match the vocabulary
    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    /// Model and catalog disagree on which cards exist
    #[error(
        "Card vocabulary mismatch (missing from model: [{}]; unknown to catalog: [{}])",
        .missing.join(", "),
        .extra.join(", ")
    )]
    VocabularyMismatch {
        missing: Vec<String>,
        extra: Vec<String>,
    },

    /// A collection referenced names outside the vocabulary
    #[error("Unknown cards: {}", .0.join(", "))]
    UnknownCards(Vec<String>),
}

pub type Result<T> = std::result::Result<T, ModelError>;
