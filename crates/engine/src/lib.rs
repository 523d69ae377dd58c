//! Draft recommendation engine.
//!
//! This crate ties the model registry and the rating pipeline together
//! behind three operations:
//! - `list_available_sets`
//! - `get_pick_order`
//! - `get_deck_recommendation`
//!
//! Every failure is an `EngineError` whose `kind()` a transport layer can
//! map onto its own status codes.

pub mod config;
pub mod deck_builder;
pub mod engine;
pub mod error;
pub mod ranker;

pub use config::{EngineConfig, PickOrderPolicy};
pub use deck_builder::DeckBuilder;
pub use engine::{DeckRequest, DraftEngine, PickOrderRequest};
pub use error::{EngineError, ErrorKind, Result};
pub use model_registry::ModelKey;
pub use pipeline::RatingRecord;
pub use ranker::PickOrderRanker;
