//! # Model Registry Crate
//!
//! Owns the mapping from `(set, draft mode)` to a loaded catalog and
//! scoring model.
//!
//! ## Components
//!
//! ### ModelStore
//! Where artifacts come from. `FsModelStore` reads `cards/<SET>.csv` and
//! `models/<SET>_<MODE>.json` under a data directory and enumerates the
//! available keys from the model file names.
//!
//! ### DraftModel
//! A catalog bound to the scorer trained for it, with base ratings
//! computed once at bind time.
//!
//! ### ModelRegistry
//! The shared cache: at most one load per key, concurrent callers for a
//! loading key wait on it, failures are not cached, nothing is evicted.
//!
//! ## Example Usage
//!
//! ```ignore
//! use model_registry::{FsModelStore, ModelKey, ModelRegistry};
//! use std::sync::Arc;
//!
//! let store = Arc::new(FsModelStore::from_data_dir(Path::new("data")));
//! let registry = ModelRegistry::new(store);
//! let model = registry.resolve(&ModelKey::new("FDN", "Premier")).await?;
//! println!("{} cards", model.catalog().len());
//! ```

pub mod error;
pub mod key;
pub mod model;
pub mod registry;
pub mod store;

pub use error::{RegistryError, Result};
pub use key::{DEFAULT_DRAFT_MODE, ModelKey};
pub use model::DraftModel;
pub use registry::ModelRegistry;
pub use store::{FsModelStore, ModelStore};
