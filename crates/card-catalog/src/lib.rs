//! # Card Catalog Crate
//!
//! Loads the static per-set card table that the draft models are trained
//! against.
//!
//! ## Main Components
//!
//! - **types**: Card, color identity and color sets
//! - **parser**: Parse a set's CSV record store into cards
//! - **catalog**: Ordered, name-indexed `Catalog`
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use card_catalog::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file("FDN", Path::new("data/cards/FDN.csv"))?;
//! let card = catalog.get("Llanowar Elves").unwrap();
//! println!("{} is {}", card.name, card.color_identity);
//! ```

pub mod catalog;
pub mod error;
pub mod parser;
pub mod types;

pub use catalog::Catalog;
pub use error::{CatalogError, Result};
pub use types::{Card, CardName, Color, ColorIdentity, ColorSet};
