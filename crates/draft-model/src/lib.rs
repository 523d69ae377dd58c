//! Scoring model adapter for draft recommendations.
//!
//! This crate turns a trained weight artifact into a `Scorer`: a pure
//! function from "cards picked so far" to a rating for every card in the
//! set. It handles:
//! - Reading and validating `<SET>_<MODE>.json` weight artifacts
//! - Binding the network to the catalog's card vocabulary
//! - Encoding collections and rejecting unknown card names
//!
//! ## Example Usage
//! ```ignore
//! use draft_model::{DraftNet, Scorer};
//!
//! let net = DraftNet::load(Path::new("data/models/FDN_Premier.json"))?
//!     .aligned_to(&catalog.names())?;
//! let base = net.score(&[])?;
//! let in_context = net.score(&["Llanowar Elves".to_string()])?;
//! ```

pub mod error;
pub mod network;
pub mod scorer;
pub mod vocab;

pub use error::{ModelError, Result};
pub use network::{Activation, DenseLayer, DraftNet, ModelArtifact};
pub use scorer::{FixedScorer, Scorer};
pub use vocab::Vocabulary;
