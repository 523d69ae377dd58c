//! Filter implementations for the rating pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod already_picked;
pub mod color_identity;

// Re-export for convenience
pub use already_picked::AlreadyPickedFilter;
pub use color_identity::ColorIdentityFilter;
