//! Pipeline for rating, filtering and ordering cards for one request.
//!
//! This crate provides:
//! - RatingRecord and the functions that build records from a DraftModel
//! - Filter trait and implementations for narrowing records
//! - FilterPipeline for composing filters
//! - The deterministic ordering shared by pick order and deck building
//!
//! ## Architecture
//! A request is processed in stages:
//! 1. The model rates the catalog (pick order) or the pool (deck building)
//! 2. Filters remove records the caller doesn't want
//! 3. Remaining records are sorted by rating, ties by name
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{DraftContext, FilterPipeline, rate_catalog, sort_by_rating};
//! use pipeline::filters::*;
//!
//! let pipeline = FilterPipeline::new().add_filter(AlreadyPickedFilter);
//! let context = DraftContext::from_picks(&collection);
//!
//! let mut records = pipeline.apply(rate_catalog(&model, &collection)?, &context);
//! sort_by_rating(&mut records);
//! ```

pub mod context;
pub mod filter_pipeline;
pub mod filters;
pub mod ratings;
pub mod traits;

// Re-export main types
pub use context::DraftContext;
pub use filter_pipeline::FilterPipeline;
pub use ratings::{RatingRecord, rate_catalog, rate_pool, sort_by_rating};
pub use traits::Filter;
