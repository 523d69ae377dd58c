//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::context::DraftContext;
use crate::ratings::RatingRecord;
use crate::traits::Filter;
use tracing::debug;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(AlreadyPickedFilter)
///     .add_filter(ColorIdentityFilter);
///
/// let kept = pipeline.apply(records, &context);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the configured filters, in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Apply all filters in sequence to the records.
    pub fn apply(&self, records: Vec<RatingRecord>, context: &DraftContext) -> Vec<RatingRecord> {
        let mut current = records;
        for filter in &self.filters {
            let before = current.len();
            current = filter.apply(current, context);
            debug!(
                "Filter {} kept {} of {} records",
                filter.name(),
                current.len(),
                before
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
