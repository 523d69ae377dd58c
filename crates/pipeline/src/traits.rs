//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to rated cards.

use crate::context::DraftContext;
use crate::ratings::RatingRecord;

/// Core trait for filtering rated cards.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared by concurrent requests
/// - Filters take ownership of the Vec<RatingRecord> and return a filtered Vec
/// - Filters only remove records; they never reorder or rescore them
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of rated cards.
    ///
    /// # Arguments
    /// * `records` - The records to filter (takes ownership)
    /// * `context` - Draft context with picks and requested colors
    fn apply(&self, records: Vec<RatingRecord>, context: &DraftContext) -> Vec<RatingRecord>;
}
