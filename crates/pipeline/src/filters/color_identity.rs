//! Filter to keep only cards castable in the requested colors.
//!
//! The compatibility rule itself lives on `ColorIdentity` so the catalog
//! and the filter can't disagree about it.

use crate::context::DraftContext;
use crate::ratings::RatingRecord;
use crate::traits::Filter;

/// Keeps records whose color identity fits `context.starting_colors`.
///
/// ## Algorithm
/// 1. If no colors were requested, keep everything
/// 2. Otherwise keep a record iff `ColorIdentity::is_compatible_with`
///    holds; excluded cards are dropped, not demoted
pub struct ColorIdentityFilter;

impl Filter for ColorIdentityFilter {
    fn name(&self) -> &str {
        "ColorIdentityFilter"
    }

    fn apply(&self, records: Vec<RatingRecord>, context: &DraftContext) -> Vec<RatingRecord> {
        if context.starting_colors.is_empty() {
            return records;
        }
        records
            .into_iter()
            .filter(|record| {
                record
                    .color_identity
                    .is_compatible_with(&context.starting_colors)
            })
            .collect()
    }
}
