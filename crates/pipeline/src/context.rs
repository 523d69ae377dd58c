//! Per-request draft state handed to filters.

use card_catalog::{CardName, ColorSet};
use std::collections::HashSet;

/// What the drafter holds and which colors they asked for.
///
/// Built fresh for every request and never shared between requests.
#[derive(Debug, Clone, Default)]
pub struct DraftContext {
    /// Distinct names in the collection or pool
    pub picked: HashSet<CardName>,
    /// Requested deck colors; empty means no color restriction
    pub starting_colors: ColorSet,
}

impl DraftContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_picks(picks: &[String]) -> Self {
        Self {
            picked: picks.iter().cloned().collect(),
            starting_colors: ColorSet::empty(),
        }
    }

    pub fn with_starting_colors(mut self, colors: ColorSet) -> Self {
        self.starting_colors = colors;
        self
    }

    pub fn has_picked(&self, name: &str) -> bool {
        self.picked.contains(name)
    }
}
