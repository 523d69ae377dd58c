//! Engine configuration.

use model_registry::DEFAULT_DRAFT_MODE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Whether pick order keeps cards the drafter already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PickOrderPolicy {
    /// Rank the whole catalog, picked cards included
    #[default]
    RankAll,
    /// Drop cards already in the collection
    ExcludePicked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Holds `cards/<SET>.csv` and `models/<SET>_<MODE>.json`
    pub data_dir: PathBuf,
    /// Used when a request leaves the draft mode out
    pub default_draft_mode: String,
    pub pick_order_policy: PickOrderPolicy,
}

impl EngineConfig {
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_default_draft_mode(mut self, draft_mode: impl Into<String>) -> Self {
        self.default_draft_mode = draft_mode.into();
        self
    }

    pub fn with_pick_order_policy(mut self, policy: PickOrderPolicy) -> Self {
        self.pick_order_policy = policy;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            default_draft_mode: DEFAULT_DRAFT_MODE.to_string(),
            pick_order_policy: PickOrderPolicy::default(),
        }
    }
}
