//! The cache key for a loaded model.

use std::fmt;

/// Draft mode used when a request doesn't name one
pub const DEFAULT_DRAFT_MODE: &str = "Premier";

/// `(set_code, draft_mode)`. Compared exactly; no case folding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelKey {
    pub set_code: String,
    pub draft_mode: String,
}

impl ModelKey {
    pub fn new(set_code: impl Into<String>, draft_mode: impl Into<String>) -> Self {
        Self {
            set_code: set_code.into(),
            draft_mode: draft_mode.into(),
        }
    }

    /// File stem of the weight artifact, e.g. `FDN_Premier`
    pub fn artifact_stem(&self) -> String {
        format!("{}_{}", self.set_code, self.draft_mode)
    }

    /// Inverse of `artifact_stem`. The set code ends at the first `_`.
    pub fn from_artifact_stem(stem: &str) -> Option<Self> {
        let (set_code, draft_mode) = stem.split_once('_')?;
        if set_code.is_empty() || draft_mode.is_empty() {
            return None;
        }
        Some(Self::new(set_code, draft_mode))
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.set_code, self.draft_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_stem_round_trip() {
        let key = ModelKey::new("FDN", "Premier");
        assert_eq!(key.artifact_stem(), "FDN_Premier");
        assert_eq!(ModelKey::from_artifact_stem("FDN_Premier"), Some(key));
    }

    #[test]
    fn test_from_artifact_stem_rejects_other_shapes() {
        assert_eq!(ModelKey::from_artifact_stem("README"), None);
        assert_eq!(ModelKey::from_artifact_stem("_Premier"), None);
        assert_eq!(ModelKey::from_artifact_stem("FDN_"), None);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        assert_ne!(ModelKey::new("FDN", "Premier"), ModelKey::new("fdn", "Premier"));
    }
}
