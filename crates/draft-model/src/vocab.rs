//! Card-name vocabulary shared by a model and its catalog.

use crate::error::{ModelError, Result};
use std::collections::{HashMap, HashSet};

/// Ordered card names a model can address, with a reverse index.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn new(names: Vec<String>) -> Result<Self> {
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(ModelError::InvalidNetwork(format!(
                    "duplicate card name in vocabulary: {}",
                    name
                )));
            }
        }
        Ok(Self { names, index })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Encode a multiset of card names as a per-card count vector.
    ///
    /// Every name must be in the vocabulary. All offending names are
    /// reported together, once each, in first-seen order.
    pub fn encode(&self, collection: &[String]) -> Result<Vec<f32>> {
        let mut counts = vec![0.0; self.names.len()];
        let mut unknown = Vec::new();
        let mut seen = HashSet::new();

        for name in collection {
            match self.position(name) {
                Some(i) => counts[i] += 1.0,
                None => {
                    if seen.insert(name.as_str()) {
                        unknown.push(name.clone());
                    }
                }
            }
        }

        if !unknown.is_empty() {
            return Err(ModelError::UnknownCards(unknown));
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::new(vec!["A".into(), "B".into(), "C".into()]).unwrap()
    }

    #[test]
    fn test_encode_counts_duplicates() {
        let counts = vocab()
            .encode(&["C".into(), "A".into(), "C".into()])
            .unwrap();
        assert_eq!(counts, vec![1.0, 0.0, 2.0]);
    }

    #[test]
    fn test_encode_empty_collection() {
        assert_eq!(vocab().encode(&[]).unwrap(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_encode_reports_every_unknown_once() {
        let err = vocab()
            .encode(&["X".into(), "A".into(), "Y".into(), "X".into()])
            .unwrap_err();
        match err {
            ModelError::UnknownCards(names) => assert_eq!(names, vec!["X", "Y"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_duplicate_names() {
        assert!(Vocabulary::new(vec!["A".into(), "A".into()]).is_err());
    }
}
