//! A catalog and the scorer bound to it.

use crate::error::{RegistryError, Result};
use crate::key::ModelKey;
use card_catalog::Catalog;
use draft_model::{ModelError, Scorer};
use std::collections::HashSet;

/// The unit the registry caches: one set's catalog, the scorer trained
/// for one draft mode of that set, and the context-free rating of every
/// card computed once at bind time.
pub struct DraftModel {
    key: ModelKey,
    catalog: Catalog,
    scorer: Box<dyn Scorer>,
    base_ratings: Vec<f32>,
}

impl DraftModel {
    /// Bind a scorer to a catalog.
    ///
    /// The scorer's vocabulary must list exactly the catalog's card
    /// names in catalog order.
    pub fn bind(key: ModelKey, catalog: Catalog, scorer: Box<dyn Scorer>) -> Result<Self> {
        let catalog_names = catalog.names();
        let model_names = scorer.vocabulary().names();

        if model_names != catalog_names.as_slice() {
            let in_model: HashSet<&str> = model_names.iter().map(String::as_str).collect();
            let in_catalog: HashSet<&str> = catalog_names.iter().map(String::as_str).collect();
            let missing: Vec<String> = catalog_names
                .iter()
                .filter(|n| !in_model.contains(n.as_str()))
                .cloned()
                .collect();
            let extra: Vec<String> = model_names
                .iter()
                .filter(|n| !in_catalog.contains(n.as_str()))
                .cloned()
                .collect();

            let reason = if missing.is_empty() && extra.is_empty() {
                format!("{} rates cards out of catalog order", scorer.name())
            } else {
                ModelError::VocabularyMismatch { missing, extra }.to_string()
            };
            return Err(RegistryError::model_load(&key, reason));
        }

        let base_ratings = scorer
            .score(&[])
            .map_err(|e| RegistryError::model_load(&key, e))?;
        if base_ratings.len() != catalog.len() {
            return Err(RegistryError::model_load(
                &key,
                format!(
                    "{} returned {} ratings for {} cards",
                    scorer.name(),
                    base_ratings.len(),
                    catalog.len()
                ),
            ));
        }

        Ok(Self {
            key,
            catalog,
            scorer,
            base_ratings,
        })
    }

    pub fn key(&self) -> &ModelKey {
        &self.key
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    /// Context-free ratings in catalog order
    pub fn base_ratings(&self) -> &[f32] {
        &self.base_ratings
    }

    pub fn base_rating(&self, name: &str) -> Option<f32> {
        self.catalog.position(name).map(|i| self.base_ratings[i])
    }

    /// Rate every catalog card in the context of `collection`.
    ///
    /// Ratings come back in catalog order. An empty collection returns
    /// the cached base ratings.
    pub fn score(&self, collection: &[String]) -> draft_model::Result<Vec<f32>> {
        if collection.is_empty() {
            return Ok(self.base_ratings.clone());
        }
        self.scorer.score(collection)
    }
}

impl std::fmt::Debug for DraftModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftModel")
            .field("key", &self.key)
            .field("cards", &self.catalog.len())
            .field("scorer", &self.scorer.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_catalog::{Card, ColorIdentity};
    use draft_model::{FixedScorer, Vocabulary};

    fn catalog() -> Catalog {
        Catalog::from_cards(
            "FDN",
            vec![
                Card::new("Think Twice", ColorIdentity::Colors("U".parse().unwrap())),
                Card::new("Burst Lightning", ColorIdentity::Colors("R".parse().unwrap())),
            ],
        )
        .unwrap()
    }

    fn fixed(names: &[&str], ratings: Vec<f32>) -> Box<dyn Scorer> {
        let vocabulary = Vocabulary::new(names.iter().map(|s| s.to_string()).collect()).unwrap();
        Box::new(FixedScorer::new(vocabulary, ratings).unwrap())
    }

    #[test]
    fn test_bind_caches_base_ratings() {
        let model = DraftModel::bind(
            ModelKey::new("FDN", "Premier"),
            catalog(),
            fixed(&["Think Twice", "Burst Lightning"], vec![0.75, 1.5]),
        )
        .unwrap();

        assert_eq!(model.base_ratings(), &[0.75, 1.5]);
        assert_eq!(model.base_rating("Burst Lightning"), Some(1.5));
        assert_eq!(model.score(&[]).unwrap(), vec![0.75, 1.5]);
    }

    #[test]
    fn test_bind_rejects_vocabulary_mismatch() {
        let err = DraftModel::bind(
            ModelKey::new("FDN", "Premier"),
            catalog(),
            fixed(&["Think Twice", "Giant Growth"], vec![0.75, 1.5]),
        )
        .unwrap_err();

        match err {
            RegistryError::ModelLoad { reason, .. } => {
                assert!(reason.contains("Burst Lightning"));
                assert!(reason.contains("Giant Growth"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bind_rejects_reordered_vocabulary() {
        let err = DraftModel::bind(
            ModelKey::new("FDN", "Premier"),
            catalog(),
            fixed(&["Burst Lightning", "Think Twice"], vec![1.5, 0.75]),
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::ModelLoad { .. }));
    }
}
