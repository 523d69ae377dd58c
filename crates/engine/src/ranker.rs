//! Pick-order ranking over a loaded model.

use crate::config::PickOrderPolicy;
use crate::error::{EngineError, Result};
use model_registry::DraftModel;
use pipeline::filters::AlreadyPickedFilter;
use pipeline::{DraftContext, FilterPipeline, RatingRecord, rate_catalog, sort_by_rating};
use tracing::debug;

/// Ranks catalog cards given the collection drafted so far.
///
/// ## Algorithm
/// 1. Rate every catalog card in the context of the collection
/// 2. Under `ExcludePicked`, drop cards already in the collection
/// 3. Sort by rating, ties by name
///
/// The full ranking is returned; truncation is the caller's business.
pub struct PickOrderRanker {
    policy: PickOrderPolicy,
    filters: FilterPipeline,
}

impl PickOrderRanker {
    pub fn new(policy: PickOrderPolicy) -> Self {
        let filters = match policy {
            PickOrderPolicy::RankAll => FilterPipeline::new(),
            PickOrderPolicy::ExcludePicked => FilterPipeline::new().add_filter(AlreadyPickedFilter),
        };
        Self { policy, filters }
    }

    pub fn policy(&self) -> PickOrderPolicy {
        self.policy
    }

    pub fn rank(&self, model: &DraftModel, collection: &[String]) -> Result<Vec<RatingRecord>> {
        let records = rate_catalog(model, collection)
            .map_err(|e| EngineError::scoring(model.key(), e))?;

        let context = DraftContext::from_picks(collection);
        let mut ranked = self.filters.apply(records, &context);
        sort_by_rating(&mut ranked);

        debug!(
            "Ranked {} of {} cards for {} ({:?})",
            ranked.len(),
            model.catalog().len(),
            model.key(),
            self.policy
        );
        Ok(ranked)
    }
}

impl Default for PickOrderRanker {
    fn default() -> Self {
        Self::new(PickOrderPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use card_catalog::{Card, Catalog, ColorIdentity};
    use draft_model::{FixedScorer, Vocabulary};
    use model_registry::ModelKey;

    fn model() -> DraftModel {
        let catalog = Catalog::from_cards(
            "FDN",
            vec![
                Card::new("Think Twice", ColorIdentity::Colors("U".parse().unwrap())),
                Card::new("Burst Lightning", ColorIdentity::Colors("R".parse().unwrap())),
                Card::new("Scrawling Crawler", ColorIdentity::Colorless),
            ],
        )
        .unwrap();
        let vocabulary = Vocabulary::new(catalog.names()).unwrap();
        let scorer = FixedScorer::new(vocabulary, vec![0.75, 1.5, 0.75]).unwrap();
        DraftModel::bind(ModelKey::new("FDN", "Premier"), catalog, Box::new(scorer)).unwrap()
    }

    fn names(records: &[RatingRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_rank_all_keeps_picked_cards() {
        let ranked = PickOrderRanker::default()
            .rank(&model(), &["Burst Lightning".to_string()])
            .unwrap();
        assert_eq!(
            names(&ranked),
            vec!["Burst Lightning", "Scrawling Crawler", "Think Twice"]
        );
    }

    #[test]
    fn test_exclude_picked_drops_collection() {
        let ranker = PickOrderRanker::new(PickOrderPolicy::ExcludePicked);
        let ranked = ranker
            .rank(&model(), &["Burst Lightning".to_string()])
            .unwrap();
        assert_eq!(names(&ranked), vec!["Scrawling Crawler", "Think Twice"]);
    }

    #[test]
    fn test_unknown_collection_card() {
        let err = PickOrderRanker::default()
            .rank(&model(), &["Not-A-Real-Card".to_string()])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownCard);
    }
}
