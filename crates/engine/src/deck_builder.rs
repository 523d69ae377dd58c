//! Deck selection from a finished pool.

use crate::error::{EngineError, Result};
use card_catalog::ColorSet;
use model_registry::DraftModel;
use pipeline::filters::ColorIdentityFilter;
use pipeline::{DraftContext, FilterPipeline, RatingRecord, rate_pool, sort_by_rating};
use tracing::debug;

/// Picks the best-rated color-feasible subset of a pool.
///
/// Every physical copy in the pool is rated in the context of the whole
/// pool and kept as its own record. Cards outside the requested colors
/// are dropped. There is no deck-size or land-count cutoff: every
/// feasible card comes back, best first.
pub struct DeckBuilder {
    filters: FilterPipeline,
}

impl DeckBuilder {
    pub fn new() -> Self {
        Self {
            filters: FilterPipeline::new().add_filter(ColorIdentityFilter),
        }
    }

    pub fn build(
        &self,
        model: &DraftModel,
        pool: &[String],
        starting_colors: ColorSet,
    ) -> Result<Vec<RatingRecord>> {
        let records = rate_pool(model, pool).map_err(|e| EngineError::scoring(model.key(), e))?;

        let context = DraftContext::from_picks(pool).with_starting_colors(starting_colors);
        let mut deck = self.filters.apply(records, &context);
        sort_by_rating(&mut deck);

        debug!(
            "Selected {} of {} pool cards for {} in colors [{}]",
            deck.len(),
            pool.len(),
            model.key(),
            starting_colors
        );
        Ok(deck)
    }
}

impl Default for DeckBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_catalog::{Card, Catalog, ColorIdentity};
    use draft_model::{FixedScorer, Vocabulary};
    use model_registry::ModelKey;

    fn model() -> DraftModel {
        let catalog = Catalog::from_cards(
            "FDN",
            vec![
                Card::new("Think Twice", "U".parse().unwrap()),
                Card::new("Burst Lightning", "R".parse().unwrap()),
                Card::new("Healer's Hawk", "W".parse().unwrap()),
                Card::new("Scrawling Crawler", ColorIdentity::Colorless),
            ],
        )
        .unwrap();
        let vocabulary = Vocabulary::new(catalog.names()).unwrap();
        let scorer = FixedScorer::new(vocabulary, vec![0.75, 1.5, 0.5, 0.875]).unwrap();
        DraftModel::bind(ModelKey::new("FDN", "Premier"), catalog, Box::new(scorer)).unwrap()
    }

    fn pool(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_colors_keeps_whole_pool() {
        let pool = pool(&["Think Twice", "Burst Lightning", "Think Twice"]);
        let deck = DeckBuilder::new()
            .build(&model(), &pool, ColorSet::empty())
            .unwrap();

        let names: Vec<&str> = deck.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Burst Lightning", "Think Twice", "Think Twice"]);
    }

    #[test]
    fn test_colors_exclude_off_color_cards() {
        let pool = pool(&["Think Twice", "Burst Lightning", "Healer's Hawk", "Scrawling Crawler"]);
        let deck = DeckBuilder::new()
            .build(&model(), &pool, "UW".parse().unwrap())
            .unwrap();

        let names: Vec<&str> = deck.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Scrawling Crawler", "Think Twice", "Healer's Hawk"]);
    }

    #[test]
    fn test_unknown_pool_card() {
        let err = DeckBuilder::new()
            .build(&model(), &pool(&["Think Twice", "Fake Card"]), ColorSet::empty())
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownCard { ref names } if names == &["Fake Card"]));
    }
}
