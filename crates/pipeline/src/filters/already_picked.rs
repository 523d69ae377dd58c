//! Filter to remove cards the drafter already holds.
//!
//! Pick order rates the whole catalog; this filter narrows it to cards
//! not yet in the collection when the engine is configured to.

use crate::context::DraftContext;
use crate::ratings::RatingRecord;
use crate::traits::Filter;

/// Removes records whose card appears in the collection.
///
/// ## Algorithm
/// Uses the HashSet in DraftContext.picked for O(1) lookups.
pub struct AlreadyPickedFilter;

impl Filter for AlreadyPickedFilter {
    fn name(&self) -> &str {
        "AlreadyPickedFilter"
    }

    fn apply(&self, records: Vec<RatingRecord>, context: &DraftContext) -> Vec<RatingRecord> {
        records
            .into_iter()
            .filter(|record| !context.has_picked(&record.name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_catalog::ColorIdentity;

    fn record(name: &str) -> RatingRecord {
        RatingRecord {
            name: name.to_string(),
            color_identity: ColorIdentity::Colorless,
            rarity: None,
            base_rating: 0.5,
            synergy: 0.0,
            rating: 0.5,
        }
    }

    #[test]
    fn test_already_picked_filter() {
        let context = DraftContext::from_picks(&[
            "Think Twice".to_string(),
            "Think Twice".to_string(),
            "Llanowar Elves".to_string(),
        ]);

        let records = vec![
            record("Think Twice"),
            record("Burst Lightning"),
            record("Llanowar Elves"),
            record("Healer's Hawk"),
        ];

        let kept = AlreadyPickedFilter.apply(records, &context);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].name, "Burst Lightning");
        assert_eq!(kept[1].name, "Healer's Hawk");
    }

    #[test]
    fn test_empty_collection_keeps_everything() {
        let kept = AlreadyPickedFilter.apply(vec![record("Think Twice")], &DraftContext::new());
        assert_eq!(kept.len(), 1);
    }
}
