//! Rating records for a single request.
//!
//! This module turns a model's raw per-card ratings into the tabular
//! rows callers receive, and fixes the order those rows are returned in.

use card_catalog::{Card, CardName, ColorIdentity};
use draft_model::ModelError;
use model_registry::DraftModel;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One rated card.
///
/// Request-scoped: nothing here is cached between requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub name: CardName,
    pub color_identity: ColorIdentity,
    pub rarity: Option<String>,
    /// Rating with an empty collection
    pub base_rating: f32,
    /// `rating - base_rating`: what the current collection adds
    pub synergy: f32,
    /// Rating in the context of the current collection or pool
    pub rating: f32,
}

impl RatingRecord {
    pub fn new(card: &Card, base_rating: f32, rating: f32) -> Self {
        Self {
            name: card.name.clone(),
            color_identity: card.color_identity,
            rarity: card.rarity.clone(),
            base_rating,
            synergy: rating - base_rating,
            rating,
        }
    }
}

/// Rate every catalog card given the collection so far.
///
/// Returns one record per catalog card, in catalog order. Cards already
/// in the collection are rated like any other.
pub fn rate_catalog(
    model: &DraftModel,
    collection: &[String],
) -> Result<Vec<RatingRecord>, ModelError> {
    let ratings = model.score(collection)?;

    let records = model
        .catalog()
        .cards()
        .par_iter()
        .zip(model.base_ratings().par_iter())
        .zip(ratings.par_iter())
        .map(|((card, &base), &rating)| RatingRecord::new(card, base, rating))
        .collect();

    Ok(records)
}

/// Rate each physical card in a pool in the context of the whole pool.
///
/// Returns one record per pool entry, in pool order; duplicate copies
/// each get their own record.
pub fn rate_pool(model: &DraftModel, pool: &[String]) -> Result<Vec<RatingRecord>, ModelError> {
    let ratings = model.score(pool)?;
    let catalog = model.catalog();

    pool.iter()
        .map(|name| {
            let i = catalog
                .position(name)
                .ok_or_else(|| ModelError::UnknownCards(vec![name.clone()]))?;
            Ok(RatingRecord::new(
                &catalog.cards()[i],
                model.base_ratings()[i],
                ratings[i],
            ))
        })
        .collect()
}

/// Order records by rating, highest first, ties by name ascending.
///
/// Uses a total order on floats so NaN ratings can't make the order
/// depend on input position. The sort is stable: records equal in both
/// keys (copies of one card) keep their relative order.
pub fn sort_by_rating(records: &mut [RatingRecord]) {
    records.sort_by(compare_records);
}

fn compare_records(a: &RatingRecord, b: &RatingRecord) -> Ordering {
    b.rating
        .total_cmp(&a.rating)
        .then_with(|| a.name.cmp(&b.name))
}
