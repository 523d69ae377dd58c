//! The scoring capability the engine depends on.

use crate::error::{ModelError, Result};
use crate::network::DraftNet;
use crate::vocab::Vocabulary;

/// Maps a partial collection to one rating per vocabulary card.
///
/// Implementations must be pure: the same collection always yields the
/// same ratings, and scoring takes `&self` so one loaded model can serve
/// concurrent requests.
pub trait Scorer: Send + Sync {
    /// Short backend name for logging
    fn name(&self) -> &str;

    /// The cards this scorer rates, in output order
    fn vocabulary(&self) -> &Vocabulary;

    /// Rate every card given a count vector in vocabulary order
    fn score_counts(&self, counts: &[f32]) -> Vec<f32>;

    /// Rate every card given a multiset of card names.
    ///
    /// Fails with `UnknownCards` if any name is outside the vocabulary.
    fn score(&self, collection: &[String]) -> Result<Vec<f32>> {
        let counts = self.vocabulary().encode(collection)?;
        Ok(self.score_counts(&counts))
    }
}

impl Scorer for DraftNet {
    fn name(&self) -> &str {
        "DraftNet"
    }

    fn vocabulary(&self) -> &Vocabulary {
        DraftNet::vocabulary(self)
    }

    fn score_counts(&self, counts: &[f32]) -> Vec<f32> {
        self.forward(counts)
    }
}

/// Rule-based stand-in that ignores context: every card always gets its
/// fixed rating, so synergy is zero.
#[derive(Debug, Clone)]
pub struct FixedScorer {
    vocabulary: Vocabulary,
    ratings: Vec<f32>,
}

impl FixedScorer {
    pub fn new(vocabulary: Vocabulary, ratings: Vec<f32>) -> Result<Self> {
        if vocabulary.len() != ratings.len() {
            return Err(ModelError::InvalidNetwork(format!(
                "{} fixed ratings for {} cards",
                ratings.len(),
                vocabulary.len()
            )));
        }
        Ok(Self {
            vocabulary,
            ratings,
        })
    }
}

impl Scorer for FixedScorer {
    fn name(&self) -> &str {
        "FixedScorer"
    }

    fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    fn score_counts(&self, _counts: &[f32]) -> Vec<f32> {
        self.ratings.clone()
    }
}
