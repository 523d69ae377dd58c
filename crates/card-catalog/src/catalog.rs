//! The per-set card catalog.
//!
//! A `Catalog` keeps cards in file order (the order the scoring model
//! addresses them in) plus a name index for O(1) lookups.

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Ordered, read-only table of every card in one set.
///
/// Invariant: card names are unique.
#[derive(Debug, Clone)]
pub struct Catalog {
    set_code: String,
    cards: Vec<Card>,
    name_index: HashMap<CardName, usize>,
}

impl Catalog {
    /// Creates an empty catalog for a set
    pub fn new(set_code: impl Into<String>) -> Self {
        Self {
            set_code: set_code.into(),
            cards: Vec::new(),
            name_index: HashMap::new(),
        }
    }

    /// Build a catalog from cards, rejecting duplicate names
    pub fn from_cards(set_code: impl Into<String>, cards: Vec<Card>) -> Result<Self> {
        let mut catalog = Catalog::new(set_code);
        for card in cards {
            catalog.insert(card)?;
        }
        Ok(catalog)
    }

    /// Load a catalog from its CSV record store
    pub fn load_from_file(set_code: impl Into<String>, path: &Path) -> Result<Self> {
        let set_code = set_code.into();
        debug!("Loading catalog for {} from {:?}", set_code, path);

        let cards = parser::parse_cards(path)?;
        let catalog = Catalog::from_cards(set_code, cards)?;

        debug!(
            "Loaded {} cards for {}",
            catalog.len(),
            catalog.set_code()
        );
        Ok(catalog)
    }

    /// Append a card. Fails if a card with the same name exists.
    pub fn insert(&mut self, card: Card) -> Result<()> {
        if self.name_index.contains_key(&card.name) {
            return Err(CatalogError::DuplicateCard { name: card.name });
        }
        self.name_index.insert(card.name.clone(), self.cards.len());
        self.cards.push(card);
        Ok(())
    }

    pub fn set_code(&self) -> &str {
        &self.set_code
    }

    pub fn get(&self, name: &str) -> Option<&Card> {
        self.position(name).map(|i| &self.cards[i])
    }

    /// Index of a card in catalog order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.name_index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Card names in catalog order
    pub fn names(&self) -> Vec<CardName> {
        self.cards.iter().map(|c| c.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, identity: &str) -> Card {
        Card::new(name, identity.parse().unwrap())
    }

    #[test]
    fn test_preserves_insertion_order() {
        let catalog = Catalog::from_cards(
            "FDN",
            vec![card("Think Twice", "U"), card("Burst Lightning", "R")],
        )
        .unwrap();

        assert_eq!(catalog.names(), vec!["Think Twice", "Burst Lightning"]);
        assert_eq!(catalog.position("Burst Lightning"), Some(1));
        assert_eq!(catalog.get("Think Twice").unwrap().color_identity.to_string(), "U");
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = Catalog::from_cards(
            "FDN",
            vec![card("Think Twice", "U"), card("Think Twice", "U")],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCard { ref name } if name == "Think Twice"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let catalog = Catalog::from_cards("FDN", vec![card("Think Twice", "U")]).unwrap();
        assert!(catalog.contains("Think Twice"));
        assert!(!catalog.contains("think twice"));
        assert!(catalog.get("Missing").is_none());
    }
}
