//! Core domain types for a card set.
//!
//! This module defines the card record and its color identity, the one
//! attribute the recommendation engine interprets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

// =============================================================================
// Type Aliases
// =============================================================================

/// Card names are the identity of a card within one set
pub type CardName = String;

// =============================================================================
// Colors
// =============================================================================

/// One of the five mana colors, in canonical WUBRG order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl Color {
    /// All colors in canonical order
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    /// The single-letter symbol used in color identity strings
    pub fn symbol(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    pub fn from_symbol(c: char) -> Option<Color> {
        match c {
            'W' => Some(Color::White),
            'U' => Some(Color::Blue),
            'B' => Some(Color::Black),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// A set of colors stored as a bitmask.
///
/// Parsing accepts the WUBRG symbols in any order; display is always
/// canonical (`"UW"` parses and prints as `"WU"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorSet(u8);

impl ColorSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, color: Color) {
        self.0 |= color.bit();
    }

    pub fn contains(&self, color: Color) -> bool {
        self.0 & color.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True if every color in `self` is also in `other`
    pub fn is_subset(&self, other: &ColorSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn intersects(&self, other: &ColorSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Iterate colors in canonical WUBRG order
    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        Color::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

impl FromIterator<Color> for ColorSet {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut set = ColorSet::empty();
        for color in iter {
            set.insert(color);
        }
        set
    }
}

impl FromStr for ColorSet {
    type Err = CatalogError;

    /// Parse a color-symbol string such as `"UW"`.
    ///
    /// Unknown symbols and repeated symbols are rejected. The empty
    /// string parses to the empty set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = ColorSet::empty();
        for c in s.chars() {
            let color = Color::from_symbol(c).ok_or_else(|| CatalogError::InvalidValue {
                field: "color".to_string(),
                value: s.to_string(),
            })?;
            if set.contains(color) {
                return Err(CatalogError::InvalidValue {
                    field: "color".to_string(),
                    value: s.to_string(),
                });
            }
            set.insert(color);
        }
        Ok(set)
    }
}

impl fmt::Display for ColorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for color in self.iter() {
            write!(f, "{}", color.symbol())?;
        }
        Ok(())
    }
}

// =============================================================================
// Color Identity
// =============================================================================

/// The color classification of a card as recorded in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorIdentity {
    /// No colored mana symbols
    Colorless,
    /// An explicit set of one or more colors
    Colors(ColorSet),
    /// Sentinel for gold cards whose exact colors the catalog doesn't record
    Multicolor,
}

impl ColorIdentity {
    /// Whether a card with this identity may be played in a deck restricted
    /// to `requested` colors.
    ///
    /// - An empty request applies no restriction.
    /// - Colorless cards fit every deck.
    /// - Explicit colors must all be among the requested colors.
    /// - The `Multicolor` sentinel carries no exact colors, so whether it
    ///   fits can't be checked. As a policy, only decks of two or more
    ///   colors admit these unlabelled gold cards.
    pub fn is_compatible_with(&self, requested: &ColorSet) -> bool {
        if requested.is_empty() {
            return true;
        }
        match self {
            ColorIdentity::Colorless => true,
            ColorIdentity::Colors(colors) => colors.is_subset(requested),
            ColorIdentity::Multicolor => requested.len() >= 2,
        }
    }
}

impl FromStr for ColorIdentity {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "C" | "Colorless" => Ok(ColorIdentity::Colorless),
            "Multicolor" => Ok(ColorIdentity::Multicolor),
            symbols => {
                let colors: ColorSet = symbols.parse().map_err(|_| CatalogError::InvalidValue {
                    field: "color_identity".to_string(),
                    value: s.to_string(),
                })?;
                Ok(ColorIdentity::Colors(colors))
            }
        }
    }
}

impl fmt::Display for ColorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorIdentity::Colorless => write!(f, "Colorless"),
            ColorIdentity::Colors(colors) => write!(f, "{}", colors),
            ColorIdentity::Multicolor => write!(f, "Multicolor"),
        }
    }
}

impl TryFrom<String> for ColorIdentity {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorIdentity> for String {
    fn from(identity: ColorIdentity) -> Self {
        identity.to_string()
    }
}

// =============================================================================
// Card
// =============================================================================

/// One row of a set's catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub name: CardName,
    pub color_identity: ColorIdentity,
    /// Rarity as recorded in the catalog, if the column exists
    pub rarity: Option<String>,
    /// Every other catalog column, kept verbatim
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Card {
    pub fn new(name: impl Into<CardName>, color_identity: ColorIdentity) -> Self {
        Self {
            name: name.into(),
            color_identity,
            rarity: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = Some(rarity.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}
