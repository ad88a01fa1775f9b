//! # Normalized card records supplied by the deck-building layer
//!
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const W_BITS: u8 = 0b0000_0001;
const U_BITS: u8 = 0b0000_0010;
const B_BITS: u8 = 0b0000_0100;
const R_BITS: u8 = 0b0000_1000;
const G_BITS: u8 = 0b0001_0000;

/// ManaColor is one of the five colors of mana; each variant owns one bit in a `ColorSet`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ManaColor {
  #[serde(rename = "W")]
  White = 0,
  #[serde(rename = "U")]
  Blue = 1,
  #[serde(rename = "B")]
  Black = 2,
  #[serde(rename = "R")]
  Red = 3,
  #[serde(rename = "G")]
  Green = 4,
}

impl ManaColor {
  pub const ALL: [ManaColor; 5] = [
    ManaColor::White,
    ManaColor::Blue,
    ManaColor::Black,
    ManaColor::Red,
    ManaColor::Green,
  ];

  /// Returns the single-letter abbreviation used in cost notation
  pub fn letter(self) -> char {
    match self {
      ManaColor::White => 'W',
      ManaColor::Blue => 'U',
      ManaColor::Black => 'B',
      ManaColor::Red => 'R',
      ManaColor::Green => 'G',
    }
  }

  #[inline]
  fn mask(self) -> u8 {
    match self {
      ManaColor::White => W_BITS,
      ManaColor::Blue => U_BITS,
      ManaColor::Black => B_BITS,
      ManaColor::Red => R_BITS,
      ManaColor::Green => G_BITS,
    }
  }
}

/// ColorSet is a set of colors packed into a bit mask
#[derive(Default, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColorSet {
  pub bits: u8,
}

impl ColorSet {
  /// Returns the empty set
  pub const fn empty() -> Self {
    Self { bits: 0 }
  }

  pub fn from_colors(colors: &[ManaColor]) -> Self {
    let mut bits = 0;
    for color in colors {
      bits |= color.mask();
    }
    Self { bits }
  }

  pub fn with(self, color: ManaColor) -> Self {
    Self {
      bits: self.bits | color.mask(),
    }
  }

  pub fn union(self, other: ColorSet) -> Self {
    Self {
      bits: self.bits | other.bits,
    }
  }

  #[inline]
  pub fn contains(self, color: ManaColor) -> bool {
    self.bits & color.mask() != 0
  }

  /// Returns the number of colors shared between self and other
  #[inline]
  pub fn overlap(self, other: ColorSet) -> u32 {
    (self.bits & other.bits).count_ones()
  }

  /// Returns the number of colors in the set
  #[inline]
  pub fn len(self) -> usize {
    self.bits.count_ones() as usize
  }

  #[inline]
  pub fn is_empty(self) -> bool {
    self.bits == 0
  }

  pub fn colors(self) -> Vec<ManaColor> {
    ManaColor::ALL
      .iter()
      .copied()
      .filter(|&c| self.contains(c))
      .collect()
  }
}

/// Card represents one normalized card record: the slice of a Magic:
/// The Gathering card that consistency math needs. Classification
/// (cost, color identity, land typing, produced colors) is the
/// deck-building layer's job; records are immutable once constructed
/// and borrowed read-only by the engine.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct Card {
  /// String representing the card name
  pub name: String,
  /// A hash of the card name, stable within a process
  pub hash: u64,
  /// Converted mana cost
  pub cmc: u8,
  /// Color identity
  pub colors: ColorSet,
  /// True if the card is a land
  pub is_land: bool,
  /// Colors the card produces when it is a land; empty for colorless
  /// utility lands and for spells
  pub produces: ColorSet,
}

impl Card {
  /// Returns a non-land card record
  pub fn spell(name: &str, cmc: u8, colors: &[ManaColor]) -> Self {
    Self {
      name: name.to_string(),
      hash: name_hash(name),
      cmc,
      colors: ColorSet::from_colors(colors),
      is_land: false,
      produces: ColorSet::empty(),
    }
  }

  /// Returns a land card record producing the given colors
  pub fn land(name: &str, produces: &[ManaColor]) -> Self {
    Self {
      name: name.to_string(),
      hash: name_hash(name),
      cmc: 0,
      colors: ColorSet::from_colors(produces),
      is_land: true,
      produces: ColorSet::from_colors(produces),
    }
  }
}

impl PartialEq for Card {
  fn eq(&self, other: &Self) -> bool {
    self.name == other.name
  }
}

impl Eq for Card {}

impl Hash for Card {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.name.hash(state);
  }
}

fn name_hash(name: &str) -> u64 {
  let mut hasher = DefaultHasher::new();
  name.hash(&mut hasher);
  hasher.finish()
}

/// Builds a Card record inline, without a parsing layer
#[macro_export]
macro_rules! card {
  (land $name:expr, [$($color:ident),*]) => {
    $crate::card::Card::land($name, &[$($crate::card::ManaColor::$color),*])
  };
  ($name:expr, $cmc:expr, [$($color:ident),*]) => {
    $crate::card::Card::spell($name, $cmc, &[$($crate::card::ManaColor::$color),*])
  };
}

#[cfg(test)]
mod tests {
  use crate::card::*;

  #[test]
  fn card_lightning_strike() {
    let card = card!("Lightning Strike", 2, [Red]);
    assert_eq!(card.is_land, false);
    assert_eq!(card.cmc, 2);
    assert!(card.colors.contains(ManaColor::Red));
    assert!(!card.colors.contains(ManaColor::Blue));
    assert!(card.produces.is_empty());
  }

  #[test]
  fn card_steam_vents() {
    let card = card!(land "Steam Vents", [Blue, Red]);
    assert_eq!(card.is_land, true);
    assert_eq!(card.cmc, 0);
    assert_eq!(card.produces.len(), 2);
    assert!(card.produces.contains(ManaColor::Blue));
    assert!(card.produces.contains(ManaColor::Red));
  }

  #[test]
  fn card_field_of_ruin() {
    // Colorless utility land, produces nothing usable for colored costs
    let card = card!(land "Field of Ruin", []);
    assert_eq!(card.is_land, true);
    assert!(card.produces.is_empty());
  }

  #[test]
  fn cards_compare_by_name() {
    let a = card!("Opt", 1, [Blue]);
    let b = card!("Opt", 1, [Blue]);
    assert_eq!(a, b);
    assert_eq!(a.hash, b.hash);
  }

  #[test]
  fn color_set_overlap() {
    let izzet = ColorSet::from_colors(&[ManaColor::Blue, ManaColor::Red]);
    let grixis = ColorSet::from_colors(&[ManaColor::Blue, ManaColor::Black, ManaColor::Red]);
    assert_eq!(izzet.overlap(grixis), 2);
    assert_eq!(izzet.overlap(ColorSet::empty()), 0);
    assert_eq!(grixis.len(), 3);
  }

  #[test]
  fn mana_color_serde_single_letters() {
    let s = serde_json::to_string(&ManaColor::Green).unwrap();
    assert_eq!(s, "\"G\"");
    let c: ManaColor = serde_json::from_str("\"U\"").unwrap();
    assert_eq!(c, ManaColor::Blue);
  }
}
