//! # Deck of card records and derived statistics
//!
use crate::card::{Card, ColorSet, ManaColor};

/// DeckCard represents a card and the number of copies played
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCard {
  pub card: Card,
  pub count: usize,
}

/// Deck represents the normalized card list handed to the engine by
/// the deck-building layer
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
  pub cards: Vec<DeckCard>,
}

impl Deck {
  pub fn from_cards(cards: Vec<(Card, usize)>) -> Self {
    let cards = cards
      .into_iter()
      .map(|(card, count)| DeckCard { card, count })
      .collect();
    Self { cards }
  }

  /// Returns the total number of card copies in the deck
  pub fn len(&self) -> usize {
    self.cards.iter().map(|dc| dc.count).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn land_count(&self) -> usize {
    self
      .cards
      .iter()
      .filter(|dc| dc.card.is_land)
      .map(|dc| dc.count)
      .sum()
  }

  pub fn spell_count(&self) -> usize {
    self.len() - self.land_count()
  }

  /// Returns the number of lands that produce the given color
  pub fn sources_of(&self, color: ManaColor) -> usize {
    self
      .cards
      .iter()
      .filter(|dc| dc.card.is_land && dc.card.produces.contains(color))
      .map(|dc| dc.count)
      .sum()
  }

  /// Returns the union of spell color identities
  pub fn colors_played(&self) -> ColorSet {
    self
      .cards
      .iter()
      .filter(|dc| !dc.card.is_land)
      .fold(ColorSet::empty(), |acc, dc| acc.union(dc.card.colors))
  }

  /// Returns the mean converted cost over spells, 0.0 for an all-land deck
  pub fn average_spell_cost(&self) -> f64 {
    let spells = self.spell_count();
    if spells == 0 {
      return 0.0;
    }
    let total: usize = self
      .cards
      .iter()
      .filter(|dc| !dc.card.is_land)
      .map(|dc| dc.card.cmc as usize * dc.count)
      .sum();
    total as f64 / spells as f64
  }

  /// Returns spell counts per converted cost, with the final bucket
  /// collecting costs of 7 and up
  pub fn curve(&self) -> [usize; 8] {
    let mut histogram = [0; 8];
    for dc in self.cards.iter().filter(|dc| !dc.card.is_land) {
      let bucket = std::cmp::min(dc.card.cmc as usize, 7);
      histogram[bucket] += dc.count;
    }
    histogram
  }

  /// Returns one reference per physical copy, in list order
  pub fn flattened(&self) -> Vec<&Card> {
    let mut flat = Vec::with_capacity(self.len());
    for dc in &self.cards {
      for _ in 0..dc.count {
        flat.push(&dc.card);
      }
    }
    flat
  }
}

/// Builds a Deck from count => card pairs
#[macro_export]
macro_rules! deck {
  ($($count:expr => $card:expr),* $(,)?) => {
    $crate::deck::Deck::from_cards(vec![$(($card, $count)),*])
  };
}

#[cfg(test)]
mod tests {
  use crate::card::*;
  use crate::deck::*;

  fn izzet_deck() -> Deck {
    deck![
      4 => card!("Opt", 1, [Blue]),
      4 => card!("Lightning Strike", 2, [Red]),
      3 => card!("Crackling Drake", 4, [Blue, Red]),
      3 => card!("Niv-Mizzet, Parun", 6, [Blue, Red]),
      8 => card!(land "Island", [Blue]),
      8 => card!(land "Mountain", [Red]),
      4 => card!(land "Steam Vents", [Blue, Red]),
      1 => card!(land "Field of Ruin", []),
    ]
  }

  #[test]
  fn deck_counts() {
    let deck = izzet_deck();
    assert_eq!(deck.len(), 35);
    assert_eq!(deck.land_count(), 21);
    assert_eq!(deck.spell_count(), 14);
    assert_eq!(deck.flattened().len(), 35);
  }

  #[test]
  fn deck_sources() {
    let deck = izzet_deck();
    assert_eq!(deck.sources_of(ManaColor::Blue), 12);
    assert_eq!(deck.sources_of(ManaColor::Red), 12);
    assert_eq!(deck.sources_of(ManaColor::Green), 0);
  }

  #[test]
  fn deck_statistics() {
    let deck = izzet_deck();
    // (4*1 + 4*2 + 3*4 + 3*6) / 14
    let expected = 42.0 / 14.0;
    assert!(f64::abs(deck.average_spell_cost() - expected) < 1e-9);
    let curve = deck.curve();
    assert_eq!(curve[1], 4);
    assert_eq!(curve[2], 4);
    assert_eq!(curve[4], 3);
    assert_eq!(curve[6], 3);
    let colors = deck.colors_played();
    assert!(colors.contains(ManaColor::Blue) && colors.contains(ManaColor::Red));
    assert_eq!(colors.len(), 2);
  }

  #[test]
  fn empty_deck() {
    let deck = Deck::default();
    assert!(deck.is_empty());
    assert_eq!(deck.average_spell_cost(), 0.0);
    assert_eq!(deck.land_count(), 0);
  }
}
