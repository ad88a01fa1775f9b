//! # Drawn hands
//!
//! A `DrawnHand` is one dealt opening hand borrowing its card records
//! from a flattened deck. Dealing shuffles only as much of an index
//! range as the hand needs, so scoring loops stay cheap.

use crate::card::{Card, ColorSet};
use rand::prelude::*;

/// One dealt hand of borrowed card records.
#[derive(Debug)]
pub struct DrawnHand<'a> {
  pub cards: Vec<&'a Card>,
}

impl<'a> DrawnHand<'a> {
  /// Deals `hand_size` cards from the flattened deck without
  /// replacement. Hands cap at the deck size.
  pub fn deal<R: Rng>(rng: &mut R, deck: &[&'a Card], hand_size: usize) -> Self {
    let cards_to_draw = std::cmp::min(deck.len(), hand_size);
    let mut index_range: Vec<usize> = (0..deck.len()).collect();
    let cards = index_range
      .partial_shuffle(rng, cards_to_draw)
      .0
      .iter()
      .map(|index| deck[*index])
      .collect();
    Self { cards }
  }

  pub fn len(&self) -> usize {
    self.cards.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cards.is_empty()
  }

  pub fn land_count(&self) -> usize {
    self.cards.iter().filter(|card| card.is_land).count()
  }

  /// Union of the colors the hand's lands can produce
  pub fn produced_colors(&self) -> ColorSet {
    self
      .cards
      .iter()
      .filter(|card| card.is_land)
      .fold(ColorSet::empty(), |set, card| set.union(card.produces))
  }

  /// Nonland cards in the hand
  pub fn spells(&self) -> Vec<&'a Card> {
    self
      .cards
      .iter()
      .filter(|card| !card.is_land)
      .cloned()
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::card::ManaColor;
  use crate::deck::Deck;
  use rand::rngs::SmallRng;

  fn tiny_deck() -> Deck {
    deck![
      3 => card!(land "Island", [Blue]),
      2 => card!(land "Mountain", [Red]),
      2 => card!("Opt", 1, [Blue])
    ]
  }

  #[test]
  fn deals_the_requested_hand_size() {
    let deck = tiny_deck();
    let flattened = deck.flattened();
    let mut rng = SmallRng::seed_from_u64(11);
    let hand = DrawnHand::deal(&mut rng, &flattened, 5);
    assert_eq!(hand.len(), 5);
  }

  #[test]
  fn hand_caps_at_deck_size() {
    let deck = tiny_deck();
    let flattened = deck.flattened();
    let mut rng = SmallRng::seed_from_u64(11);
    let hand = DrawnHand::deal(&mut rng, &flattened, 40);
    assert_eq!(hand.len(), 7);
    // Drawing the whole deck means the counts are exact
    assert_eq!(hand.land_count(), 5);
    assert_eq!(hand.spells().len(), 2);
  }

  #[test]
  fn produced_colors_union_lands_only() {
    let deck = tiny_deck();
    let flattened = deck.flattened();
    let mut rng = SmallRng::seed_from_u64(3);
    let hand = DrawnHand::deal(&mut rng, &flattened, 7);
    let produced = hand.produced_colors();
    assert!(produced.contains(ManaColor::Blue));
    assert!(produced.contains(ManaColor::Red));
    assert!(!produced.contains(ManaColor::Green));
  }

  #[test]
  fn dealing_never_duplicates_a_deck_slot() {
    let deck = tiny_deck();
    let flattened = deck.flattened();
    let mut rng = SmallRng::seed_from_u64(29);
    for _ in 0..50 {
      let hand = DrawnHand::deal(&mut rng, &flattened, 7);
      let opts = hand
        .cards
        .iter()
        .filter(|card| card.name == "Opt")
        .count();
      assert!(opts <= 2);
    }
  }
}
