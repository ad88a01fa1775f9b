//! # Hand scoring
//!
//! Scores an opening hand 0 to 100 for an archetype by blending five
//! sub scores: goldfish mana efficiency over the first four turns,
//! curve coverage, color fit between spells and land production,
//! early plays (combo piece presence for combo decks), and the land
//! to spell balance.

use crate::card::Card;
use crate::hand::DrawnHand;
use std::collections::HashSet;

/// Turns the goldfish efficiency pass plays through
const GOLDFISH_TURNS: usize = 4;
/// Land share a balanced hand aims for
const IDEAL_LAND_RATIO: f64 = 0.4;

/// Weights over the five hand sub scores. Each archetype's weights
/// sum to one, so blended scores stay on the 0 to 100 scale.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeWeights {
  pub mana_efficiency: f64,
  pub curve: f64,
  pub color: f64,
  pub early_game: f64,
  pub balance: f64,
}

/// Deck archetypes with distinct ideas of a keepable hand.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
  Aggro,
  Midrange,
  Control,
  Combo,
}

impl Default for Archetype {
  fn default() -> Self {
    Archetype::Midrange
  }
}

impl Archetype {
  pub fn weights(self) -> ArchetypeWeights {
    match self {
      Archetype::Aggro => ArchetypeWeights {
        mana_efficiency: 0.25,
        curve: 0.30,
        color: 0.15,
        early_game: 0.25,
        balance: 0.05,
      },
      Archetype::Midrange => ArchetypeWeights {
        mana_efficiency: 0.30,
        curve: 0.20,
        color: 0.20,
        early_game: 0.15,
        balance: 0.15,
      },
      Archetype::Control => ArchetypeWeights {
        mana_efficiency: 0.25,
        curve: 0.10,
        color: 0.30,
        early_game: 0.10,
        balance: 0.25,
      },
      Archetype::Combo => ArchetypeWeights {
        mana_efficiency: 0.25,
        curve: 0.10,
        color: 0.20,
        early_game: 0.30,
        balance: 0.15,
      },
    }
  }

  fn expects_aggression(self) -> bool {
    self == Archetype::Aggro
  }
}

/// Scores a hand 0 to 100. For combo decks `key_cards` holds the name
/// hashes of the pieces the deck wants in its opener; it may be empty,
/// in which case spell variety stands in for piece presence.
pub fn score_hand(hand: &DrawnHand, archetype: Archetype, key_cards: &HashSet<u64>) -> f64 {
  if hand.is_empty() {
    return 0.0;
  }
  let lands = hand.land_count();
  let spells = hand.spells();
  let efficiency = goldfish_efficiency(&spells, lands);
  let (curve, early) = if lands == 0 {
    // nothing casts without lands
    (0.0, 0.0)
  } else if archetype == Archetype::Combo {
    (
      curve_coverage(&spells, archetype),
      piece_presence(&spells, key_cards),
    )
  } else {
    (curve_coverage(&spells, archetype), early_plays(&spells))
  };
  let color = color_fit(hand, &spells);
  let balance = balance_score(lands, hand.len());
  let weights = archetype.weights();
  let blended = weights.mana_efficiency * efficiency
    + weights.curve * curve
    + weights.color * color
    + weights.early_game * early
    + weights.balance * balance;
  100.0 * blended
}

/// Mana spent over mana available when the hand plays its best
/// affordable spell each of the first four turns, lands dropping one
/// per turn up to the lands held.
fn goldfish_efficiency(spells: &[&Card], lands: usize) -> f64 {
  let mut played = vec![false; spells.len()];
  let mut available_total = 0;
  let mut spent = 0;
  for turn in 1..=GOLDFISH_TURNS {
    let available = std::cmp::min(turn, lands);
    available_total += available;
    let mut best: Option<usize> = None;
    for (slot, spell) in spells.iter().enumerate() {
      if played[slot] || spell.cmc == 0 || spell.cmc as usize > available {
        continue;
      }
      if best.map_or(true, |current| spells[current].cmc < spell.cmc) {
        best = Some(slot);
      }
    }
    if let Some(slot) = best {
      played[slot] = true;
      spent += spells[slot].cmc as usize;
    }
  }
  if available_total == 0 {
    return 0.0;
  }
  spent as f64 / available_total as f64
}

/// Fraction of the one through four drop slots the hand covers.
/// Hands with nothing to do before turn three lose most of the score,
/// hardest for aggro.
fn curve_coverage(spells: &[&Card], archetype: Archetype) -> f64 {
  if spells.is_empty() {
    return 0.0;
  }
  let mut slots = [false; GOLDFISH_TURNS];
  for spell in spells {
    if spell.cmc >= 1 {
      let slot = std::cmp::min(spell.cmc as usize, GOLDFISH_TURNS);
      slots[slot - 1] = true;
    }
  }
  let coverage = slots.iter().filter(|&&hit| hit).count() as f64 / GOLDFISH_TURNS as f64;
  if slots[0] || slots[1] {
    coverage
  } else if archetype.expects_aggression() {
    coverage * 0.25
  } else {
    coverage * 0.6
  }
}

/// Mean castable color fraction over the colored spells in hand
fn color_fit(hand: &DrawnHand, spells: &[&Card]) -> f64 {
  let produced = hand.produced_colors();
  let mut colored = 0;
  let mut total = 0.0;
  for spell in spells {
    if spell.colors.is_empty() {
      continue;
    }
    colored += 1;
    total += f64::from(produced.overlap(spell.colors)) / spell.colors.len() as f64;
  }
  if colored == 0 {
    // colorless spells cast off anything
    if spells.is_empty() {
      0.0
    } else {
      1.0
    }
  } else {
    total / colored as f64
  }
}

/// Two plays on turns one or two is a full score
fn early_plays(spells: &[&Card]) -> f64 {
  let cheap = spells
    .iter()
    .filter(|spell| spell.cmc >= 1 && spell.cmc <= 2)
    .count();
  std::cmp::min(cheap, 2) as f64 / 2.0
}

/// Share of the named combo pieces already in hand, or spell variety
/// when no pieces are named
fn piece_presence(spells: &[&Card], key_cards: &HashSet<u64>) -> f64 {
  if key_cards.is_empty() {
    if spells.is_empty() {
      return 0.0;
    }
    let distinct: HashSet<u64> = spells.iter().map(|spell| spell.hash).collect();
    return distinct.len() as f64 / spells.len() as f64;
  }
  let held = spells
    .iter()
    .map(|spell| spell.hash)
    .filter(|hash| key_cards.contains(hash))
    .collect::<HashSet<u64>>()
    .len();
  held as f64 / key_cards.len() as f64
}

/// One minus the normalized distance from the 40% land ideal
fn balance_score(lands: usize, hand_size: usize) -> f64 {
  let ideal = IDEAL_LAND_RATIO * hand_size as f64;
  let worst = (1.0 - IDEAL_LAND_RATIO) * hand_size as f64;
  let deviation = (lands as f64 - ideal).abs();
  (1.0 - deviation / worst).max(0.0)
}
