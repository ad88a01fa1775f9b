//! # Mulligan strategy analysis
//!
//! Deals and scores hands at seven, six, and five cards, then runs
//! the optimal stopping solver over the three histograms. Dealing is
//! chunked with per chunk seeds the same way the goldfish simulation
//! is, so a seeded analysis reproduces exactly.

use crate::card::Card;
use crate::deck::Deck;
use crate::error::EngineError;
use crate::hand::DrawnHand;
use crate::mulligan::score::{score_hand, Archetype};
use crate::mulligan::solver::{solve, DeckQuality, MulliganValue, ScoreDistribution};
use rand::prelude::*;
use rand::rngs::SmallRng;
use rayon::prelude::*;
use std::collections::HashSet;

/// Constructed decks start at 60 cards; anything smaller is usually a
/// data entry mistake rather than a real deck
pub const MIN_DECK_SIZE: usize = 60;
/// Hand sizes the analysis deals, reported largest first
pub const ANALYZED_HAND_SIZES: [usize; 3] = [7, 6, 5];
/// Hands per parallel task
const CHUNK_SIZE: usize = 512;

/// Optimal mulligan strategy for one deck and archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MulliganAnalysis {
  /// One record per hand size, seven cards first
  pub values: Vec<MulliganValue>,
  /// Score histograms per hand size, seven cards first
  pub distributions: Vec<ScoreDistribution>,
  pub deck_quality: DeckQuality,
  pub recommendations: Vec<String>,
  pub iterations: usize,
  pub archetype: Archetype,
  /// Seed the dealing actually ran with
  pub seed: u64,
}

/// Scores `iterations` hands per hand size and solves for the keep
/// thresholds. `seed` fixes the dealing; None draws a seed from
/// entropy and reports it in the result.
pub fn analyze(
  deck: &Deck,
  archetype: Archetype,
  iterations: usize,
  seed: Option<u64>,
) -> Result<MulliganAnalysis, EngineError> {
  let size = deck.len();
  if size < MIN_DECK_SIZE {
    return Err(EngineError::DeckTooSmall {
      size,
      minimum: MIN_DECK_SIZE,
    });
  }
  if iterations == 0 {
    return Err(EngineError::InvalidParameter(
      "iteration count must be positive".to_string(),
    ));
  }
  let seed = match seed {
    Some(seed) => seed,
    None => thread_rng().gen(),
  };
  debug!(
    "scoring {} hands per size for a {} card {:?} deck",
    iterations, size, archetype
  );
  let flattened = deck.flattened();
  let key_cards: HashSet<u64> = HashSet::new();
  let mut distributions = Vec::with_capacity(ANALYZED_HAND_SIZES.len());
  for (stream, &hand_size) in ANALYZED_HAND_SIZES.iter().enumerate() {
    distributions.push(deal_and_score(
      &flattened,
      archetype,
      &key_cards,
      hand_size,
      iterations,
      seed.wrapping_add((stream as u64) << 32),
    ));
  }
  // the solver walks smallest hand first
  let ordered: Vec<ScoreDistribution> = distributions.iter().rev().cloned().collect();
  let mut values = solve(&ordered)?;
  values.reverse();
  let deck_quality = DeckQuality::from_expected_value(values[0].expected_value);
  debug!(
    "seven card expected value {:.1}, deck quality {}",
    values[0].expected_value,
    deck_quality.label()
  );
  let recommendations = recommend(&values, deck_quality);
  Ok(MulliganAnalysis {
    values,
    distributions,
    deck_quality,
    recommendations,
    iterations,
    archetype,
    seed,
  })
}

fn deal_and_score(
  deck: &[&Card],
  archetype: Archetype,
  key_cards: &HashSet<u64>,
  hand_size: usize,
  iterations: usize,
  stream_seed: u64,
) -> ScoreDistribution {
  let chunk_count = (iterations + CHUNK_SIZE - 1) / CHUNK_SIZE;
  (0..chunk_count)
    .into_par_iter()
    .map(|chunk| {
      let mut rng = SmallRng::seed_from_u64(stream_seed.wrapping_add(chunk as u64));
      let deals = std::cmp::min(CHUNK_SIZE, iterations - chunk * CHUNK_SIZE);
      let mut distribution = ScoreDistribution::new(hand_size);
      for _ in 0..deals {
        let hand = DrawnHand::deal(&mut rng, deck, hand_size);
        distribution.record(score_hand(&hand, archetype, key_cards));
      }
      distribution
    })
    .reduce(
      || ScoreDistribution::new(hand_size),
      |mut left, right| {
        left.merge(&right);
        left
      },
    )
}

fn recommend(values: &[MulliganValue], quality: DeckQuality) -> Vec<String> {
  let mut lines = Vec::with_capacity(values.len() + 1);
  for (slot, value) in values.iter().enumerate() {
    if slot + 1 == values.len() {
      lines.push(format!("at {} cards keep any hand", value.hand_size));
    } else {
      lines.push(format!(
        "keep a {} card hand scoring {:.0} or better (expected value {:.1})",
        value.hand_size, value.threshold, value.expected_value
      ));
    }
  }
  lines.push(format!(
    "deck quality {} with a {:.1} expected opening hand",
    quality.label(),
    values[0].expected_value
  ));
  lines
}
