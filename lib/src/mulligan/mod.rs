//! # Mulligan analysis
//!
//! Keep-or-throw policies for the goldfish simulation, archetype hand
//! scoring, and the expected value solver that turns score histograms
//! into optimal keep thresholds per hand size.

mod analysis;
mod score;
mod solver;
mod strategy;

pub use analysis::{analyze, MulliganAnalysis, ANALYZED_HAND_SIZES, MIN_DECK_SIZE};
pub use score::{score_hand, Archetype, ArchetypeWeights};
pub use solver::{solve, DeckQuality, MulliganValue, ScoreDistribution, SCORE_BUCKETS};
pub use strategy::MulliganStrategy;
