//! # Exact draw probabilities without replacement
//!
use crate::combinatorics::BinomialCache;
use crate::error::EngineError;

/// The consistency standard a manabase is judged against
pub const CONSISTENCY_THRESHOLD: f64 = 0.90;

/// Confidence represents where a probability falls against the
/// consistency standard
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Confidence {
  Low,
  Medium,
  High,
  Excellent,
}

/// ProbabilityResult is the value type produced by an at-least query.
/// Recomputed per query, never mutated.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityResult {
  pub probability: f64,
  pub percentage: f64,
  pub meets_threshold: bool,
  pub confidence: Confidence,
}

impl ProbabilityResult {
  pub fn from_probability(probability: f64) -> Self {
    let confidence = if probability >= 0.95 {
      Confidence::Excellent
    } else if probability >= CONSISTENCY_THRESHOLD {
      Confidence::High
    } else if probability >= 0.80 {
      Confidence::Medium
    } else {
      Confidence::Low
    };
    Self {
      probability,
      percentage: probability * 100.0,
      meets_threshold: probability >= CONSISTENCY_THRESHOLD,
      confidence,
    }
  }
}

/// Rejects queries that violate 0 <= k <= n <= N and K <= N. Queries
/// that are merely impossible (k > K, or too few failures to fill the
/// sample) are valid and evaluate to probability 0.
fn validate_query(
  population: usize,
  successes: usize,
  sample: usize,
  wanted: usize,
) -> Result<(), EngineError> {
  if sample > population {
    return Err(EngineError::InvalidQuery(format!(
      "sample {} exceeds population {}",
      sample, population
    )));
  }
  if successes > population {
    return Err(EngineError::InvalidQuery(format!(
      "success count {} exceeds population {}",
      successes, population
    )));
  }
  if wanted > sample {
    return Err(EngineError::InvalidQuery(format!(
      "wanted {} successes from a sample of {}",
      wanted, sample
    )));
  }
  Ok(())
}

fn point_unchecked(
  cache: &BinomialCache,
  population: usize,
  successes: usize,
  sample: usize,
  wanted: usize,
) -> f64 {
  // C(K, k) and C(N - K, n - k) are 0 for impossible draws, so the
  // degenerate cases fall out of the binomial itself
  let ways_wanted = cache.binomial(successes, wanted);
  let ways_rest = cache.binomial(population - successes, sample - wanted);
  let ways_total = cache.binomial(population, sample);
  ways_wanted * ways_rest / ways_total
}

/// Returns P(X = wanted) drawing `sample` cards from `population` of
/// which `successes` qualify
pub fn point_probability(
  cache: &BinomialCache,
  population: usize,
  successes: usize,
  sample: usize,
  wanted: usize,
) -> Result<f64, EngineError> {
  validate_query(population, successes, sample, wanted)?;
  Ok(point_unchecked(cache, population, successes, sample, wanted))
}

/// Returns P(X >= wanted) as a ProbabilityResult, clamped to [0, 1]
/// to absorb floating point drift in the sum
pub fn at_least_probability(
  cache: &BinomialCache,
  population: usize,
  successes: usize,
  sample: usize,
  wanted: usize,
) -> Result<ProbabilityResult, EngineError> {
  validate_query(population, successes, sample, wanted)?;
  if wanted == 0 {
    return Ok(ProbabilityResult::from_probability(1.0));
  }
  let upper = std::cmp::min(sample, successes);
  let mut total = 0.0;
  for i in wanted..=upper {
    total += point_unchecked(cache, population, successes, sample, i);
  }
  let probability = total.max(0.0).min(1.0);
  Ok(ProbabilityResult::from_probability(probability))
}
