//! # Engine error types
//!
use thiserror::Error;

/// EngineError enumerates the failure modes of the probability and
/// simulation surfaces. Inputs that are degenerate but mathematically
/// valid (zero sources, zero successes wanted) are not errors and
/// produce exact 0 or 1 probabilities instead.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineError {
  /// A malformed hypergeometric query, e.g. a sample larger than the
  /// population. Signals a caller bug rather than a zero-probability event.
  #[error("invalid hypergeometric query: {0}")]
  InvalidQuery(String),
  /// A malformed analyzer or simulation parameter.
  #[error("invalid parameter: {0}")]
  InvalidParameter(String),
  /// Mulligan analysis on a deck below the minimum playable size.
  #[error("deck has {size} cards, mulligan analysis requires at least {minimum}")]
  DeckTooSmall { size: usize, minimum: usize },
  /// The smallest hand size handed to the solver has no samples, so no
  /// keep value exists to induct from.
  #[error("score distribution for {0}-card hands has no samples")]
  EmptyDistribution(usize),
}
