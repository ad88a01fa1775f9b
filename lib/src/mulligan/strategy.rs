//! # Keep-or-mulligan policies
//!
//! A strategy looks only at the land count of a drawn hand and decides
//! whether to keep it or throw it back for a hand one card smaller.

/// Land count bands a simulated player keeps a hand on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum MulliganStrategy {
  /// Keep every hand, however bad
  Never,
  /// Keep two to five lands, throw back screw and flood
  Aggressive,
  /// Keep anything with at least one land and at most six
  Conservative,
  /// Keep hands within two lands of 40% of the hand size
  Optimal,
}

impl Default for MulliganStrategy {
  fn default() -> Self {
    MulliganStrategy::Never
  }
}

impl MulliganStrategy {
  /// Returns true if a hand with `lands` lands out of `hand_size`
  /// cards should be kept
  pub fn keeps(self, lands: usize, hand_size: usize) -> bool {
    match self {
      MulliganStrategy::Never => true,
      MulliganStrategy::Aggressive => lands >= 2 && lands <= 5,
      MulliganStrategy::Conservative => lands >= 1 && lands <= 6,
      MulliganStrategy::Optimal => {
        let target = 0.4 * hand_size as f64;
        (lands as f64 - target).abs() <= 2.0
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn never_keeps_everything() {
    for lands in 0..=7 {
      assert!(MulliganStrategy::Never.keeps(lands, 7));
    }
  }

  #[test]
  fn aggressive_band_edges() {
    let strategy = MulliganStrategy::Aggressive;
    assert!(!strategy.keeps(1, 7));
    assert!(strategy.keeps(2, 7));
    assert!(strategy.keeps(5, 7));
    assert!(!strategy.keeps(6, 7));
  }

  #[test]
  fn conservative_band_edges() {
    let strategy = MulliganStrategy::Conservative;
    assert!(!strategy.keeps(0, 7));
    assert!(strategy.keeps(1, 7));
    assert!(strategy.keeps(6, 7));
    assert!(!strategy.keeps(7, 7));
  }

  #[test]
  fn optimal_band_tracks_hand_size() {
    let strategy = MulliganStrategy::Optimal;
    // 7 cards puts the target at 2.8 lands, so 1 through 4 stay
    assert!(!strategy.keeps(0, 7));
    assert!(strategy.keeps(1, 7));
    assert!(strategy.keeps(4, 7));
    assert!(!strategy.keeps(5, 7));
    // 5 cards puts the target at 2.0, and a zero land hand squeaks in
    assert!(strategy.keeps(0, 5));
    assert!(strategy.keeps(4, 5));
    assert!(!strategy.keeps(5, 5));
  }

  #[test]
  fn default_is_never() {
    assert_eq!(MulliganStrategy::default(), MulliganStrategy::Never);
  }
}
