//! # Optimal mulligan thresholds
//!
//! Backward induction over score histograms, one per hand size. A
//! hand is kept exactly when its bucket's conditional mean beats the
//! expected value of mulliganing one card lower, so the keep
//! threshold at each size is the continuation value below it.

use crate::error::EngineError;

/// Ten point buckets over 0 to 100, top bucket closed
pub const SCORE_BUCKETS: usize = 11;

/// Score histogram for one hand size. Buckets carry counts and score
/// sums so conditional means stay exact instead of snapping to bucket
/// midpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDistribution {
  pub hand_size: usize,
  pub counts: [usize; SCORE_BUCKETS],
  pub sums: [f64; SCORE_BUCKETS],
  pub samples: usize,
}

impl ScoreDistribution {
  pub fn new(hand_size: usize) -> Self {
    Self {
      hand_size,
      counts: [0; SCORE_BUCKETS],
      sums: [0.0; SCORE_BUCKETS],
      samples: 0,
    }
  }

  pub fn record(&mut self, score: f64) {
    let bucket = bucket_of(score);
    self.counts[bucket] += 1;
    self.sums[bucket] += score;
    self.samples += 1;
  }

  pub fn merge(&mut self, other: &ScoreDistribution) {
    for bucket in 0..SCORE_BUCKETS {
      self.counts[bucket] += other.counts[bucket];
      self.sums[bucket] += other.sums[bucket];
    }
    self.samples += other.samples;
  }

  /// Mean score over every sample, 0 when empty
  pub fn mean(&self) -> f64 {
    if self.samples == 0 {
      return 0.0;
    }
    self.sums.iter().sum::<f64>() / self.samples as f64
  }

  /// Conditional mean of one bucket, None when the bucket is empty
  pub fn bucket_mean(&self, bucket: usize) -> Option<f64> {
    if bucket >= SCORE_BUCKETS || self.counts[bucket] == 0 {
      return None;
    }
    Some(self.sums[bucket] / self.counts[bucket] as f64)
  }

  /// Probability mass per bucket
  pub fn normalized(&self) -> [f64; SCORE_BUCKETS] {
    let mut mass = [0.0; SCORE_BUCKETS];
    if self.samples == 0 {
      return mass;
    }
    for bucket in 0..SCORE_BUCKETS {
      mass[bucket] = self.counts[bucket] as f64 / self.samples as f64;
    }
    mass
  }
}

fn bucket_of(score: f64) -> usize {
  let clamped = score.max(0.0);
  std::cmp::min((clamped / 10.0) as usize, SCORE_BUCKETS - 1)
}

/// Keep rule and value for one hand size.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MulliganValue {
  pub hand_size: usize,
  /// Keep hands scoring at or above this
  pub threshold: f64,
  /// Expected score under optimal play from this hand size down
  pub expected_value: f64,
}

/// Overall deck grade derived from the seven card expected value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeckQuality {
  Poor,
  Average,
  Good,
  Excellent,
}

impl DeckQuality {
  pub fn from_expected_value(expected: f64) -> Self {
    if expected >= 70.0 {
      DeckQuality::Excellent
    } else if expected >= 55.0 {
      DeckQuality::Good
    } else if expected >= 40.0 {
      DeckQuality::Average
    } else {
      DeckQuality::Poor
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      DeckQuality::Excellent => "excellent",
      DeckQuality::Good => "good",
      DeckQuality::Average => "average",
      DeckQuality::Poor => "poor",
    }
  }
}

/// Runs the induction. `distributions` is ordered smallest hand first
/// and the smallest one must hold samples, since every hand at the
/// smallest size is a forced keep. Returns one value per input in the
/// same order.
pub fn solve(distributions: &[ScoreDistribution]) -> Result<Vec<MulliganValue>, EngineError> {
  let smallest = distributions
    .first()
    .ok_or_else(|| EngineError::InvalidParameter("no distributions to solve".to_string()))?;
  if smallest.samples == 0 {
    return Err(EngineError::EmptyDistribution(smallest.hand_size));
  }
  let mut values = Vec::with_capacity(distributions.len());
  let mut continuation = smallest.mean();
  values.push(MulliganValue {
    hand_size: smallest.hand_size,
    threshold: 0.0,
    expected_value: continuation,
  });
  for distribution in &distributions[1..] {
    let threshold = continuation;
    let expected_value = if distribution.samples == 0 {
      // no mass, so keeping and mulliganing cost the same
      continuation
    } else {
      let mut expected = 0.0;
      for bucket in 0..SCORE_BUCKETS {
        if distribution.counts[bucket] == 0 {
          continue;
        }
        let mass = distribution.counts[bucket] as f64 / distribution.samples as f64;
        let kept = distribution.sums[bucket] / distribution.counts[bucket] as f64;
        expected += mass * if kept >= threshold { kept } else { continuation };
      }
      expected
    };
    values.push(MulliganValue {
      hand_size: distribution.hand_size,
      threshold,
      expected_value,
    });
    continuation = expected_value;
  }
  Ok(values)
}
