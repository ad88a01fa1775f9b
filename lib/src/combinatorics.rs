//! # Binomial coefficients with a bounded memo table
//!
use std::collections::HashMap;
use std::sync::RwLock;

/// Entry count at which the memo table stops growing
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// BinomialCache memoizes binomial coefficients keyed by (n, k) after
/// symmetry reduction. The table is bounded: at capacity new values are
/// still computed and returned, they just stop being inserted. A miss
/// recomputed concurrently by two callers writes the same value twice,
/// which is harmless.
#[derive(Debug)]
pub struct BinomialCache {
  table: RwLock<HashMap<(usize, usize), f64>>,
  capacity: usize,
}

impl BinomialCache {
  pub fn new() -> Self {
    Self::with_capacity(DEFAULT_CACHE_CAPACITY)
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      table: RwLock::new(HashMap::new()),
      capacity,
    }
  }

  /// Returns C(n, k): 0 when k > n, 1 when k is 0 or n, otherwise the
  /// multiplicative recurrence with k reduced to min(k, n - k)
  pub fn binomial(&self, n: usize, k: usize) -> f64 {
    if k > n {
      return 0.0;
    }
    let k = std::cmp::min(k, n - k);
    if k == 0 {
      return 1.0;
    }
    if let Ok(table) = self.table.read() {
      if let Some(&value) = table.get(&(n, k)) {
        return value;
      }
    }
    let mut value = 1.0;
    for i in 1..=k {
      value *= (n - k + i) as f64;
      value /= i as f64;
    }
    if let Ok(mut table) = self.table.write() {
      if table.len() < self.capacity {
        table.insert((n, k), value);
      }
    }
    value
  }

  /// Returns the number of memoized entries
  pub fn len(&self) -> usize {
    self.table.read().map(|t| t.len()).unwrap_or(0)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }
}

impl Default for BinomialCache {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use crate::combinatorics::*;

  #[test]
  fn binomial_edges() {
    let cache = BinomialCache::new();
    assert_eq!(cache.binomial(0, 0), 1.0);
    assert_eq!(cache.binomial(5, 0), 1.0);
    assert_eq!(cache.binomial(5, 5), 1.0);
    assert_eq!(cache.binomial(5, 6), 0.0);
    assert_eq!(cache.binomial(1, 1), 1.0);
  }

  #[test]
  fn binomial_known_values() {
    let cache = BinomialCache::new();
    assert_eq!(cache.binomial(52, 5), 2_598_960.0);
    assert_eq!(cache.binomial(60, 7), 386_206_920.0);
    assert_eq!(cache.binomial(8, 3), 56.0);
  }

  #[test]
  fn binomial_symmetry() {
    let cache = BinomialCache::new();
    let low = cache.binomial(60, 7);
    let high = cache.binomial(60, 53);
    assert_eq!(low, high);
    // Both queries reduce to the same key
    assert_eq!(cache.len(), 1);
  }

  #[test]
  fn cache_stops_growing_at_capacity() {
    let cache = BinomialCache::with_capacity(2);
    cache.binomial(10, 3);
    cache.binomial(11, 4);
    cache.binomial(12, 5);
    assert!(cache.len() <= 2);
    // Uncached results stay correct
    assert_eq!(cache.binomial(12, 5), 792.0);
  }

  #[test]
  fn trivial_results_are_not_cached() {
    let cache = BinomialCache::new();
    cache.binomial(9, 0);
    cache.binomial(9, 9);
    cache.binomial(3, 7);
    assert!(cache.is_empty());
  }
}
