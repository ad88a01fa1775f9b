//! # Goldfish simulation
//!
//! Monte Carlo land drop simulation. Each trial shuffles a token deck,
//! resolves the configured mulligan policy, then draws one card per
//! turn and records the first turn the running land count reaches the
//! target. Trials run in fixed size chunks with per chunk seeds, so a
//! seeded batch reproduces exactly no matter how the chunks are
//! scheduled across threads.

use crate::error::EngineError;
use crate::mulligan::MulliganStrategy;
use rand::prelude::*;
use rand::rngs::SmallRng;
use rayon::prelude::*;

/// Trials per parallel task; also the stride of the per chunk seeds
const CHUNK_SIZE: usize = 512;
/// Cards drawn for the opening hand before any mulligan
const OPENING_HAND_SIZE: usize = 7;
/// z value for a two sided 95% interval
const CONFIDENCE_Z: f64 = 1.96;

/// One goldfish batch: what to shuffle, what counts as success, and
/// how the simulated player mulligans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
  pub deck_size: usize,
  pub land_count: usize,
  /// A trial succeeds when this many lands are seen by this turn
  pub target_turn: usize,
  pub runs: usize,
  pub strategy: MulliganStrategy,
  pub on_the_play: bool,
  /// Hands are thrown back at most this many times
  pub max_mulligans: usize,
  /// Fixed seed for reproducible batches; None draws one from entropy
  pub seed: Option<u64>,
}

/// Aggregate outcome of a finished batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
  pub runs: usize,
  pub successes: usize,
  /// Percentage of trials that reached the land target in time
  pub success_rate: f64,
  /// Mean success turn over successful trials only
  pub average_turn: f64,
  /// Standard deviation of the success turn over the same trials
  pub std_dev: f64,
  /// 95% interval around the success rate, in percent
  pub confidence_interval: (f64, f64),
  /// Index 0 counts failed trials, index t counts successes on turn t
  pub turn_distribution: Vec<usize>,
  pub strategy: MulliganStrategy,
  pub on_the_play: bool,
  /// Seed the batch actually ran with
  pub seed: u64,
}

struct ChunkTally {
  successes: usize,
  turn_sum: usize,
  turn_sq_sum: usize,
  turn_distribution: Vec<usize>,
}

impl ChunkTally {
  fn new(target_turn: usize) -> Self {
    Self {
      successes: 0,
      turn_sum: 0,
      turn_sq_sum: 0,
      turn_distribution: vec![0; target_turn + 1],
    }
  }

  fn record(&mut self, outcome: Option<usize>) {
    match outcome {
      Some(turn) => {
        self.successes += 1;
        self.turn_sum += turn;
        self.turn_sq_sum += turn * turn;
        self.turn_distribution[turn] += 1;
      }
      None => self.turn_distribution[0] += 1,
    }
  }

  fn merge(mut self, other: Self) -> Self {
    self.successes += other.successes;
    self.turn_sum += other.turn_sum;
    self.turn_sq_sum += other.turn_sq_sum;
    for (slot, count) in self.turn_distribution.iter_mut().zip(other.turn_distribution) {
      *slot += count;
    }
    self
  }
}

/// Runs a goldfish batch and aggregates the per trial outcomes.
pub fn simulate(config: &SimulationConfig) -> Result<SimulationResult, EngineError> {
  validate(config)?;
  let seed = match config.seed {
    Some(seed) => seed,
    None => thread_rng().gen(),
  };
  debug!(
    "simulating {} trials: {} lands / {} cards, target turn {}, {:?} mulligans",
    config.runs, config.land_count, config.deck_size, config.target_turn, config.strategy
  );
  let chunk_count = (config.runs + CHUNK_SIZE - 1) / CHUNK_SIZE;
  let tally = (0..chunk_count)
    .into_par_iter()
    .map(|chunk| {
      let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(chunk as u64));
      let mut deck = token_deck(config.deck_size, config.land_count);
      let trials = std::cmp::min(CHUNK_SIZE, config.runs - chunk * CHUNK_SIZE);
      let mut tally = ChunkTally::new(config.target_turn);
      for _ in 0..trials {
        tally.record(run_trial(&mut rng, &mut deck, config));
      }
      tally
    })
    .reduce(|| ChunkTally::new(config.target_turn), ChunkTally::merge);
  let result = summarize(config, seed, tally);
  debug!(
    "simulation done: {:.1}% success over {} trials",
    result.success_rate, result.runs
  );
  Ok(result)
}

/// Plays a single game against nobody. Returns the first turn the
/// running land count reached the target, or None if it never did.
fn run_trial(rng: &mut SmallRng, deck: &mut [bool], config: &SimulationConfig) -> Option<usize> {
  let mut hand_size = std::cmp::min(OPENING_HAND_SIZE, deck.len());
  let mut mulligans = 0;
  let lands_in_hand = loop {
    deck.shuffle(rng);
    let lands = deck[..hand_size].iter().filter(|&&is_land| is_land).count();
    if hand_size == 1
      || mulligans >= config.max_mulligans
      || config.strategy.keeps(lands, hand_size)
    {
      break lands;
    }
    mulligans += 1;
    hand_size -= 1;
  };
  let mut lands_seen = lands_in_hand;
  let mut next_draw = hand_size;
  for turn in 1..=config.target_turn {
    // No draw step on turn one when on the play
    if !(turn == 1 && config.on_the_play) && next_draw < deck.len() {
      if deck[next_draw] {
        lands_seen += 1;
      }
      next_draw += 1;
    }
    if lands_seen >= config.target_turn {
      return Some(turn);
    }
  }
  None
}

fn token_deck(deck_size: usize, land_count: usize) -> Vec<bool> {
  let mut deck = vec![true; land_count];
  deck.resize(deck_size, false);
  deck
}

fn summarize(config: &SimulationConfig, seed: u64, tally: ChunkTally) -> SimulationResult {
  let runs = config.runs as f64;
  let successes = tally.successes;
  let rate = successes as f64 / runs;
  let average_turn = if successes > 0 {
    tally.turn_sum as f64 / successes as f64
  } else {
    0.0
  };
  let std_dev = if successes > 1 {
    let count = successes as f64;
    let sum = tally.turn_sum as f64;
    let variance = (tally.turn_sq_sum as f64 - sum * sum / count) / count;
    variance.max(0.0).sqrt()
  } else {
    0.0
  };
  let half_width = CONFIDENCE_Z * (rate * (1.0 - rate) / runs).sqrt();
  let confidence_interval = (
    ((rate - half_width) * 100.0).max(0.0),
    ((rate + half_width) * 100.0).min(100.0),
  );
  SimulationResult {
    runs: config.runs,
    successes,
    success_rate: rate * 100.0,
    average_turn,
    std_dev,
    confidence_interval,
    turn_distribution: tally.turn_distribution,
    strategy: config.strategy,
    on_the_play: config.on_the_play,
    seed,
  }
}

fn validate(config: &SimulationConfig) -> Result<(), EngineError> {
  if config.deck_size == 0 {
    return Err(EngineError::InvalidParameter(
      "deck size must be positive".to_string(),
    ));
  }
  if config.land_count > config.deck_size {
    return Err(EngineError::InvalidParameter(format!(
      "{} lands cannot fit in a {} card deck",
      config.land_count, config.deck_size
    )));
  }
  if config.target_turn == 0 {
    return Err(EngineError::InvalidParameter(
      "target turn must be positive".to_string(),
    ));
  }
  if config.runs == 0 {
    return Err(EngineError::InvalidParameter(
      "run count must be positive".to_string(),
    ));
  }
  if config.max_mulligans >= OPENING_HAND_SIZE {
    return Err(EngineError::InvalidParameter(format!(
      "cannot mulligan more than {} times",
      OPENING_HAND_SIZE - 1
    )));
  }
  Ok(())
}
