//! # Engine
//!
//! The public facade. An `Engine` owns one binomial cache and fronts
//! every analysis surface: raw hypergeometric queries, Karsten turn
//! analysis, goldfish simulation, mulligan strategy solving, and the
//! joint color analysis. Construct one per scope that wants an
//! independent cache; everything it hands back is a plain serde
//! serializable value.

use crate::combinatorics::BinomialCache;
use crate::deck::Deck;
use crate::error::EngineError;
use crate::hypergeometric::{self, ProbabilityResult};
use crate::mulligan::{self, Archetype, MulliganAnalysis};
use crate::multivariate::{
  self, ColorRequirement, ManabaseConfig, MultivariateAnalysis, MultivariateConfig,
};
use crate::simulation::{self, SimulationConfig, SimulationResult};
use crate::turn::{self, TurnAnalysis, DEFAULT_HAND_SIZE};

#[derive(Debug, Default)]
pub struct Engine {
  cache: BinomialCache,
}

impl Engine {
  pub fn new() -> Self {
    Self::default()
  }

  /// Caps the binomial cache at `capacity` entries
  pub fn with_cache_capacity(capacity: usize) -> Self {
    Self {
      cache: BinomialCache::with_capacity(capacity),
    }
  }

  pub fn cache(&self) -> &BinomialCache {
    &self.cache
  }

  /// P(X >= wanted) for `wanted` hits in `sample` draws from a
  /// population holding `successes` hits
  pub fn at_least_probability(
    &self,
    population: usize,
    successes: usize,
    sample: usize,
    wanted: usize,
  ) -> Result<ProbabilityResult, EngineError> {
    hypergeometric::at_least_probability(&self.cache, population, successes, sample, wanted)
  }

  /// P(X = wanted) under the same query
  pub fn point_probability(
    &self,
    population: usize,
    successes: usize,
    sample: usize,
    wanted: usize,
  ) -> Result<f64, EngineError> {
    hypergeometric::point_probability(&self.cache, population, successes, sample, wanted)
  }

  /// Castability of one color requirement on one turn with a default
  /// seven card hand
  pub fn analyze_turn(
    &self,
    deck_size: usize,
    sources: usize,
    turn: usize,
    symbols: usize,
    on_the_play: bool,
  ) -> Result<TurnAnalysis, EngineError> {
    self.analyze_turn_with_hand_size(
      deck_size,
      sources,
      turn,
      symbols,
      on_the_play,
      DEFAULT_HAND_SIZE,
    )
  }

  pub fn analyze_turn_with_hand_size(
    &self,
    deck_size: usize,
    sources: usize,
    turn: usize,
    symbols: usize,
    on_the_play: bool,
    hand_size: usize,
  ) -> Result<TurnAnalysis, EngineError> {
    turn::analyze_turn(
      &self.cache,
      deck_size,
      sources,
      turn,
      symbols,
      on_the_play,
      hand_size,
    )
  }

  /// Runs a goldfish batch
  pub fn simulate(&self, config: &SimulationConfig) -> Result<SimulationResult, EngineError> {
    simulation::simulate(config)
  }

  /// Optimal mulligan thresholds for a deck, seeded from entropy
  pub fn analyze_mulligan_strategy(
    &self,
    deck: &Deck,
    archetype: Archetype,
    iterations: usize,
  ) -> Result<MulliganAnalysis, EngineError> {
    mulligan::analyze(deck, archetype, iterations, None)
  }

  /// Seeded variant for reproducible analyses
  pub fn analyze_mulligan_strategy_seeded(
    &self,
    deck: &Deck,
    archetype: Archetype,
    iterations: usize,
    seed: u64,
  ) -> Result<MulliganAnalysis, EngineError> {
    mulligan::analyze(deck, archetype, iterations, Some(seed))
  }

  /// Joint color analysis with requirements read off the deck list
  pub fn analyze_deck_colors(
    &self,
    deck: &Deck,
    on_the_play: bool,
  ) -> Result<MultivariateAnalysis, EngineError> {
    let requirements = ColorRequirement::from_deck(deck)
      .into_iter()
      .map(|requirement| {
        let sources = deck.sources_of(requirement.color);
        (requirement, sources)
      })
      .collect();
    let config = MultivariateConfig {
      deck_size: deck.len(),
      requirements,
      on_the_play,
      hand_size: DEFAULT_HAND_SIZE,
      average_spell_cost: deck.average_spell_cost(),
      manabase: ManabaseConfig::default(),
    };
    multivariate::analyze_colors(&self.cache, &config)
  }

  /// Joint color analysis from explicit requirements
  pub fn analyze_colors(
    &self,
    config: &MultivariateConfig,
  ) -> Result<MultivariateAnalysis, EngineError> {
    multivariate::analyze_colors(&self.cache, config)
  }
}
