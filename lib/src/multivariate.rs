//! # Multivariate color analysis
//!
//! Joint castability across a deck's colors. Each color requirement
//! gets its own hypergeometric turn analysis at the turn it matters;
//! the overall consistency treats the colors as independent and
//! multiplies, which runs slightly low because source counts
//! correlate. Colors casting below the bottleneck threshold get
//! called out, and a Karsten style land count suggestion rounds the
//! report out.

use crate::card::ManaColor;
use crate::combinatorics::BinomialCache;
use crate::deck::Deck;
use crate::error::EngineError;
use crate::turn::{analyze_turn, recommended_sources, TurnAnalysis, MAX_TABLE_TURN};

/// Colors casting below this probability at their critical turn are
/// flagged as bottlenecks
pub const BOTTLENECK_THRESHOLD: f64 = 0.80;
/// Land count for a 60 card deck of free spells
const MANABASE_INTERCEPT: f64 = 19.59;
/// Extra lands per point of average mana value
const MANABASE_SLOPE: f64 = 1.90;

/// One color's casting demand: how many pips, by which turn, and how
/// central the color is to the deck.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRequirement {
  pub color: ManaColor,
  /// Pips of this color in the defining cost, 1 through 4
  pub symbols: usize,
  /// Turn the cost wants to come online
  pub critical_turn: usize,
  /// Rank among the deck's requirements, 1 is most important
  pub priority: usize,
}

impl ColorRequirement {
  /// Reads requirements off a deck list: one per color among the
  /// spells, critical turn from the color's cheapest spell, a double
  /// pip for colors carrying at least half the spells. Priorities
  /// follow spell counts.
  pub fn from_deck(deck: &Deck) -> Vec<ColorRequirement> {
    let spell_total = deck.spell_count();
    let mut tallies: Vec<(ManaColor, usize, usize)> = Vec::new();
    for entry in &deck.cards {
      if entry.card.is_land {
        continue;
      }
      let cheapest = std::cmp::min(
        std::cmp::max(entry.card.cmc as usize, 1),
        MAX_TABLE_TURN,
      );
      for color in entry.card.colors.colors() {
        match tallies.iter_mut().find(|(tallied, _, _)| *tallied == color) {
          Some((_, count, turn)) => {
            *count += entry.count;
            *turn = std::cmp::min(*turn, cheapest);
          }
          None => tallies.push((color, entry.count, cheapest)),
        }
      }
    }
    tallies.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    tallies
      .iter()
      .enumerate()
      .map(|(rank, &(color, count, critical_turn))| {
        let heavy = spell_total > 0 && count * 2 >= spell_total;
        let symbols = if heavy {
          std::cmp::min(2, critical_turn)
        } else {
          1
        };
        ColorRequirement {
          color,
          symbols,
          critical_turn,
          priority: rank + 1,
        }
      })
      .collect()
  }
}

/// One requirement's analysis at its critical turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorAnalysis {
  pub requirement: ColorRequirement,
  /// Sources of the color the deck actually plays
  pub sources: usize,
  pub analysis: TurnAnalysis,
}

/// Bounds on the suggested land count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManabaseConfig {
  pub min_lands: usize,
  pub max_lands: usize,
}

impl Default for ManabaseConfig {
  fn default() -> Self {
    Self {
      min_lands: 20,
      max_lands: 27,
    }
  }
}

/// Suggested land counts, total and by role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManabaseSuggestion {
  pub total_lands: usize,
  /// Table source targets per color; duals count for both sides
  pub color_targets: Vec<(ManaColor, usize)>,
  pub basics: usize,
  pub duals: usize,
  pub fetches: usize,
  pub utility: usize,
}

/// Everything the joint analysis needs from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultivariateConfig {
  pub deck_size: usize,
  /// Each requirement paired with the sources the deck plays for it
  pub requirements: Vec<(ColorRequirement, usize)>,
  pub on_the_play: bool,
  pub hand_size: usize,
  /// Average mana value of the nonland cards
  pub average_spell_cost: f64,
  pub manabase: ManabaseConfig,
}

/// Joint view of one deck's color demands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultivariateAnalysis {
  pub colors: Vec<ColorAnalysis>,
  /// Product of the per color cast probabilities
  pub overall_consistency: f64,
  pub bottlenecks: Vec<ManaColor>,
  pub recommendations: Vec<String>,
  pub manabase: ManabaseSuggestion,
}

/// Analyzes every requirement at its critical turn and multiplies the
/// results into a joint consistency.
pub fn analyze_colors(
  cache: &BinomialCache,
  config: &MultivariateConfig,
) -> Result<MultivariateAnalysis, EngineError> {
  if config.requirements.is_empty() {
    return Err(EngineError::InvalidParameter(
      "no color requirements to analyze".to_string(),
    ));
  }
  let mut colors = Vec::with_capacity(config.requirements.len());
  let mut overall = 1.0;
  let mut bottlenecks = Vec::new();
  let mut recommendations = Vec::new();
  for (requirement, sources) in &config.requirements {
    let analysis = analyze_turn(
      cache,
      config.deck_size,
      *sources,
      requirement.critical_turn,
      requirement.symbols,
      config.on_the_play,
      config.hand_size,
    )?;
    overall *= analysis.cast.probability;
    if analysis.cast.probability < BOTTLENECK_THRESHOLD {
      bottlenecks.push(requirement.color);
      let deficit = analysis.recommendation.deficit;
      if deficit > 0 {
        recommendations.push(format!(
          "{:?} is a bottleneck at {:.1}%: add {} more source{}",
          requirement.color,
          analysis.cast.percentage,
          deficit,
          if deficit == 1 { "" } else { "s" }
        ));
      } else {
        recommendations.push(format!(
          "{:?} sits at {:.1}% even at the table count; add redundancy or cheaper spells",
          requirement.color, analysis.cast.percentage
        ));
      }
    }
    colors.push(ColorAnalysis {
      requirement: *requirement,
      sources: *sources,
      analysis,
    });
  }
  if bottlenecks.is_empty() {
    recommendations.push(format!(
      "no color bottlenecks; overall consistency {:.1}%",
      overall * 100.0
    ));
  }
  debug!(
    "joint consistency {:.3} across {} requirements",
    overall,
    colors.len()
  );
  Ok(MultivariateAnalysis {
    colors,
    overall_consistency: overall,
    bottlenecks,
    recommendations,
    manabase: suggest_manabase(config),
  })
}

/// Karsten's land count fit, scaled off 60 cards and clamped to the
/// configured range, then split by land role.
fn suggest_manabase(config: &MultivariateConfig) -> ManabaseSuggestion {
  let scale = config.deck_size as f64 / 60.0;
  let raw = (MANABASE_INTERCEPT + MANABASE_SLOPE * config.average_spell_cost) * scale;
  let total_lands = (raw.round() as usize)
    .max(config.manabase.min_lands)
    .min(config.manabase.max_lands);
  let color_targets = config
    .requirements
    .iter()
    .map(|(requirement, _)| {
      (
        requirement.color,
        recommended_sources(requirement.symbols, requirement.critical_turn, config.deck_size),
      )
    })
    .collect();
  let basics = total_lands * 50 / 100;
  let duals = total_lands * 30 / 100;
  let fetches = total_lands * 15 / 100;
  let utility = total_lands - basics - duals - fetches;
  ManabaseSuggestion {
    total_lands,
    color_targets,
    basics,
    duals,
    fetches,
    utility,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::turn::DEFAULT_HAND_SIZE;

  fn requirement(
    color: ManaColor,
    symbols: usize,
    critical_turn: usize,
    priority: usize,
  ) -> ColorRequirement {
    ColorRequirement {
      color,
      symbols,
      critical_turn,
      priority,
    }
  }

  fn config_for(requirements: Vec<(ColorRequirement, usize)>) -> MultivariateConfig {
    MultivariateConfig {
      deck_size: 60,
      requirements,
      on_the_play: true,
      hand_size: DEFAULT_HAND_SIZE,
      average_spell_cost: 3.0,
      manabase: ManabaseConfig::default(),
    }
  }

  #[test]
  fn joint_probability_is_the_product() {
    let cache = BinomialCache::default();
    let config = config_for(vec![
      (requirement(ManaColor::Blue, 1, 2, 1), 12),
      (requirement(ManaColor::Red, 1, 2, 2), 12),
    ]);
    let analysis = analyze_colors(&cache, &config).unwrap();
    // One source in 8 seen cards from 12-in-60 is 85.25% per color
    for color in &analysis.colors {
      assert!(f64::abs(color.analysis.cast.probability - 0.852519) < 1e-6);
    }
    assert!(f64::abs(analysis.overall_consistency - 0.852519 * 0.852519) < 1e-6);
    assert!(analysis.bottlenecks.is_empty());
    assert_eq!(analysis.recommendations.len(), 1);
    assert!(analysis.recommendations[0].contains("no color bottlenecks"));
  }

  #[test]
  fn overall_never_exceeds_the_weakest_color() {
    let cache = BinomialCache::default();
    let config = config_for(vec![
      (requirement(ManaColor::Blue, 1, 2, 1), 14),
      (requirement(ManaColor::Red, 2, 3, 2), 10),
      (requirement(ManaColor::Green, 1, 4, 3), 8),
    ]);
    let analysis = analyze_colors(&cache, &config).unwrap();
    let weakest = analysis
      .colors
      .iter()
      .map(|color| color.analysis.cast.probability)
      .fold(1.0, f64::min);
    assert!(analysis.overall_consistency <= weakest + 1e-12);
  }

  #[test]
  fn starved_color_is_flagged() {
    let cache = BinomialCache::default();
    let config = config_for(vec![
      (requirement(ManaColor::Blue, 1, 2, 1), 12),
      (requirement(ManaColor::Green, 1, 2, 2), 6),
    ]);
    let analysis = analyze_colors(&cache, &config).unwrap();
    // Six green sources cast 59.3% by turn two, well under the bar
    assert_eq!(analysis.bottlenecks, vec![ManaColor::Green]);
    // The table wants 13 sources for a single pip on turn two
    assert!(analysis.recommendations[0].contains("Green"));
    assert!(analysis.recommendations[0].contains("7 more sources"));
  }

  #[test]
  fn manabase_suggestion_for_a_midrange_curve() {
    let cache = BinomialCache::default();
    let config = config_for(vec![(requirement(ManaColor::Red, 1, 1, 1), 24)]);
    let analysis = analyze_colors(&cache, &config).unwrap();
    let manabase = &analysis.manabase;
    // 19.59 + 1.90 * 3.0 rounds to 25 lands
    assert_eq!(manabase.total_lands, 25);
    assert_eq!(manabase.basics, 12);
    assert_eq!(manabase.duals, 7);
    assert_eq!(manabase.fetches, 3);
    assert_eq!(manabase.utility, 3);
    assert_eq!(
      manabase.basics + manabase.duals + manabase.fetches + manabase.utility,
      manabase.total_lands
    );
    assert_eq!(manabase.color_targets, vec![(ManaColor::Red, 14)]);
  }

  #[test]
  fn manabase_respects_the_configured_bounds() {
    let cache = BinomialCache::default();
    let mut config = config_for(vec![(requirement(ManaColor::Blue, 1, 3, 1), 20)]);
    config.average_spell_cost = 4.5;
    let capped = analyze_colors(&cache, &config).unwrap();
    assert_eq!(capped.manabase.total_lands, 27);
    config.average_spell_cost = 0.0;
    let floored = analyze_colors(&cache, &config).unwrap();
    assert_eq!(floored.manabase.total_lands, 20);
  }

  #[test]
  fn requirements_read_off_a_deck() {
    let deck = deck![
      12 => card!(land "Island", [Blue]),
      12 => card!(land "Mountain", [Red]),
      4 => card!("Opt", 1, [Blue]),
      4 => card!("Lightning Strike", 2, [Red]),
      3 => card!("Crackling Drake", 4, [Blue, Red]),
      3 => card!("Niv-Mizzet, Parun", 6, [Blue, Red]),
      8 => card!(land "Izzet Boilerworks", [Blue, Red])
    ];
    let requirements = ColorRequirement::from_deck(&deck);
    assert_eq!(requirements.len(), 2);
    // Ten of fourteen spells on each side, so both run heavy; blue's
    // turn one spell caps its pips at one
    assert_eq!(requirements[0].color, ManaColor::Blue);
    assert_eq!(requirements[0].priority, 1);
    assert_eq!(requirements[0].critical_turn, 1);
    assert_eq!(requirements[0].symbols, 1);
    assert_eq!(requirements[1].color, ManaColor::Red);
    assert_eq!(requirements[1].priority, 2);
    assert_eq!(requirements[1].critical_turn, 2);
    assert_eq!(requirements[1].symbols, 2);
  }

  #[test]
  fn land_only_deck_has_no_requirements() {
    let deck = deck![60 => card!(land "Wastes", [])];
    assert!(ColorRequirement::from_deck(&deck).is_empty());
    let cache = BinomialCache::default();
    let config = config_for(Vec::new());
    assert!(analyze_colors(&cache, &config).is_err());
  }
}
