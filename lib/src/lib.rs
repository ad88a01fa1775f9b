//! # Magic: The Gathering Mana Consistency Library
//!
//! manacurve answers the questions deck builders actually ask: the
//! exact hypergeometric odds of hitting land drops and colored
//! sources, how a deck's source counts stack up against Frank
//! Karsten's published tables, goldfish simulated land rates under
//! different mulligan policies, the optimal keep-or-mulligan
//! threshold per hand size, and where a multicolor manabase
//! bottlenecks.

#[macro_use]
extern crate serde_derive;
extern crate serde;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate rand;
extern crate rayon;
extern crate thiserror;

#[macro_use]
pub mod card;
pub mod combinatorics;
#[macro_use]
pub mod deck;
pub mod engine;
pub mod error;
pub mod hand;
pub mod hypergeometric;
pub mod mulligan;
pub mod multivariate;
pub mod simulation;
pub mod turn;

pub use crate::engine::Engine;
pub use crate::error::EngineError;
