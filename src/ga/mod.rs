//! Genetic Algorithm engine.
//!
//! A generic GA built on trait-based abstractions. A problem plugs in by
//! implementing [`GaProblem`], which specifies how to create, evaluate,
//! crossover, and mutate individuals. The shift-rostering problem in
//! [`crate::roster`] is one such implementation.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution with associated fitness type
//! - [`GaProblem`]: Problem definition (initialization, evaluation, operators)
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population, elitism, injection, rates)
//! - [`Selection`]: Tournament or truncated-random parent choice
//! - [`AdaptiveMutation`]: Step controller for the mutation rate
//! - [`Evolution`]: Explicit run state, advanced one generation at a time
//! - [`GaRunner`]: Runs an `Evolution` to completion
//! - [`GaResult`] / [`GenerationStats`]: Run output
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Eiben, Hinterding & Michalewicz (1999), "Parameter Control in
//!   Evolutionary Algorithms"

mod adaptive;
mod config;
mod runner;
mod selection;
mod types;

pub use adaptive::AdaptiveMutation;
pub use config::GaConfig;
pub use runner::{Evolution, GaResult, GaRunner, GenerationStats};
pub use selection::Selection;
pub use types::{Fitness, GaProblem, Individual, MutationScope};
