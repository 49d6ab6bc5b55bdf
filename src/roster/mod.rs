//! Employee shift rostering on top of the GA engine.
//!
//! A roster is a binary [`Schedule`] of employees × time slots. Its cost
//! balances two goals: meeting the per-slot headcount target and
//! honoring each employee's shift preferences.
//!
//! # Key Types
//!
//! - [`Schedule`]: Flat row-major binary grid
//! - [`RequiredWorkers`] / [`EmployeePreferences`]: Read-only inputs
//! - [`CoverageTarget`]: Strict headcount or demand-driven target
//! - [`FitnessWeights`] / [`FitnessBreakdown`]: Cost terms
//! - [`RosterProblem`]: [`GaProblem`](crate::ga::GaProblem) implementation
//! - [`RosterSummary`]: Per-employee and aggregate final statistics

pub mod fitness;
mod inputs;
pub mod operators;
mod problem;
mod schedule;

pub use fitness::{CoverageTarget, FitnessBreakdown, FitnessWeights, DEFAULT_DEMAND_DIVISOR};
pub use inputs::{EmployeePreferences, RequiredWorkers};
pub use operators::{CrossoverKind, MutationKind};
pub use problem::{RosterOutcome, RosterProblem, RosterSummary, ShiftChromosome};
pub use schedule::Schedule;
