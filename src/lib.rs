//! Genetic-algorithm employee shift rostering.
//!
//! Searches for a binary employee × time-slot assignment that balances
//! two competing goals: matching the required headcount of every slot
//! and honoring each employee's shift preferences.
//!
//! - [`ga`]: Generic GA engine: selection, elitism, fresh-individual
//!   injection, adaptive mutation rate, optional rayon-parallel evaluation.
//! - [`roster`]: The rostering problem: schedule grid, inputs, fitness,
//!   crossover and mutation operators.
//! - [`io`]: Input CSV parsing and run reports.
//!
//! # Conventions
//!
//! The engine minimizes. A roster's cost is
//! `coverage_penalty − preference_bonus`; ranking, elitism, selection and
//! the adaptive mutation trend all treat lower cost as better.
//!
//! # Example
//!
//! ```
//! use u_roster::ga::GaConfig;
//! use u_roster::io::read_roster_csv;
//! use u_roster::roster::RosterProblem;
//!
//! let csv = "req_1,req_2\n1,1\npref_1,pref_2\n1,0\n0,1\n";
//! let input = read_roster_csv(csv.as_bytes())?;
//! let problem = RosterProblem::new(input.required, input.preferences)?;
//! let outcome = problem.solve(&GaConfig::default().with_generations(20).with_seed(7))?;
//! println!("score = {}", outcome.summary.fitness.score());
//! # Ok::<(), u_roster::Error>(())
//! ```

mod error;
pub mod ga;
pub mod io;
pub mod random;
pub mod roster;

pub use error::{Error, Result};
