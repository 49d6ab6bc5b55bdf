//! Selection strategies for the GA.
//!
//! Selection determines which individuals are chosen as parents for
//! crossover. Both strategies assume the runner has already ranked the
//! population best-first.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Mühlenbein & Schlierkamp-Voosen (1993), "Predictive Models for the
//!   Breeder Genetic Algorithm" (truncation selection)

use super::types::Individual;
use rand::seq::index;
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// All strategies assume **minimization** (lower fitness = better).
///
/// # Examples
///
/// ```
/// use u_roster::ga::Selection;
///
/// // Tournament of 5 sampled without replacement
/// let sel = Selection::Tournament(5);
///
/// // Uniform draw from the better half of a ranked population
/// let sel = Selection::Truncation;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: sample `k` distinct individuals, select the best.
    ///
    /// `k` is clamped to `1..=population.len()`. Ties go to the first
    /// sampled contestant.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Truncated random selection: draw uniformly from the better half.
    ///
    /// Requires the population to be sorted best-first. The pool holds
    /// `max(1, n / 2)` individuals so a single-member population still
    /// yields a parent.
    ///
    /// # Complexity
    /// O(1) per selection
    Truncation,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Truncation
    }
}

impl Selection {
    /// Select a parent index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<I: Individual, R: Rng>(&self, population: &[I], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Truncation => truncation(population.len(), rng),
        }
    }
}

/// Tournament selection: sample k distinct individuals, return the best.
fn tournament<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> usize {
    let n = population.len();
    let k = k.clamp(1, n);

    let mut contestants = index::sample(rng, n, k).into_iter();
    // k >= 1, so the sample is never empty.
    let mut best_idx = contestants.next().unwrap_or(0);
    for idx in contestants {
        if population[idx].fitness() < population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

/// Truncation selection over the better half of a ranked population.
fn truncation<R: Rng>(n: usize, rng: &mut R) -> usize {
    let pool = (n / 2).max(1);
    rng.random_range(0..pool)
}
