//! Core trait definitions for the GA engine.
//!
//! The two central traits, [`Individual`] and [`GaProblem`], define the
//! contract between the generic evolution loop and a concrete problem
//! such as shift rostering.

use rand::Rng;

use super::runner::GenerationStats;

/// Marker trait for fitness values.
///
/// Fitness must support comparison and be cheaply copyable.
/// Lower fitness is considered better (minimization).
///
/// Built-in implementations exist for `i64`, `f64` and `f32`.
/// For maximization problems, negate the fitness.
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Returns a value representing the worst possible fitness.
    ///
    /// Used for individuals that have not been evaluated yet.
    fn worst() -> Self;

    /// Converts the fitness to `f64` for averaging and reporting.
    fn to_f64(self) -> f64;
}

impl Fitness for i64 {
    fn worst() -> Self {
        i64::MAX
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Fitness for f64 {
    fn worst() -> Self {
        f64::INFINITY
    }

    fn to_f64(self) -> f64 {
        self
    }
}

impl Fitness for f32 {
    fn worst() -> Self {
        f32::INFINITY
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// A candidate solution in the GA population.
///
/// Individuals carry their own fitness value. The runner calls
/// [`GaProblem::evaluate`] to compute fitness, then stores it via
/// [`set_fitness`](Individual::set_fitness).
pub trait Individual: Clone + Send + Sync {
    /// The fitness type. Must implement [`Fitness`].
    type Fitness: Fitness;

    /// Returns the current fitness of this individual.
    fn fitness(&self) -> Self::Fitness;

    /// Sets the fitness of this individual.
    fn set_fitness(&mut self, fitness: Self::Fitness);
}

/// Where the mutation rate is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationScope {
    /// Each offspring is mutated with probability `mutation_rate`.
    #[default]
    Offspring,
    /// Every offspring goes through [`GaProblem::mutate`], which applies
    /// `mutation_rate` to each gene independently.
    Gene,
}

/// Defines a GA optimization problem.
///
/// Implementors supply:
///
/// 1. **Initialization**: how to create a random individual
/// 2. **Evaluation**: how to compute fitness (pure, deterministic)
/// 3. **Crossover**: how to recombine two parents
/// 4. **Mutation**: how to perturb an individual
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the runner may evaluate
/// individuals in parallel using rayon. Only `evaluate` is ever called
/// concurrently; every method taking an RNG runs on the single
/// sequential reproduction step.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates a random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Evaluates an individual and returns its fitness.
    ///
    /// Must be a pure function of the individual: the same input always
    /// yields the same fitness. Lower values are better.
    fn evaluate(&self, individual: &Self::Individual) -> <Self::Individual as Individual>::Fitness;

    /// Produces one or more offspring by recombining two parents.
    ///
    /// Parents are borrowed immutably; offspring are fresh allocations.
    /// The default implementation clones parent1 (no crossover).
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        _parent2: &Self::Individual,
        _rng: &mut R,
    ) -> Vec<Self::Individual> {
        vec![parent1.clone()]
    }

    /// How the runner applies [`mutate`](GaProblem::mutate).
    ///
    /// Defaults to [`MutationScope::Offspring`].
    fn mutation_scope(&self) -> MutationScope {
        MutationScope::Offspring
    }

    /// Mutates an offspring in place and returns the number of changes
    /// applied.
    ///
    /// `rate` is the run's current mutation rate. Under
    /// [`MutationScope::Gene`] it is the per-gene probability; under
    /// [`MutationScope::Offspring`] the runner has already spent it on
    /// the decision to call this method at all.
    ///
    /// The runner only passes offspring it owns, never a member of the
    /// ranked population. The default implementation is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rate: f64, _rng: &mut R) -> usize {
        0
    }

    /// Called once per generation with that generation's statistics.
    ///
    /// The default implementation is a no-op.
    fn on_generation(&self, _stats: &GenerationStats) {}
}
