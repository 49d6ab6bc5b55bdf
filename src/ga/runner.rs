//! GA evolutionary loop execution.
//!
//! [`Evolution`] holds the whole mutable state of a run (population,
//! mutation rate, generation counter, RNG) and advances it one generation
//! per [`step`](Evolution::step):
//!
//! ```text
//! Initializing → Evaluating → Reproducing ─┐
//!                    ▲                     │  (generations - 1 more times)
//!                    └─────────────────────┘
//!                              → Finalizing → Done
//! ```
//!
//! [`GaRunner`] drives an `Evolution` for the configured number of
//! generations and returns a [`GaResult`].

use super::config::GaConfig;
use super::types::{Fitness, GaProblem, Individual, MutationScope};
use crate::error::{Error, Result};
use crate::random::create_rng;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::instrument;

/// Statistics of one generation.
///
/// Created once per generation and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// 1-based generation index.
    pub generation: usize,

    /// Fitness of the best-ranked individual (lower is better).
    pub best_fitness: f64,

    /// Mean fitness of the ranked population.
    pub average_fitness: f64,

    /// Mutation rate used while breeding this generation's offspring.
    pub mutation_rate: f64,

    /// Number of offspring that were mutated.
    ///
    /// Under [`MutationScope::Gene`] an offspring counts once it had at
    /// least one gene changed.
    pub mutation_count: usize,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// Best individual of the final ranked population.
    pub best: I,

    /// First individual of the initial population, before any evolution.
    pub initial: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: I::Fitness,

    /// Total number of generations executed.
    pub generations: usize,

    /// Mutation rate after the last adjustment.
    pub final_mutation_rate: f64,

    /// Per-generation statistics, in order.
    pub history: Vec<GenerationStats>,
}

/// Explicit state of a running GA.
///
/// Owning all run state here (instead of globals) keeps runs isolated:
/// two `Evolution`s never share a population or an RNG.
pub struct Evolution<'a, P: GaProblem, R: Rng> {
    problem: &'a P,
    config: &'a GaConfig,
    rng: R,
    population: Vec<P::Individual>,
    initial: P::Individual,
    /// Individuals before this index already carry a valid fitness.
    evaluated: usize,
    generation: usize,
    mutation_rate: f64,
    previous_average: Option<f64>,
}

impl<'a, P: GaProblem, R: Rng> Evolution<'a, P, R> {
    /// Validates the configuration and creates the initial population.
    ///
    /// Every individual comes from [`GaProblem::create_individual`].
    /// With adaptive control enabled the initial mutation rate is clamped
    /// into the controller's bounds.
    pub fn new(problem: &'a P, config: &'a GaConfig, mut rng: R) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;

        let population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();
        let initial = population[0].clone();

        let mutation_rate = match &config.adaptive_mutation {
            Some(adaptive) => adaptive.clamp(config.mutation_rate),
            None => config.mutation_rate,
        };

        Ok(Self {
            problem,
            config,
            rng,
            population,
            initial,
            evaluated: 0,
            generation: 0,
            mutation_rate,
            previous_average: None,
        })
    }

    /// Current population. Ranked best-first only right after evaluation.
    pub fn population(&self) -> &[P::Individual] {
        &self.population
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Mutation rate that the next generation will use.
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Runs one generation: evaluate and rank, breed the next
    /// population, then adapt the mutation rate.
    pub fn step(&mut self) -> GenerationStats {
        self.evaluate_and_rank();

        let best_fitness = self.population[0].fitness().to_f64();
        let average_fitness = average_fitness(&self.population);

        let rate_used = self.mutation_rate;
        let mutation_count = self.reproduce();

        if let (Some(adaptive), Some(previous)) =
            (&self.config.adaptive_mutation, self.previous_average)
        {
            self.mutation_rate = adaptive.adjust(self.mutation_rate, previous, average_fitness);
        }
        self.previous_average = Some(average_fitness);
        self.generation += 1;

        let stats = GenerationStats {
            generation: self.generation,
            best_fitness,
            average_fitness,
            mutation_rate: rate_used,
            mutation_count,
        };

        tracing::debug!(
            generation = stats.generation,
            best_fitness = stats.best_fitness,
            average_fitness = stats.average_fitness,
            mutation_rate = stats.mutation_rate,
            mutation_count = stats.mutation_count,
            "generation complete"
        );
        self.problem.on_generation(&stats);

        stats
    }

    /// Evaluates and ranks the last population and returns its best
    /// member together with the run history.
    pub fn finish(mut self, history: Vec<GenerationStats>) -> GaResult<P::Individual> {
        self.evaluate_and_rank();
        let best = self.population.swap_remove(0);

        GaResult {
            best_fitness: best.fitness(),
            best,
            initial: self.initial,
            generations: self.generation,
            final_mutation_rate: self.mutation_rate,
            history,
        }
    }

    /// Evaluates every individual without a fitness yet, then stable-sorts
    /// the population best-first.
    fn evaluate_and_rank(&mut self) {
        evaluate_population(
            self.problem,
            &mut self.population[self.evaluated..],
            self.config.parallel,
        );
        self.evaluated = self.population.len();

        self.population.sort_by(|a, b| {
            a.fitness()
                .partial_cmp(&b.fitness())
                .unwrap_or(Ordering::Equal)
        });
    }

    /// Replaces the ranked population with the next generation.
    ///
    /// Layout: `[elites | offspring | fresh]`. Returns the number of
    /// offspring that were mutated.
    fn reproduce(&mut self) -> usize {
        let size = self.config.population_size;
        let elite_count = self.config.elite_count.min(size);
        let breed_until = size - self.config.effective_fresh_count();

        let mut next_gen: Vec<P::Individual> = Vec::with_capacity(size);
        next_gen.extend_from_slice(&self.population[..elite_count]);

        let scope = self.problem.mutation_scope();
        let mut mutation_count = 0;
        while next_gen.len() < breed_until {
            let p1_idx = self.config.selection.select(&self.population, &mut self.rng);
            let p2_idx = self.config.selection.select(&self.population, &mut self.rng);

            let mut children = self.problem.crossover(
                &self.population[p1_idx],
                &self.population[p2_idx],
                &mut self.rng,
            );
            if children.is_empty() {
                children.push(self.population[p1_idx].clone());
            }

            for mut child in children {
                if next_gen.len() >= breed_until {
                    break;
                }
                match scope {
                    MutationScope::Offspring => {
                        if self.rng.random_range(0.0..1.0) < self.mutation_rate {
                            self.problem.mutate(&mut child, self.mutation_rate, &mut self.rng);
                            mutation_count += 1;
                        }
                    }
                    MutationScope::Gene => {
                        if self.problem.mutate(&mut child, self.mutation_rate, &mut self.rng) > 0 {
                            mutation_count += 1;
                        }
                    }
                }
                child.set_fitness(<<P::Individual as Individual>::Fitness as Fitness>::worst());
                next_gen.push(child);
            }
        }

        while next_gen.len() < size {
            next_gen.push(self.problem.create_individual(&mut self.rng));
        }

        self.population = next_gen;
        self.evaluated = elite_count;
        mutation_count
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {:?}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with an RNG seeded from `config.seed`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] if the configuration is invalid.
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Individual>> {
        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        Self::run_with_rng(problem, config, create_rng(seed))
    }

    /// Runs the GA with a caller-supplied RNG.
    #[instrument(
        level = "info",
        skip_all,
        fields(
            population_size = config.population_size,
            generations = config.generations,
            elite_count = config.elite_count
        )
    )]
    pub fn run_with_rng<P: GaProblem, R: Rng>(
        problem: &P,
        config: &GaConfig,
        rng: R,
    ) -> Result<GaResult<P::Individual>> {
        let mut evolution = Evolution::new(problem, config, rng)?;
        tracing::info!("evolution started");

        let mut history = Vec::with_capacity(config.generations);
        for _ in 0..config.generations {
            history.push(evolution.step());
        }

        let result = evolution.finish(history);
        tracing::info!(
            best_fitness = result.best_fitness.to_f64(),
            final_mutation_rate = result.final_mutation_rate,
            "evolution finished"
        );
        Ok(result)
    }
}

fn average_fitness<I: Individual>(population: &[I]) -> f64 {
    let total: f64 = population.iter().map(|ind| ind.fitness().to_f64()).sum();
    total / population.len() as f64
}

/// Evaluate all individuals in the slice.
#[cfg(feature = "parallel")]
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    parallel: bool,
) {
    if parallel {
        population.par_iter_mut().for_each(|ind| {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        });
    } else {
        evaluate_sequential(problem, population);
    }
}

/// Evaluate all individuals in the slice.
#[cfg(not(feature = "parallel"))]
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    _parallel: bool,
) {
    evaluate_sequential(problem, population);
}

fn evaluate_sequential<P: GaProblem>(problem: &P, population: &mut [P::Individual]) {
    for ind in population.iter_mut() {
        let f = problem.evaluate(ind);
        ind.set_fitness(f);
    }
}

// ============================================================================
// Tests
// ============================================================================
