//! Shift-rostering GA problem definition.
//!
//! Implements [`GaProblem`] for binary employee × time-slot schedules and
//! bridges the fitness terms and operators to the generic GA engine.

use rand::Rng;

use super::fitness::{self, CoverageTarget, FitnessBreakdown, FitnessWeights};
use super::inputs::{EmployeePreferences, RequiredWorkers};
use super::operators::{self, CrossoverKind, MutationKind};
use super::schedule::Schedule;
use crate::error::{Error, Result};
use crate::ga::{GaConfig, GaProblem, GaRunner, GenerationStats, Individual, MutationScope};

/// A schedule together with its cached cost.
///
/// Lower fitness = better roster (minimization convention).
#[derive(Debug, Clone)]
pub struct ShiftChromosome {
    pub schedule: Schedule,
    /// `coverage_penalty − preference_bonus`.
    pub fitness: i64,
}

impl ShiftChromosome {
    /// Wraps an unevaluated schedule.
    pub fn new(schedule: Schedule) -> Self {
        Self {
            schedule,
            fitness: i64::MAX,
        }
    }
}

impl Individual for ShiftChromosome {
    type Fitness = i64;

    fn fitness(&self) -> i64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: i64) {
        self.fitness = fitness;
    }
}

/// Final statistics of a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterSummary {
    /// Preference bonus earned by each employee, in employee order.
    pub employee_scores: Vec<i64>,
    /// Total coverage penalty ("unsolved worker requirements").
    pub unsolved_worker_requirements: i64,
    /// Cells contradicting a stated preference ("unsolved firm requirements").
    pub unsolved_firm_requirements: usize,
    pub fitness: FitnessBreakdown,
}

/// Output of [`RosterProblem::solve`].
#[derive(Debug, Clone)]
pub struct RosterOutcome {
    pub schedule: Schedule,
    /// First schedule of the initial random population.
    pub initial_schedule: Schedule,
    pub summary: RosterSummary,
    pub history: Vec<GenerationStats>,
    pub final_mutation_rate: f64,
}

/// GA problem definition for shift rostering.
///
/// The number of employees is the number of preference rows; the number
/// of time slots is the length of the coverage target.
///
/// # Example
/// ```
/// use u_roster::ga::GaConfig;
/// use u_roster::roster::{EmployeePreferences, RequiredWorkers, RosterProblem};
///
/// let required = RequiredWorkers::new(vec![1, 1, 1])?;
/// let preferences = EmployeePreferences::from_rows(vec![vec![1, 0, 1], vec![0, 1, 0]])?;
/// let problem = RosterProblem::new(required, preferences)?;
///
/// let config = GaConfig::default()
///     .with_population_size(30)
///     .with_generations(40)
///     .with_seed(42);
/// let outcome = problem.solve(&config)?;
/// assert_eq!(outcome.schedule.shape(), (2, 3));
/// # Ok::<(), u_roster::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RosterProblem {
    target: CoverageTarget,
    preferences: EmployeePreferences,
    weights: FitnessWeights,
    crossover: CrossoverKind,
    mutation: MutationKind,
}

impl RosterProblem {
    /// Creates a problem with a strict headcount target.
    pub fn new(required: RequiredWorkers, preferences: EmployeePreferences) -> Result<Self> {
        Self::with_target(required.into(), preferences)
    }

    /// Creates a problem from any coverage target.
    ///
    /// # Errors
    /// [`Error::InvalidInputShape`] if the target has no slots or the
    /// demand divisor is zero.
    pub fn with_target(target: CoverageTarget, preferences: EmployeePreferences) -> Result<Self> {
        if target.num_slots() == 0 {
            return Err(Error::InvalidInputShape(
                "coverage target has no time slots".into(),
            ));
        }
        if let CoverageTarget::Demand { divisor: 0, .. } = target {
            return Err(Error::InvalidInputShape("demand divisor is zero".into()));
        }
        if preferences.num_slots() != target.num_slots() {
            tracing::warn!(
                preference_slots = preferences.num_slots(),
                time_slots = target.num_slots(),
                "preference matrix width differs from slot count; uncovered cells carry no preference"
            );
        }
        Ok(Self {
            target,
            preferences,
            weights: FitnessWeights::default(),
            crossover: CrossoverKind::default(),
            mutation: MutationKind::default(),
        })
    }

    /// Sets the fitness weights.
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the crossover strategy.
    pub fn with_crossover(mut self, kind: CrossoverKind) -> Self {
        self.crossover = kind;
        self
    }

    /// Sets the mutation strategy.
    pub fn with_mutation(mut self, kind: MutationKind) -> Self {
        self.mutation = kind;
        self
    }

    pub fn num_employees(&self) -> usize {
        self.preferences.num_employees()
    }

    pub fn num_slots(&self) -> usize {
        self.target.num_slots()
    }

    pub fn target(&self) -> &CoverageTarget {
        &self.target
    }

    pub fn preferences(&self) -> &EmployeePreferences {
        &self.preferences
    }

    pub fn weights(&self) -> &FitnessWeights {
        &self.weights
    }

    /// Both fitness terms of `schedule`.
    pub fn breakdown(&self, schedule: &Schedule) -> FitnessBreakdown {
        fitness::evaluate(schedule, &self.target, &self.preferences, &self.weights)
    }

    /// Per-employee and aggregate statistics of `schedule`.
    pub fn summarize(&self, schedule: &Schedule) -> RosterSummary {
        let breakdown = self.breakdown(schedule);
        let employee_scores = (0..schedule.num_employees())
            .map(|e| {
                fitness::employee_preference_score(
                    schedule,
                    &self.preferences,
                    e,
                    self.weights.preference_bonus,
                )
            })
            .collect();

        RosterSummary {
            employee_scores,
            unsolved_worker_requirements: breakdown.coverage_penalty,
            unsolved_firm_requirements: fitness::preference_mismatches(schedule, &self.preferences),
            fitness: breakdown,
        }
    }

    /// Runs the GA and summarizes the best schedule.
    pub fn solve(&self, config: &GaConfig) -> Result<RosterOutcome> {
        let result = GaRunner::run(self, config)?;
        let summary = self.summarize(&result.best.schedule);

        tracing::info!(
            score = summary.fitness.score(),
            unsolved_worker_requirements = summary.unsolved_worker_requirements,
            unsolved_firm_requirements = summary.unsolved_firm_requirements,
            "roster solved"
        );

        Ok(RosterOutcome {
            schedule: result.best.schedule,
            initial_schedule: result.initial.schedule,
            summary,
            history: result.history,
            final_mutation_rate: result.final_mutation_rate,
        })
    }
}

impl GaProblem for RosterProblem {
    type Individual = ShiftChromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> ShiftChromosome {
        ShiftChromosome::new(Schedule::random(self.num_employees(), self.num_slots(), rng))
    }

    fn evaluate(&self, individual: &ShiftChromosome) -> i64 {
        self.breakdown(&individual.schedule).cost()
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &ShiftChromosome,
        parent2: &ShiftChromosome,
        rng: &mut R,
    ) -> Vec<ShiftChromosome> {
        let child = operators::crossover(&parent1.schedule, &parent2.schedule, self.crossover, rng);
        vec![ShiftChromosome::new(child)]
    }

    fn mutation_scope(&self) -> MutationScope {
        match self.mutation {
            MutationKind::FlipOrSwap => MutationScope::Offspring,
            MutationKind::PerCell => MutationScope::Gene,
        }
    }

    fn mutate<R: Rng>(&self, individual: &mut ShiftChromosome, rate: f64, rng: &mut R) -> usize {
        operators::mutate_in_place(&mut individual.schedule, self.mutation, rate, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Selection;
    use crate::random::create_rng;

    fn small_problem() -> RosterProblem {
        let required = RequiredWorkers::new(vec![1, 1, 1]).unwrap();
        let prefs = EmployeePreferences::from_rows(vec![vec![1, 0, 1], vec![0, 1, 0]]).unwrap();
        RosterProblem::new(required, prefs).unwrap()
    }

    fn config() -> GaConfig {
        GaConfig::default()
            .with_population_size(30)
            .with_generations(40)
            .with_elite_count(2)
            .with_fresh_count(2)
            .with_seed(42)
            .with_parallel(false)
    }

    #[test]
    fn test_shape_comes_from_inputs() {
        let problem = small_problem();
        assert_eq!(problem.num_employees(), 2);
        assert_eq!(problem.num_slots(), 3);

        let mut rng = create_rng(1);
        let ind = problem.create_individual(&mut rng);
        assert_eq!(ind.schedule.shape(), (2, 3));
        assert_eq!(ind.fitness, i64::MAX);
    }

    #[test]
    fn test_evaluate_is_cost() {
        let problem = small_problem();
        let perfect = ShiftChromosome::new(
            Schedule::from_rows(&[vec![1, 0, 1], vec![0, 1, 0]]).unwrap(),
        );
        assert_eq!(problem.evaluate(&perfect), -60);
        assert_eq!(problem.evaluate(&perfect), problem.evaluate(&perfect));
    }

    #[test]
    fn test_summary_of_perfect_schedule() {
        let problem = small_problem();
        let perfect = Schedule::from_rows(&[vec![1, 0, 1], vec![0, 1, 0]]).unwrap();

        let summary = problem.summarize(&perfect);

        assert_eq!(summary.employee_scores, vec![30, 30]);
        assert_eq!(summary.unsolved_worker_requirements, 0);
        assert_eq!(summary.unsolved_firm_requirements, 0);
        assert_eq!(summary.fitness.score(), 60);
    }

    #[test]
    fn test_summary_of_empty_schedule() {
        let required = RequiredWorkers::new(vec![5, 5, 5]).unwrap();
        let prefs = EmployeePreferences::from_rows(vec![vec![1, 0, 1], vec![0, 1, 0]]).unwrap();
        let problem = RosterProblem::new(required, prefs).unwrap();

        let summary = problem.summarize(&Schedule::new(2, 3));

        assert_eq!(summary.unsolved_worker_requirements, 15 * 50);
        assert_eq!(summary.unsolved_firm_requirements, 3);
        assert_eq!(summary.employee_scores, vec![10, 20]);
    }

    #[test]
    fn test_solve_finds_perfect_small_roster() {
        let problem = small_problem();

        let outcome = problem.solve(&config()).unwrap();

        assert_eq!(outcome.schedule.row(0), &[1, 0, 1]);
        assert_eq!(outcome.schedule.row(1), &[0, 1, 0]);
        assert_eq!(outcome.summary.fitness.score(), 60);
        assert_eq!(outcome.history.len(), 40);
    }

    #[test]
    fn test_solve_with_tournament_and_per_cell_mutation() {
        let problem = small_problem()
            .with_crossover(CrossoverKind::SinglePoint)
            .with_mutation(MutationKind::PerCell);
        let config = config().with_selection(Selection::Tournament(5));

        let outcome = problem.solve(&config).unwrap();

        assert_eq!(outcome.summary.fitness.score(), 60);
    }

    #[test]
    fn test_per_cell_mutation_reaches_every_offspring() {
        let problem = small_problem().with_mutation(MutationKind::PerCell);
        let config = config()
            .with_population_size(20)
            .with_generations(5)
            .with_elite_count(0)
            .with_fresh_count(0);

        let all = problem
            .solve(&config.clone().with_mutation_rate(1.0).with_fixed_mutation_rate())
            .unwrap();
        assert!(all.history.iter().all(|s| s.mutation_count == 20));

        let none = problem
            .solve(&config.with_mutation_rate(0.0).with_fixed_mutation_rate())
            .unwrap();
        assert!(none.history.iter().all(|s| s.mutation_count == 0));
    }

    #[test]
    fn test_adaptive_rate_starts_inside_bounds() {
        let problem = small_problem();
        let config = config().with_generations(5).with_mutation_rate(0.0);

        let outcome = problem.solve(&config).unwrap();

        assert!(outcome
            .history
            .iter()
            .all(|s| (0.01..=1.0).contains(&s.mutation_rate)));
    }

    #[test]
    fn test_initial_schedule_is_kept() {
        let problem = small_problem();

        let outcome = problem.solve(&config()).unwrap();

        let mut rng = create_rng(42);
        let first = problem.create_individual(&mut rng);
        assert_eq!(outcome.initial_schedule, first.schedule);
    }

    #[test]
    fn test_elitism_never_regresses_on_roster() {
        let required = RequiredWorkers::new(vec![3, 2, 4, 1, 3, 2]).unwrap();
        let prefs = EmployeePreferences::from_rows(
            (0..6)
                .map(|e| (0..6).map(|s| ((e + s) % 2) as i32).collect::<Vec<_>>())
                .collect(),
        )
        .unwrap();
        let problem = RosterProblem::new(required, prefs).unwrap();

        let outcome = problem.solve(&config().with_generations(60)).unwrap();

        for w in outcome.history.windows(2) {
            assert!(w[1].best_fitness <= w[0].best_fitness);
        }
    }

    #[test]
    fn test_trivial_single_cell_run() {
        let required = RequiredWorkers::new(vec![1]).unwrap();
        let prefs = EmployeePreferences::from_rows(vec![vec![1]]).unwrap();
        let problem = RosterProblem::new(required, prefs).unwrap();
        let config = GaConfig::default()
            .with_population_size(1)
            .with_generations(1)
            .with_elite_count(0)
            .with_seed(3);

        let outcome = problem.solve(&config).unwrap();

        assert_eq!(outcome.schedule.shape(), (1, 1));
        assert!(outcome.schedule.get(0, 0) <= 1);
        assert_eq!(outcome.history.len(), 1);
    }

    #[test]
    fn test_demand_driven_target() {
        let target = CoverageTarget::Demand {
            demand: vec![20, 40, 60],
            divisor: 20,
        };
        let prefs = EmployeePreferences::from_rows(vec![vec![0; 3]; 4]).unwrap();
        let problem = RosterProblem::with_target(target, prefs)
            .unwrap()
            .with_weights(FitnessWeights {
                penalty_weight: 1,
                preference_bonus: 0,
            });

        let outcome = problem.solve(&config().with_generations(80)).unwrap();

        assert_eq!(outcome.summary.unsolved_worker_requirements, 0);
        let assigned: Vec<u32> = (0..3).map(|j| outcome.schedule.assigned(j)).collect();
        assert_eq!(assigned, vec![1, 2, 3]);
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let target = CoverageTarget::Demand {
            demand: vec![1],
            divisor: 0,
        };
        let prefs = EmployeePreferences::from_rows(vec![vec![0]]).unwrap();
        assert!(matches!(
            RosterProblem::with_target(target, prefs),
            Err(Error::InvalidInputShape(_))
        ));
    }

    #[test]
    fn test_narrow_preferences_are_tolerated() {
        let required = RequiredWorkers::new(vec![1, 1, 1, 1]).unwrap();
        let prefs = EmployeePreferences::from_rows(vec![vec![1], vec![0]]).unwrap();
        let problem = RosterProblem::new(required, prefs).unwrap();

        let outcome = problem.solve(&config()).unwrap();

        assert_eq!(outcome.summary.employee_scores.len(), 2);
        assert!(outcome.summary.employee_scores.iter().all(|&s| s <= 10));
    }
}
