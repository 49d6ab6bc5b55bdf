//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::adaptive::AdaptiveMutation;
use super::selection::Selection;

/// Configuration for the Genetic Algorithm.
///
/// Controls population size, generation count, selection strategy,
/// elitism, fresh-individual injection, mutation rate control, and
/// parallelism. Termination is purely generation-count based.
///
/// # Defaults
///
/// ```
/// use u_roster::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 500);
/// assert_eq!(config.generations, 100);
/// assert_eq!(config.elite_count, 5);
/// assert_eq!(config.fresh_count, 5);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_roster::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Tournament(5))
///     .with_elite_count(2)
///     .with_mutation_rate(0.2)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Number of generations to run.
    pub generations: usize,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Number of top-ranked individuals copied unchanged to the next
    /// generation.
    ///
    /// With `elite_count >= 1` the best fitness never regresses.
    pub elite_count: usize,

    /// Number of brand-new random individuals injected every generation.
    ///
    /// Clamped at run time to the slots left after elitism.
    pub fresh_count: usize,

    /// Initial probability of mutating an offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Mutation-rate controller; `None` keeps the rate fixed.
    pub adaptive_mutation: Option<AdaptiveMutation>,

    /// Whether to evaluate individuals in parallel using rayon.
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 500,
            generations: 100,
            selection: Selection::default(),
            elite_count: 5,
            fresh_count: 5,
            mutation_rate: 0.1,
            adaptive_mutation: Some(AdaptiveMutation::default()),
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience builder for setting tournament size.
    ///
    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the elite count.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the number of fresh random individuals per generation.
    pub fn with_fresh_count(mut self, n: usize) -> Self {
        self.fresh_count = n;
        self
    }

    /// Sets the initial mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Enables the adaptive mutation-rate controller.
    pub fn with_adaptive_mutation(mut self, adaptive: AdaptiveMutation) -> Self {
        self.adaptive_mutation = Some(adaptive);
        self
    }

    /// Keeps the mutation rate fixed for the whole run.
    pub fn with_fixed_mutation_rate(mut self) -> Self {
        self.adaptive_mutation = None;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of fresh individuals actually injected per generation.
    pub fn effective_fresh_count(&self) -> usize {
        self.fresh_count
            .min(self.population_size.saturating_sub(self.elite_count))
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size == 0 {
            return Err("population_size must be at least 1".into());
        }
        if self.generations == 0 {
            return Err("generations must be at least 1".into());
        }
        if self.elite_count > self.population_size {
            return Err("elite_count exceeds population_size".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err("mutation_rate must be within [0, 1]".into());
        }
        if let Selection::Tournament(0) = self.selection {
            return Err("tournament size must be at least 1".into());
        }
        if let Some(adaptive) = &self.adaptive_mutation {
            adaptive.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 500);
        assert_eq!(config.generations, 100);
        assert_eq!(config.selection, Selection::Truncation);
        assert_eq!(config.elite_count, 5);
        assert_eq!(config.fresh_count, 5);
        assert!((config.mutation_rate - 0.1).abs() < 1e-10);
        assert_eq!(config.adaptive_mutation, Some(AdaptiveMutation::default()));
        assert!(config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(200)
            .with_generations(1000)
            .with_selection(Selection::Tournament(5))
            .with_elite_count(3)
            .with_fresh_count(2)
            .with_mutation_rate(0.05)
            .with_fixed_mutation_rate()
            .with_parallel(false)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.generations, 1000);
        assert_eq!(config.selection, Selection::Tournament(5));
        assert_eq!(config.elite_count, 3);
        assert_eq!(config.fresh_count, 2);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert!(config.adaptive_mutation.is_none());
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_single_individual_population() {
        let config = GaConfig::default()
            .with_population_size(1)
            .with_elite_count(0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_population() {
        let config = GaConfig::default().with_population_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = GaConfig::default().with_generations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_elite_too_high() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_elite_count(11);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_tournament() {
        let config = GaConfig::default().with_tournament_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_adaptive_bounds() {
        let config = GaConfig::default().with_adaptive_mutation(AdaptiveMutation {
            step: 0.05,
            min_rate: 0.9,
            max_rate: 0.1,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clamp_mutation_rate() {
        let config = GaConfig::default().with_mutation_rate(2.0);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
        let config = GaConfig::default().with_mutation_rate(-1.0);
        assert!(config.mutation_rate.abs() < 1e-10);
    }

    #[test]
    fn test_effective_fresh_count_clamped() {
        let config = GaConfig::default()
            .with_population_size(6)
            .with_elite_count(4)
            .with_fresh_count(5);
        assert_eq!(config.effective_fresh_count(), 2);

        let config = GaConfig::default()
            .with_population_size(1)
            .with_elite_count(0);
        assert_eq!(config.effective_fresh_count(), 1);
    }
}
