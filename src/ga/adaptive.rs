//! Adaptive mutation-rate control.
//!
//! A proportional step controller: after each generation the average
//! fitness is compared with the previous generation's. A worse average
//! raises the mutation rate by `step`, a better one lowers it by `step`,
//! and an unchanged average leaves it alone. The result is clamped to
//! `[min_rate, max_rate]` and rounded to three decimals so repeated
//! steps do not accumulate floating-point drift.

/// Step size and clamp bounds for the mutation-rate controller.
///
/// # Defaults
///
/// ```
/// use u_roster::ga::AdaptiveMutation;
///
/// let adaptive = AdaptiveMutation::default();
/// assert_eq!(adaptive.step, 0.05);
/// assert_eq!(adaptive.min_rate, 0.01);
/// assert_eq!(adaptive.max_rate, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdaptiveMutation {
    /// Amount added or removed per generation.
    pub step: f64,
    /// Lower clamp bound.
    pub min_rate: f64,
    /// Upper clamp bound.
    pub max_rate: f64,
}

impl Default for AdaptiveMutation {
    fn default() -> Self {
        Self {
            step: 0.05,
            min_rate: 0.01,
            max_rate: 1.0,
        }
    }
}

impl AdaptiveMutation {
    /// Returns the next mutation rate given the previous and current
    /// average fitness (lower is better).
    pub fn adjust(&self, rate: f64, previous_average: f64, current_average: f64) -> f64 {
        let next = if current_average > previous_average {
            rate + self.step
        } else if current_average < previous_average {
            rate - self.step
        } else {
            rate
        };
        self.clamp(next)
    }

    /// Clamps `rate` into `[min_rate, max_rate]`, rounded to three decimals.
    pub fn clamp(&self, rate: f64) -> f64 {
        round3(rate.clamp(self.min_rate, self.max_rate))
    }

    /// Checks that the bounds form a valid probability interval.
    pub fn validate(&self) -> Result<(), String> {
        if self.step.is_nan() || self.step < 0.0 {
            return Err("adaptive mutation step must be non-negative".into());
        }
        if !(0.0 <= self.min_rate && self.min_rate <= self.max_rate && self.max_rate <= 1.0) {
            return Err("adaptive mutation bounds must satisfy 0 <= min <= max <= 1".into());
        }
        Ok(())
    }
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
