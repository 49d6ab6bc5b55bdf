//! Roster fitness evaluation.
//!
//! A schedule is scored on two terms:
//!
//! - **Coverage penalty**: `penalty_weight × Σ |assigned(slot) − target(slot)|`
//! - **Preference bonus**: `preference_bonus` for every `(employee, slot)`
//!   cell inside the preference matrix whose bit equals the stated
//!   preference. "Wants to work" and "wants off" earn the bonus alike.
//!
//! The engine minimizes, so the ranking value is
//! [`cost`](FitnessBreakdown::cost) `= penalty − bonus`. The
//! reporting-friendly [`score`](FitnessBreakdown::score) is its negation.
//!
//! All functions here are pure: identical inputs give identical output.

use super::inputs::{EmployeePreferences, RequiredWorkers};
use super::schedule::Schedule;

/// Tunable weights of the two fitness terms.
///
/// Setting `preference_bonus = 0` and `penalty_weight = 1` turns the
/// cost into the plain coverage error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessWeights {
    /// Penalty per missing or surplus worker in a slot.
    pub penalty_weight: i64,
    /// Bonus per cell that matches the employee's preference.
    pub preference_bonus: i64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            penalty_weight: 50,
            preference_bonus: 10,
        }
    }
}

/// Default divisor turning a demand signal into a headcount.
pub const DEFAULT_DEMAND_DIVISOR: u32 = 20;

/// Where the per-slot headcount target comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoverageTarget {
    /// Target = the required headcount of the slot.
    Headcount(RequiredWorkers),

    /// Target = `max(1, demand[slot] / divisor)` (integer division).
    ///
    /// Used when only an external demand signal (e.g. expected client
    /// count) is known.
    Demand { demand: Vec<u32>, divisor: u32 },
}

impl CoverageTarget {
    /// Number of time slots covered by the target.
    pub fn num_slots(&self) -> usize {
        match self {
            CoverageTarget::Headcount(required) => required.num_slots(),
            CoverageTarget::Demand { demand, .. } => demand.len(),
        }
    }

    /// Headcount target of `slot`, or `None` past the last slot.
    pub fn target(&self, slot: usize) -> Option<u32> {
        match self {
            CoverageTarget::Headcount(required) => required.get(slot),
            CoverageTarget::Demand { demand, divisor } => demand
                .get(slot)
                .map(|&d| (d / (*divisor).max(1)).max(1)),
        }
    }
}

impl From<RequiredWorkers> for CoverageTarget {
    fn from(required: RequiredWorkers) -> Self {
        CoverageTarget::Headcount(required)
    }
}

/// Both fitness terms of one schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessBreakdown {
    pub coverage_penalty: i64,
    pub preference_bonus: i64,
}

impl FitnessBreakdown {
    /// Ranking value; lower is better.
    pub fn cost(&self) -> i64 {
        self.coverage_penalty - self.preference_bonus
    }

    /// `bonus − penalty`; higher is better.
    pub fn score(&self) -> i64 {
        -self.cost()
    }
}

/// Evaluates both fitness terms.
pub fn evaluate(
    schedule: &Schedule,
    target: &CoverageTarget,
    preferences: &EmployeePreferences,
    weights: &FitnessWeights,
) -> FitnessBreakdown {
    FitnessBreakdown {
        coverage_penalty: coverage_penalty(schedule, target, weights.penalty_weight),
        preference_bonus: preference_bonus(schedule, preferences, weights.preference_bonus),
    }
}

/// `penalty_weight × Σ |assigned − target|` over the slots that have a target.
pub fn coverage_penalty(schedule: &Schedule, target: &CoverageTarget, penalty_weight: i64) -> i64 {
    let deficit: i64 = (0..schedule.num_slots())
        .filter_map(|slot| {
            target
                .target(slot)
                .map(|t| (i64::from(schedule.assigned(slot)) - i64::from(t)).abs())
        })
        .sum();
    penalty_weight * deficit
}

/// Total preference bonus across all employees.
pub fn preference_bonus(schedule: &Schedule, preferences: &EmployeePreferences, bonus: i64) -> i64 {
    (0..schedule.num_employees())
        .map(|e| employee_preference_score(schedule, preferences, e, bonus))
        .sum()
}

/// Preference bonus earned by one employee.
pub fn employee_preference_score(
    schedule: &Schedule,
    preferences: &EmployeePreferences,
    employee: usize,
    bonus: i64,
) -> i64 {
    bonus * preference_matches(schedule, preferences, employee) as i64
}

/// Number of cells of `employee` matching a stated preference.
pub fn preference_matches(schedule: &Schedule, preferences: &EmployeePreferences, employee: usize) -> usize {
    compared_cells(schedule, preferences, employee)
        .filter(|(bit, pref)| bit == pref)
        .count()
}

/// Number of cells, across all employees, contradicting a stated preference.
///
/// Cells without a preference signal are neither matches nor mismatches.
pub fn preference_mismatches(schedule: &Schedule, preferences: &EmployeePreferences) -> usize {
    (0..schedule.num_employees())
        .map(|e| {
            compared_cells(schedule, preferences, e)
                .filter(|(bit, pref)| bit != pref)
                .count()
        })
        .sum()
}

/// `(schedule bit, preference)` pairs for the cells that have a preference.
fn compared_cells<'a>(
    schedule: &'a Schedule,
    preferences: &'a EmployeePreferences,
    employee: usize,
) -> impl Iterator<Item = (i32, i32)> + 'a {
    (0..schedule.num_slots()).filter_map(move |slot| {
        preferences
            .get(employee, slot)
            .map(|pref| (i32::from(schedule.get(employee, slot)), pref))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;
    use rand::Rng;

    fn prefs(rows: Vec<Vec<i32>>) -> EmployeePreferences {
        EmployeePreferences::from_rows(rows).unwrap()
    }

    fn headcount(v: Vec<u32>) -> CoverageTarget {
        RequiredWorkers::new(v).unwrap().into()
    }

    #[test]
    fn test_perfect_schedule_scores_maximum() {
        let target = headcount(vec![1, 1, 1]);
        let p = prefs(vec![vec![1, 0, 1], vec![0, 1, 0]]);
        let schedule = Schedule::from_rows(&[vec![1, 0, 1], vec![0, 1, 0]]).unwrap();
        let weights = FitnessWeights::default();

        let f = evaluate(&schedule, &target, &p, &weights);

        assert_eq!(f.coverage_penalty, 0);
        // 2 employees × 3 slots, every cell matches.
        assert_eq!(f.preference_bonus, 60);
        assert_eq!(f.score(), 60);

        // No other 2×3 schedule beats it.
        for bits in 0u32..64 {
            let rows: Vec<Vec<u8>> = (0..2)
                .map(|e| (0..3).map(|s| ((bits >> (e * 3 + s)) & 1) as u8).collect())
                .collect();
            let other = Schedule::from_rows(&rows).unwrap();
            assert!(evaluate(&other, &target, &p, &weights).cost() >= f.cost());
        }
    }

    #[test]
    fn test_all_zero_schedule_coverage_penalty() {
        let target = headcount(vec![5, 5, 5]);
        let schedule = Schedule::new(2, 3);

        for p in [
            prefs(vec![vec![0, 0, 0], vec![0, 0, 0]]),
            prefs(vec![vec![1, 1, 1], vec![1, 0, 1]]),
        ] {
            let f = evaluate(&schedule, &target, &p, &FitnessWeights::default());
            assert_eq!(f.coverage_penalty, 15 * 50);
        }
    }

    #[test]
    fn test_surplus_is_penalized_like_deficit() {
        let target = headcount(vec![0, 2]);
        let schedule = Schedule::from_rows(&[vec![1, 1], vec![1, 1], vec![1, 1]]).unwrap();
        // |3 - 0| + |3 - 2| = 4
        assert_eq!(coverage_penalty(&schedule, &target, 50), 200);
    }

    #[test]
    fn test_short_preference_matrix_gives_no_signal() {
        let target = headcount(vec![1, 1, 1, 1]);
        let p = prefs(vec![vec![1, 0]]);
        let schedule = Schedule::from_rows(&[vec![1, 0, 1, 1]]).unwrap();

        assert_eq!(preference_matches(&schedule, &p, 0), 2);
        assert_eq!(preference_mismatches(&schedule, &p), 0);
        assert_eq!(evaluate(&schedule, &target, &p, &FitnessWeights::default()).preference_bonus, 20);
    }

    #[test]
    fn test_wide_preference_matrix_ignores_extra_columns() {
        let p = prefs(vec![vec![1, 1, 1, 1, 1]]);
        let schedule = Schedule::from_rows(&[vec![1, 0]]).unwrap();
        assert_eq!(preference_matches(&schedule, &p, 0), 1);
        assert_eq!(preference_mismatches(&schedule, &p), 1);
    }

    #[test]
    fn test_employee_scores_sum_to_total_bonus() {
        let p = prefs(vec![vec![1, 0, 1], vec![0, 1, 0], vec![1, 1, 1]]);
        let schedule = Schedule::from_rows(&[vec![1, 1, 1], vec![0, 1, 0], vec![0, 0, 0]]).unwrap();
        let per: Vec<i64> = (0..3)
            .map(|e| employee_preference_score(&schedule, &p, e, 10))
            .collect();
        assert_eq!(per, vec![20, 30, 0]);
        assert_eq!(preference_bonus(&schedule, &p, 10), 50);
        assert_eq!(preference_mismatches(&schedule, &p), 4);
    }

    #[test]
    fn test_demand_target_floors_at_one() {
        let target = CoverageTarget::Demand {
            demand: vec![10, 45, 99, 0],
            divisor: DEFAULT_DEMAND_DIVISOR,
        };
        assert_eq!(target.num_slots(), 4);
        assert_eq!(target.target(0), Some(1));
        assert_eq!(target.target(1), Some(2));
        assert_eq!(target.target(2), Some(4));
        assert_eq!(target.target(3), Some(1));
        assert_eq!(target.target(4), None);
    }

    #[test]
    fn test_coverage_only_weights() {
        let target = headcount(vec![1, 2]);
        let p = prefs(vec![vec![1, 1], vec![1, 1]]);
        let schedule = Schedule::from_rows(&[vec![1, 1], vec![0, 0]]).unwrap();
        let weights = FitnessWeights {
            penalty_weight: 1,
            preference_bonus: 0,
        };
        assert_eq!(evaluate(&schedule, &target, &p, &weights).cost(), 1);
    }

    proptest! {
        #[test]
        fn prop_evaluate_is_deterministic(seed in any::<u64>(), employees in 1usize..8, slots in 1usize..12) {
            let mut rng = create_rng(seed);
            let schedule = Schedule::random(employees, slots, &mut rng);
            let target = headcount((0..slots as u32).map(|s| s % 4).collect());
            let rows: Vec<Vec<i32>> = (0..employees)
                .map(|_| (0..slots).map(|_| i32::from(rng.random_bool(0.5))).collect())
                .collect();
            let p = prefs(rows);
            let w = FitnessWeights::default();

            prop_assert_eq!(
                evaluate(&schedule, &target, &p, &w),
                evaluate(&schedule, &target, &p, &w)
            );
        }
    }
}
