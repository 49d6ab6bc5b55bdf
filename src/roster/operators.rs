//! Crossover and mutation operators for binary schedules.
//!
//! # Crossover
//!
//! Every employee row is recombined independently:
//!
//! - [`CrossoverKind::SinglePoint`]: draw a split column per row; columns
//!   before it come from parent1, the rest from parent2.
//! - [`CrossoverKind::Uniform`]: every cell comes from either parent with
//!   probability 0.5.
//! - [`CrossoverKind::Mixed`]: pick one of the two per call.
//!
//! # Mutation
//!
//! - [`MutationKind::FlipOrSwap`]: with probability 0.5 invert one random
//!   cell, otherwise swap two random cells in one employee's row. When
//!   both swap slots coincide the swap is a no-op and is accepted as-is.
//! - [`MutationKind::PerCell`]: invert every cell independently with the
//!   run's current mutation rate. Every offspring goes through it.
//!
//! Operators never modify their inputs; crossover and [`mutate`] return
//! freshly allocated schedules.

use rand::Rng;

use super::schedule::Schedule;

/// Crossover strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossoverKind {
    SinglePoint,
    Uniform,
    /// Single-point or uniform, chosen per call with equal probability.
    #[default]
    Mixed,
}

/// Mutation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationKind {
    /// One bit-flip or one in-row swap, chosen per call. Applied to an
    /// offspring with probability equal to the mutation rate.
    #[default]
    FlipOrSwap,
    /// Independent bit-flip of every cell with probability equal to the
    /// mutation rate.
    PerCell,
}

/// Recombines two parents into one child of the same shape.
///
/// # Panics
/// Panics if the parents have different shapes.
pub fn crossover<R: Rng>(
    parent1: &Schedule,
    parent2: &Schedule,
    kind: CrossoverKind,
    rng: &mut R,
) -> Schedule {
    assert_eq!(parent1.shape(), parent2.shape(), "parents must have equal shape");

    let kind = match kind {
        CrossoverKind::Mixed if rng.random_bool(0.5) => CrossoverKind::SinglePoint,
        CrossoverKind::Mixed => CrossoverKind::Uniform,
        other => other,
    };

    let (employees, slots) = parent1.shape();
    let mut child = Schedule::new(employees, slots);
    if slots == 0 {
        return child;
    }

    for e in 0..employees {
        let (r1, r2) = (parent1.row(e), parent2.row(e));
        let row = child.row_mut(e);
        match kind {
            CrossoverKind::SinglePoint => {
                let split = rng.random_range(0..slots);
                row[..split].copy_from_slice(&r1[..split]);
                row[split..].copy_from_slice(&r2[split..]);
            }
            _ => {
                for (j, cell) in row.iter_mut().enumerate() {
                    *cell = if rng.random_bool(0.5) { r1[j] } else { r2[j] };
                }
            }
        }
    }
    child
}

/// Returns a mutated copy of `schedule`; the input is left untouched.
///
/// `rate` is only read by [`MutationKind::PerCell`].
pub fn mutate<R: Rng>(schedule: &Schedule, kind: MutationKind, rate: f64, rng: &mut R) -> Schedule {
    let mut mutated = schedule.clone();
    mutate_in_place(&mut mutated, kind, rate, rng);
    mutated
}

/// Mutates an owned schedule and returns the number of mutation events.
///
/// A flip-or-swap call is one event; per-cell mode counts flipped cells.
pub fn mutate_in_place<R: Rng>(
    schedule: &mut Schedule,
    kind: MutationKind,
    rate: f64,
    rng: &mut R,
) -> usize {
    let (employees, slots) = schedule.shape();
    if employees == 0 || slots == 0 {
        return 0;
    }

    match kind {
        MutationKind::FlipOrSwap => {
            let employee = rng.random_range(0..employees);
            if rng.random_bool(0.5) {
                let slot = rng.random_range(0..slots);
                schedule.flip(employee, slot);
            } else {
                let a = rng.random_range(0..slots);
                let b = rng.random_range(0..slots);
                schedule.swap_slots(employee, a, b);
            }
            1
        }
        MutationKind::PerCell => {
            let p = rate.clamp(0.0, 1.0);
            let mut flips = 0;
            for e in 0..employees {
                for j in 0..slots {
                    if rng.random_bool(p) {
                        schedule.flip(e, j);
                        flips += 1;
                    }
                }
            }
            flips
        }
    }
}
