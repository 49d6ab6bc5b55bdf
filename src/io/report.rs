//! Run reporting: generation log, final result table, console grid.
//!
//! Reports are written after the run from the buffered
//! [`GenerationStats`](crate::ga::GenerationStats) history, so no I/O
//! happens inside the evolution loop.

use std::fmt::Write as _;
use std::io::Write;

use csv::WriterBuilder;

use crate::error::Result;
use crate::ga::GaConfig;
use crate::roster::{RosterOutcome, RosterProblem, Schedule};

/// Default number of shifts per day used for slot labels.
pub const DEFAULT_SHIFTS_PER_DAY: usize = 3;

/// How time slots are labelled in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLabels {
    pub shifts_per_day: usize,
}

impl Default for SlotLabels {
    fn default() -> Self {
        Self {
            shifts_per_day: DEFAULT_SHIFTS_PER_DAY,
        }
    }
}

impl SlotLabels {
    /// `D{day}S{shift}`, both 1-based. Slot 4 with 3 shifts/day is `D2S2`.
    pub fn label(&self, slot: usize) -> String {
        let per_day = self.shifts_per_day.max(1);
        format!("D{}S{}", slot / per_day + 1, slot % per_day + 1)
    }

    pub fn labels(&self, slots: usize) -> Vec<String> {
        (0..slots).map(|j| self.label(j)).collect()
    }
}

/// Writes the semicolon-delimited generation log.
///
/// Sections: run parameters, per-generation statistics, preferences,
/// requirements, final schedule, per-employee preference scores.
pub fn write_generation_log<W: Write>(
    mut out: W,
    config: &GaConfig,
    problem: &RosterProblem,
    outcome: &RosterOutcome,
    labels: SlotLabels,
) -> Result<()> {
    writeln!(out, "Population size:;{}", config.population_size)?;
    writeln!(out, "Generations:;{}", config.generations)?;
    writeln!(out, "Mutation rate (initial):;{}", config.mutation_rate)?;
    writeln!(out, "Elite count:;{}", config.elite_count)?;
    writeln!(out, "Totally new children:;{}", config.effective_fresh_count())?;
    writeln!(out, "Variable mutation rate:;{}", config.adaptive_mutation.is_some())?;
    writeln!(out)?;

    writeln!(out, "Generation;BestFitness;AverageFitness;MutationRate;MutationCount")?;
    for stats in &outcome.history {
        writeln!(
            out,
            "{};{};{:.2};{};{}",
            stats.generation,
            stats.best_fitness,
            stats.average_fitness,
            stats.mutation_rate,
            stats.mutation_count
        )?;
    }

    let slots = problem.num_slots();
    let header = labels.labels(slots).join(";");

    writeln!(out)?;
    writeln!(out, "Preferences")?;
    writeln!(out, " ;{header}")?;
    let preferences = problem.preferences();
    for e in 0..problem.num_employees() {
        let cells: Vec<String> = (0..slots)
            .map(|j| preferences.get(e, j).map(|p| p.to_string()).unwrap_or_default())
            .collect();
        writeln!(out, "P{};{}", e + 1, cells.join(";"))?;
    }

    writeln!(out)?;
    writeln!(out, "Requirements")?;
    writeln!(out, " ;{header}")?;
    writeln!(out, "LP;{}", target_cells(problem).join(";"))?;

    writeln!(out)?;
    writeln!(out, "Schedule")?;
    writeln!(out, " ;{header}")?;
    for (e, row) in outcome.schedule.rows().enumerate() {
        writeln!(out, "P{};{}", e + 1, join_bits(row, ";"))?;
    }

    writeln!(out)?;
    writeln!(out, "FitnessForEachWorker")?;
    for score in &outcome.summary.employee_scores {
        writeln!(out, "{score}")?;
    }

    out.flush()?;
    Ok(())
}

/// Writes the comma-delimited per-employee result table.
///
/// Columns: `Id`, `P_*` (preferences), `FR_*` (headcount targets),
/// `S_*` (final schedule), `worker_fitness`, `mismatchWorkerRequirments`
/// (total coverage penalty), `mismatchFirmRequirments` (total
/// preference mismatches).
pub fn write_result_csv<W: Write>(
    out: W,
    problem: &RosterProblem,
    outcome: &RosterOutcome,
    labels: SlotLabels,
) -> Result<()> {
    let slots = problem.num_slots();
    let slot_labels = labels.labels(slots);
    let mut wtr = WriterBuilder::new().from_writer(out);

    let mut header = vec!["Id".to_string()];
    for prefix in ["P", "FR", "S"] {
        header.extend(slot_labels.iter().map(|l| format!("{prefix}_{l}")));
    }
    header.extend(
        ["worker_fitness", "mismatchWorkerRequirments", "mismatchFirmRequirments"]
            .map(String::from),
    );
    wtr.write_record(&header)?;

    let targets = target_cells(problem);
    let summary = &outcome.summary;
    for e in 0..problem.num_employees() {
        let mut record = Vec::with_capacity(header.len());
        record.push(e.to_string());
        record.extend((0..slots).map(|j| {
            problem
                .preferences()
                .get(e, j)
                .map(|p| p.to_string())
                .unwrap_or_default()
        }));
        record.extend(targets.iter().cloned());
        record.extend(outcome.schedule.row(e).iter().map(u8::to_string));
        record.push(summary.employee_scores[e].to_string());
        record.push(summary.unsolved_worker_requirements.to_string());
        record.push(summary.unsolved_firm_requirements.to_string());
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Tab-separated grid with slot and employee labels, for the console.
pub fn render_schedule(schedule: &Schedule, labels: SlotLabels) -> String {
    let mut s = String::from("      ");
    for label in labels.labels(schedule.num_slots()) {
        let _ = write!(s, "{label}\t");
    }
    s.push('\n');
    for (e, row) in schedule.rows().enumerate() {
        let _ = write!(s, "P{}\t", e + 1);
        for bit in row {
            let _ = write!(s, "{bit}\t");
        }
        s.push('\n');
    }
    s
}

fn target_cells(problem: &RosterProblem) -> Vec<String> {
    (0..problem.num_slots())
        .map(|j| problem.target().target(j).map(|t| t.to_string()).unwrap_or_default())
        .collect()
}

fn join_bits(row: &[u8], sep: &str) -> String {
    row.iter().map(u8::to_string).collect::<Vec<_>>().join(sep)
}
