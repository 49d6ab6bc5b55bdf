//! I/O around the optimizer: input parsing, reports, output file naming.
//!
//! Nothing in here is called from inside the evolution loop.

mod input;
mod report;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub use input::{load_roster_csv, read_roster_csv, RosterInput};
pub use report::{
    render_schedule, write_generation_log, write_result_csv, SlotLabels, DEFAULT_SHIFTS_PER_DAY,
};

/// File name of the generation log inside the log directory.
pub const LOG_FILE_NAME: &str = "genetic_log.csv";

/// Path of the generation log, creating `dir` if needed.
///
/// The log is overwritten on every run.
pub fn log_path(dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    Ok(dir.join(LOG_FILE_NAME))
}

/// First unused `genetic_Result{n}.csv` in `dir` (n starting at 1),
/// creating `dir` if needed.
pub fn next_result_path(dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = (1..)
        .map(|n| dir.join(format!("genetic_Result{n}.csv")))
        .find(|p| !p.exists())
        .unwrap_or_else(|| dir.join("genetic_Result.csv"));
    Ok(path)
}
