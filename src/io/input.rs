//! Roster input CSV parsing.
//!
//! # Format
//!
//! ```text
//! req_1d_1s,req_1d_2s,req_1d_3s,...      <- line 1: requirement headers
//! 3,2,4,...                              <- line 2: required workers per slot
//! pref_1d_1s,pref_1d_2s,pref_1d_3s,...   <- line 3: preference headers
//! 1,0,1,...                              <- line 4..: one employee per line
//! ```
//!
//! Only columns whose header starts with `req` (line 1) or `pref`
//! (line 3) are read. A preference cell missing from a short employee
//! line counts as `0`.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::instrument;

use crate::error::{Error, Result};
use crate::roster::{EmployeePreferences, RequiredWorkers};

const REQUIRED_PREFIX: &str = "req";
const PREFERENCE_PREFIX: &str = "pref";

/// Parsed problem inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterInput {
    pub required: RequiredWorkers,
    pub preferences: EmployeePreferences,
}

/// Loads a roster input file.
#[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
pub fn load_roster_csv(path: impl AsRef<Path>) -> Result<RosterInput> {
    let file = File::open(path.as_ref())?;
    let input = read_roster_csv(file)?;
    tracing::debug!(
        employees = input.preferences.num_employees(),
        time_slots = input.required.num_slots(),
        preference_slots = input.preferences.num_slots(),
        "roster input loaded"
    );
    Ok(input)
}

/// Parses roster input from any reader.
pub fn read_roster_csv<R: std::io::Read>(reader: R) -> Result<RosterInput> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let records = rdr.records().collect::<std::result::Result<Vec<_>, _>>()?;
    if records.len() < 3 {
        return Err(Error::InvalidInputShape(format!(
            "expected requirement headers, requirement values and preference headers, got {} lines",
            records.len()
        )));
    }

    let required = parse_required(&records[0], &records[1])?;
    let preferences = parse_preferences(&records[2], &records[3..])?;
    Ok(RosterInput {
        required,
        preferences,
    })
}

fn parse_required(headers: &StringRecord, values: &StringRecord) -> Result<RequiredWorkers> {
    let per_slot = headers
        .iter()
        .enumerate()
        .filter(|(j, h)| h.starts_with(REQUIRED_PREFIX) && *j < values.len())
        .map(|(j, _)| parse_cell(values, j))
        .collect::<Result<Vec<u32>>>()?;
    RequiredWorkers::new(per_slot)
}

fn parse_preferences(headers: &StringRecord, rows: &[StringRecord]) -> Result<EmployeePreferences> {
    let columns: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.starts_with(PREFERENCE_PREFIX))
        .map(|(j, _)| j)
        .collect();

    let matrix = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|&j| {
                    if j < row.len() {
                        parse_cell(row, j)
                    } else {
                        Ok(0)
                    }
                })
                .collect::<Result<Vec<i32>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    EmployeePreferences::from_rows(matrix)
}

fn parse_cell<T: std::str::FromStr>(record: &StringRecord, column: usize) -> Result<T> {
    let raw = record.get(column).unwrap_or_default();
    raw.parse().map_err(|_| Error::Parse {
        line: record.position().map_or(0, |p| p.line() as usize),
        column: column + 1,
        value: raw.to_string(),
    })
}
