//! Read-only problem inputs: required headcount and employee preferences.
//!
//! Both are loaded once before a run and never modified during it.

use crate::error::{Error, Result};

/// Target headcount per time slot.
///
/// The length of this vector defines the number of time slots.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequiredWorkers(Vec<u32>);

impl RequiredWorkers {
    /// # Errors
    /// [`Error::InvalidInputShape`] if `per_slot` is empty.
    pub fn new(per_slot: Vec<u32>) -> Result<Self> {
        if per_slot.is_empty() {
            return Err(Error::InvalidInputShape(
                "required workers vector is empty".into(),
            ));
        }
        Ok(Self(per_slot))
    }

    pub fn num_slots(&self) -> usize {
        self.0.len()
    }

    /// Required headcount of `slot`, or `None` past the last slot.
    pub fn get(&self, slot: usize) -> Option<u32> {
        self.0.get(slot).copied()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

/// Per-employee shift preferences (employees × preference slots).
///
/// Values are binary in practice: `1` = wants to work the slot, `0` =
/// wants it off. The matrix may have fewer (or more) columns than the
/// schedule has slots; [`get`](Self::get) returns `None` outside the
/// matrix, which every caller treats as "no preference signal".
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmployeePreferences {
    employees: usize,
    slots: usize,
    cells: Vec<i32>,
}

impl EmployeePreferences {
    /// Builds the matrix from one row per employee.
    ///
    /// # Errors
    /// [`Error::InvalidInputShape`] if there are no employees, no
    /// preference columns, or the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self> {
        let slots = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            Some(_) => {
                return Err(Error::InvalidInputShape(
                    "preference matrix has no columns".into(),
                ))
            }
            None => {
                return Err(Error::InvalidInputShape(
                    "preference matrix has no employees".into(),
                ))
            }
        };

        let employees = rows.len();
        let mut cells = Vec::with_capacity(employees * slots);
        for (e, row) in rows.into_iter().enumerate() {
            if row.len() != slots {
                return Err(Error::InvalidInputShape(format!(
                    "preference row {e} has {} columns, expected {slots}",
                    row.len()
                )));
            }
            cells.extend(row);
        }

        Ok(Self {
            employees,
            slots,
            cells,
        })
    }

    pub fn num_employees(&self) -> usize {
        self.employees
    }

    /// Number of preference columns.
    pub fn num_slots(&self) -> usize {
        self.slots
    }

    /// Bounds-checked lookup; `None` means "no preference signal".
    pub fn get(&self, employee: usize, slot: usize) -> Option<i32> {
        if employee < self.employees && slot < self.slots {
            Some(self.cells[employee * self.slots + slot])
        } else {
            None
        }
    }

    /// One employee's preference row, or `None` past the last employee.
    pub fn row(&self, employee: usize) -> Option<&[i32]> {
        if employee >= self.employees {
            return None;
        }
        let start = employee * self.slots;
        Some(&self.cells[start..start + self.slots])
    }
}
