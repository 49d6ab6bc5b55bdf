//! Binary employee × time-slot assignment grid.

use rand::Rng;

use crate::error::{Error, Result};

/// A dense binary assignment matrix.
///
/// Cell `(employee, slot)` is `1` when the employee works that slot.
/// Stored as a flat row-major buffer; dimensions are fixed for the
/// lifetime of the value. Every cell is `0` or `1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    employees: usize,
    slots: usize,
    cells: Vec<u8>,
}

impl Schedule {
    /// Creates an all-zero schedule.
    pub fn new(employees: usize, slots: usize) -> Self {
        Self {
            employees,
            slots,
            cells: vec![0; employees * slots],
        }
    }

    /// Creates a schedule with every cell an independent fair coin flip.
    pub fn random<R: Rng>(employees: usize, slots: usize, rng: &mut R) -> Self {
        let cells = (0..employees * slots)
            .map(|_| u8::from(rng.random_bool(0.5)))
            .collect();
        Self {
            employees,
            slots,
            cells,
        }
    }

    /// Builds a schedule from per-employee rows.
    ///
    /// # Errors
    /// [`Error::InvalidInputShape`] if the rows are ragged or contain a
    /// value other than 0 or 1.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let slots = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(rows.len() * slots);
        for (e, row) in rows.iter().enumerate() {
            if row.len() != slots {
                return Err(Error::InvalidInputShape(format!(
                    "schedule row {e} has {} slots, expected {slots}",
                    row.len()
                )));
            }
            if let Some(&bad) = row.iter().find(|&&c| c > 1) {
                return Err(Error::InvalidInputShape(format!(
                    "schedule row {e} contains non-binary value {bad}"
                )));
            }
            cells.extend_from_slice(row);
        }
        Ok(Self {
            employees: rows.len(),
            slots,
            cells,
        })
    }

    pub fn num_employees(&self) -> usize {
        self.employees
    }

    pub fn num_slots(&self) -> usize {
        self.slots
    }

    /// Returns `(num_employees, num_slots)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.employees, self.slots)
    }

    /// Cell value (0 or 1).
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn get(&self, employee: usize, slot: usize) -> u8 {
        self.cells[self.index(employee, slot)]
    }

    /// Sets a cell.
    pub fn set(&mut self, employee: usize, slot: usize, on: bool) {
        let i = self.index(employee, slot);
        self.cells[i] = u8::from(on);
    }

    /// Inverts a cell.
    pub fn flip(&mut self, employee: usize, slot: usize) {
        let i = self.index(employee, slot);
        self.cells[i] ^= 1;
    }

    /// Swaps two cells in one employee's row.
    pub fn swap_slots(&mut self, employee: usize, a: usize, b: usize) {
        let row = self.row_mut(employee);
        row.swap(a, b);
    }

    /// One employee's assignments across all slots.
    pub fn row(&self, employee: usize) -> &[u8] {
        let start = employee * self.slots;
        &self.cells[start..start + self.slots]
    }

    pub fn row_mut(&mut self, employee: usize) -> &mut [u8] {
        let start = employee * self.slots;
        &mut self.cells[start..start + self.slots]
    }

    /// Iterates over employee rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // `max(1)` keeps `chunks` valid for zero-slot grids, which have no cells.
        self.cells.chunks(self.slots.max(1))
    }

    /// Number of employees assigned to `slot`.
    pub fn assigned(&self, slot: usize) -> u32 {
        (0..self.employees)
            .map(|e| u32::from(self.get(e, slot)))
            .sum()
    }

    /// Number of cells that differ from `other`.
    ///
    /// # Panics
    /// Panics if the shapes differ.
    pub fn hamming_distance(&self, other: &Schedule) -> usize {
        assert_eq!(self.shape(), other.shape(), "schedules must have equal shape");
        self.cells
            .iter()
            .zip(&other.cells)
            .filter(|(a, b)| a != b)
            .count()
    }

    fn index(&self, employee: usize, slot: usize) -> usize {
        assert!(
            employee < self.employees && slot < self.slots,
            "cell ({employee}, {slot}) outside {}x{} schedule",
            self.employees,
            self.slots
        );
        employee * self.slots + slot
    }
}
