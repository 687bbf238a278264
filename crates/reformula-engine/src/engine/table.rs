//! Snapshot of numeric cell values.
//!
//! Built once from the raw grid before any search runs, then mutated as
//! formulas are bound. A bound result is indistinguishable from an original
//! value to later lookups, so formulas can chain down a column.

use std::collections::HashMap;

use super::cell_ref::CellRef;
use super::grid::{GridReader, Region};
use super::number::parse_number;

/// What the table knows about a coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Slot {
    Number(f64),
    /// The cell holds text that is not a number.
    Unknown,
}

/// Mapping from coordinates in a [`Region`] to numeric values.
///
/// Only non-blank cells are stored. A coordinate inside the region with no
/// stored slot is a blank cell and reads as `0.0`.
#[derive(Clone, Debug)]
pub struct ValueTable {
    region: Region,
    slots: HashMap<CellRef, Slot>,
}

impl ValueTable {
    pub fn new(region: Region) -> ValueTable {
        ValueTable {
            region,
            slots: HashMap::new(),
        }
    }

    /// Snapshot the populated cells of `region`.
    ///
    /// Blank cells read as `0.0`; text that does not normalize becomes [`Slot::Unknown`].
    pub fn build(reader: &impl GridReader, region: Region) -> ValueTable {
        let mut table = ValueTable::new(region);
        for cell in region.column_major(reader.populated_cells()) {
            let raw = reader.raw_value(&cell);
            if raw.is_blank() {
                continue;
            }
            let slot = parse_number(&raw).map_or(Slot::Unknown, Slot::Number);
            table.slots.insert(cell, slot);
        }
        table
    }

    /// What the table knows about `cell`; None outside the region.
    pub fn slot(&self, cell: &CellRef) -> Option<Slot> {
        match self.slots.get(cell) {
            Some(slot) => Some(*slot),
            None if self.region.contains(cell) => Some(Slot::Number(0.0)),
            None => None,
        }
    }

    /// The numeric value at `cell`, if known.
    pub fn number(&self, cell: &CellRef) -> Option<f64> {
        match self.slot(cell) {
            Some(Slot::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// The value used when `cell` is referenced in an expression.
    ///
    /// Absent and non-numeric cells count as zero. This can make missing data
    /// look like agreement with a target sum.
    pub fn resolve(&self, cell: &CellRef) -> f64 {
        self.number(cell).unwrap_or(0.0)
    }

    /// Record a value for `cell`, replacing whatever was there.
    ///
    /// Coordinates outside the region are ignored.
    pub fn bind(&mut self, cell: CellRef, value: f64) {
        if self.region.contains(&cell) {
            self.slots.insert(cell, Slot::Number(value));
        }
    }

    /// Coordinates strictly above `cell` in its column that hold a known
    /// number, top to bottom, starting at the region's first row.
    pub fn known_above(&self, cell: &CellRef) -> Vec<CellRef> {
        (self.region.start_row..cell.row)
            .map(|row| CellRef::new(cell.col, row))
            .filter(|c| self.number(c).is_some())
            .collect()
    }

    /// Number of stored (non-blank or bound) slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
