//! Boundaries between the engine and whatever holds the grid.
//!
//! - [`RawValue`] - A cell value as read, before normalization
//! - [`Region`] - The rectangular data region that takes part in inference
//! - [`GridReader`] - Source of raw values and "computed" flags
//! - [`OutputSink`] - Receiver of literal values and inferred formulas

use super::cell_ref::CellRef;
use super::expr::Formula;

/// A raw cell value as it came out of the source grid.
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Empty,
    Number(f64),
    Text(String),
}

impl RawValue {
    /// True for empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Number(_) => false,
            RawValue::Text(s) => s.trim().is_empty(),
        }
    }
}

/// Read access to a grid of raw values.
///
/// Coordinates outside the grid report [`RawValue::Empty`] and are never computed.
pub trait GridReader {
    /// Largest 1-based row holding any value.
    fn max_row(&self) -> usize;
    /// Largest 1-based column holding any value.
    fn max_col(&self) -> usize;
    /// Every coordinate the grid stores something for, in any order.
    ///
    /// Coordinates not listed here must read as [`RawValue::Empty`] and not computed.
    fn populated_cells(&self) -> Vec<CellRef>;
    fn raw_value(&self, cell: &CellRef) -> RawValue;
    /// Whether the cell is expected to carry an inferred formula (e.g. bold text).
    fn is_computed(&self, cell: &CellRef) -> bool;
}

/// Write access for the results of a run.
///
/// A run only ever calls [`OutputSink::set_formula`]. Unresolved computed cells
/// are never rewritten through [`OutputSink::set_value`]; they keep their
/// literal value as the sink already holds it.
pub trait OutputSink {
    fn set_value(&mut self, cell: &CellRef, value: RawValue);
    fn set_formula(&mut self, cell: &CellRef, formula: &Formula);
}

/// Rectangular data region, inclusive on all sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub start_row: usize,
    pub start_col: usize,
    pub max_row: usize,
    pub max_col: usize,
}

impl Region {
    pub fn new(start_row: usize, start_col: usize, max_row: usize, max_col: usize) -> Region {
        Region {
            start_row,
            start_col,
            max_row,
            max_col,
        }
    }

    /// Region from a fixed start to the extent of `reader`.
    pub fn of_reader(reader: &impl GridReader, start_row: usize, start_col: usize) -> Region {
        Region::new(start_row, start_col, reader.max_row(), reader.max_col())
    }

    pub fn is_empty(&self) -> bool {
        self.start_row > self.max_row || self.start_col > self.max_col
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        (self.start_row..=self.max_row).contains(&cell.row)
            && (self.start_col..=self.max_col).contains(&cell.col)
    }

    /// The region's cells among `cells`, column by column, top to bottom
    /// within each column.
    pub fn column_major(&self, cells: impl IntoIterator<Item = CellRef>) -> Vec<CellRef> {
        let mut inside: Vec<CellRef> = cells.into_iter().filter(|c| self.contains(c)).collect();
        inside.sort_by_key(|c| (c.col, c.row));
        inside.dedup();
        inside
    }
}
