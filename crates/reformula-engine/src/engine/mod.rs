//! Formula inference engine API.
//!
//! This module rebuilds signed-sum formulas for cells of a value-only grid:
//!
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ 1-based row/col)
//! - [`parse_number`] - Normalize raw cell values into numbers
//! - [`ValueTable`] - Snapshot of numeric values, mutated as formulas bind
//! - [`Expression`] - Signed sums of cell references and their evaluation
//! - [`FormulaSearcher`] - Bounded, deterministic search for a matching sum
//! - [`resolve`] - Two-pass orchestration over a [`GridReader`]

mod cell_ref;
mod expr;
mod grid;
mod number;
mod resolve;
mod search;
mod table;

pub use cell_ref::CellRef;
pub use expr::{Expression, ExpressionError, Formula, Sign, Term, evaluate_str};
pub use grid::{GridReader, OutputSink, RawValue, Region};
pub use number::{parse_number, parse_number_str};
pub use resolve::{Resolution, resolve};
pub use search::{
    DEFAULT_MAX_DEPTH, DEFAULT_TOLERANCE, FormulaSearcher, MAX_SEARCH_DEPTH, SearchConfig,
};
pub use table::{Slot, ValueTable};
