//! Two-pass formula resolution over a grid.
//!
//! Pass 1 snapshots the region into a [`ValueTable`]. Pass 2 walks the
//! computed cells column by column, top to bottom, searches each one, and
//! binds every match back into the table before moving on. Later searches
//! therefore see formula-derived values, and the visiting order matters.

use tracing::{debug, info, warn};

use super::cell_ref::CellRef;
use super::expr::Formula;
use super::grid::{GridReader, OutputSink, RawValue, Region};
use super::search::{FormulaSearcher, SearchConfig};
use super::table::{Slot, ValueTable};

/// Outcome of a run.
#[derive(Clone, Debug)]
pub struct Resolution {
    /// Inferred formulas in the order they were bound.
    pub formulas: Vec<Formula>,
    /// Computed cells for which no combination matched; they stay literal.
    pub unresolved: Vec<CellRef>,
    /// Computed cells holding non-numeric text, never searched.
    pub skipped: Vec<CellRef>,
    /// The table as it stood after the last binding.
    pub table: ValueTable,
}

impl Resolution {
    /// Write every inferred formula to `sink`. Other cells are left untouched.
    pub fn apply(&self, sink: &mut impl OutputSink) {
        for formula in &self.formulas {
            sink.set_formula(&formula.target, formula);
        }
    }
}

/// Infer formulas for every computed cell of `region`.
pub fn resolve(reader: &impl GridReader, region: Region, config: &SearchConfig) -> Resolution {
    let mut table = ValueTable::build(reader, region);
    let searcher = FormulaSearcher::new(*config);

    let mut formulas = Vec::new();
    let mut unresolved = Vec::new();
    let mut skipped = Vec::new();

    if region.is_empty() {
        debug!(?region, "data region is empty");
    }

    let targets: Vec<CellRef> = region
        .column_major(reader.populated_cells())
        .into_iter()
        .filter(|cell| reader.is_computed(cell))
        .collect();

    for cell in targets {
        let target_value = match table.slot(&cell) {
            Some(Slot::Number(n)) => n,
            Some(Slot::Unknown) | None => {
                let raw = reader.raw_value(&cell);
                if holds_formula_text(&raw) {
                    warn!(%cell, "computed cell already holds formula text, skipping");
                } else {
                    debug!(%cell, "computed cell is not numeric, skipping");
                }
                skipped.push(cell);
                continue;
            }
        };

        let Some(expression) = searcher.find(&table, &cell, target_value) else {
            debug!(%cell, target_value, "no formula found");
            unresolved.push(cell);
            continue;
        };

        let value = expression.evaluate(&table);
        table.bind(cell, value);
        debug!(%cell, %expression, value, "formula inferred");
        formulas.push(Formula {
            target: cell,
            expression,
            value,
        });
    }

    info!(
        inferred = formulas.len(),
        unresolved = unresolved.len(),
        skipped = skipped.len(),
        slots = table.len(),
        max_depth = searcher.config().max_depth,
        "resolution complete"
    );

    Resolution {
        formulas,
        unresolved,
        skipped,
        table,
    }
}

/// Text such as `=B4+B5`, left over from a previous run or a formula export.
fn holds_formula_text(raw: &RawValue) -> bool {
    matches!(raw, RawValue::Text(s) if s.trim_start().starts_with('='))
}
