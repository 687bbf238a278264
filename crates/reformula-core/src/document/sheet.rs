//! In-memory grid of raw cells.
//!
//! - [`CellContents`] - What a cell holds (empty, number, text, or an inferred formula)
//! - [`SheetCell`] - Contents plus the "computed" flag (bold in the source sheet)
//! - [`Sheet`] - Sparse storage that the engine reads from and writes back into

use std::collections::HashMap;

use reformula_engine::engine::{
    CellRef, Expression, Formula, GridReader, OutputSink, RawValue, parse_number_str,
};

/// Marker used in text formats for emphasized (computed) cells.
pub const EMPHASIS: &str = "**";

/// The content stored in a cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellContents {
    Empty,
    Number(f64),
    Text(String),
    /// An inferred formula together with the value it evaluated to when bound.
    Formula { expression: Expression, value: f64 },
}

/// A cell in the sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct SheetCell {
    pub contents: CellContents,
    /// Whether the cell is expected to carry a formula.
    pub computed: bool,
}

impl SheetCell {
    pub fn new_empty() -> SheetCell {
        SheetCell {
            contents: CellContents::Empty,
            computed: false,
        }
    }

    pub fn new_number(n: f64) -> SheetCell {
        SheetCell {
            contents: CellContents::Number(n),
            computed: false,
        }
    }

    pub fn new_text(text: &str) -> SheetCell {
        SheetCell {
            contents: CellContents::Text(text.to_string()),
            computed: false,
        }
    }

    pub fn computed(mut self) -> SheetCell {
        self.computed = true;
        self
    }

    /// Parse a field as it appears in a text export.
    /// - `**…**` around the value -> computed
    /// - Empty or whitespace -> Empty
    /// - A number that prints back identically -> Number
    /// - Otherwise -> Text, kept verbatim (`1,000.00`, `(250)`, `=A1+A2`, labels)
    pub fn from_input(input: &str) -> SheetCell {
        let trimmed = input.trim();
        let (value, computed) = match strip_emphasis(trimmed) {
            Some(inner) => (inner, true),
            None => (trimmed, false),
        };

        let contents = if value.trim().is_empty() {
            CellContents::Empty
        } else if let Some(n) = value.parse::<f64>().ok().filter(|n| n.to_string() == value) {
            CellContents::Number(n)
        } else {
            CellContents::Text(value.to_string())
        };

        SheetCell { contents, computed }
    }

    /// The cell's value or formula as plain text, without emphasis markers.
    pub fn to_input_string(&self) -> String {
        match &self.contents {
            CellContents::Empty => String::new(),
            CellContents::Number(n) => n.to_string(),
            CellContents::Text(s) => s.clone(),
            CellContents::Formula { expression, .. } => format!("={}", expression),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.contents, CellContents::Empty)
    }

    /// Text that would read back as something other than a literal value.
    pub fn needs_literal_guard(&self) -> bool {
        let CellContents::Text(s) = &self.contents else {
            return false;
        };
        let first_non_space = s.trim_start_matches([' ', '\t']).chars().next();
        matches!(first_non_space, Some('=' | '+' | '-' | '@')) && parse_number_str(s).is_none()
    }

    fn raw_value(&self) -> RawValue {
        match &self.contents {
            CellContents::Empty => RawValue::Empty,
            CellContents::Number(n) => RawValue::Number(*n),
            CellContents::Text(s) => RawValue::Text(s.clone()),
            CellContents::Formula { value, .. } => RawValue::Number(*value),
        }
    }
}

fn strip_emphasis(value: &str) -> Option<&str> {
    value.strip_prefix(EMPHASIS)?.strip_suffix(EMPHASIS)
}

impl From<RawValue> for CellContents {
    fn from(value: RawValue) -> Self {
        match value {
            RawValue::Empty => CellContents::Empty,
            RawValue::Number(n) => CellContents::Number(n),
            RawValue::Text(s) => CellContents::Text(s),
        }
    }
}

/// Sparse cell storage keyed by 1-based coordinates.
#[derive(Clone, Debug, Default)]
pub struct Sheet {
    cells: HashMap<CellRef, SheetCell>,
}

impl Sheet {
    pub fn new() -> Sheet {
        Sheet::default()
    }

    pub fn get(&self, cell_ref: &CellRef) -> Option<&SheetCell> {
        self.cells.get(cell_ref)
    }

    pub fn set(&mut self, cell_ref: CellRef, cell: SheetCell) {
        self.cells.insert(cell_ref, cell);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in row-major order.
    pub fn sorted_cells(&self) -> Vec<(&CellRef, &SheetCell)> {
        let mut cells: Vec<_> = self.cells.iter().collect();
        cells.sort_by_key(|(cell_ref, _)| **cell_ref);
        cells
    }

    /// Display string for a cell (empty if absent).
    pub fn display(&self, cell_ref: &CellRef) -> String {
        self.cells
            .get(cell_ref)
            .map(SheetCell::to_input_string)
            .unwrap_or_default()
    }
}

impl GridReader for Sheet {
    fn max_row(&self) -> usize {
        self.cells.keys().map(|c| c.row).max().unwrap_or(0)
    }

    fn max_col(&self) -> usize {
        self.cells.keys().map(|c| c.col).max().unwrap_or(0)
    }

    fn populated_cells(&self) -> Vec<CellRef> {
        self.cells.keys().copied().collect()
    }

    fn raw_value(&self, cell: &CellRef) -> RawValue {
        self.cells
            .get(cell)
            .map_or(RawValue::Empty, SheetCell::raw_value)
    }

    fn is_computed(&self, cell: &CellRef) -> bool {
        self.cells.get(cell).is_some_and(|c| c.computed)
    }
}

impl OutputSink for Sheet {
    fn set_value(&mut self, cell: &CellRef, value: RawValue) {
        let entry = self.cells.entry(*cell).or_insert_with(SheetCell::new_empty);
        entry.contents = value.into();
    }

    fn set_formula(&mut self, cell: &CellRef, formula: &Formula) {
        let entry = self.cells.entry(*cell).or_insert_with(SheetCell::new_empty);
        entry.contents = CellContents::Formula {
            expression: formula.expression.clone(),
            value: formula.value,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_input_number() {
        assert_eq!(SheetCell::from_input("42"), SheetCell::new_number(42.0));
        assert_eq!(SheetCell::from_input(" -1.5 "), SheetCell::new_number(-1.5));
    }

    #[test]
    fn test_from_input_keeps_formatting_as_text() {
        for input in ["1,000.00", "(250)", "$5", "007", "1.50", "=A1+A2", "Total"] {
            assert_eq!(SheetCell::from_input(input), SheetCell::new_text(input), "{input}");
        }
    }

    #[test]
    fn test_from_input_emphasis() {
        assert_eq!(SheetCell::from_input("**80**"), SheetCell::new_number(80.0).computed());
        assert_eq!(
            SheetCell::from_input(" **(1,234)** "),
            SheetCell::new_text("(1,234)").computed()
        );
        assert_eq!(SheetCell::from_input("****").contents, CellContents::Empty);
        assert!(SheetCell::from_input("****").computed);
        assert_eq!(SheetCell::from_input("**"), SheetCell::new_text("**"));
        assert_eq!(SheetCell::from_input("**x"), SheetCell::new_text("**x"));
    }

    #[test]
    fn test_from_input_blank() {
        assert!(SheetCell::from_input("   ").is_empty());
    }

    #[test]
    fn test_literal_guard() {
        assert!(SheetCell::new_text("=1+1").needs_literal_guard());
        assert!(SheetCell::new_text(" @cmd").needs_literal_guard());
        assert!(SheetCell::new_text("\t-x").needs_literal_guard());
        assert!(!SheetCell::new_text("-$5").needs_literal_guard());
        assert!(!SheetCell::new_text("Total").needs_literal_guard());
        assert!(!SheetCell::new_number(-5.0).needs_literal_guard());
    }

    #[test]
    fn test_grid_reader_view() {
        let mut sheet = Sheet::new();
        sheet.set(CellRef::new(2, 3), SheetCell::new_text("$1,000"));
        sheet.set(CellRef::new(4, 5), SheetCell::new_number(7.0).computed());

        assert_eq!(sheet.max_row(), 5);
        assert_eq!(sheet.max_col(), 4);
        assert_eq!(
            sheet.raw_value(&CellRef::new(2, 3)),
            RawValue::Text("$1,000".into())
        );
        assert_eq!(sheet.raw_value(&CellRef::new(1, 1)), RawValue::Empty);
        assert!(sheet.is_computed(&CellRef::new(4, 5)));
        assert!(!sheet.is_computed(&CellRef::new(2, 3)));
        let mut populated = sheet.populated_cells();
        populated.sort();
        assert_eq!(populated, vec![CellRef::new(2, 3), CellRef::new(4, 5)]);
    }

    #[test]
    fn test_set_formula_keeps_emphasis() {
        let mut sheet = Sheet::new();
        let target = CellRef::new(2, 6);
        sheet.set(target, SheetCell::new_number(80.0).computed());
        let formula = Formula {
            target,
            expression: "B4+B5".parse().unwrap(),
            value: 80.0,
        };
        sheet.set_formula(&target, &formula);

        let cell = sheet.get(&target).unwrap();
        assert!(cell.computed);
        assert_eq!(cell.to_input_string(), "=B4+B5");
        assert_eq!(sheet.raw_value(&target), RawValue::Number(80.0));
    }

    #[test]
    fn test_set_value() {
        let mut sheet = Sheet::new();
        let cell = CellRef::new(1, 1);
        sheet.set_value(&cell, RawValue::Text("x".into()));
        assert_eq!(sheet.display(&cell), "x");
    }

    #[test]
    fn test_sorted_cells_row_major() {
        let mut sheet = Sheet::new();
        sheet.set(CellRef::new(2, 2), SheetCell::new_number(3.0));
        sheet.set(CellRef::new(1, 1), SheetCell::new_number(1.0));
        sheet.set(CellRef::new(2, 1), SheetCell::new_number(2.0));
        let order: Vec<String> = sheet
            .sorted_cells()
            .into_iter()
            .map(|(c, _)| c.to_string())
            .collect();
        assert_eq!(order, vec!["A1", "B1", "B2"]);
    }
}
