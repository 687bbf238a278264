//! CSV import/export functionality

use crate::document::{CellContents, EMPHASIS, Sheet, SheetCell};
use crate::error::{ReformulaError, Result};
use reformula_engine::engine::{CellRef, GridReader};
use std::path::Path;

/// Parse a CSV file into a sheet. Row 1, column 1 is the first field of the first record.
pub fn parse_csv(path: &Path) -> Result<Sheet> {
    let content = std::fs::read_to_string(path)?;
    parse_csv_content(&content)
}

/// Parse CSV content from a string
pub fn parse_csv_content(content: &str) -> Result<Sheet> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut sheet = Sheet::new();
    let mut records = 0usize;
    for (row_idx, record) in reader.records().enumerate() {
        let record = record?;
        records += 1;
        for (col_idx, field) in record.iter().enumerate() {
            let cell = SheetCell::from_input(field);
            // Plain blanks read the same as missing cells.
            if cell.is_empty() && !cell.computed {
                continue;
            }
            sheet.set(CellRef::new(col_idx + 1, row_idx + 1), cell);
        }
    }

    if records == 0 {
        return Err(ReformulaError::EmptyCsv);
    }
    Ok(sheet)
}

/// Export the sheet to a CSV file, from A1 to its last used row and column.
pub fn write_csv(path: &Path, sheet: &Sheet) -> Result<()> {
    let content = write_csv_content(sheet)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Export the sheet to a CSV string
pub fn write_csv_content(sheet: &Sheet) -> Result<String> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    let (max_row, max_col) = (sheet.max_row(), sheet.max_col());

    for row in 1..=max_row {
        let record: Vec<String> = (1..=max_col)
            .map(|col| format_field(sheet.get(&CellRef::new(col, row))))
            .collect();
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReformulaError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        ReformulaError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

/// Format one cell for output. Quoting is left to the csv writer.
fn format_field(cell: Option<&SheetCell>) -> String {
    let Some(cell) = cell else {
        return String::new();
    };

    let value = match &cell.contents {
        // Guard against literal text being read back as a formula.
        CellContents::Text(s) if cell.needs_literal_guard() => format!("'{}", s),
        _ => cell.to_input_string(),
    };

    if cell.computed {
        format!("{EMPHASIS}{value}{EMPHASIS}")
    } else {
        value
    }
}
