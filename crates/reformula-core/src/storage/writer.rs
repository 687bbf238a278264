//! Writer for .grd file format

use crate::document::{CellContents, EMPHASIS, Sheet};
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Write a Sheet to a .grd file
pub fn write_grd(path: &Path, sheet: &Sheet) -> Result<()> {
    let content = write_grd_content(sheet);
    fs::write(path, content)?;
    Ok(())
}

/// Write a Sheet to a .grd format string, one cell per line in row-major order
pub fn write_grd_content(sheet: &Sheet) -> String {
    let mut lines = vec!["# Reformula sheet".to_string()];

    for (cell_ref, cell) in sheet.sorted_cells() {
        let value_str = match &cell.contents {
            CellContents::Empty if cell.computed => String::new(),
            CellContents::Empty => continue,
            CellContents::Number(n) => n.to_string(),
            CellContents::Text(s) => format!("\"{}\"", escape_grd_text(s)),
            CellContents::Formula { expression, .. } => format!("={}", expression),
        };

        if cell.computed {
            lines.push(format!("{}: {EMPHASIS}{}{EMPHASIS}", cell_ref, value_str));
        } else {
            lines.push(format!("{}: {}", cell_ref, value_str));
        }
    }

    lines.join("\n") + "\n"
}

fn escape_grd_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
    out
}
