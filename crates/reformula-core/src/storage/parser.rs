//! Parser for .grd file format

use crate::document::{EMPHASIS, Sheet, SheetCell};
use crate::error::{ReformulaError, Result};
use reformula_engine::engine::CellRef;
use std::fs;
use std::path::Path;

/// Parse a .grd file and return a Sheet
pub fn parse_grd(path: &Path) -> Result<Sheet> {
    let content = fs::read_to_string(path)?;
    parse_grd_content(&content)
}

/// Parse .grd content from a string
pub fn parse_grd_content(content: &str) -> Result<Sheet> {
    let mut sheet = Sheet::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Parse "CELLREF: VALUE" format
        let Some((cell_ref_str, value_str)) = line.split_once(':') else {
            return Err(ReformulaError::Parse {
                line: line_num + 1,
                message: "Expected 'CELLREF: VALUE' format".to_string(),
            });
        };

        let cell_ref_str = cell_ref_str.trim();
        let cell_ref = CellRef::from_str(cell_ref_str).ok_or_else(|| ReformulaError::Parse {
            line: line_num + 1,
            message: format!("Invalid cell reference: {}", cell_ref_str),
        })?;

        let cell = parse_cell_value(value_str, line_num + 1)?;
        sheet.set(cell_ref, cell);
    }

    Ok(sheet)
}

/// Parse a cell value string into a SheetCell
fn parse_cell_value(value: &str, line_num: usize) -> Result<SheetCell> {
    let value = value.trim();

    let (value, computed) = match value
        .strip_prefix(EMPHASIS)
        .and_then(|v| v.strip_suffix(EMPHASIS))
    {
        Some(inner) => (inner.trim(), true),
        None => (value, false),
    };

    let cell = parse_plain_value(value, line_num)?;
    Ok(if computed { cell.computed() } else { cell })
}

fn parse_plain_value(value: &str, line_num: usize) -> Result<SheetCell> {
    if value.is_empty() {
        return Ok(SheetCell::new_empty());
    }

    // Formulas are read back as text; inference starts from values only.
    if value.starts_with('=') {
        return Ok(SheetCell::new_text(value));
    }

    // Quoted string: starts and ends with '"'
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        let text = &value[1..value.len() - 1];
        let text = unescape_grd_text(text);
        return Ok(SheetCell::new_text(&text));
    }

    if let Ok(n) = value.parse::<f64>() {
        return Ok(SheetCell::new_number(n));
    }

    Err(ReformulaError::Parse {
        line: line_num,
        message: format!("Invalid value: {}. Use quotes for text.", value),
    })
}

fn unescape_grd_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some(next @ ('\\' | '"')) => out.push(next),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CellContents;
    use pretty_assertions::assert_eq;

    fn cell(sheet: &Sheet, name: &str) -> SheetCell {
        sheet.get(&CellRef::from_str(name).unwrap()).cloned().unwrap()
    }

    #[test]
    fn test_parse_number_and_text() {
        let sheet = parse_grd_content("A1: 42\nB1: \"Hello\"").unwrap();
        assert_eq!(cell(&sheet, "A1"), SheetCell::new_number(42.0));
        assert_eq!(cell(&sheet, "B1"), SheetCell::new_text("Hello"));
    }

    #[test]
    fn test_parse_text_escapes() {
        let sheet = parse_grd_content(r#"A1: "He said \"hi\" \\ \n""#).unwrap();
        assert_eq!(cell(&sheet, "A1").contents, CellContents::Text(r#"He said "hi" \ \n"#.into()));
    }

    #[test]
    fn test_parse_emphasis() {
        let sheet = parse_grd_content("B6: **80**\nB7: **\"(1,234)\"**").unwrap();
        assert_eq!(cell(&sheet, "B6"), SheetCell::new_number(80.0).computed());
        assert_eq!(cell(&sheet, "B7"), SheetCell::new_text("(1,234)").computed());
    }

    #[test]
    fn test_formula_line_is_text() {
        let sheet = parse_grd_content("B6: **=B4+B5**").unwrap();
        assert_eq!(cell(&sheet, "B6"), SheetCell::new_text("=B4+B5").computed());
    }

    #[test]
    fn test_skip_comments_and_empty_lines() {
        let content = r#"
# A comment
A1: 42

# Another comment

B1: 100
"#;
        assert_eq!(parse_grd_content(content).unwrap().len(), 2);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = parse_grd_content("A1: 1\nnot a cell\n").unwrap_err();
        assert!(matches!(err, ReformulaError::Parse { line: 2, .. }));

        let err = parse_grd_content("A1: 1\n\nZZ: 3\n").unwrap_err();
        assert!(matches!(err, ReformulaError::Parse { line: 3, .. }));

        let err = parse_grd_content("A1: hello").unwrap_err();
        assert!(matches!(err, ReformulaError::Parse { line: 1, .. }));
    }
}
