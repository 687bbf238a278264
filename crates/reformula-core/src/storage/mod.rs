//! Sheet persistence.
//!
//! - `.csv` - plain grid, computed cells wrapped in `**…**`
//! - `.grd` - `CELLREF: VALUE` lines

pub mod csv;
mod parser;
mod writer;

use std::path::Path;

use crate::document::Sheet;
use crate::error::{ReformulaError, Result};

pub use self::csv::{parse_csv, parse_csv_content, write_csv, write_csv_content};
pub use parser::{parse_grd, parse_grd_content};
pub use writer::{write_grd, write_grd_content};

/// Supported file formats, keyed by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Csv,
    Grd,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Format> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") => Ok(Format::Csv),
            Some("grd") => Ok(Format::Grd),
            _ => Err(ReformulaError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Read a sheet in the format its extension names.
pub fn load_sheet(path: &Path) -> Result<Sheet> {
    match Format::from_path(path)? {
        Format::Csv => parse_csv(path),
        Format::Grd => parse_grd(path),
    }
}

/// Write a sheet in the format its extension names.
pub fn save_sheet(path: &Path, sheet: &Sheet) -> Result<()> {
    match Format::from_path(path)? {
        Format::Csv => write_csv(path, sheet),
        Format::Grd => write_grd(path, sheet),
    }
}
