use crate::error::Result;
use std::path::{Path, PathBuf};

use super::Sheet;

/// UI-agnostic document: a sheet plus where it came from.
pub struct Document {
    /// The cells as loaded, plus any formulas inferred since
    pub sheet: Sheet,
    /// Current file path
    pub file_path: Option<PathBuf>,
    /// Whether the sheet has been modified since it was loaded or saved
    pub modified: bool,
}

impl Document {
    /// Create an empty document.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new() -> Self {
        Document {
            sheet: Sheet::new(),
            file_path: None,
            modified: false,
        }
    }

    /// Create a document from an existing file.
    pub fn open(path: &Path) -> Result<Self> {
        let mut doc = Self::new();
        doc.load_file(path)?;
        Ok(doc)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
