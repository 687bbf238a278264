use super::Document;
use crate::error::{ReformulaError, Result};
use crate::storage::{load_sheet, save_sheet};
use std::path::{Path, PathBuf};
use tracing::info;

impl Document {
    /// Save to the current file path. The format follows its extension.
    pub fn save_file(&mut self) -> Result<PathBuf> {
        let Some(path) = &self.file_path else {
            return Err(ReformulaError::NoFilePath);
        };

        save_sheet(path, &self.sheet)?;
        self.modified = false;
        Ok(path.clone())
    }

    /// Save to `path` and make it the current file path.
    pub fn save_as(&mut self, path: &Path) -> Result<PathBuf> {
        save_sheet(path, &self.sheet)?;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(path.to_path_buf())
    }

    /// Load from file
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        // Parse fully before touching state so a failed load leaves the document intact.
        let sheet = load_sheet(path)?;
        info!(path = %path.display(), cells = sheet.len(), "sheet loaded");

        self.sheet = sheet;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }
}
