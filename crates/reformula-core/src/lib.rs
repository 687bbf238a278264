//! reformula-core - UI-agnostic document model, storage and configuration.

pub mod config;
pub mod document;
pub mod error;
pub mod storage;

pub use config::{Config, RegionConfig};
pub use document::{CellContents, Document, Sheet, SheetCell};
pub use error::{ReformulaError, Result};

pub use reformula_engine::engine::{CellRef, Formula, Resolution, SearchConfig};
