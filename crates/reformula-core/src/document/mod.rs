//! Document state and logic (UI-agnostic).

mod io;
mod ops;
mod sheet;
mod state;

pub use sheet::{CellContents, EMPHASIS, Sheet, SheetCell};
pub use state::Document;
