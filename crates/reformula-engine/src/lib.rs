//! reformula-engine - formula inference over value-only grids.

pub mod engine;
