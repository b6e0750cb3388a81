//! Structured error types for gridtable.
//!
//! Only contract violations and construction problems are errors. Stale resize
//! handles, host vetoes and post-disposal input are ordinary control flow and
//! never show up here.

use crate::types::{LayoutCellKind, Surface};

/// All errors the structure controller can surface to its host.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A layout engine asked for a cell kind its surface cannot hold.
    #[error("Unexpected {kind:?} cell on the {surface:?} surface")]
    UnexpectedCellKind {
        surface: Surface,
        kind: LayoutCellKind,
    },

    /// The content factory answered "reuse" but there was nothing to reuse.
    #[error("Content factory reused content for cell ({row}, {col}) that has no previous content")]
    ReuseWithoutContent { row: usize, col: usize },

    /// Inconsistent dynamic configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Table options could not be decoded.
    #[error("Options: {0}")]
    Options(#[from] serde_json::Error),

    /// The backend failed to create or attach a primitive element.
    #[error("DOM error: {0}")]
    Dom(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(target_arch = "wasm32")]
impl From<TableError> for wasm_bindgen::JsValue {
    fn from(e: TableError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
