//! gridtable - structure controller for virtualized tables
//!
//! Composes up to four coordinated grids (content, column header, row header
//! and top-left corner) plus optional scrollbars and keeps them in sync:
//! - Only visible cells exist; their content comes from a host factory and is
//!   reused or released as the viewport moves
//! - Index-based scrolling with line, page and absolute units
//! - Interactive row and column resizing with vetoable resize events
//! - Macro cells: full-width cells stacked above a row's regular cells
//! - Renders coalesced into one pass per display frame
//!
//! The controller is headless: it drives any toolkit implementing
//! [`render::Backend`]. The browser backend and the `GridTable` JavaScript
//! class live in the `web` module (wasm32 only).
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridTable } from 'gridtable';
//! await init();
//! const table = new GridTable(root, options, { rowHeights, colWidths }, content, release);
//! table.scroll("row", "page", 1);
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod render;
pub mod structure;
pub mod style;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod web;

use wasm_bindgen::prelude::*;

pub use config::{
    CellContent, CellRequest, DynamicConfig, DynamicConfigData, StaticConfig, TableOptions,
    ViewportPosition, UNMEASURED,
};
pub use error::{Result, TableError};
pub use layout::{ScrollUnit, VirtualLayout};
pub use structure::{ResizeEvent, ResizeOutcome, StructureController, Subscription};
pub use style::StyleMetrics;
pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
