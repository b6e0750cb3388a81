//! Layout, scroll and resize engines driven by the structure controller.
//!
//! This module handles:
//! - Computing visible rows, columns and cell rectangles for one surface
//! - Translating scroll commands into a new top index and scrollbar state
//! - Detecting drags on row/column boundaries and reporting new sizes
//!
//! Each concern is a trait with a reference implementation. Backends may swap
//! in their own engines; the controller only relies on the traits.

mod grid_layout;
mod resize;
mod scroll;

pub use grid_layout::{
    plan_cells, resolve_size, CellBroker, CellPlacement, CellSlot, GridGeometry, LayoutEngine,
    LayoutParams, MacroCells, VirtualLayout,
};
pub use resize::{DragResize, PointerInput, PointerPhase, ResizeEngine, ResizeNotice, ResizeParams};
pub use scroll::{
    decode_key, decode_scrollbar, decode_wheel, KeyInput, NavKey, ScrollCommand, ScrollEngine,
    ScrollInput, ScrollOutput, ScrollUnit, ScrollbarInput, ScrollbarWidget, StandardScroll,
    WheelInput,
};
