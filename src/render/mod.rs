//! Seams between the structure controller and the element toolkit it drives.
//!
//! This module provides:
//! - [`Dom`]: primitive element creation, attachment and styling
//! - [`FrameRequester`]: display-frame callbacks for the render scheduler
//! - [`Backend`]: factories for the per-surface layout and resize engines and
//!   the scrollbar widgets
//! - Backend-agnostic style descriptions ([`BoxStyle`], [`CellFrame`])

pub mod backend;
pub mod styles;

pub use backend::{Backend, Dom, ElementStyle, FrameRequester, FrameToken};
pub use styles::{BorderEdge, BoxStyle, CellFrame, Positioning};
