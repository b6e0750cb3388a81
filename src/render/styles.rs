//! Backend-agnostic descriptions of container and cell styling.

use crate::style::{CssColor, GridLines};

/// How a container is positioned inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Positioning {
    /// Absolutely positioned by the box edges.
    #[default]
    Absolute,
    /// Relatively positioned, filling the parent and clipping overflow.
    Fill,
}

/// One solid border edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderEdge {
    pub color: CssColor,
    pub width: i32,
}

/// Box style of a container element (table container, surface, scrollbar).
///
/// Unset edges are left to the toolkit (`auto` in CSS terms).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoxStyle {
    pub positioning: Positioning,
    pub top: Option<i32>,
    pub right: Option<i32>,
    pub bottom: Option<i32>,
    pub left: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub background: Option<CssColor>,
    /// Uniform border on all four sides.
    pub border: Option<BorderEdge>,
}

/// Border styling of a cell wrapper element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellFrame {
    pub background: CssColor,
    pub top: Option<BorderEdge>,
    pub right: Option<BorderEdge>,
    pub bottom: Option<BorderEdge>,
}

impl CellFrame {
    /// Background of every cell wrapper.
    pub const CELL_BACKGROUND: &'static str = "#ffffff";

    /// Frame for a cell drawn with `lines`.
    ///
    /// Horizontal lines become the bottom border, plus a top border when the
    /// cell overlaps a macro cell above it. Vertical lines become the right
    /// border. Zero-width lines produce no border.
    pub fn new(lines: &GridLines, overlaps_macro: bool) -> Self {
        let horizontal = (lines.h_width > 0).then(|| BorderEdge {
            color: lines.h_color.clone(),
            width: lines.h_width,
        });
        let vertical = (lines.v_width > 0).then(|| BorderEdge {
            color: lines.v_color.clone(),
            width: lines.v_width,
        });
        Self {
            background: Self::CELL_BACKGROUND.to_string(),
            top: horizontal.clone().filter(|_| overlaps_macro),
            right: vertical,
            bottom: horizontal,
        }
    }

    /// Whether the frame draws a top border.
    pub fn has_top_border(&self) -> bool {
        self.top.is_some()
    }
}
