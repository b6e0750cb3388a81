use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Scroll/size axis.
///
/// `Row` is the vertical axis (row heights, vertical scrollbar), `Column` the
/// horizontal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    Row,
    Column,
}

impl FromStr for Axis {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "row" | "vertical" => Ok(Self::Row),
            "column" | "col" | "horizontal" => Ok(Self::Column),
            _ => Err(TableError::Config(format!("Unknown axis {s:?}"))),
        }
    }
}

/// One of the four coordinated grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Surface {
    /// Main scrolling content area (always present).
    Content,
    /// Column header above the content, scrolls horizontally.
    ColumnHeader,
    /// Row header left of the content, scrolls vertically.
    RowHeader,
    /// Top-left corner, never scrolls.
    Corner,
}

impl Surface {
    /// Render order: corner, column header, row header, content.
    pub const RENDER_ORDER: [Surface; 4] = [
        Surface::Corner,
        Surface::ColumnHeader,
        Surface::RowHeader,
        Surface::Content,
    ];

    /// Map a layout-level cell kind onto the host-facing kind for this surface.
    ///
    /// Header surfaces have no macro cells, so a macro cell reported there is a
    /// layout contract violation and yields `None`.
    pub fn cell_kind(self, kind: LayoutCellKind) -> Option<CellKind> {
        match (self, kind) {
            (Self::Content, LayoutCellKind::Regular) => Some(CellKind::Regular),
            (Self::Content, LayoutCellKind::Macro) => Some(CellKind::Macro),
            (Self::ColumnHeader, LayoutCellKind::Regular) => Some(CellKind::ColumnHeader),
            (Self::RowHeader, LayoutCellKind::Regular) => Some(CellKind::RowHeader),
            (Self::Corner, LayoutCellKind::Regular) => Some(CellKind::Corner),
            (_, LayoutCellKind::Macro) => None,
        }
    }
}

/// Cell kind as seen by the host content factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellKind {
    Regular,
    Macro,
    ColumnHeader,
    RowHeader,
    Corner,
}

impl CellKind {
    /// Numeric code used across the JavaScript boundary.
    pub fn code(self) -> u8 {
        match self {
            Self::Regular => 0,
            Self::Macro => 1,
            Self::ColumnHeader => 2,
            Self::RowHeader => 3,
            Self::Corner => 4,
        }
    }
}

/// Cell kind as produced by a layout engine, before surface mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutCellKind {
    Regular,
    Macro,
}
