use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Static table settings that can be expressed as plain data.
///
/// Deserializes from camelCase JSON (or a JS object through
/// `serde-wasm-bindgen`); every field is optional and defaults to "off".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableOptions {
    /// Column header height in pixels, 0 = no column header.
    pub col_header_height: i32,
    /// Row header width in pixels, 0 = no row header.
    pub row_header_width: i32,
    pub v_scrollbar_visible: bool,
    pub h_scrollbar_visible: bool,
    /// Macro cells are available and the content grid uses vertical cell overlap.
    pub macro_cells_available: bool,
    pub row_sizing_enable_header: bool,
    pub col_sizing_enable_header: bool,
    pub row_sizing_enable_content: bool,
    pub col_sizing_enable_content: bool,
    /// Only the first N row-header columns take part in row resizing.
    pub row_sizing_max_cols_header: Option<usize>,
    /// Second tier of the style cascade, keyed by variable name without prefix.
    pub style_overrides: Option<HashMap<String, String>>,
}

impl TableOptions {
    /// Decode options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn has_col_header(&self) -> bool {
        self.col_header_height > 0
    }

    pub fn has_row_header(&self) -> bool {
        self.row_header_width > 0
    }

    /// The corner exists only when both headers do.
    pub fn has_corner(&self) -> bool {
        self.has_col_header() && self.has_row_header()
    }
}
