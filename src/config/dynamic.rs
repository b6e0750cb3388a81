use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

/// Size value for a row or column whose size has not been measured yet.
pub const UNMEASURED: i32 = -1;

/// Top-left visible cell plus the sub-cell pixel offsets on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportPosition {
    pub row_index: usize,
    pub col_index: usize,
    pub row_pixel_offset: i32,
    pub col_pixel_offset: i32,
}

impl ViewportPosition {
    /// The position showing the first row and column flush with the edges.
    pub const TOP_LEFT: Self = Self {
        row_index: 0,
        col_index: 0,
        row_pixel_offset: 0,
        col_pixel_offset: 0,
    };

    /// Roll excess (or negative) pixel offsets into the indices so that each
    /// offset is strictly smaller than the size of the element it refers to.
    ///
    /// Unmeasured sizes count as 0 here. The offset on the last element is
    /// clamped instead of rolled.
    pub fn normalize(&mut self, row_heights: &[i32], col_widths: &[i32]) {
        normalize_axis(&mut self.row_index, &mut self.row_pixel_offset, row_heights);
        normalize_axis(&mut self.col_index, &mut self.col_pixel_offset, col_widths);
    }
}

fn normalize_axis(index: &mut usize, offset: &mut i32, sizes: &[i32]) {
    if sizes.is_empty() {
        *index = 0;
        *offset = 0;
        return;
    }
    let last = sizes.len() - 1;
    *index = (*index).min(last);
    let size_at = |i: usize| sizes.get(i).copied().unwrap_or(0).max(0);
    while *offset < 0 && *index > 0 {
        *index -= 1;
        *offset += size_at(*index);
    }
    if *offset < 0 {
        *offset = 0;
    }
    while *index < last && *offset >= size_at(*index) {
        *offset -= size_at(*index);
        *index += 1;
    }
    if *offset >= size_at(*index) {
        *offset = (size_at(*index) - 1).max(0);
    }
}

/// Mutable table state shared between the host and the controller.
///
/// The size arrays have a fixed length for the lifetime of the value; only
/// their elements can change. Macro cell heights never exceed the height of
/// their row.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicConfig {
    pub viewport: ViewportPosition,
    pub(crate) row_heights: Box<[i32]>,
    pub(crate) col_widths: Box<[i32]>,
    pub(crate) macro_cell_heights: Option<Box<[i32]>>,
    /// Width of macro cells in pixels, 0 = full content width.
    pub macro_cell_width: i32,
    /// Widths of the row header columns, `None` = one column spanning the
    /// whole configured row header width.
    pub row_header_col_widths: Option<Vec<i32>>,
}

impl DynamicConfig {
    pub fn new(row_heights: Vec<i32>, col_widths: Vec<i32>) -> Self {
        Self {
            viewport: ViewportPosition::TOP_LEFT,
            row_heights: row_heights.into_boxed_slice(),
            col_widths: col_widths.into_boxed_slice(),
            macro_cell_heights: None,
            macro_cell_width: 0,
            row_header_col_widths: None,
        }
    }

    /// Uniform sizes, handy for hosts with fixed-size rows and columns.
    pub fn uniform(rows: usize, row_height: i32, cols: usize, col_width: i32) -> Self {
        Self::new(vec![row_height; rows], vec![col_width; cols])
    }

    /// Attach macro cell heights (one per row, 0 = no macro cell).
    pub fn with_macro_cells(mut self, heights: Vec<i32>, width: i32) -> Result<Self> {
        if heights.len() != self.row_heights.len() {
            return Err(TableError::Config(format!(
                "{} macro cell heights for {} rows",
                heights.len(),
                self.row_heights.len()
            )));
        }
        for (row, (&macro_height, &row_height)) in
            heights.iter().zip(self.row_heights.iter()).enumerate()
        {
            if macro_height < 0 || (row_height >= 0 && macro_height > row_height) {
                return Err(TableError::Config(format!(
                    "macro cell height {macro_height} of row {row} exceeds row height {row_height}"
                )));
            }
        }
        self.macro_cell_heights = Some(heights.into_boxed_slice());
        self.macro_cell_width = width;
        Ok(self)
    }

    /// Attach explicit row header column widths.
    #[must_use]
    pub fn with_row_header_columns(mut self, widths: Vec<i32>) -> Self {
        self.row_header_col_widths = Some(widths);
        self
    }

    pub fn row_count(&self) -> usize {
        self.row_heights.len()
    }

    pub fn col_count(&self) -> usize {
        self.col_widths.len()
    }

    pub fn row_heights(&self) -> &[i32] {
        &self.row_heights
    }

    /// Mutable access to the row heights. The host must request a render after
    /// editing and must keep each height at or above the row's macro height.
    pub fn row_heights_mut(&mut self) -> &mut [i32] {
        &mut self.row_heights
    }

    pub fn col_widths(&self) -> &[i32] {
        &self.col_widths
    }

    pub fn col_widths_mut(&mut self) -> &mut [i32] {
        &mut self.col_widths
    }

    pub fn macro_cell_heights(&self) -> Option<&[i32]> {
        self.macro_cell_heights.as_deref()
    }

    /// Macro cell height of a row, 0 when the row has none.
    pub fn macro_cell_height(&self, row: usize) -> i32 {
        self.macro_cell_heights
            .as_deref()
            .and_then(|h| h.get(row))
            .copied()
            .unwrap_or(0)
    }

    /// Set a row height, never below the row's macro cell height.
    ///
    /// Returns `false` for an out-of-range row.
    pub fn set_row_height(&mut self, row: usize, height: i32) -> bool {
        let floor = self.macro_cell_height(row);
        match self.row_heights.get_mut(row) {
            Some(h) => {
                *h = height.max(floor);
                true
            }
            None => false,
        }
    }

    /// Open, resize or close (height 0) the macro cell of a row.
    ///
    /// The row height changes by the same delta so the regular part of the row
    /// keeps its size. An unmeasured row stays unmeasured; the layout raises it
    /// to the macro cell height once measured. Returns `false` when the row is
    /// out of range or macro cells are not configured.
    pub fn set_macro_cell_height(&mut self, row: usize, height: i32) -> bool {
        let height = height.max(0);
        let Some(macro_height) = self
            .macro_cell_heights
            .as_deref_mut()
            .and_then(|h| h.get_mut(row))
        else {
            return false;
        };
        let delta = height - *macro_height;
        *macro_height = height;
        if let Some(row_height) = self.row_heights.get_mut(row).filter(|h| **h != UNMEASURED) {
            *row_height = ((*row_height).max(0) + delta).max(height);
        }
        true
    }

    /// Normalize the viewport against the current size arrays.
    pub fn normalize_viewport(&mut self) {
        self.viewport.normalize(&self.row_heights, &self.col_widths);
    }

    /// Decode and validate a [`DynamicConfigData`] JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str::<DynamicConfigData>(json)?.try_into()
    }
}

/// Plain-data form of [`DynamicConfig`], as passed by JavaScript hosts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DynamicConfigData {
    pub row_heights: Vec<i32>,
    pub col_widths: Vec<i32>,
    pub macro_cell_heights: Option<Vec<i32>>,
    pub macro_cell_width: i32,
    pub row_header_col_widths: Option<Vec<i32>>,
    pub viewport: Option<ViewportPosition>,
}

impl TryFrom<DynamicConfigData> for DynamicConfig {
    type Error = TableError;

    fn try_from(data: DynamicConfigData) -> Result<Self> {
        let mut config = Self::new(data.row_heights, data.col_widths);
        if let Some(heights) = data.macro_cell_heights {
            config = config.with_macro_cells(heights, data.macro_cell_width)?;
        }
        config.row_header_col_widths = data.row_header_col_widths;
        if let Some(viewport) = data.viewport {
            config.viewport = viewport;
        }
        Ok(config)
    }
}
