use super::StyleCascade;
use crate::types::Surface;

/// A CSS color string (e.g., "#AAAAAA", "rgba(0, 0, 0, 0.5)")
pub type CssColor = String;

/// Grid line colors and widths of one surface.
///
/// Vertical lines are drawn as the right border of each cell, horizontal lines
/// as the bottom border (and as the top border of cells overlapping a macro
/// cell).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLines {
    pub v_color: CssColor,
    pub h_color: CssColor,
    pub v_width: i32,
    pub h_width: i32,
}

/// Resolved style values, computed once per controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleMetrics {
    /// Background of the grid surfaces.
    pub background_color: CssColor,
    /// Border around the whole table container.
    pub inner_border_color: CssColor,
    pub inner_border_width: i32,
    pub content: GridLines,
    pub col_header: GridLines,
    pub row_header: GridLines,
    pub corner: GridLines,
    pub v_scrollbar_width: i32,
    pub h_scrollbar_width: i32,
    /// Row resize hit zone above a row boundary.
    pub row_sizing_top_width: i32,
    /// Row resize hit zone below a row boundary.
    pub row_sizing_bottom_width: i32,
    /// Column resize hit zone left of a column boundary.
    pub col_sizing_left_width: i32,
    /// Column resize hit zone right of a column boundary.
    pub col_sizing_right_width: i32,
}

impl StyleMetrics {
    /// Resolve every metric through the cascade.
    pub fn resolve(cascade: &StyleCascade<'_>) -> Self {
        let grid_line_color = cascade.str("gridLineColor", "#AAAAAA");
        let grid_line_width = cascade.px("gridLineWidth", 1);
        let header_color = cascade.str("headerGridLineColor", "#888888");
        let header_width = cascade.px("headerGridLineWidth", grid_line_width);
        let header_lines = |prefix: &str| GridLines {
            v_color: cascade.str(&format!("{prefix}VGridLineColor"), &header_color),
            h_color: cascade.str(&format!("{prefix}HGridLineColor"), &header_color),
            v_width: cascade.px(&format!("{prefix}VGridLineWidth"), header_width),
            h_width: cascade.px(&format!("{prefix}HGridLineWidth"), header_width),
        };
        let scrollbar_width = cascade.px("scrollbarWidth", 15);

        Self {
            background_color: cascade.str("backgroundColor", "#fdfdfd"),
            inner_border_color: cascade.str("innerBorderColor", "#404040"),
            inner_border_width: cascade.px("innerBorderWidth", 0),
            content: GridLines {
                v_color: cascade.str("vGridLineColor", &grid_line_color),
                h_color: cascade.str("hGridLineColor", &grid_line_color),
                v_width: cascade.px("vGridLineWidth", grid_line_width),
                h_width: cascade.px("hGridLineWidth", grid_line_width),
            },
            col_header: header_lines("colHeader"),
            row_header: header_lines("rowHeader"),
            corner: header_lines("tlcHeader"),
            v_scrollbar_width: cascade.px("vScrollbarWidth", scrollbar_width),
            h_scrollbar_width: cascade.px("hScrollbarWidth", scrollbar_width),
            row_sizing_top_width: cascade.px("rowSizingTopWidth", 6),
            row_sizing_bottom_width: cascade.px("rowSizingBottomWidth", 5),
            col_sizing_left_width: cascade.px("colSizingLeftWidth", 6),
            col_sizing_right_width: cascade.px("colSizingRightWidth", 5),
        }
    }

    /// Grid lines used for the cells of a surface.
    pub fn grid_lines(&self, surface: Surface) -> &GridLines {
        match surface {
            Surface::Content => &self.content,
            Surface::ColumnHeader => &self.col_header,
            Surface::RowHeader => &self.row_header,
            Surface::Corner => &self.corner,
        }
    }
}

impl Default for StyleMetrics {
    fn default() -> Self {
        Self::resolve(&StyleCascade::new(&super::NoStyleSource, None))
    }
}
