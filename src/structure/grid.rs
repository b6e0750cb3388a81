//! Composition of the table container, its surfaces and scrollbars.
//!
//! ```text
//! +--------+---------------------+--+
//! | corner |    column header    |  |
//! +--------+---------------------+ v|
//! |  row   |                     |  |
//! | header |       content       |  |
//! |        |                     |  |
//! +--------+---------------------+--+
//! |           h scrollbar        |  |
//! +------------------------------+--+
//! ```

use crate::config::TableOptions;
use crate::error::Result;
use crate::layout::{ResizeEngine, ResizeParams};
use crate::render::{Backend, BorderEdge, BoxStyle, Positioning};
use crate::style::StyleMetrics;
use crate::types::{Axis, Surface};

/// One surface: its clipping container, layout engine and optional resize
/// engine.
pub(crate) struct GridInstance<B: Backend> {
    pub(crate) container: B::Element,
    pub(crate) layout: B::Layout,
    pub(crate) resize: Option<B::Resize>,
}

impl<B: Backend> GridInstance<B> {
    fn create(
        backend: &mut B,
        parent: &B::Element,
        surface: Surface,
        options: &TableOptions,
        metrics: &StyleMetrics,
    ) -> Result<Self> {
        let container = backend.create_element()?;
        backend.apply_box(&container, &surface_box(surface, options, metrics));
        backend.append_child(parent, &container);
        let layout = backend.create_layout(surface, &container)?;
        let resize = match resize_params(surface, options, metrics) {
            Some(params) => Some(backend.create_resize(surface, &params)?),
            None => None,
        };
        Ok(Self {
            container,
            layout,
            resize,
        })
    }
}

/// The surfaces of one table. Headers and the corner exist only when the
/// options ask for them.
pub(crate) struct Grids<B: Backend> {
    pub(crate) content: GridInstance<B>,
    pub(crate) col_header: Option<GridInstance<B>>,
    pub(crate) row_header: Option<GridInstance<B>>,
    pub(crate) corner: Option<GridInstance<B>>,
}

impl<B: Backend> Grids<B> {
    pub(crate) fn create(
        backend: &mut B,
        parent: &B::Element,
        options: &TableOptions,
        metrics: &StyleMetrics,
    ) -> Result<Self> {
        let content = GridInstance::create(backend, parent, Surface::Content, options, metrics)?;
        let mut grids = Self {
            content,
            col_header: None,
            row_header: None,
            corner: None,
        };
        if let Err(e) = grids.create_headers(backend, parent, options, metrics) {
            grids.dispose_resizers();
            return Err(e);
        }
        Ok(grids)
    }

    fn create_headers(
        &mut self,
        backend: &mut B,
        parent: &B::Element,
        options: &TableOptions,
        metrics: &StyleMetrics,
    ) -> Result<()> {
        if options.has_col_header() {
            let grid = GridInstance::create(backend, parent, Surface::ColumnHeader, options, metrics)?;
            self.col_header = Some(grid);
        }
        if options.has_row_header() {
            let grid = GridInstance::create(backend, parent, Surface::RowHeader, options, metrics)?;
            self.row_header = Some(grid);
        }
        if options.has_corner() {
            let grid = GridInstance::create(backend, parent, Surface::Corner, options, metrics)?;
            self.corner = Some(grid);
        }
        Ok(())
    }

    /// Dispose every resize engine, in creation order.
    pub(crate) fn dispose_resizers(&mut self) {
        for surface in Surface::RENDER_ORDER.iter().rev() {
            if let Some(resize) = self.get_mut(*surface).and_then(|g| g.resize.as_mut()) {
                resize.dispose();
            }
        }
    }

    pub(crate) fn get(&self, surface: Surface) -> Option<&GridInstance<B>> {
        match surface {
            Surface::Content => Some(&self.content),
            Surface::ColumnHeader => self.col_header.as_ref(),
            Surface::RowHeader => self.row_header.as_ref(),
            Surface::Corner => self.corner.as_ref(),
        }
    }

    pub(crate) fn get_mut(&mut self, surface: Surface) -> Option<&mut GridInstance<B>> {
        match surface {
            Surface::Content => Some(&mut self.content),
            Surface::ColumnHeader => self.col_header.as_mut(),
            Surface::RowHeader => self.row_header.as_mut(),
            Surface::Corner => self.corner.as_mut(),
        }
    }
}

/// Style of the outer table container.
pub(crate) fn table_box(metrics: &StyleMetrics) -> BoxStyle {
    BoxStyle {
        positioning: Positioning::Fill,
        border: (metrics.inner_border_width > 0).then(|| BorderEdge {
            color: metrics.inner_border_color.clone(),
            width: metrics.inner_border_width,
        }),
        ..BoxStyle::default()
    }
}

fn v_scrollbar_width(options: &TableOptions, metrics: &StyleMetrics) -> i32 {
    if options.v_scrollbar_visible {
        metrics.v_scrollbar_width
    } else {
        0
    }
}

fn h_scrollbar_width(options: &TableOptions, metrics: &StyleMetrics) -> i32 {
    if options.h_scrollbar_visible {
        metrics.h_scrollbar_width
    } else {
        0
    }
}

/// Style of a surface container inside the table container.
pub(crate) fn surface_box(surface: Surface, options: &TableOptions, metrics: &StyleMetrics) -> BoxStyle {
    let background = Some(metrics.background_color.clone());
    let v_scrollbar = v_scrollbar_width(options, metrics);
    let h_scrollbar = h_scrollbar_width(options, metrics);
    match surface {
        Surface::Content => BoxStyle {
            top: Some(options.col_header_height),
            left: Some(options.row_header_width),
            right: Some(v_scrollbar),
            bottom: Some(h_scrollbar),
            background,
            ..BoxStyle::default()
        },
        Surface::ColumnHeader => BoxStyle {
            top: Some(0),
            left: Some(options.row_header_width),
            right: Some(v_scrollbar),
            height: Some(options.col_header_height),
            background,
            ..BoxStyle::default()
        },
        Surface::RowHeader => BoxStyle {
            top: Some(options.col_header_height),
            left: Some(0),
            bottom: Some(h_scrollbar),
            width: Some(options.row_header_width),
            background,
            ..BoxStyle::default()
        },
        Surface::Corner => BoxStyle {
            top: Some(0),
            left: Some(0),
            width: Some(options.row_header_width),
            height: Some(options.col_header_height),
            ..BoxStyle::default()
        },
    }
}

/// Style of the scrollbar for `axis` (`Row` = vertical).
pub(crate) fn scrollbar_box(axis: Axis, options: &TableOptions, metrics: &StyleMetrics) -> BoxStyle {
    match axis {
        Axis::Row => BoxStyle {
            top: Some(0),
            right: Some(0),
            bottom: Some(h_scrollbar_width(options, metrics)),
            width: Some(metrics.v_scrollbar_width),
            ..BoxStyle::default()
        },
        Axis::Column => BoxStyle {
            left: Some(0),
            right: Some(v_scrollbar_width(options, metrics)),
            bottom: Some(0),
            height: Some(metrics.h_scrollbar_width),
            ..BoxStyle::default()
        },
    }
}

/// Resize configuration of a surface, `None` when nothing on it is resizable.
pub(crate) fn resize_params(
    surface: Surface,
    options: &TableOptions,
    metrics: &StyleMetrics,
) -> Option<ResizeParams> {
    let (row_sizing, col_sizing, row_max_cols) = match surface {
        Surface::Content => (
            options.row_sizing_enable_content,
            options.col_sizing_enable_content,
            None,
        ),
        Surface::ColumnHeader => (false, options.col_sizing_enable_header, None),
        Surface::RowHeader => (
            options.row_sizing_enable_header,
            false,
            options.row_sizing_max_cols_header,
        ),
        Surface::Corner => (false, false, None),
    };
    (row_sizing || col_sizing).then_some(ResizeParams {
        row_sizing,
        col_sizing,
        row_top_width: metrics.row_sizing_top_width,
        row_bottom_width: metrics.row_sizing_bottom_width,
        col_left_width: metrics.col_sizing_left_width,
        col_right_width: metrics.col_sizing_right_width,
        row_max_cols,
    })
}
