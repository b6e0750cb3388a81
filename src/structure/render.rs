//! Render passes.

use super::{CellLifecycleBroker, StructureController};
use crate::config::ViewportPosition;
use crate::error::Result;
use crate::layout::{LayoutEngine, LayoutParams, MacroCells, ScrollUnit};
use crate::render::{Backend, FrameToken};
use crate::types::{Axis, Surface};

impl<B: Backend> StructureController<B> {
    /// Frame callback. Runs the pending render pass if `token` is the frame
    /// the controller is waiting for.
    ///
    /// Returns `Ok(false)` for stale tokens and after disposal.
    pub fn run_frame(&mut self, token: FrameToken) -> Result<bool> {
        if self.disposed || !self.scheduler.begin_frame(token) {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    /// Render synchronously, dropping the pending frame.
    pub fn render_now(&mut self) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        self.scheduler.cancel(&mut self.backend);
        self.render()
    }

    fn render(&mut self) -> Result<()> {
        self.dynamic.normalize_viewport();
        self.sync_scroll(Axis::Row, ScrollUnit::None, 0.0);
        self.sync_scroll(Axis::Column, ScrollUnit::None, 0.0);
        for surface in Surface::RENDER_ORDER {
            self.render_surface(surface)?;
        }
        log::trace!("Rendered viewport {:?}", self.dynamic.viewport);
        Ok(())
    }

    fn render_surface(&mut self, surface: Surface) -> Result<()> {
        let Self {
            backend,
            config,
            dynamic,
            metrics,
            grids,
            content_overlap,
            ..
        } = self;
        let Some(grid) = grids.get_mut(surface) else {
            return Ok(());
        };

        let options = &config.options;
        let viewport = dynamic.viewport;
        let mut header_rows = [options.col_header_height];
        let mut header_cols = [options.row_header_width];
        let row_header_cols = match dynamic.row_header_col_widths.as_deref_mut() {
            Some(widths) => widths,
            None => header_cols.as_mut_slice(),
        };

        let params = match surface {
            Surface::Content => LayoutParams {
                viewport,
                row_heights: &mut *dynamic.row_heights,
                col_widths: &mut *dynamic.col_widths,
                macro_cells: if options.macro_cells_available {
                    dynamic.macro_cell_heights.as_deref().map(|heights| MacroCells {
                        heights,
                        width: dynamic.macro_cell_width,
                    })
                } else {
                    None
                },
                v_overlap: *content_overlap,
                measure: config.measure.as_deref_mut(),
            },
            Surface::ColumnHeader => LayoutParams {
                viewport: ViewportPosition {
                    row_index: 0,
                    row_pixel_offset: 0,
                    ..viewport
                },
                row_heights: &mut header_rows,
                col_widths: &mut *dynamic.col_widths,
                macro_cells: None,
                v_overlap: 0,
                measure: config.measure.as_deref_mut(),
            },
            Surface::RowHeader => LayoutParams {
                viewport: ViewportPosition {
                    col_index: 0,
                    col_pixel_offset: 0,
                    ..viewport
                },
                row_heights: &mut *dynamic.row_heights,
                col_widths: row_header_cols,
                macro_cells: None,
                v_overlap: 0,
                measure: config.measure.as_deref_mut(),
            },
            Surface::Corner => LayoutParams {
                viewport: ViewportPosition::TOP_LEFT,
                row_heights: &mut header_rows,
                col_widths: row_header_cols,
                macro_cells: None,
                v_overlap: 0,
                measure: None,
            },
        };

        let mut broker = CellLifecycleBroker::new(
            surface,
            &mut *backend,
            metrics.grid_lines(surface),
            &mut *config.content,
            config.release.as_deref_mut(),
        );
        grid.layout.render(params, &mut broker)
    }
}
