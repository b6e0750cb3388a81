//! Scroll synchronization between the viewport, the content surface and the
//! scrollbars.

use super::StructureController;
use crate::layout::{ScrollInput, ScrollUnit, ScrollbarWidget};
use crate::render::Backend;
use crate::types::Axis;

impl<B: Backend> StructureController<B> {
    /// Scroll one axis and request a render.
    pub fn scroll(&mut self, axis: Axis, unit: ScrollUnit, value: f64) {
        if self.disposed {
            return;
        }
        self.sync_scroll(axis, unit, value);
        self.request_render();
    }

    /// Run the scroll engine for one axis, store the new viewport position
    /// and update that axis' scrollbar.
    pub(crate) fn sync_scroll(&mut self, axis: Axis, unit: ScrollUnit, value: f64) {
        let extent = self
            .backend
            .client_extent(&self.grids.content.container)
            .along(axis);
        let viewport = &mut self.dynamic.viewport;
        let (top_index, pixel_offset, sizes) = match axis {
            Axis::Row => (
                viewport.row_index,
                viewport.row_pixel_offset,
                &mut *self.dynamic.row_heights,
            ),
            Axis::Column => (
                viewport.col_index,
                viewport.col_pixel_offset,
                &mut *self.dynamic.col_widths,
            ),
        };

        let output = self.backend.scroll_engine().process(ScrollInput {
            axis,
            unit,
            value,
            top_index,
            pixel_offset,
            viewport_extent: extent,
            sizes,
            measure: self.config.measure.as_deref_mut(),
        });

        let scrollbar = match axis {
            Axis::Row => {
                viewport.row_index = output.top_index;
                viewport.row_pixel_offset = output.pixel_offset;
                self.v_scrollbar.as_mut()
            }
            Axis::Column => {
                viewport.col_index = output.top_index;
                viewport.col_pixel_offset = output.pixel_offset;
                self.h_scrollbar.as_mut()
            }
        };
        if let Some(scrollbar) = scrollbar {
            scrollbar.set_value(output.scrollbar_position);
            scrollbar.set_thumb_size(output.thumb_size);
        }
    }
}
