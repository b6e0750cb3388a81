//! Routing of completed resize gestures into the size arrays.

use super::{ResizeEvent, StructureController};
use crate::layout::ResizeNotice;
use crate::render::Backend;
use crate::types::{Axis, Surface};

/// What happened to a resize request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// The size was written and a render requested.
    Committed,
    /// A resize handler called `prevent_default`; nothing changed.
    Vetoed,
    /// The index no longer exists; nothing changed.
    OutOfRange,
    /// The controller is disposed.
    Ignored,
}

impl<B: Backend> StructureController<B> {
    /// Apply a resize reported by the resize engine of `surface`.
    ///
    /// Resize handlers run first and may adjust the size or veto the change.
    /// An index past the end of the size array is then dropped.
    /// Sizes are clamped at 0, and row heights at the row's macro cell height.
    pub fn apply_resize(&mut self, surface: Surface, notice: ResizeNotice) -> ResizeOutcome {
        if self.disposed {
            return ResizeOutcome::Ignored;
        }
        let mut event = ResizeEvent::new(surface, notice);
        self.resize_events.dispatch(&mut event);
        if event.is_default_prevented() {
            return ResizeOutcome::Vetoed;
        }

        let count = match notice.axis {
            Axis::Row => self.dynamic.row_count(),
            Axis::Column => self.dynamic.col_count(),
        };
        if notice.index >= count {
            return ResizeOutcome::OutOfRange;
        }

        let size = event.size().max(0);
        match notice.axis {
            Axis::Row => {
                self.dynamic.set_row_height(notice.index, size);
            }
            Axis::Column => {
                if let Some(width) = self.dynamic.col_widths.get_mut(notice.index) {
                    *width = size;
                }
            }
        }
        self.request_render();
        ResizeOutcome::Committed
    }
}
