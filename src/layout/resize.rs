//! Interactive row and column resizing.
//!
//! A resize engine watches pointer input on one surface. A press near a row
//! or column boundary starts a drag; the release reports the new size. The
//! engine never writes sizes itself, the controller decides whether the
//! change is applied.

use crate::layout::GridGeometry;
use crate::types::{Axis, Span};

/// Resize configuration of one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeParams {
    pub row_sizing: bool,
    pub col_sizing: bool,
    /// Hit zone above a row boundary.
    pub row_top_width: i32,
    /// Hit zone below a row boundary.
    pub row_bottom_width: i32,
    /// Hit zone left of a column boundary.
    pub col_left_width: i32,
    /// Hit zone right of a column boundary.
    pub col_right_width: i32,
    /// Row drags only start within the first N columns.
    pub row_max_cols: Option<usize>,
}

/// Completed resize gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeNotice {
    pub axis: Axis,
    pub index: usize,
    /// Requested size in pixels, never negative.
    pub size: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Pointer event in coordinates relative to the surface container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerInput {
    pub phase: PointerPhase,
    pub x: i32,
    pub y: i32,
}

impl PointerInput {
    pub fn new(phase: PointerPhase, x: i32, y: i32) -> Self {
        Self { phase, x, y }
    }
}

/// Per-surface resize engine.
pub trait ResizeEngine {
    /// Feed one pointer event. Returns a notice when a drag completes.
    fn pointer(&mut self, input: &PointerInput, geometry: &GridGeometry) -> Option<ResizeNotice>;

    /// Whether a drag is in progress (the host should capture the pointer).
    fn is_dragging(&self) -> bool;

    /// Stop reacting to input for good.
    fn dispose(&mut self);
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    axis: Axis,
    index: usize,
    origin: i32,
    start_size: i32,
    size: i32,
}

/// Reference resize engine driven by boundary drags.
#[derive(Debug, Clone)]
pub struct DragResize {
    params: ResizeParams,
    drag: Option<Drag>,
    disposed: bool,
}

impl DragResize {
    pub fn new(params: ResizeParams) -> Self {
        Self {
            params,
            drag: None,
            disposed: false,
        }
    }

    pub fn params(&self) -> &ResizeParams {
        &self.params
    }

    /// Size the current drag would commit, if dragging.
    pub fn pending_size(&self) -> Option<i32> {
        self.drag.map(|d| d.size)
    }

    /// Boundary nearest to `pos` whose hit zone contains it.
    fn boundary_at(spans: &[Span], pos: i32, before: i32, after: i32) -> Option<&Span> {
        spans
            .iter()
            .filter(|s| pos >= s.end() - before && pos < s.end() + after)
            .min_by_key(|s| (pos - s.end()).abs())
    }

    fn hit(&self, x: i32, y: i32, geometry: &GridGeometry) -> Option<(Axis, Span)> {
        let p = &self.params;
        if p.row_sizing {
            let in_cols = match p.row_max_cols {
                Some(n) => geometry.col_at(x).is_some_and(|c| c.index < n),
                None => true,
            };
            if in_cols {
                if let Some(span) =
                    Self::boundary_at(&geometry.rows, y, p.row_top_width, p.row_bottom_width)
                {
                    return Some((Axis::Row, *span));
                }
            }
        }
        if p.col_sizing {
            if let Some(span) =
                Self::boundary_at(&geometry.cols, x, p.col_left_width, p.col_right_width)
            {
                return Some((Axis::Column, *span));
            }
        }
        None
    }
}

impl ResizeEngine for DragResize {
    fn pointer(&mut self, input: &PointerInput, geometry: &GridGeometry) -> Option<ResizeNotice> {
        if self.disposed {
            return None;
        }
        let along = |axis: Axis| match axis {
            Axis::Row => input.y,
            Axis::Column => input.x,
        };
        match input.phase {
            PointerPhase::Down => {
                self.drag = self.hit(input.x, input.y, geometry).map(|(axis, span)| Drag {
                    axis,
                    index: span.index,
                    origin: along(axis),
                    start_size: span.size,
                    size: span.size,
                });
                None
            }
            PointerPhase::Move => {
                if let Some(drag) = self.drag.as_mut() {
                    drag.size = (drag.start_size + along(drag.axis) - drag.origin).max(0);
                }
                None
            }
            PointerPhase::Up => {
                let drag = self.drag.take()?;
                Some(ResizeNotice {
                    axis: drag.axis,
                    index: drag.index,
                    size: (drag.start_size + along(drag.axis) - drag.origin).max(0),
                })
            }
            PointerPhase::Cancel => {
                self.drag = None;
                None
            }
        }
    }

    fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.drag = None;
    }
}
