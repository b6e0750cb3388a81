//! Virtualized grid layout.
//!
//! Only the rows and columns intersecting the surface's client area get cells.
//! A render pass plans the visible cells, hands each one to a [`CellBroker`]
//! for preparation and positions its wrapper; cells that scrolled out are
//! detached and handed back for release.

use std::collections::HashMap;

use crate::config::{MeasureFn, ViewportPosition};
use crate::error::Result;
use crate::render::{CellFrame, Dom};
use crate::types::{Axis, Extent, LayoutCellKind, Rect, Span};

/// Macro cell data of the content surface.
#[derive(Debug, Clone, Copy)]
pub struct MacroCells<'a> {
    /// One height per row, 0 = no macro cell.
    pub heights: &'a [i32],
    /// Macro cell width, 0 = full surface width.
    pub width: i32,
}

/// Inputs of one layout pass.
///
/// Size arrays are mutable because unmeasured entries are resolved through
/// `measure` while laying out.
pub struct LayoutParams<'a> {
    pub viewport: ViewportPosition,
    pub row_heights: &'a mut [i32],
    pub col_widths: &'a mut [i32],
    pub macro_cells: Option<MacroCells<'a>>,
    /// Vertical overlap of regular cells onto the macro cell above them.
    pub v_overlap: i32,
    pub measure: Option<&'a mut MeasureFn>,
}

/// One planned cell of a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPlacement {
    pub kind: LayoutCellKind,
    pub row: usize,
    /// 0 for macro cells.
    pub col: usize,
    /// Wrapper rectangle relative to the surface container.
    pub rect: Rect,
    /// Pixels this cell overlaps the macro cell above it.
    pub v_overlap: i32,
}

/// A prepared cell: wrapper element, host content inside it and the frame
/// currently applied to the wrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct CellSlot<E> {
    pub wrapper: E,
    pub content: E,
    pub frame: CellFrame,
}

/// Prepares and releases cells on behalf of a layout engine.
pub trait CellBroker<E> {
    /// Prepare the cell at `placement`. `previous` is the slot the cell had
    /// in the last pass, `None` for a cell that just became visible.
    ///
    /// The broker takes `previous` only on success. After an error it is
    /// still in place and the caller keeps the cell.
    fn prepare_cell(
        &mut self,
        placement: &CellPlacement,
        previous: &mut Option<CellSlot<E>>,
    ) -> Result<CellSlot<E>>;

    /// Take back a cell that is no longer visible. Its wrapper is already
    /// detached.
    fn release_cell(&mut self, slot: CellSlot<E>);
}

/// Visible rows and columns of the last layout pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridGeometry {
    pub rows: Vec<Span>,
    pub cols: Vec<Span>,
}

impl GridGeometry {
    /// Visible row containing the y coordinate.
    pub fn row_at(&self, y: i32) -> Option<&Span> {
        self.rows.iter().find(|s| y >= s.start && y < s.end())
    }

    /// Visible column containing the x coordinate.
    pub fn col_at(&self, x: i32) -> Option<&Span> {
        self.cols.iter().find(|s| x >= s.start && x < s.end())
    }
}

/// Per-surface layout engine.
pub trait LayoutEngine<E> {
    /// Lay out the visible cells.
    fn render(&mut self, params: LayoutParams<'_>, cells: &mut dyn CellBroker<E>) -> Result<()>;

    /// Detach and release every cell.
    fn clear(&mut self, cells: &mut dyn CellBroker<E>);

    /// Geometry of the last render.
    fn geometry(&self) -> &GridGeometry;
}

/// Size of element `index`, measuring it first when it is unmeasured.
///
/// The measure callback receives the window of `sizes` starting at `index`
/// so it can resolve several entries at once. Sizes that stay unmeasured
/// count as 0.
pub fn resolve_size(
    sizes: &mut [i32],
    index: usize,
    axis: Axis,
    measure: Option<&mut MeasureFn>,
) -> i32 {
    let current = sizes.get(index).copied().unwrap_or(0);
    if current >= 0 {
        return current;
    }
    if let (Some(measure), Some(window)) = (measure, sizes.get_mut(index..)) {
        measure(axis, index, window);
    }
    sizes.get(index).copied().unwrap_or(0).max(0)
}

/// Visible spans of one axis. `floors` holds per-index minimum sizes (the
/// macro cell heights of rows); a freshly measured size below its floor is
/// raised in `sizes`.
fn visible_spans(
    axis: Axis,
    first: usize,
    offset: i32,
    extent: i32,
    sizes: &mut [i32],
    floors: &[i32],
    mut measure: Option<&mut MeasureFn>,
) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut start = -offset;
    let mut index = first;
    while index < sizes.len() && start < extent {
        let mut size = resolve_size(sizes, index, axis, measure.as_deref_mut());
        let floor = floors.get(index).copied().unwrap_or(0);
        if size < floor {
            size = floor;
            if let Some(entry) = sizes.get_mut(index).filter(|s| **s >= 0) {
                *entry = floor;
            }
        }
        spans.push(Span { index, start, size });
        start += size;
        index += 1;
    }
    spans
}

/// Plan the visible cells of a surface with the given client extent.
///
/// A row with a macro cell gets the macro cell at its top, and its regular
/// cells start `v_overlap` pixels above the macro cell's bottom edge so that
/// their top border covers it.
pub fn plan_cells(
    params: &mut LayoutParams<'_>,
    extent: Extent,
) -> (Vec<CellPlacement>, GridGeometry) {
    let viewport = params.viewport;
    let rows = visible_spans(
        Axis::Row,
        viewport.row_index,
        viewport.row_pixel_offset,
        extent.height,
        params.row_heights,
        params.macro_cells.map(|m| m.heights).unwrap_or_default(),
        params.measure.as_deref_mut(),
    );
    let cols = visible_spans(
        Axis::Column,
        viewport.col_index,
        viewport.col_pixel_offset,
        extent.width,
        params.col_widths,
        &[],
        params.measure.as_deref_mut(),
    );

    let mut cells = Vec::with_capacity(rows.len() * (cols.len() + 1));
    for row in &rows {
        let macro_height = params
            .macro_cells
            .and_then(|m| m.heights.get(row.index).copied())
            .unwrap_or(0)
            .clamp(0, row.size.max(0));

        let (top, height, overlap) = if macro_height > 0 {
            let width = params.macro_cells.map_or(0, |m| m.width);
            cells.push(CellPlacement {
                kind: LayoutCellKind::Macro,
                row: row.index,
                col: 0,
                rect: Rect::new(
                    0,
                    row.start,
                    if width > 0 { width } else { extent.width },
                    macro_height,
                ),
                v_overlap: 0,
            });
            let overlap = params.v_overlap;
            (
                row.start + macro_height - overlap,
                row.size - macro_height + overlap,
                overlap,
            )
        } else {
            (row.start, row.size, 0)
        };

        for col in &cols {
            cells.push(CellPlacement {
                kind: LayoutCellKind::Regular,
                row: row.index,
                col: col.index,
                rect: Rect::new(col.start, top, col.size, height),
                v_overlap: overlap,
            });
        }
    }

    (cells, GridGeometry { rows, cols })
}

type CellKey = (LayoutCellKind, usize, usize);

/// Reference layout engine positioning absolutely placed cell wrappers
/// inside a clipping container.
pub struct VirtualLayout<D: Dom> {
    dom: D,
    container: D::Element,
    cells: HashMap<CellKey, CellSlot<D::Element>>,
    geometry: GridGeometry,
}

impl<D: Dom> VirtualLayout<D> {
    pub fn new(dom: D, container: D::Element) -> Self {
        Self {
            dom,
            container,
            cells: HashMap::new(),
            geometry: GridGeometry::default(),
        }
    }

    /// Number of cells currently rendered.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// The rendered slot of a cell, if visible.
    pub fn cell(&self, kind: LayoutCellKind, row: usize, col: usize) -> Option<&CellSlot<D::Element>> {
        self.cells.get(&(kind, row, col))
    }
}

impl<D: Dom> LayoutEngine<D::Element> for VirtualLayout<D> {
    fn render(
        &mut self,
        mut params: LayoutParams<'_>,
        cells: &mut dyn CellBroker<D::Element>,
    ) -> Result<()> {
        let extent = self.dom.client_extent(&self.container);
        let (planned, geometry) = plan_cells(&mut params, extent);

        let mut previous = std::mem::take(&mut self.cells);
        let mut next = HashMap::with_capacity(planned.len());
        for placement in &planned {
            let key = (placement.kind, placement.row, placement.col);
            let mut old = previous.remove(&key);
            let attached = old.is_some();
            let slot = match cells.prepare_cell(placement, &mut old) {
                Ok(slot) => slot,
                Err(e) => {
                    if let Some(old) = old {
                        next.insert(key, old);
                    }
                    next.extend(previous);
                    self.cells = next;
                    return Err(e);
                }
            };
            if !attached {
                self.dom.append_child(&self.container, &slot.wrapper);
            }
            self.dom.place(&slot.wrapper, placement.rect);
            next.insert(key, slot);
        }

        for (_, slot) in previous {
            self.dom.remove_child(&self.container, &slot.wrapper);
            cells.release_cell(slot);
        }

        self.cells = next;
        self.geometry = geometry;
        Ok(())
    }

    fn clear(&mut self, cells: &mut dyn CellBroker<D::Element>) {
        for (_, slot) in self.cells.drain() {
            self.dom.remove_child(&self.container, &slot.wrapper);
            cells.release_cell(slot);
        }
        self.geometry = GridGeometry::default();
    }

    fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }
}
