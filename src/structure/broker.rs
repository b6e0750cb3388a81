//! Cell lifecycle: wrapper creation, content hand-off and release.
//!
//! Every cell is a wrapper element owned by the table holding exactly one
//! content element owned by the host. The wrapper draws the grid lines as its
//! borders; the content gets the area inside them.

use crate::config::{CellContent, CellRequest, ContentFactory, ReleaseFn};
use crate::error::{Result, TableError};
use crate::layout::{CellBroker, CellPlacement, CellSlot};
use crate::render::{CellFrame, Dom};
use crate::style::GridLines;
use crate::types::Surface;

/// Broker for the cells of one surface during one pass.
pub(crate) struct CellLifecycleBroker<'a, D: Dom> {
    surface: Surface,
    dom: &'a mut D,
    lines: &'a GridLines,
    content: &'a mut ContentFactory<D::Element>,
    release: Option<&'a mut ReleaseFn<D::Element>>,
}

impl<'a, D: Dom> CellLifecycleBroker<'a, D> {
    pub(crate) fn new(
        surface: Surface,
        dom: &'a mut D,
        lines: &'a GridLines,
        content: &'a mut ContentFactory<D::Element>,
        release: Option<&'a mut ReleaseFn<D::Element>>,
    ) -> Self {
        Self {
            surface,
            dom,
            lines,
            content,
            release,
        }
    }

    fn release_content(&mut self, content: D::Element) {
        if let Some(release) = self.release.as_mut() {
            release(content);
        }
    }
}

impl<D: Dom> CellBroker<D::Element> for CellLifecycleBroker<'_, D> {
    fn prepare_cell(
        &mut self,
        placement: &CellPlacement,
        previous: &mut Option<CellSlot<D::Element>>,
    ) -> Result<CellSlot<D::Element>> {
        let kind = self
            .surface
            .cell_kind(placement.kind)
            .ok_or(TableError::UnexpectedCellKind {
                surface: self.surface,
                kind: placement.kind,
            })?;
        let frame = CellFrame::new(self.lines, placement.v_overlap > 0);

        let answer = (self.content)(&CellRequest {
            kind,
            row: placement.row,
            col: placement.col,
            width: (placement.rect.width - self.lines.v_width).max(0),
            height: (placement.rect.height - self.lines.h_width - placement.v_overlap).max(0),
            previous: previous.as_ref().map(|slot| &slot.content),
        })?;

        match (answer, previous.take()) {
            (CellContent::Reused, Some(mut slot)) => {
                if slot.frame != frame {
                    self.dom.apply_frame(&slot.wrapper, &frame);
                    slot.frame = frame;
                }
                Ok(slot)
            }
            (CellContent::Reused, None) => Err(TableError::ReuseWithoutContent {
                row: placement.row,
                col: placement.col,
            }),
            (CellContent::Replaced(content), Some(slot)) => {
                let CellSlot {
                    wrapper,
                    content: old,
                    frame: old_frame,
                } = slot;
                self.dom.remove_child(&wrapper, &old);
                self.release_content(old);
                if old_frame != frame {
                    self.dom.apply_frame(&wrapper, &frame);
                }
                self.dom.append_child(&wrapper, &content);
                Ok(CellSlot {
                    wrapper,
                    content,
                    frame,
                })
            }
            (CellContent::Replaced(content), None) => {
                let wrapper = self.dom.create_element()?;
                self.dom.apply_frame(&wrapper, &frame);
                self.dom.append_child(&wrapper, &content);
                Ok(CellSlot {
                    wrapper,
                    content,
                    frame,
                })
            }
        }
    }

    fn release_cell(&mut self, slot: CellSlot<D::Element>) {
        self.release_content(slot.content);
    }
}
