//! Input handlers.
//!
//! Each handler returns whether the input was consumed, so the host knows
//! whether to suppress the toolkit's default action.

use super::{ResizeOutcome, StructureController};
use crate::layout::{
    decode_key, decode_scrollbar, decode_wheel, KeyInput, LayoutEngine, PointerInput,
    ResizeEngine, ScrollCommand, ScrollbarInput, WheelInput,
};
use crate::render::Backend;
use crate::types::{Axis, Surface};

impl<B: Backend> StructureController<B> {
    fn run_command(&mut self, command: ScrollCommand) -> bool {
        if self.disposed {
            return false;
        }
        self.scroll(command.axis, command.unit, command.value);
        true
    }

    pub fn handle_wheel(&mut self, input: &WheelInput) -> bool {
        decode_wheel(input).is_some_and(|command| self.run_command(command))
    }

    pub fn handle_key(&mut self, input: &KeyInput) -> bool {
        self.run_command(decode_key(input))
    }

    /// Value change of the scrollbar for `axis`.
    pub fn handle_scrollbar(&mut self, axis: Axis, input: &ScrollbarInput) -> bool {
        self.run_command(decode_scrollbar(axis, input))
    }

    /// Pointer input on a surface, in coordinates relative to its container.
    ///
    /// Returns the outcome when the input completed a resize gesture.
    pub fn handle_pointer(&mut self, surface: Surface, input: &PointerInput) -> Option<ResizeOutcome> {
        if self.disposed {
            return None;
        }
        let grid = self.grids.get_mut(surface)?;
        let resize = grid.resize.as_mut()?;
        let notice = resize.pointer(input, grid.layout.geometry())?;
        Some(self.apply_resize(surface, notice))
    }

    /// Whether a surface reacts to resize gestures.
    pub fn is_resizable(&self, surface: Surface) -> bool {
        self.grids
            .get(surface)
            .is_some_and(|g| g.resize.is_some())
    }

    /// Whether a resize drag is in progress on any surface.
    pub fn is_resizing(&self) -> bool {
        Surface::RENDER_ORDER.iter().any(|surface| {
            self.grids
                .get(*surface)
                .and_then(|g| g.resize.as_ref())
                .is_some_and(|resize| resize.is_dragging())
        })
    }
}
