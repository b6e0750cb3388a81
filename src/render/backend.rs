//! Backend traits for pluggable element toolkits.
//!
//! The structure controller never touches a concrete toolkit. It creates and
//! styles container elements through [`Dom`], schedules render passes through
//! [`FrameRequester`] and obtains its per-surface engines from [`Backend`].
//! The browser implementation lives in `crate::web`; tests drive the
//! controller with an in-memory backend.

use crate::error::Result;
use crate::layout::{
    LayoutEngine, ResizeEngine, ResizeParams, ScrollEngine, ScrollbarWidget, StandardScroll,
};
use crate::render::{BoxStyle, CellFrame};
use crate::style::StyleSource;
use crate::types::{Axis, Extent, Rect, Surface};

/// Primitive element operations.
pub trait Dom {
    /// Handle of one element. Cloning a handle never clones the element.
    type Element: Clone;

    /// Create a detached element.
    fn create_element(&mut self) -> Result<Self::Element>;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: &Self::Element, child: &Self::Element);

    /// Detach `child` from `parent`; a no-op when it is not attached there.
    fn remove_child(&mut self, parent: &Self::Element, child: &Self::Element);

    /// Apply a container box style.
    fn apply_box(&mut self, element: &Self::Element, style: &BoxStyle);

    /// Apply the borders and background of a cell wrapper.
    fn apply_frame(&mut self, element: &Self::Element, frame: &CellFrame);

    /// Absolutely position an element inside its parent.
    fn place(&mut self, element: &Self::Element, rect: Rect);

    /// Inner size of an element.
    fn client_extent(&self, element: &Self::Element) -> Extent;

    /// Current value of a per-element style variable (full `--` name).
    fn style_variable(&self, element: &Self::Element, name: &str) -> Option<String>;
}

/// Handle of a requested display frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

/// Display-frame scheduling.
///
/// The host calls back into the controller with the token once the frame
/// arrives (see `StructureController::run_frame`).
pub trait FrameRequester {
    fn request_frame(&mut self) -> FrameToken;
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Everything a structure controller needs from its environment.
pub trait Backend: Dom + FrameRequester {
    type Layout: LayoutEngine<Self::Element>;
    type Resize: ResizeEngine;
    type Scrollbar: ScrollbarWidget;

    /// Layout engine rendering the cells of `surface` into `container`.
    fn create_layout(&mut self, surface: Surface, container: &Self::Element)
        -> Result<Self::Layout>;

    /// Resize engine for a surface with row and/or column sizing enabled.
    fn create_resize(&mut self, surface: Surface, params: &ResizeParams) -> Result<Self::Resize>;

    /// Scrollbar widget attached to `parent`.
    fn create_scrollbar(
        &mut self,
        parent: &Self::Element,
        axis: Axis,
        style: &BoxStyle,
    ) -> Result<Self::Scrollbar>;

    /// Scroll algorithm shared by both axes.
    fn scroll_engine(&self) -> &dyn ScrollEngine {
        &StandardScroll
    }
}

/// Style variables of one element, read through its [`Dom`].
pub struct ElementStyle<'a, D: Dom> {
    dom: &'a D,
    element: &'a D::Element,
}

impl<'a, D: Dom> ElementStyle<'a, D> {
    pub fn new(dom: &'a D, element: &'a D::Element) -> Self {
        Self { dom, element }
    }
}

impl<D: Dom> StyleSource for ElementStyle<'_, D> {
    fn variable(&self, name: &str) -> Option<String> {
        self.dom.style_variable(self.element, name)
    }
}
