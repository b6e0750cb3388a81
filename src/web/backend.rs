//! Browser backend: DOM elements, animation frames and scrollbar widgets.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

use crate::error::{Result, TableError};
use crate::layout::{DragResize, ResizeParams, ScrollbarWidget, VirtualLayout};
use crate::render::{
    Backend, BorderEdge, BoxStyle, CellFrame, Dom, FrameRequester, FrameToken, Positioning,
};
use crate::types::{Axis, Extent, Rect, Surface};

/// Tag name of the scrollbar custom element.
///
/// The host page registers the element before creating a table with
/// scrollbars.
pub const SCROLLBAR_TAG: &str = "plain-scrollbar";

pub(crate) fn js_error(value: &JsValue) -> TableError {
    TableError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

fn set(element: &HtmlElement, name: &str, value: &str) {
    let _ = element.style().set_property(name, value);
}

fn set_px(element: &HtmlElement, name: &str, value: Option<i32>) {
    if let Some(v) = value {
        set(element, name, &format!("{v}px"));
    }
}

fn border(edge: Option<&BorderEdge>) -> String {
    edge.map_or_else(
        || "none".to_string(),
        |e| format!("{}px solid {}", e.width, e.color),
    )
}

/// [`Dom`] over the browser document.
#[derive(Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    /// Create a detached element with the given tag.
    pub fn create_tagged(&self, tag: &str) -> Result<HtmlElement> {
        self.document
            .create_element(tag)
            .map_err(|e| js_error(&e))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| TableError::Dom(format!("<{tag}> is not an HTML element")))
    }

    /// Whether a custom element is registered under `tag`.
    pub fn is_defined(&self, tag: &str) -> bool {
        !self.window.custom_elements().get(tag).is_undefined()
    }
}

impl Dom for WebDom {
    type Element = HtmlElement;

    fn create_element(&mut self) -> Result<HtmlElement> {
        self.create_tagged("div")
    }

    fn append_child(&mut self, parent: &HtmlElement, child: &HtmlElement) {
        let _ = parent.append_child(child);
    }

    fn remove_child(&mut self, parent: &HtmlElement, child: &HtmlElement) {
        // fails when `child` is not a child of `parent`, which is fine
        let _ = parent.remove_child(child);
    }

    fn apply_box(&mut self, element: &HtmlElement, style: &BoxStyle) {
        match style.positioning {
            Positioning::Fill => {
                set(element, "position", "relative");
                set(element, "width", "100%");
                set(element, "height", "100%");
            }
            Positioning::Absolute => set(element, "position", "absolute"),
        }
        set(element, "overflow", "hidden");
        set(element, "box-sizing", "border-box");
        set_px(element, "top", style.top);
        set_px(element, "right", style.right);
        set_px(element, "bottom", style.bottom);
        set_px(element, "left", style.left);
        set_px(element, "width", style.width);
        set_px(element, "height", style.height);
        if let Some(background) = &style.background {
            set(element, "background-color", background);
        }
        if style.border.is_some() {
            set(element, "border", &border(style.border.as_ref()));
        }
    }

    fn apply_frame(&mut self, element: &HtmlElement, frame: &CellFrame) {
        set(element, "position", "absolute");
        set(element, "overflow", "hidden");
        set(element, "box-sizing", "border-box");
        set(element, "background-color", &frame.background);
        set(element, "border-top", &border(frame.top.as_ref()));
        set(element, "border-right", &border(frame.right.as_ref()));
        set(element, "border-bottom", &border(frame.bottom.as_ref()));
    }

    fn place(&mut self, element: &HtmlElement, rect: Rect) {
        set(element, "left", &format!("{}px", rect.x));
        set(element, "top", &format!("{}px", rect.y));
        set(element, "width", &format!("{}px", rect.width));
        set(element, "height", &format!("{}px", rect.height));
    }

    fn client_extent(&self, element: &HtmlElement) -> Extent {
        Extent::new(element.client_width(), element.client_height())
    }

    fn style_variable(&self, element: &HtmlElement, name: &str) -> Option<String> {
        let style = self.window.get_computed_style(element).ok().flatten()?;
        let value = style.get_property_value(name).ok()?;
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

/// The `plain-scrollbar` custom element.
pub struct WebScrollbar {
    element: HtmlElement,
}

impl WebScrollbar {
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    fn set_property(&self, name: &str, value: &JsValue) {
        let _ = js_sys::Reflect::set(&self.element, &JsValue::from_str(name), value);
    }
}

impl ScrollbarWidget for WebScrollbar {
    fn set_value(&mut self, value: f64) {
        self.set_property("value", &JsValue::from_f64(value));
    }

    fn set_thumb_size(&mut self, size: f64) {
        self.set_property("thumbSize", &JsValue::from_f64(size));
    }
}

/// Browser [`Backend`] scheduling frames with `requestAnimationFrame`.
///
/// `on_frame` is invoked for every animation frame the controller asked for.
pub struct WebBackend {
    dom: WebDom,
    on_frame: Rc<Closure<dyn FnMut(f64)>>,
}

impl WebBackend {
    pub fn new(dom: WebDom, on_frame: Rc<Closure<dyn FnMut(f64)>>) -> Self {
        Self { dom, on_frame }
    }
}

impl Dom for WebBackend {
    type Element = HtmlElement;

    fn create_element(&mut self) -> Result<HtmlElement> {
        self.dom.create_element()
    }

    fn append_child(&mut self, parent: &HtmlElement, child: &HtmlElement) {
        self.dom.append_child(parent, child);
    }

    fn remove_child(&mut self, parent: &HtmlElement, child: &HtmlElement) {
        self.dom.remove_child(parent, child);
    }

    fn apply_box(&mut self, element: &HtmlElement, style: &BoxStyle) {
        self.dom.apply_box(element, style);
    }

    fn apply_frame(&mut self, element: &HtmlElement, frame: &CellFrame) {
        self.dom.apply_frame(element, frame);
    }

    fn place(&mut self, element: &HtmlElement, rect: Rect) {
        self.dom.place(element, rect);
    }

    fn client_extent(&self, element: &HtmlElement) -> Extent {
        self.dom.client_extent(element)
    }

    fn style_variable(&self, element: &HtmlElement, name: &str) -> Option<String> {
        self.dom.style_variable(element, name)
    }
}

impl FrameRequester for WebBackend {
    fn request_frame(&mut self) -> FrameToken {
        let callback = (*self.on_frame).as_ref().unchecked_ref();
        match self.dom.window.request_animation_frame(callback) {
            Ok(handle) => FrameToken(u64::try_from(handle).unwrap_or_default()),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {e:?}");
                FrameToken(0)
            }
        }
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if let Ok(handle) = i32::try_from(token.0) {
            let _ = self.dom.window.cancel_animation_frame(handle);
        }
    }
}

impl Backend for WebBackend {
    type Layout = VirtualLayout<WebDom>;
    type Resize = DragResize;
    type Scrollbar = WebScrollbar;

    fn create_layout(&mut self, _surface: Surface, container: &HtmlElement) -> Result<Self::Layout> {
        Ok(VirtualLayout::new(self.dom.clone(), container.clone()))
    }

    fn create_resize(&mut self, _surface: Surface, params: &ResizeParams) -> Result<Self::Resize> {
        Ok(DragResize::new(*params))
    }

    fn create_scrollbar(
        &mut self,
        parent: &HtmlElement,
        axis: Axis,
        style: &BoxStyle,
    ) -> Result<Self::Scrollbar> {
        if !self.dom.is_defined(SCROLLBAR_TAG) {
            return Err(TableError::Dom(format!(
                "<{SCROLLBAR_TAG}> is not registered as a custom element"
            )));
        }
        let element = self.dom.create_tagged(SCROLLBAR_TAG)?;
        self.dom.apply_box(&element, style);
        let orientation = match axis {
            Axis::Row => "vertical",
            Axis::Column => "horizontal",
        };
        element
            .set_attribute("orientation", orientation)
            .map_err(|e| js_error(&e))?;
        self.dom.append_child(parent, &element);
        Ok(WebScrollbar { element })
    }
}
