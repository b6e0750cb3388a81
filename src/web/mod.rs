//! JavaScript binding.
//!
//! [`GridTable`] wraps a [`StructureController`] over the browser backend and
//! wires the DOM listeners (wheel, keyboard, resize drags, scrollbar input)
//! to it.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridTable } from 'gridtable';
//! await init();
//! const table = new GridTable(root, { colHeaderHeight: 24, rowHeaderWidth: 60 },
//!     { rowHeights, colWidths },
//!     (kind, row, col, width, height, previous) => previous ?? makeCell(row, col),
//!     (element) => recycle(element));
//! ```
//!
//! The content callback returns `previous` itself to keep the cell content.

mod backend;
mod logger;

pub use backend::{WebBackend, WebDom, WebScrollbar, SCROLLBAR_TAG};

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use js_sys::{Array, Function, Int32Array, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, HtmlElement, KeyboardEvent, MouseEvent, WheelEvent};

use crate::config::{
    CellContent, CellRequest, DynamicConfig, DynamicConfigData, StaticConfig, TableOptions,
    ViewportPosition,
};
use crate::error::TableError;
use crate::layout::{
    KeyInput, NavKey, PointerInput, PointerPhase, ScrollUnit, ScrollbarInput, WheelInput,
};
use crate::structure::{ResizeEvent, StructureController, Subscription};
use crate::types::{Axis, Surface};

type Controller = StructureController<WebBackend>;

/// Upper bound of the size window handed to the measure callback.
const MEASURE_BATCH: usize = 1024;

/// Run `f` on the controller unless it is already borrowed, i.e. a host
/// callback re-entered the table during a render pass.
fn borrow_and<R>(controller: &RefCell<Controller>, f: impl FnOnce(&mut Controller) -> R) -> Option<R> {
    let Ok(mut guard) = controller.try_borrow_mut() else {
        log::warn!("Ignoring table call made while the table is busy");
        return None;
    };
    let result = f(&mut guard);
    Some(result)
}

fn with_controller<R>(
    controller: &Weak<RefCell<Controller>>,
    f: impl FnOnce(&mut Controller) -> R,
) -> Option<R> {
    let controller = controller.upgrade()?;
    borrow_and(&controller, f)
}

#[allow(clippy::cast_possible_truncation)]
fn round_px(value: f64) -> i32 {
    value.round() as i32
}

fn relative_to(element: &HtmlElement, event: &MouseEvent) -> (i32, i32) {
    let rect = element.get_bounding_client_rect();
    (
        event.client_x() - round_px(rect.left()),
        event.client_y() - round_px(rect.top()),
    )
}

/// An attached DOM listener, detached on [`Listener::detach`].
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(target: &EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .ok();
        Self {
            target: target.clone(),
            event,
            closure,
        }
    }

    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

fn content_factory(
    content: Function,
    document: Document,
) -> impl FnMut(&CellRequest<'_, HtmlElement>) -> crate::Result<CellContent<HtmlElement>> {
    move |request| {
        let args = Array::new();
        args.push(&JsValue::from(request.kind.code()));
        args.push(&JsValue::from(request.row));
        args.push(&JsValue::from(request.col));
        args.push(&JsValue::from(request.width));
        args.push(&JsValue::from(request.height));
        match request.previous {
            Some(previous) => args.push(previous),
            None => args.push(&JsValue::NULL),
        };

        let returned = content.apply(&JsValue::NULL, &args);
        if let Ok(value) = &returned {
            if request.previous.is_some_and(|p| Object::is(value, p)) {
                return Ok(CellContent::Reused);
            }
        }
        match returned.map(JsCast::dyn_into::<HtmlElement>) {
            Ok(Ok(element)) => Ok(CellContent::Replaced(element)),
            Ok(Err(value)) => {
                log::error!("Content callback returned a non-element: {value:?}");
                placeholder(&document, request.previous.is_some())
            }
            Err(e) => {
                log::error!("Content callback threw: {e:?}");
                placeholder(&document, request.previous.is_some())
            }
        }
    }
}

/// Stand-in for content the host failed to provide.
fn placeholder(document: &Document, has_previous: bool) -> crate::Result<CellContent<HtmlElement>> {
    if has_previous {
        return Ok(CellContent::Reused);
    }
    let element = document
        .create_element("div")
        .map_err(|e| backend::js_error(&e))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| TableError::Dom("placeholder is not an HTML element".to_string()))?;
    Ok(CellContent::Replaced(element))
}

fn measure_callback(measure: Function) -> impl FnMut(Axis, usize, &mut [i32]) {
    move |axis, start, sizes| {
        let len = sizes.len().min(MEASURE_BATCH);
        let Some(window) = sizes.get_mut(..len) else {
            return;
        };
        let array = Int32Array::from(&*window);
        let axis = JsValue::from_str(match axis {
            Axis::Row => "row",
            Axis::Column => "column",
        });
        match measure.call3(&JsValue::NULL, &axis, &JsValue::from(start), &array) {
            Ok(_) => array.copy_to(window),
            Err(e) => log::error!("Measure callback threw: {e:?}"),
        }
    }
}

/// Resize event as seen by JavaScript handlers.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResizeEventData {
    surface: Surface,
    axis: Axis,
    index: usize,
    size: i32,
}

/// Virtualized table attached to a root element.
#[wasm_bindgen]
pub struct GridTable {
    controller: Rc<RefCell<Controller>>,
    listeners: Vec<Listener>,
    subscriptions: HashMap<u32, Subscription>,
    next_subscription: u32,
}

impl GridTable {
    fn with<R>(&self, f: impl FnOnce(&mut Controller) -> R) -> Option<R> {
        borrow_and(&self.controller, f)
    }

    fn attach_listeners(controller: &Rc<RefCell<Controller>>) -> Vec<Listener> {
        let weak = Rc::downgrade(controller);
        let c = controller.borrow();
        let mut listeners = Vec::new();
        let Some(container) = c.container().cloned() else {
            return listeners;
        };
        let _ = container.set_attribute("tabindex", "0");

        // Wheel
        {
            let weak = Weak::clone(&weak);
            listeners.push(Listener::attach(&container, "wheel", move |event: Event| {
                let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                let input = WheelInput {
                    delta_x: wheel.delta_x(),
                    delta_y: wheel.delta_y(),
                };
                if with_controller(&weak, |c| c.handle_wheel(&input)).unwrap_or(false) {
                    event.prevent_default();
                }
            }));
        }

        // Keyboard navigation
        {
            let weak = Weak::clone(&weak);
            listeners.push(Listener::attach(&container, "keydown", move |event: Event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let Some(nav) = NavKey::from_key_name(&key.key()) else {
                    return;
                };
                let input = KeyInput {
                    key: nav,
                    ctrl: key.ctrl_key() || key.meta_key(),
                };
                if with_controller(&weak, |c| c.handle_key(&input)).unwrap_or(false) {
                    event.prevent_default();
                }
            }));
        }

        // Resize drags start on a surface and continue anywhere in the document
        let resizable: Vec<(Surface, HtmlElement)> = Surface::RENDER_ORDER
            .iter()
            .filter(|s| c.is_resizable(**s))
            .filter_map(|s| c.surface_element(*s).map(|e| (*s, e.clone())))
            .collect();
        for (surface, element) in &resizable {
            let weak = Weak::clone(&weak);
            let surface = *surface;
            let target = element.clone();
            listeners.push(Listener::attach(element, "mousedown", move |event: Event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let (x, y) = relative_to(&target, mouse);
                let input = PointerInput::new(PointerPhase::Down, x, y);
                with_controller(&weak, |c| {
                    c.handle_pointer(surface, &input);
                    if c.is_resizing() {
                        event.prevent_default();
                    }
                });
            }));
        }
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            for (name, phase) in [("mousemove", PointerPhase::Move), ("mouseup", PointerPhase::Up)] {
                let weak = Weak::clone(&weak);
                let resizable = resizable.clone();
                listeners.push(Listener::attach(&document, name, move |event: Event| {
                    let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                        return;
                    };
                    with_controller(&weak, |c| {
                        if !c.is_resizing() {
                            return;
                        }
                        for (surface, element) in &resizable {
                            let (x, y) = relative_to(element, mouse);
                            c.handle_pointer(*surface, &PointerInput::new(phase, x, y));
                        }
                    });
                }));
            }
        }

        // Scrollbars
        for axis in [Axis::Row, Axis::Column] {
            let Some(element) = c.scrollbar(axis).map(|s| s.element().clone()) else {
                continue;
            };
            let weak = Weak::clone(&weak);
            let source = element.clone();
            listeners.push(Listener::attach(&element, "scrollbar-input", move |_event: Event| {
                let value = Reflect::get(&source, &JsValue::from_str("value"))
                    .ok()
                    .and_then(|v| v.as_f64());
                if let Some(value) = value {
                    with_controller(&weak, |c| {
                        c.handle_scrollbar(axis, &ScrollbarInput::Value(value))
                    });
                }
            }));
        }

        listeners
    }
}

#[wasm_bindgen]
impl GridTable {
    /// Create a table inside `root`.
    ///
    /// `options` and `dynamic` are plain objects (camelCase fields).
    /// `content(kind, row, col, width, height, previous)` returns the content
    /// element of a cell; `release(element)` receives content that is no
    /// longer shown; `measure(axis, start, sizes)` fills in unmeasured sizes
    /// (-1) of the `Int32Array` window starting at index `start`.
    ///
    /// Visible scrollbars need the `plain-scrollbar` custom element to be
    /// registered beforehand.
    #[wasm_bindgen(constructor)]
    pub fn new(
        root: HtmlElement,
        options: JsValue,
        dynamic: JsValue,
        content: Function,
        release: Option<Function>,
        measure: Option<Function>,
    ) -> Result<GridTable, JsValue> {
        console_error_panic_hook::set_once();
        logger::install();

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document"))?;

        let options: TableOptions = if options.is_undefined() || options.is_null() {
            TableOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        let dynamic: DynamicConfig =
            serde_wasm_bindgen::from_value::<DynamicConfigData>(dynamic)?.try_into()?;

        // The frame callback reaches the controller through this slot, filled
        // in once the controller exists.
        let slot: Rc<RefCell<Weak<RefCell<Controller>>>> = Rc::new(RefCell::new(Weak::new()));
        let on_frame = {
            let slot = Rc::clone(&slot);
            Closure::wrap(Box::new(move |_timestamp: f64| {
                let weak = Weak::clone(&slot.borrow());
                with_controller(&weak, |c| {
                    if let Some(token) = c.pending_frame() {
                        if let Err(e) = c.run_frame(token) {
                            log::error!("Render failed: {e}");
                        }
                    }
                });
            }) as Box<dyn FnMut(f64)>)
        };
        let backend = WebBackend::new(WebDom::new(window, document.clone()), Rc::new(on_frame));

        let mut config = StaticConfig::new(root, options, content_factory(content, document));
        if let Some(release) = release {
            config = config.with_release(move |element: HtmlElement| {
                if let Err(e) = release.call1(&JsValue::NULL, &element) {
                    log::error!("Release callback threw: {e:?}");
                }
            });
        }
        if let Some(measure) = measure {
            config = config.with_measure(measure_callback(measure));
        }

        let controller = Rc::new(RefCell::new(StructureController::new(config, dynamic, backend)?));
        *slot.borrow_mut() = Rc::downgrade(&controller);
        let listeners = Self::attach_listeners(&controller);

        Ok(GridTable {
            controller,
            listeners,
            subscriptions: HashMap::new(),
            next_subscription: 0,
        })
    }

    /// Schedule a render for the next animation frame.
    #[wasm_bindgen(js_name = "requestRender")]
    pub fn request_render(&self) {
        self.with(Controller::request_render);
    }

    /// Scroll one axis (`"row"`/`"column"`) by a unit (`"none"`, `"line"`,
    /// `"page"`, `"absolute"`).
    pub fn scroll(&self, axis: &str, unit: &str, value: f64) -> Result<(), JsValue> {
        let axis: Axis = axis.parse()?;
        let unit: ScrollUnit = unit.parse()?;
        self.with(|c| c.scroll(axis, unit, value));
        Ok(())
    }

    pub fn viewport(&self) -> Result<JsValue, JsValue> {
        let viewport = self
            .with(|c| c.dynamic_config().viewport)
            .unwrap_or(ViewportPosition::TOP_LEFT);
        Ok(serde_wasm_bindgen::to_value(&viewport)?)
    }

    #[wasm_bindgen(js_name = "setViewport")]
    pub fn set_viewport(&self, viewport: JsValue) -> Result<(), JsValue> {
        let viewport: ViewportPosition = serde_wasm_bindgen::from_value(viewport)?;
        self.with(|c| c.set_viewport(viewport));
        Ok(())
    }

    #[wasm_bindgen(js_name = "rowHeights")]
    pub fn row_heights(&self) -> Vec<i32> {
        self.with(|c| c.dynamic_config().row_heights().to_vec())
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = "colWidths")]
    pub fn col_widths(&self) -> Vec<i32> {
        self.with(|c| c.dynamic_config().col_widths().to_vec())
            .unwrap_or_default()
    }

    /// Set a row height (never below its macro cell) and request a render.
    #[wasm_bindgen(js_name = "setRowHeight")]
    pub fn set_row_height(&self, row: usize, height: i32) -> bool {
        self.with(|c| {
            let changed = c.dynamic_config_mut().set_row_height(row, height);
            if changed {
                c.request_render();
            }
            changed
        })
        .unwrap_or(false)
    }

    #[wasm_bindgen(js_name = "setColWidth")]
    pub fn set_col_width(&self, col: usize, width: i32) -> bool {
        self.with(|c| {
            let Some(w) = c.dynamic_config_mut().col_widths_mut().get_mut(col) else {
                return false;
            };
            *w = width.max(0);
            c.request_render();
            true
        })
        .unwrap_or(false)
    }

    /// Open, resize or close (0) the macro cell of a row.
    #[wasm_bindgen(js_name = "setMacroCellHeight")]
    pub fn set_macro_cell_height(&self, row: usize, height: i32) -> bool {
        self.with(|c| {
            let changed = c.dynamic_config_mut().set_macro_cell_height(row, height);
            if changed {
                c.request_render();
            }
            changed
        })
        .unwrap_or(false)
    }

    /// Subscribe to user resizes. The handler receives
    /// `{ surface, axis, index, size }` and may return `false` to veto the
    /// change or a number to replace the size. Returns a subscription id.
    #[wasm_bindgen(js_name = "onElementResize")]
    pub fn on_element_resize(&mut self, handler: Function) -> Option<u32> {
        let subscription = self.with(|c| {
            c.on_element_resize(move |event: &mut ResizeEvent| {
                let data = ResizeEventData {
                    surface: event.surface(),
                    axis: event.axis(),
                    index: event.index(),
                    size: event.size(),
                };
                let Ok(arg) = serde_wasm_bindgen::to_value(&data) else {
                    return;
                };
                match handler.call1(&JsValue::NULL, &arg) {
                    Ok(answer) if answer.as_bool() == Some(false) => event.prevent_default(),
                    Ok(answer) => {
                        if let Some(size) = answer.as_f64() {
                            event.set_size(round_px(size));
                        }
                    }
                    Err(e) => log::error!("Resize handler threw: {e:?}"),
                }
            })
        })?;
        self.next_subscription += 1;
        self.subscriptions.insert(self.next_subscription, subscription);
        Some(self.next_subscription)
    }

    pub fn unsubscribe(&mut self, id: u32) -> bool {
        let Some(subscription) = self.subscriptions.remove(&id) else {
            return false;
        };
        self.with(|c| c.unsubscribe(subscription)).unwrap_or(false)
    }

    /// Remove the table from the document and release all cell content.
    pub fn dispose(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        self.subscriptions.clear();
        self.with(Controller::dispose);
    }

    #[wasm_bindgen(js_name = "isDisposed")]
    pub fn is_disposed(&self) -> bool {
        self.with(|c| c.is_disposed()).unwrap_or(false)
    }
}

impl Drop for GridTable {
    fn drop(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
    }
}

/// Set the console log level (`"off"`, `"error"`, `"warn"`, `"info"`,
/// `"debug"`, `"trace"`).
#[wasm_bindgen(js_name = "setLogLevel")]
pub fn set_log_level(level: &str) {
    logger::install();
    match level.parse::<log::LevelFilter>() {
        Ok(filter) => log::set_max_level(filter),
        Err(_) => log::warn!("Unknown log level {level:?}"),
    }
}
