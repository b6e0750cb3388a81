//! Common test utilities: an in-memory element tree implementing the backend
//! traits, plus a recording content factory.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gridtable::config::{CellContent, CellRequest, DynamicConfig, StaticConfig, TableOptions};
use gridtable::error::{Result, TableError};
use gridtable::layout::{
    DragResize, GridGeometry, PointerInput, ResizeEngine, ResizeNotice, ResizeParams,
    ScrollbarWidget, VirtualLayout,
};
use gridtable::render::{
    Backend, BoxStyle, CellFrame, Dom, FrameRequester, FrameToken, Positioning,
};
use gridtable::structure::StructureController;
use gridtable::types::{Axis, CellKind, Extent, Rect, Surface};

pub type ElementId = usize;

#[derive(Debug, Default, Clone)]
pub struct Node {
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
    pub box_style: Option<BoxStyle>,
    pub frame: Option<CellFrame>,
    pub rect: Option<Rect>,
    /// Fixed client size (the root element).
    pub extent: Option<Extent>,
    pub variables: HashMap<String, String>,
    pub label: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScrollbarState {
    pub value: f64,
    pub thumb_size: f64,
    pub updates: usize,
}

/// Teardown steps, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Teardown {
    Released(ElementId),
    ResizeDisposed(Surface),
}

#[derive(Debug, Default)]
pub struct DomState {
    pub nodes: Vec<Node>,
    pub frame_applications: usize,
    pub next_frame: u64,
    pub requested_frames: Vec<FrameToken>,
    pub cancelled_frames: Vec<FrameToken>,
    pub layouts: Vec<Surface>,
    pub resizes: Vec<(Surface, ResizeParams)>,
    pub scrollbars: HashMap<Axis, ScrollbarState>,
    pub scrollbar_styles: HashMap<Axis, BoxStyle>,
    pub teardown: Vec<Teardown>,
    /// Scrollbar whose creation fails.
    pub failing_scrollbar: Option<Axis>,
}

/// Shared handle to the in-memory element tree.
#[derive(Debug, Default, Clone)]
pub struct MockDom(pub Rc<RefCell<DomState>>);

impl MockDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// A detached root element with a fixed client size.
    pub fn root(&self, width: i32, height: i32) -> ElementId {
        let mut s = self.0.borrow_mut();
        s.nodes.push(Node {
            extent: Some(Extent::new(width, height)),
            label: "root".to_string(),
            ..Node::default()
        });
        s.nodes.len() - 1
    }

    /// A labelled element, used as cell content.
    pub fn labelled(&self, label: &str) -> ElementId {
        let mut s = self.0.borrow_mut();
        s.nodes.push(Node {
            label: label.to_string(),
            ..Node::default()
        });
        s.nodes.len() - 1
    }

    pub fn node(&self, id: ElementId) -> Node {
        self.0.borrow().nodes[id].clone()
    }

    pub fn children(&self, id: ElementId) -> Vec<ElementId> {
        self.0.borrow().nodes[id].children.clone()
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.0.borrow().nodes[id].parent
    }

    pub fn label(&self, id: ElementId) -> String {
        self.0.borrow().nodes[id].label.clone()
    }

    pub fn set_variable(&self, id: ElementId, name: &str, value: &str) {
        self.0.borrow_mut().nodes[id]
            .variables
            .insert(name.to_string(), value.to_string());
    }

    pub fn set_extent(&self, id: ElementId, width: i32, height: i32) {
        self.0.borrow_mut().nodes[id].extent = Some(Extent::new(width, height));
    }

    pub fn frame_applications(&self) -> usize {
        self.0.borrow().frame_applications
    }

    pub fn scrollbar(&self, axis: Axis) -> Option<ScrollbarState> {
        self.0.borrow().scrollbars.get(&axis).cloned()
    }

    pub fn teardown(&self) -> Vec<Teardown> {
        self.0.borrow().teardown.clone()
    }

    fn extent_of(state: &DomState, id: ElementId) -> Extent {
        let node = &state.nodes[id];
        if let Some(extent) = node.extent {
            return extent;
        }
        if let Some(rect) = node.rect {
            return Extent::new(rect.width, rect.height);
        }
        let (Some(style), Some(parent)) = (&node.box_style, node.parent) else {
            return Extent::default();
        };
        let outer = Self::extent_of(state, parent);
        let inset = |a: Option<i32>, b: Option<i32>, fixed: Option<i32>, total: i32| match fixed {
            Some(size) => size,
            None => (total - a.unwrap_or(0) - b.unwrap_or(0)).max(0),
        };
        let border = style.border.as_ref().map_or(0, |b| b.width);
        match style.positioning {
            Positioning::Fill => Extent::new(
                (outer.width - 2 * border).max(0),
                (outer.height - 2 * border).max(0),
            ),
            Positioning::Absolute => Extent::new(
                inset(style.left, style.right, style.width, outer.width),
                inset(style.top, style.bottom, style.height, outer.height),
            ),
        }
    }
}

impl Dom for MockDom {
    type Element = ElementId;

    fn create_element(&mut self) -> Result<ElementId> {
        let mut s = self.0.borrow_mut();
        s.nodes.push(Node::default());
        Ok(s.nodes.len() - 1)
    }

    fn append_child(&mut self, parent: &ElementId, child: &ElementId) {
        let mut s = self.0.borrow_mut();
        if let Some(old) = s.nodes[*child].parent {
            s.nodes[old].children.retain(|c| c != child);
        }
        s.nodes[*child].parent = Some(*parent);
        s.nodes[*parent].children.push(*child);
    }

    fn remove_child(&mut self, parent: &ElementId, child: &ElementId) {
        let mut s = self.0.borrow_mut();
        if s.nodes[*child].parent == Some(*parent) {
            s.nodes[*child].parent = None;
            s.nodes[*parent].children.retain(|c| c != child);
        }
    }

    fn apply_box(&mut self, element: &ElementId, style: &BoxStyle) {
        self.0.borrow_mut().nodes[*element].box_style = Some(style.clone());
    }

    fn apply_frame(&mut self, element: &ElementId, frame: &CellFrame) {
        let mut s = self.0.borrow_mut();
        s.frame_applications += 1;
        s.nodes[*element].frame = Some(frame.clone());
    }

    fn place(&mut self, element: &ElementId, rect: Rect) {
        self.0.borrow_mut().nodes[*element].rect = Some(rect);
    }

    fn client_extent(&self, element: &ElementId) -> Extent {
        Self::extent_of(&self.0.borrow(), *element)
    }

    fn style_variable(&self, element: &ElementId, name: &str) -> Option<String> {
        self.0.borrow().nodes[*element].variables.get(name).cloned()
    }
}

pub struct MockScrollbar {
    dom: MockDom,
    axis: Axis,
}

impl ScrollbarWidget for MockScrollbar {
    fn set_value(&mut self, value: f64) {
        let mut s = self.dom.0.borrow_mut();
        let state = s.scrollbars.entry(self.axis).or_default();
        state.value = value;
        state.updates += 1;
    }

    fn set_thumb_size(&mut self, size: f64) {
        let mut s = self.dom.0.borrow_mut();
        s.scrollbars.entry(self.axis).or_default().thumb_size = size;
    }
}

/// [`DragResize`] that records its disposal.
pub struct MockResize {
    inner: DragResize,
    surface: Surface,
    dom: MockDom,
}

impl ResizeEngine for MockResize {
    fn pointer(&mut self, input: &PointerInput, geometry: &GridGeometry) -> Option<ResizeNotice> {
        self.inner.pointer(input, geometry)
    }

    fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    fn dispose(&mut self) {
        self.inner.dispose();
        self.dom
            .0
            .borrow_mut()
            .teardown
            .push(Teardown::ResizeDisposed(self.surface));
    }
}

/// Backend over [`MockDom`] with a manual frame queue.
pub struct MockBackend {
    pub dom: MockDom,
}

impl Dom for MockBackend {
    type Element = ElementId;

    fn create_element(&mut self) -> Result<ElementId> {
        self.dom.create_element()
    }

    fn append_child(&mut self, parent: &ElementId, child: &ElementId) {
        self.dom.append_child(parent, child);
    }

    fn remove_child(&mut self, parent: &ElementId, child: &ElementId) {
        self.dom.remove_child(parent, child);
    }

    fn apply_box(&mut self, element: &ElementId, style: &BoxStyle) {
        self.dom.apply_box(element, style);
    }

    fn apply_frame(&mut self, element: &ElementId, frame: &CellFrame) {
        self.dom.apply_frame(element, frame);
    }

    fn place(&mut self, element: &ElementId, rect: Rect) {
        self.dom.place(element, rect);
    }

    fn client_extent(&self, element: &ElementId) -> Extent {
        self.dom.client_extent(element)
    }

    fn style_variable(&self, element: &ElementId, name: &str) -> Option<String> {
        self.dom.style_variable(element, name)
    }
}

impl FrameRequester for MockBackend {
    fn request_frame(&mut self) -> FrameToken {
        let mut s = self.dom.0.borrow_mut();
        s.next_frame += 1;
        let token = FrameToken(s.next_frame);
        s.requested_frames.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.dom.0.borrow_mut().cancelled_frames.push(token);
    }
}

impl Backend for MockBackend {
    type Layout = VirtualLayout<MockDom>;
    type Resize = MockResize;
    type Scrollbar = MockScrollbar;

    fn create_layout(&mut self, surface: Surface, container: &ElementId) -> Result<Self::Layout> {
        self.dom.0.borrow_mut().layouts.push(surface);
        Ok(VirtualLayout::new(self.dom.clone(), *container))
    }

    fn create_resize(&mut self, surface: Surface, params: &ResizeParams) -> Result<Self::Resize> {
        self.dom.0.borrow_mut().resizes.push((surface, *params));
        Ok(MockResize {
            inner: DragResize::new(*params),
            surface,
            dom: self.dom.clone(),
        })
    }

    fn create_scrollbar(
        &mut self,
        parent: &ElementId,
        axis: Axis,
        style: &BoxStyle,
    ) -> Result<Self::Scrollbar> {
        if self.dom.0.borrow().failing_scrollbar == Some(axis) {
            return Err(TableError::Dom(format!("no {axis:?} scrollbar")));
        }
        let element = self.dom.create_element()?;
        self.dom.apply_box(&element, style);
        self.dom.append_child(parent, &element);
        {
            let mut s = self.dom.0.borrow_mut();
            s.scrollbars.insert(axis, ScrollbarState::default());
            s.scrollbar_styles.insert(axis, style.clone());
        }
        Ok(MockScrollbar {
            dom: self.dom.clone(),
            axis,
        })
    }
}

/// How the recording factory answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryMode {
    /// Keep previous content whenever there is some.
    Reuse,
    /// Always hand out a fresh element.
    AlwaysNew,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestRecord {
    pub kind: CellKind,
    pub row: usize,
    pub col: usize,
    pub width: i32,
    pub height: i32,
    pub had_previous: bool,
}

#[derive(Debug)]
pub struct CellLog {
    pub mode: FactoryMode,
    pub requests: Vec<RequestRecord>,
    pub created: Vec<ElementId>,
    pub released: Vec<ElementId>,
}

impl CellLog {
    pub fn clear(&mut self) {
        self.requests.clear();
        self.created.clear();
        self.released.clear();
    }

    pub fn requests_of(&self, kind: CellKind) -> Vec<RequestRecord> {
        self.requests.iter().filter(|r| r.kind == kind).copied().collect()
    }
}

pub type Table = StructureController<MockBackend>;

/// Everything a test needs besides the controller.
pub struct Harness {
    pub dom: MockDom,
    pub root: ElementId,
    pub log: Rc<RefCell<CellLog>>,
}

impl Harness {
    pub fn new(width: i32, height: i32) -> Self {
        let dom = MockDom::new();
        let root = dom.root(width, height);
        Self {
            dom,
            root,
            log: Rc::new(RefCell::new(CellLog {
                mode: FactoryMode::Reuse,
                requests: Vec::new(),
                created: Vec::new(),
                released: Vec::new(),
            })),
        }
    }

    pub fn set_mode(&self, mode: FactoryMode) {
        self.log.borrow_mut().mode = mode;
    }

    pub fn static_config(&self, options: TableOptions) -> StaticConfig<ElementId> {
        let dom = self.dom.clone();
        let log = Rc::clone(&self.log);
        let release_log = Rc::clone(&self.log);
        let release_dom = self.dom.clone();
        StaticConfig::new(self.root, options, move |request: &CellRequest<'_, ElementId>| {
            let mut log = log.borrow_mut();
            log.requests.push(RequestRecord {
                kind: request.kind,
                row: request.row,
                col: request.col,
                width: request.width,
                height: request.height,
                had_previous: request.previous.is_some(),
            });
            if log.mode == FactoryMode::Reuse && request.previous.is_some() {
                return Ok(CellContent::Reused);
            }
            let element = dom.labelled(&format!("{:?} {},{}", request.kind, request.row, request.col));
            log.created.push(element);
            Ok(CellContent::Replaced(element))
        })
        .with_release(move |element| {
            release_log.borrow_mut().released.push(element);
            release_dom.0.borrow_mut().teardown.push(Teardown::Released(element));
        })
    }

    pub fn build(&self, options: TableOptions, dynamic: DynamicConfig) -> Table {
        StructureController::new(
            self.static_config(options),
            dynamic,
            MockBackend {
                dom: self.dom.clone(),
            },
        )
        .unwrap()
    }

    /// Build and run the initial frame.
    pub fn rendered(&self, options: TableOptions, dynamic: DynamicConfig) -> Table {
        let mut table = self.build(options, dynamic);
        assert!(pump(&mut table));
        table
    }

    pub fn log(&self) -> std::cell::Ref<'_, CellLog> {
        self.log.borrow()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }

    /// Cell wrappers currently attached to a surface container.
    pub fn wrappers(&self, table: &Table, surface: Surface) -> Vec<ElementId> {
        table
            .surface_element(surface)
            .map(|container| self.dom.children(*container))
            .unwrap_or_default()
    }
}

/// Run the pending frame, if any. Returns whether a render pass ran.
pub fn pump(table: &mut Table) -> bool {
    match table.pending_frame() {
        Some(token) => table.run_frame(token).unwrap(),
        None => false,
    }
}

pub fn options_with_headers() -> TableOptions {
    TableOptions {
        col_header_height: 20,
        row_header_width: 40,
        ..TableOptions::default()
    }
}
