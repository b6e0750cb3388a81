//! The structure controller.
//!
//! [`StructureController`] composes up to four coordinated grids (content,
//! column header, row header and corner) plus optional scrollbars inside a
//! container attached to the host's root element. It keeps them in sync on
//! scrolling, resizing and re-rendering, and hands the content of every
//! visible cell to the host through the content factory.
//!
//! All rendering happens in frame callbacks: state changes only request a
//! render, and any number of requests before the next frame produce one pass.

mod broker;
mod events;
mod grid;
mod render;
mod resize;
mod scheduler;
mod scroll;
mod subscription;

pub use resize::ResizeOutcome;
pub use scheduler::RenderScheduler;
pub use subscription::{EventHub, ResizeEvent, Subscription};

use crate::config::{DynamicConfig, StaticConfig, TableOptions, ViewportPosition};
use crate::error::Result;
use crate::layout::LayoutEngine;
use crate::render::{Backend, ElementStyle, FrameToken};
use crate::style::{StyleCascade, StyleMetrics};
use crate::types::{Axis, Surface};
use broker::CellLifecycleBroker;
use grid::Grids;

/// Controller of one table.
///
/// Dropping the controller disposes it.
pub struct StructureController<B: Backend> {
    backend: B,
    config: StaticConfig<B::Element>,
    dynamic: DynamicConfig,
    metrics: StyleMetrics,
    /// `None` once disposed.
    container: Option<B::Element>,
    grids: Grids<B>,
    v_scrollbar: Option<B::Scrollbar>,
    h_scrollbar: Option<B::Scrollbar>,
    /// Vertical overlap of content cells onto macro cells.
    content_overlap: i32,
    scheduler: RenderScheduler,
    resize_events: EventHub<ResizeEvent>,
    disposed: bool,
}

impl<B: Backend> StructureController<B> {
    /// Build the table inside `config.root` and request the first render.
    ///
    /// Style metrics are resolved once, here, from the root element's style
    /// variables and the option overrides.
    pub fn new(config: StaticConfig<B::Element>, dynamic: DynamicConfig, mut backend: B) -> Result<Self> {
        let metrics = StyleMetrics::resolve(&StyleCascade::new(
            &ElementStyle::new(&backend, &config.root),
            config.options.style_overrides.as_ref(),
        ));
        let options = &config.options;

        let container = backend.create_element()?;
        backend.apply_box(&container, &grid::table_box(&metrics));
        backend.append_child(&config.root, &container);

        let (grids, v_scrollbar, h_scrollbar) =
            match Self::create_parts(&mut backend, &container, options, &metrics) {
                Ok(parts) => parts,
                Err(e) => {
                    backend.remove_child(&config.root, &container);
                    return Err(e);
                }
            };

        let content_overlap = if options.macro_cells_available {
            metrics.content.h_width
        } else {
            0
        };

        log::debug!(
            "Created table: {} rows, {} columns, col header {}, row header {}",
            dynamic.row_count(),
            dynamic.col_count(),
            options.has_col_header(),
            options.has_row_header()
        );

        let mut controller = Self {
            backend,
            config,
            dynamic,
            metrics,
            container: Some(container),
            grids,
            v_scrollbar,
            h_scrollbar,
            content_overlap,
            scheduler: RenderScheduler::new(),
            resize_events: EventHub::default(),
            disposed: false,
        };
        controller.request_render();
        Ok(controller)
    }

    #[allow(clippy::type_complexity)]
    fn create_parts(
        backend: &mut B,
        container: &B::Element,
        options: &TableOptions,
        metrics: &StyleMetrics,
    ) -> Result<(Grids<B>, Option<B::Scrollbar>, Option<B::Scrollbar>)> {
        let mut grids = Grids::create(backend, container, options, metrics)?;
        match Self::create_scrollbars(backend, container, options, metrics) {
            Ok((v_scrollbar, h_scrollbar)) => Ok((grids, v_scrollbar, h_scrollbar)),
            Err(e) => {
                grids.dispose_resizers();
                Err(e)
            }
        }
    }

    #[allow(clippy::type_complexity)]
    fn create_scrollbars(
        backend: &mut B,
        container: &B::Element,
        options: &TableOptions,
        metrics: &StyleMetrics,
    ) -> Result<(Option<B::Scrollbar>, Option<B::Scrollbar>)> {
        let v_scrollbar = if options.v_scrollbar_visible {
            let style = grid::scrollbar_box(Axis::Row, options, metrics);
            Some(backend.create_scrollbar(container, Axis::Row, &style)?)
        } else {
            None
        };
        let h_scrollbar = if options.h_scrollbar_visible {
            let style = grid::scrollbar_box(Axis::Column, options, metrics);
            Some(backend.create_scrollbar(container, Axis::Column, &style)?)
        } else {
            None
        };
        Ok((v_scrollbar, h_scrollbar))
    }

    /// Tear the table down: cancel the pending frame, release every cell,
    /// detach the container and drop all listeners.
    ///
    /// Idempotent. Every other operation is a no-op afterwards.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.scheduler.dispose(&mut self.backend);
        self.resize_events.clear();

        let Self {
            backend,
            config,
            metrics,
            grids,
            ..
        } = self;
        for surface in Surface::RENDER_ORDER.iter().rev() {
            if let Some(grid) = grids.get_mut(*surface) {
                let mut broker = CellLifecycleBroker::new(
                    *surface,
                    &mut *backend,
                    metrics.grid_lines(*surface),
                    &mut *config.content,
                    config.release.as_deref_mut(),
                );
                grid.layout.clear(&mut broker);
            }
        }
        grids.dispose_resizers();

        if let Some(container) = self.container.take() {
            self.backend.remove_child(&self.config.root, &container);
        }
        log::debug!("Disposed table");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Schedule a render pass for the next frame.
    pub fn request_render(&mut self) {
        if self.disposed {
            return;
        }
        self.scheduler.request(&mut self.backend);
    }

    /// Frame currently awaited, if any.
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.scheduler.pending()
    }

    pub fn options(&self) -> &TableOptions {
        &self.config.options
    }

    pub fn metrics(&self) -> &StyleMetrics {
        &self.metrics
    }

    pub fn dynamic_config(&self) -> &DynamicConfig {
        &self.dynamic
    }

    /// Mutable access to the dynamic configuration.
    ///
    /// Changes show up with the next render; call
    /// [`request_render`](Self::request_render) afterwards.
    pub fn dynamic_config_mut(&mut self) -> &mut DynamicConfig {
        &mut self.dynamic
    }

    /// Move the viewport and request a render.
    pub fn set_viewport(&mut self, viewport: ViewportPosition) {
        self.dynamic.viewport = viewport;
        self.request_render();
    }

    /// Vertical overlap of content cells onto macro cells.
    pub fn content_overlap(&self) -> i32 {
        self.content_overlap
    }

    /// The table container, `None` after disposal.
    pub fn container(&self) -> Option<&B::Element> {
        self.container.as_ref()
    }

    pub fn has_surface(&self, surface: Surface) -> bool {
        self.grids.get(surface).is_some()
    }

    /// Container element of a surface.
    pub fn surface_element(&self, surface: Surface) -> Option<&B::Element> {
        self.grids.get(surface).map(|g| &g.container)
    }

    /// Layout engine of a surface.
    pub fn layout(&self, surface: Surface) -> Option<&B::Layout> {
        self.grids.get(surface).map(|g| &g.layout)
    }

    pub fn scrollbar(&self, axis: Axis) -> Option<&B::Scrollbar> {
        match axis {
            Axis::Row => self.v_scrollbar.as_ref(),
            Axis::Column => self.h_scrollbar.as_ref(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Subscribe to user resizes of rows and columns.
    pub fn on_element_resize(&mut self, handler: impl FnMut(&mut ResizeEvent) + 'static) -> Subscription {
        self.resize_events.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.resize_events.unsubscribe(subscription)
    }
}

impl<B: Backend> Drop for StructureController<B> {
    fn drop(&mut self) {
        self.dispose();
    }
}
