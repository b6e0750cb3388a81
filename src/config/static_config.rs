use std::fmt;

use crate::config::TableOptions;
use crate::error::Result;
use crate::types::{Axis, CellKind};

/// Resolves undetermined sizes.
///
/// Called as `measure(axis, start_index, sizes)`; `sizes` is the window of the
/// size array starting at `start_index`, and the callback overwrites the
/// [`UNMEASURED`](crate::config::UNMEASURED) entries it can determine.
pub type MeasureFn = dyn FnMut(Axis, usize, &mut [i32]);

/// Host factory creating or preparing cell content elements.
///
/// An error aborts the render pass and is returned to the caller of the pass.
pub type ContentFactory<E> = dyn FnMut(&CellRequest<'_, E>) -> Result<CellContent<E>>;

/// Host callback receiving content elements that are no longer in use.
pub type ReleaseFn<E> = dyn FnMut(E);

/// Arguments passed to the content factory for one cell.
#[derive(Debug)]
pub struct CellRequest<'a, E> {
    pub kind: CellKind,
    /// 0 for column header and corner cells.
    pub row: usize,
    /// 0 for macro cells.
    pub col: usize,
    /// Content area width (cell width minus its right grid line).
    pub width: i32,
    /// Content area height (cell height minus bottom grid line and overlap).
    pub height: i32,
    /// Content currently shown in this cell, if any. It can be reused.
    pub previous: Option<&'a E>,
}

/// Answer of the content factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent<E> {
    /// Keep the previous content element.
    Reused,
    /// Show this element instead; the previous one, if any, is released.
    Replaced(E),
}

/// Configuration fixed for the controller's lifetime.
pub struct StaticConfig<E> {
    /// Element the table container is attached to.
    pub root: E,
    pub options: TableOptions,
    pub measure: Option<Box<MeasureFn>>,
    pub content: Box<ContentFactory<E>>,
    pub release: Option<Box<ReleaseFn<E>>>,
}

impl<E> StaticConfig<E> {
    pub fn new(
        root: E,
        options: TableOptions,
        content: impl FnMut(&CellRequest<'_, E>) -> Result<CellContent<E>> + 'static,
    ) -> Self {
        Self {
            root,
            options,
            measure: None,
            content: Box::new(content),
            release: None,
        }
    }

    /// Install the release counterpart of the content factory.
    #[must_use]
    pub fn with_release(mut self, release: impl FnMut(E) + 'static) -> Self {
        self.release = Some(Box::new(release));
        self
    }

    /// Install a measurement callback for undetermined sizes.
    #[must_use]
    pub fn with_measure(mut self, measure: impl FnMut(Axis, usize, &mut [i32]) + 'static) -> Self {
        self.measure = Some(Box::new(measure));
        self
    }
}

impl<E: fmt::Debug> fmt::Debug for StaticConfig<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticConfig")
            .field("root", &self.root)
            .field("options", &self.options)
            .field("measure", &self.measure.is_some())
            .field("release", &self.release.is_some())
            .finish_non_exhaustive()
    }
}
