//! Event subscriptions.

use std::fmt;

use crate::layout::ResizeNotice;
use crate::types::{Axis, Surface};

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Ordered list of handlers for one event type.
pub struct EventHub<T> {
    next_id: u64,
    handlers: Vec<(u64, Box<dyn FnMut(&mut T)>)>,
}

impl<T> Default for EventHub<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            handlers: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for EventHub<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl<T> EventHub<T> {
    pub fn subscribe(&mut self, handler: impl FnMut(&mut T) + 'static) -> Subscription {
        self.next_id += 1;
        self.handlers.push((self.next_id, Box::new(handler)));
        Subscription(self.next_id)
    }

    /// Returns `false` when the subscription was already removed.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(id, _)| *id != subscription.0);
        self.handlers.len() != before
    }

    /// Run every handler in subscription order.
    pub fn dispatch(&mut self, event: &mut T) {
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// A row or column is about to be resized by the user.
///
/// Handlers may adjust the size or veto the change with
/// [`prevent_default`](Self::prevent_default).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeEvent {
    surface: Surface,
    axis: Axis,
    index: usize,
    size: i32,
    default_prevented: bool,
}

impl ResizeEvent {
    pub fn new(surface: Surface, notice: ResizeNotice) -> Self {
        Self {
            surface,
            axis: notice.axis,
            index: notice.index,
            size: notice.size,
            default_prevented: false,
        }
    }

    /// Surface the drag happened on.
    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// Replace the requested size (negative sizes become 0).
    pub fn set_size(&mut self, size: i32) {
        self.size = size.max(0);
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}
