//! Render coalescing.
//!
//! Any number of render requests between two display frames produce a single
//! render pass. After disposal the scheduler refuses new requests and the
//! pending frame, if any, is cancelled.

use crate::render::{FrameRequester, FrameToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SchedulerState {
    #[default]
    Idle,
    FramePending(FrameToken),
    Disposed,
}

#[derive(Debug, Default)]
pub struct RenderScheduler {
    state: SchedulerState,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a render pass. Returns `true` when a new frame was requested,
    /// `false` when one is already pending or the scheduler is disposed.
    pub fn request(&mut self, frames: &mut dyn FrameRequester) -> bool {
        match self.state {
            SchedulerState::Idle => {
                self.state = SchedulerState::FramePending(frames.request_frame());
                true
            }
            SchedulerState::FramePending(_) | SchedulerState::Disposed => false,
        }
    }

    /// Claim the frame `token`. Returns `true` when the render pass should
    /// run; stale or cancelled tokens are ignored.
    pub fn begin_frame(&mut self, token: FrameToken) -> bool {
        if self.state == SchedulerState::FramePending(token) {
            self.state = SchedulerState::Idle;
            true
        } else {
            false
        }
    }

    /// Drop the pending frame, if any, without disposing.
    pub fn cancel(&mut self, frames: &mut dyn FrameRequester) {
        if let SchedulerState::FramePending(token) = self.state {
            frames.cancel_frame(token);
            self.state = SchedulerState::Idle;
        }
    }

    pub fn dispose(&mut self, frames: &mut dyn FrameRequester) {
        self.cancel(frames);
        self.state = SchedulerState::Disposed;
    }

    pub fn pending(&self) -> Option<FrameToken> {
        match self.state {
            SchedulerState::FramePending(token) => Some(token),
            SchedulerState::Idle | SchedulerState::Disposed => None,
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.state == SchedulerState::Disposed
    }
}
