//! Event bus between the core state machines and the UI.
//!
//! Single-threaded (WASM main thread), shared through `Rc<RefCell<_>>`.
//! The board and the chat session publish through the typed emitters;
//! the app drains once per frame. A refresh request is queued at most once
//! between drains.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use desk_types::event::{DeskEvent, NoticeLevel};

#[derive(Default)]
struct Queue {
    events: VecDeque<DeskEvent>,
    refresh_queued: bool,
}

/// Shared event bus: clone-cheap via Rc.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<Queue>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the board to reload. Repeated requests before the next drain
    /// collapse into one.
    pub fn request_refresh(&self) {
        let mut queue = self.inner.borrow_mut();
        if queue.refresh_queued {
            log::debug!("Refresh already queued");
            return;
        }
        queue.refresh_queued = true;
        queue.events.push_back(DeskEvent::RefreshRequested);
    }

    /// Queue a transient notice for the user.
    pub fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        self.inner
            .borrow_mut()
            .events
            .push_back(DeskEvent::notice(level, message));
    }

    /// Take everything queued since the last drain, in publish order.
    pub fn drain(&self) -> Vec<DeskEvent> {
        let mut queue = self.inner.borrow_mut();
        queue.refresh_queued = false;
        queue.events.drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().events.is_empty()
    }
}
