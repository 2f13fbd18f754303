//! UI-level state that is not owned by the board or the chat session:
//! the draft input, live toasts, and frame-to-frame bookkeeping.
//! Updated each frame by draining the EventBus.

use desk_types::event::{DeskEvent, NoticeLevel};

pub struct UiState {
    /// Chat input field content
    pub input_text: String,
    /// Toasts currently on screen
    pub toasts: Vec<Toast>,
    /// A board reload was requested since the last frame
    refresh_pending: bool,
    /// Transcript length at the last chat render
    seen_messages: usize,
    notice_ttl_secs: f64,
}

/// A transient notification
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub level: NoticeLevel,
    pub message: String,
    /// egui time (seconds) after which the toast is removed
    pub expires_at: f64,
}

impl UiState {
    pub fn new(notice_ttl_secs: f64) -> Self {
        Self {
            input_text: String::new(),
            toasts: Vec::new(),
            refresh_pending: false,
            seen_messages: 0,
            notice_ttl_secs,
        }
    }

    /// Process events from the EventBus. `now` is the egui clock in seconds.
    pub fn process_events(&mut self, events: Vec<DeskEvent>, now: f64) {
        for event in events {
            match event {
                DeskEvent::RefreshRequested => {
                    self.refresh_pending = true;
                }
                DeskEvent::Notice { level, message } => {
                    self.toasts.push(Toast {
                        level,
                        message,
                        expires_at: now + self.notice_ttl_secs,
                    });
                }
            }
        }
    }

    /// Consume the pending refresh request. Several requests in one frame
    /// collapse into a single reload.
    pub fn take_refresh(&mut self) -> bool {
        std::mem::take(&mut self.refresh_pending)
    }

    pub fn prune_toasts(&mut self, now: f64) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    /// Record the transcript length; true when it differs from last time.
    pub fn transcript_changed(&mut self, len: usize) -> bool {
        let changed = len != self.seen_messages;
        self.seen_messages = len;
        changed
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(3.0)
    }
}
