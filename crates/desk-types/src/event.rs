use serde::{Deserialize, Serialize};

/// Events emitted by the board and the chat session.
/// The app drains these each frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeskEvent {
    /// The backend reported a ticket change; the board should reload
    RefreshRequested,

    /// A transient notification for the user
    Notice { level: NoticeLevel, message: String },
}

impl DeskEvent {
    pub fn notice(level: NoticeLevel, message: impl Into<String>) -> Self {
        DeskEvent::Notice {
            level,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Success,
    Error,
}
