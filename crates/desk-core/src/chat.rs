//! Chat session: transcript and thread bookkeeping for the support agent.
//!
//! A turn goes: `begin_send` (optimistic user message, busy) → port call →
//! `finish_send` (agent message, thread update, refresh signal).

use std::cell::RefCell;

use desk_types::{
    Result,
    chat::{ChatMessage, ChatReply, ChatRequest},
};
use crate::event_bus::EventBus;
use crate::ports::ChatPort;

/// Marks a reply after which the agent considers the conversation closed.
pub const TERMINAL_MARKER: &str = "FINAL ANSWER:";
pub const APOLOGY: &str = "Sorry, Not able to respond now due to technical issues";
pub const EMPTY_REPLY: &str = "No response";

const EMPHASIS: &str = "**";

pub struct ChatSession {
    messages: Vec<ChatMessage>,
    thread_id: Option<String>,
    busy: bool,
    event_bus: EventBus,
}

impl ChatSession {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            messages: Vec::new(),
            thread_id: None,
            busy: false,
            event_bus,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Start a turn. Returns the request to send, or `None` when the text is
    /// blank or a request is already outstanding.
    pub fn begin_send(&mut self, text: &str) -> Option<ChatRequest> {
        if text.trim().is_empty() {
            return None;
        }
        if self.busy {
            log::warn!("Chat request already in flight, ignoring send");
            return None;
        }

        self.messages.push(ChatMessage::you(text));
        self.busy = true;

        Some(ChatRequest {
            message: text.to_string(),
            thread_id: self.thread_id.clone().unwrap_or_default(),
        })
    }

    /// Finish the outstanding turn with the backend's reply or failure.
    pub fn finish_send(&mut self, result: Result<ChatReply>) {
        self.busy = false;

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                log::error!("Chat request failed: {}", e);
                self.messages.push(ChatMessage::agent(APOLOGY));
                return;
            }
        };
        log::debug!("Chat reply: {:?}", reply);

        let raw = reply.response.as_deref();
        let text = raw.map(format_reply).unwrap_or_else(|| EMPTY_REPLY.to_string());

        self.thread_id = if raw.is_some_and(is_terminal) {
            None
        } else {
            reply.thread_id.clone().filter(|id| !id.is_empty())
        };

        if reply.ticket_changed() {
            self.event_bus.request_refresh();
        }

        self.messages.push(ChatMessage::agent(text));
    }
}

/// Strip emphasis markers and the terminal marker, then trim.
pub fn format_reply(raw: &str) -> String {
    raw.replace(EMPHASIS, "")
        .replace(TERMINAL_MARKER, "")
        .trim()
        .to_string()
}

pub fn is_terminal(raw: &str) -> bool {
    raw.contains(TERMINAL_MARKER)
}

/// Run one chat turn against the backend.
/// Returns false when the text was not sent (blank, or a turn is in flight).
pub async fn send_message(session: &RefCell<ChatSession>, port: &dyn ChatPort, text: &str) -> bool {
    let Some(req) = session.borrow_mut().begin_send(text) else {
        return false;
    };
    let result = port.send_chat(&req).await;
    session.borrow_mut().finish_send(result);
    true
}
