use serde::{Deserialize, Serialize};

/// Who wrote a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    You,
    Agent,
}

impl Sender {
    pub fn label(&self) -> &'static str {
        match self {
            Sender::You => "You",
            Sender::Agent => "Agent",
        }
    }
}

/// A single entry in the chat transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn you(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::You,
            text: text.into(),
        }
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Agent,
            text: text.into(),
        }
    }
}

/// Body of `POST /chat/{threadId}`.
/// `thread_id` is empty when a new conversation should be started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub thread_id: String,
}

/// Reply from the chat endpoint. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub ticket_created: Option<bool>,
}

impl ChatReply {
    pub fn ticket_changed(&self) -> bool {
        self.ticket_created.unwrap_or(false)
    }
}
