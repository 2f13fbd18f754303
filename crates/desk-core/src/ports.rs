//! Port traits: the hexagonal architecture boundary.
//!
//! Defined here in `desk-core` (pure Rust). The browser implementation
//! lives in `desk-platform`; the core only depends on these traits.

use async_trait::async_trait;
use desk_types::{
    Result,
    chat::{ChatReply, ChatRequest},
    ticket::TicketList,
};

// ─── Ticket Port ─────────────────────────────────────────────

#[async_trait(?Send)]
pub trait TicketPort {
    /// Read every ticket
    async fn list_tickets(&self) -> Result<TicketList>;

    /// Delete one ticket. Succeeds only on a 2xx status.
    async fn delete_ticket(&self, id: &str) -> Result<()>;
}

// ─── Chat Port ───────────────────────────────────────────────

#[async_trait(?Send)]
pub trait ChatPort {
    /// Send one user turn. The thread id in the request also selects the
    /// endpoint path; an empty id starts a new conversation.
    async fn send_chat(&self, req: &ChatRequest) -> Result<ChatReply>;
}
