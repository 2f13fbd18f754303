//! Ticketing backend adapter.
//!
//! Implements both core ports over browser `fetch()` via gloo-net.
//! Non-2xx statuses are reported as `DeskError::Http`.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};

use desk_core::ports::{ChatPort, TicketPort};
use desk_types::{
    DeskError, Result,
    chat::{ChatReply, ChatRequest},
    ticket::TicketList,
};
use crate::endpoints;

pub struct HttpBackend {
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait(?Send)]
impl TicketPort for HttpBackend {
    async fn list_tickets(&self) -> Result<TicketList> {
        let url = endpoints::tickets_url(&self.base_url);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| DeskError::Network(e.to_string()))?;
        let response = ensure_ok(response).await?;

        response
            .json::<TicketList>()
            .await
            .map_err(|e| DeskError::Serialization(e.to_string()))
    }

    async fn delete_ticket(&self, id: &str) -> Result<()> {
        let url = endpoints::ticket_url(&self.base_url, id);

        let response = Request::delete(&url)
            .send()
            .await
            .map_err(|e| DeskError::Network(e.to_string()))?;
        ensure_ok(response).await?;

        log::info!("Deleted ticket {}", id);
        Ok(())
    }
}

#[async_trait(?Send)]
impl ChatPort for HttpBackend {
    async fn send_chat(&self, req: &ChatRequest) -> Result<ChatReply> {
        let url = endpoints::chat_url(&self.base_url, &req.thread_id);

        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .json(req)
            .map_err(|e| DeskError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| DeskError::Network(e.to_string()))?;
        let response = ensure_ok(response).await?;

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| DeskError::Serialization(e.to_string()))
    }
}

/// Turn a non-2xx response into an error carrying the body text.
async fn ensure_ok(response: Response) -> Result<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| response.status_text());
    Err(DeskError::Http { status, message })
}
