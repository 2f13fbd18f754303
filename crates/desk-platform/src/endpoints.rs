//! URL construction for the ticketing backend.

pub fn tickets_url(base: &str) -> String {
    format!("{}/tickets", base)
}

pub fn ticket_url(base: &str, id: &str) -> String {
    format!("{}/ticket/{}", base, id)
}

/// `POST` target for a chat turn. An empty thread id yields a trailing
/// slash, which the backend treats as "new conversation".
pub fn chat_url(base: &str, thread_id: &str) -> String {
    format!("{}/chat/{}", base, thread_id)
}
