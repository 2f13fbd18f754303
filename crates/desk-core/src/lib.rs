//! Service desk core: board and chat state machines behind port traits.

pub mod ports;
pub mod event_bus;
pub mod board;
pub mod chat;

#[cfg(test)]
mod tests;
