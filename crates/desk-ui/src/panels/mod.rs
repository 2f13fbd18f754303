pub mod board;
pub mod chat;
pub mod toast;
