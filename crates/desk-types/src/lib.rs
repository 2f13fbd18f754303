pub mod ticket;
pub mod appointment;
pub mod chat;
pub mod event;
pub mod config;
pub mod error;


pub use error::DeskError;
pub type Result<T> = std::result::Result<T, DeskError>;
