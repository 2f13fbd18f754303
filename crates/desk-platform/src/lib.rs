//! Browser adapters for the service desk ports.

pub mod endpoints;
pub mod http;

pub use http::HttpBackend;
