pub mod api;
pub mod client;
pub mod error;
pub mod http;
mod string;
mod version;
