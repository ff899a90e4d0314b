//! JSON API for the org chart front end

pub mod handler;
pub mod server;

pub use handler::{ApiError, SharedExplorer};
pub use server::{router, HttpServer};
