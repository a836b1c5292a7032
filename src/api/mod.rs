//! HTTP API layer: the callable relay endpoint, health probes, middleware
//! and DTOs.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
mod doc;

pub use doc::ApiDoc;
