//! Command handlers for CLI operations

pub mod send;
pub mod serve;

pub use send::SendCommandHandler;
pub use serve::ServeCommandHandler;
