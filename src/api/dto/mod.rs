//! Data Transfer Objects for API requests and responses.
//!
//! - `callable` - callable-function envelopes for the relay endpoint
//! - `health` - health probe responses

mod callable;
mod health;

pub use callable::{
    CallableError, CallableErrorResponse, CallableResult, CallableStatus, SendNotificationEnvelope,
};
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
