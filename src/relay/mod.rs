//! Notification relay core.
//!
//! One invocation maps to one outbound POST to the messaging gateway:
//! `NotificationRequest` → (optional guard) → `OutboundPushPayload` →
//! `PushTransport::deliver` → `DeliveryCheck` → `GatewayResponse`.

pub mod delivery;
pub mod payload;
pub mod service;
pub mod transport;
pub mod validation;

pub use delivery::DeliveryCheck;
pub use payload::{GatewayResponse, NotificationRequest, OutboundPushPayload, PushNotification};
pub use service::NotificationRelay;
pub use transport::{FcmLegacyTransport, PushTransport};
pub use validation::RequestValidator;
