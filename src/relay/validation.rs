//! Pre-dispatch request guard.

use validator::{ValidateLength, ValidationError, ValidationErrors};

use crate::config::ValidationSettings;
use crate::error::AppResult;
use crate::relay::payload::NotificationRequest;

/// Rejects empty or oversized requests before any network call.
///
/// Lengths are counted in characters. Field names in errors use the wire
/// names (`toToken`, `title`, `body`).
#[derive(Debug, Clone)]
pub struct RequestValidator {
    max_token_length: u64,
    max_title_length: u64,
    max_body_length: u64,
}

impl RequestValidator {
    pub fn new(settings: &ValidationSettings) -> Self {
        Self {
            max_token_length: settings.max_token_length,
            max_title_length: settings.max_title_length,
            max_body_length: settings.max_body_length,
        }
    }

    /// Collects every violation and returns them together as `AppError::ValidationErrors`
    pub fn validate(&self, request: &NotificationRequest) -> AppResult<()> {
        let mut errors = ValidationErrors::new();

        if request.recipient_token.trim().is_empty() {
            errors.add(
                "toToken",
                ValidationError::new("required").with_message("must not be empty".into()),
            );
        } else if let Some(error) = too_long(&request.recipient_token, self.max_token_length) {
            errors.add("toToken", error);
        }

        if let Some(error) = too_long(&request.title, self.max_title_length) {
            errors.add("title", error);
        }
        if let Some(error) = too_long(&request.body, self.max_body_length) {
            errors.add("body", error);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.into())
        }
    }
}

fn too_long(value: &str, max: u64) -> Option<ValidationError> {
    if value.validate_length(None, Some(max), None) {
        return None;
    }
    let mut error = ValidationError::new("length")
        .with_message(format!("must be at most {} characters", max).into());
    error.add_param("max".into(), &max);
    Some(error)
}
