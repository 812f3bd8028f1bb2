use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::constants::MAX_MESSAGE_LEN;

/// Wire payload of a contact-form submission. Validated once on intake and
/// discarded when the request completes; never persisted.
///
/// Required fields default to empty strings on deserialization so a missing
/// field surfaces as a per-field validation message rather than a parse
/// failure.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactForm {
    #[serde(default)]
    #[validate(custom(function = validate_name))]
    pub name: String,

    #[serde(default)]
    #[validate(custom(function = validate_email_address))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = validate_message))]
    pub message: String,

    pub phone: Option<String>,
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(invalid("required", "Please enter your name"));
    }

    let length = trimmed.chars().count();
    if length < 2 {
        return Err(invalid("min_length", "Name must be at least 2 characters"));
    }
    if length > 50 {
        return Err(invalid("max_length", "Name must not exceed 50 characters"));
    }
    Ok(())
}

/// Stricter than the RFC-5322-ish shape check alone: mail providers reject
/// addresses with consecutive dots, dot/hyphen at either end, or an oversized
/// local part, so those are caught here instead of surfacing as a transport
/// error after dispatch.
fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    let error = || invalid("email", "Please enter a valid email address");

    if !email.validate_email() {
        return Err(error());
    }
    if email.chars().count() > 254 {
        return Err(error());
    }
    if email.contains("..") {
        return Err(error());
    }
    if email.starts_with('.') || email.ends_with('.') || email.starts_with('-') || email.ends_with('-') {
        return Err(error());
    }

    let local = email.split('@').next().unwrap_or("");
    if local.chars().count() > 64 || local.starts_with('.') || local.ends_with('.') {
        return Err(error());
    }

    Ok(())
}

fn validate_message(message: &str) -> Result<(), ValidationError> {
    if message.trim().is_empty() {
        return Err(invalid("required", "Please enter a message"));
    }
    if message.chars().count() > MAX_MESSAGE_LEN {
        return Err(invalid(
            "max_length",
            "Message must not exceed 1000 characters",
        ));
    }
    Ok(())
}
