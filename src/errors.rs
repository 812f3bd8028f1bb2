use std::collections::BTreeMap;
use std::fmt;

use actix_web::http::StatusCode;
use validator::ValidationErrors;

use crate::mailer::MailError;

/// Every way a contact submission can fail, in pipeline order. The first
/// failing step wins; the orchestrator maps each kind to a fixed HTTP status
/// and user-facing message, never leaking transport error text to clients.
#[derive(Debug)]
pub enum ContactError {
    OriginRejected,
    RateLimited,
    ConfigMissing,
    MalformedBody(String),
    ValidationFailed(BTreeMap<String, String>),
    TemplateGenerationFailed(&'static str),
    TransportAuthFailed(String),
    TransportQuotaExceeded(String),
    TransportInvalidRecipient(String),
    TransportUnavailable(String),
    TransportUnclassified(String),
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactError::OriginRejected => write!(f, "origin not allowed"),
            ContactError::RateLimited => write!(f, "rate limit exceeded"),
            ContactError::ConfigMissing => write!(f, "required mail configuration missing"),
            ContactError::MalformedBody(detail) => write!(f, "unparsable request body: {detail}"),
            ContactError::ValidationFailed(fields) => {
                let summary = fields
                    .iter()
                    .map(|(field, message)| format!("{field}: {message}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation failed: {summary}")
            }
            ContactError::TemplateGenerationFailed(which) => {
                write!(f, "failed to generate {which} email template")
            }
            ContactError::TransportAuthFailed(detail) => {
                write!(f, "transport authentication failed: {detail}")
            }
            ContactError::TransportQuotaExceeded(detail) => {
                write!(f, "transport quota exceeded: {detail}")
            }
            ContactError::TransportInvalidRecipient(detail) => {
                write!(f, "transport rejected recipient: {detail}")
            }
            ContactError::TransportUnavailable(detail) => {
                write!(f, "transport unavailable: {detail}")
            }
            ContactError::TransportUnclassified(detail) => {
                write!(f, "transport failure: {detail}")
            }
        }
    }
}

impl std::error::Error for ContactError {}

impl ContactError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContactError::OriginRejected => StatusCode::FORBIDDEN,
            ContactError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ContactError::ConfigMissing => StatusCode::INTERNAL_SERVER_ERROR,
            ContactError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ContactError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            ContactError::TemplateGenerationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ContactError::TransportAuthFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
            ContactError::TransportQuotaExceeded(_) => StatusCode::SERVICE_UNAVAILABLE,
            ContactError::TransportInvalidRecipient(_) => StatusCode::BAD_REQUEST,
            ContactError::TransportUnavailable(_) => StatusCode::TOO_MANY_REQUESTS,
            ContactError::TransportUnclassified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The JSON body returned to the client. Wording distinguishes failures
    /// the caller can fix (validation), wait out (rate limits, quota), or
    /// must escalate to the site owner (auth, config).
    pub fn public_body(&self) -> serde_json::Value {
        match self {
            ContactError::OriginRejected => serde_json::json!({
                "success": false,
                "error": "Origin not allowed"
            }),
            ContactError::RateLimited => serde_json::json!({
                "success": false,
                "error": "Too many requests. Please try again later."
            }),
            ContactError::ConfigMissing => serde_json::json!({
                "success": false,
                "error": "Server configuration error"
            }),
            ContactError::MalformedBody(_) => serde_json::json!({
                "success": false,
                "error": "Invalid request format. Please send valid JSON."
            }),
            ContactError::ValidationFailed(fields) => serde_json::json!({
                "success": false,
                "error": "Validation failed. Please check your input.",
                "details": fields
            }),
            ContactError::TransportAuthFailed(_) => serde_json::json!({
                "success": false,
                "error": "Email service authentication error. Please contact the site owner."
            }),
            ContactError::TransportQuotaExceeded(_) => serde_json::json!({
                "success": false,
                "error": "Email service has reached its daily limit. Please try again tomorrow."
            }),
            ContactError::TransportInvalidRecipient(_) => serde_json::json!({
                "success": false,
                "error": "Invalid recipient email address."
            }),
            ContactError::TransportUnavailable(_) => serde_json::json!({
                "success": false,
                "error": "Email service is temporarily unavailable. Please try again later."
            }),
            ContactError::TemplateGenerationFailed(_) | ContactError::TransportUnclassified(_) => {
                serde_json::json!({
                    "success": false,
                    "error": "Failed to send email. Please try again in a moment."
                })
            }
        }
    }
}

impl From<ValidationErrors> for ContactError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .iter()
            .filter_map(|(field, errors)| {
                // First violated rule wins; the rules are checked in
                // declaration order inside each validator function.
                errors.first().map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string());
                    (field.to_string(), message)
                })
            })
            .collect();

        ContactError::ValidationFailed(fields)
    }
}

impl From<serde_json::Error> for ContactError {
    fn from(err: serde_json::Error) -> Self {
        ContactError::MalformedBody(err.to_string())
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

impl From<MailError> for ContactError {
    fn from(err: MailError) -> Self {
        let detail = err.0;
        let lowered = detail.to_lowercase();

        if contains_any(
            &lowered,
            &["invalid login", "authentication failed", "invalid credentials"],
        ) {
            ContactError::TransportAuthFailed(detail)
        } else if contains_any(&lowered, &["daily limit", "rate limit"]) {
            ContactError::TransportQuotaExceeded(detail)
        } else if contains_any(&lowered, &["invalid email", "invalid recipient"]) {
            ContactError::TransportInvalidRecipient(detail)
        } else if contains_any(&lowered, &["too many requests", "connection refused"]) {
            ContactError::TransportUnavailable(detail)
        } else {
            ContactError::TransportUnclassified(detail)
        }
    }
}
