use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::{MailError, Mailer, SendReceipt};
use crate::entities::email::EmailMessage;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Transactional HTTP email API transport (Resend).
pub struct ResendMailer {
    client: Client,
    api_key: String,
    from: String,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

impl ResendMailer {
    pub fn new(api_key: String, from: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        ResendMailer {
            client,
            api_key,
            from,
        }
    }
}

// reqwest keeps the root cause (e.g. "Connection refused") in the error
// source chain rather than the top-level Display, and the error classifier
// matches on message text.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut chain = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: EmailMessage) -> Result<SendReceipt, MailError> {
        let payload = SendEmailRequest {
            from: &self.from,
            to: [email.to.as_str()],
            subject: &email.subject,
            html: &email.html,
        };

        let response = self
            .client
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailError(format!("email api unreachable: {}", error_chain(&e))))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(MailError(format!(
                    "email api rejected send: too many requests: {body}"
                )));
            }
            return Err(MailError(format!("email api error ({status}): {body}")));
        }

        let accepted: SendEmailResponse = response
            .json()
            .await
            .map_err(|e| MailError(format!("email api returned malformed response: {e}")))?;

        Ok(SendReceipt { id: accepted.id })
    }
}
