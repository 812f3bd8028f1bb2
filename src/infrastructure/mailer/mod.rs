use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use derive_more::Display;

use crate::entities::email::EmailMessage;
use crate::settings::{AppConfig, MailTransport};

mod resend;
mod smtp;

pub use resend::ResendMailer;
pub use smtp::SmtpMailer;

/// Identifier of an accepted outbound message, as reported by the transport.
#[derive(Debug, Clone)]
pub struct SendReceipt {
    pub id: String,
}

/// Delivery failure carrying the transport's own error text. The text never
/// reaches a client; the orchestrator classifies it by keyword and maps it to
/// a fixed user-facing response.
#[derive(Debug, Display)]
#[display("{_0}")]
pub struct MailError(pub String);

impl std::error::Error for MailError {}

/// Abstract mail transport. Exactly one outbound message per `send` call;
/// each implementation bounds the call with its own transport-level timeout.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: EmailMessage) -> Result<SendReceipt, MailError>;
}

/// Selects the concrete transport from configuration at startup.
pub fn build_mailer(config: &AppConfig) -> anyhow::Result<Arc<dyn Mailer>> {
    match config.mail_transport {
        MailTransport::Smtp => {
            let mailer = SmtpMailer::new(
                &config.smtp_host,
                &config.smtp_user,
                &config.smtp_password,
                &config.email_from,
            )
            .context("failed to initialize smtp transport")?;
            Ok(Arc::new(mailer))
        }
        MailTransport::Resend => {
            let api_key = config
                .resend_api_key
                .clone()
                .context("APP_RESEND_API_KEY must be set for the resend transport")?;
            Ok(Arc::new(ResendMailer::new(api_key, config.email_from.clone())))
        }
    }
}
