use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header},
    transport::smtp::authentication::Credentials,
};
use uuid::Uuid;

use super::{MailError, Mailer, SendReceipt};
use crate::entities::email::EmailMessage;

/// Direct SMTP relay using account credentials (Gmail-style app password).
/// The transport's own connection/response timeouts bound each send.
pub struct SmtpMailer {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(host: &str, user: &str, password: &str, from: &str) -> Result<Self, MailError> {
        let from = from
            .parse::<Mailbox>()
            .map_err(|e| MailError(format!("invalid from address {from:?}: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .map_err(|e| MailError(format!("smtp relay setup failed for {host}: {e}")))?
            .credentials(Credentials::new(user.to_string(), password.to_string()))
            .build();

        Ok(SmtpMailer { from, transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: EmailMessage) -> Result<SendReceipt, MailError> {
        let EmailMessage { to, subject, html } = email;

        let recipient = to
            .parse::<Mailbox>()
            .map_err(|e| MailError(format!("invalid recipient address {to:?}: {e}")))?;

        let message_id = format!("<{}@portfolio-api>", Uuid::new_v4());
        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .message_id(Some(message_id.clone()))
            .header(header::ContentType::TEXT_HTML)
            .body(html)
            .map_err(|e| MailError(format!("failed to build mime message: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError(e.to_string()))?;

        Ok(SendReceipt { id: message_id })
    }
}
