use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::{contact::ContactForm, email::EmailMessage},
    errors::ContactError,
    mailer::{Mailer, SendReceipt},
    templates,
    utils::escape_html::escape_html,
};

/// Core of the contact pipeline: parse, validate, sanitize, render and
/// dispatch both emails. The surrounding HTTP handler owns the CORS, rate
/// limit and configuration checks that run before this.
pub struct ContactHandler {
    mailer: Arc<dyn Mailer>,
    admin_email: String,
}

impl ContactHandler {
    pub fn new(mailer: Arc<dyn Mailer>, admin_email: String) -> Self {
        ContactHandler {
            mailer,
            admin_email,
        }
    }

    /// Runs the submission pipeline on a raw request body. On success exactly
    /// two messages have been dispatched, admin notification first, then the
    /// guest confirmation. No retries; the first failing step wins.
    pub async fn submit(&self, body: &[u8]) -> Result<[SendReceipt; 2], ContactError> {
        let form: ContactForm = serde_json::from_slice(body)?;
        form.validate()?;

        let escaped_message = escape_html(&form.message);

        let admin = templates::admin_notification(
            &form.name,
            &form.email,
            &escaped_message,
            form.phone.as_deref(),
        );
        if admin.subject.is_empty() || admin.html.is_empty() {
            return Err(ContactError::TemplateGenerationFailed("admin notification"));
        }
        let admin_receipt = self
            .mailer
            .send(EmailMessage::new(&self.admin_email, admin))
            .await?;

        let guest = templates::guest_confirmation(&form.name);
        if guest.subject.is_empty() || guest.html.is_empty() {
            return Err(ContactError::TemplateGenerationFailed("guest confirmation"));
        }
        let guest_receipt = self
            .mailer
            .send(EmailMessage::new(&form.email, guest))
            .await
            .map_err(|e| {
                // The admin copy already went out; the overall request still
                // fails, so a retried submission may duplicate it.
                tracing::warn!(
                    admin_receipt = %admin_receipt.id,
                    "guest confirmation failed after admin notification was delivered: {e}"
                );
                e
            })?;

        Ok([admin_receipt, guest_receipt])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailer::MailError;
    use async_trait::async_trait;
    use mockall::{Sequence, mock, predicate};

    mock! {
        pub TestMailer {}

        #[async_trait]
        impl Mailer for TestMailer {
            async fn send(&self, email: EmailMessage) -> Result<SendReceipt, MailError>;
        }
    }

    const ADMIN: &str = "owner@example.com";

    fn valid_body() -> Vec<u8> {
        serde_json::json!({
            "name": "Alice",
            "email": "alice@example.com",
            "message": "Hello <there> & welcome"
        })
        .to_string()
        .into_bytes()
    }

    fn handler(mailer: MockTestMailer) -> ContactHandler {
        ContactHandler::new(Arc::new(mailer), ADMIN.to_string())
    }

    #[tokio::test]
    async fn dispatches_admin_then_guest() {
        let mut mailer = MockTestMailer::new();
        let mut seq = Sequence::new();

        mailer
            .expect_send()
            .withf(|email| email.to == ADMIN && email.subject.contains("Alice"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(SendReceipt { id: "admin-1".to_string() }));
        mailer
            .expect_send()
            .withf(|email| email.to == "alice@example.com")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(SendReceipt { id: "guest-1".to_string() }));

        let receipts = handler(mailer).submit(&valid_body()).await.unwrap();
        assert_eq!(receipts[0].id, "admin-1");
        assert_eq!(receipts[1].id, "guest-1");
    }

    #[tokio::test]
    async fn escapes_message_before_it_reaches_the_template() {
        let mut mailer = MockTestMailer::new();
        mailer
            .expect_send()
            .withf(|email| !email.html.contains("<there>"))
            .times(2)
            .returning(|_| Ok(SendReceipt { id: "id".to_string() }));

        handler(mailer).submit(&valid_body()).await.unwrap();
    }

    #[tokio::test]
    async fn unparsable_body_fails_before_any_dispatch() {
        let mailer = MockTestMailer::new();
        let err = handler(mailer).submit(b"{not json").await.unwrap_err();
        assert!(matches!(err, ContactError::MalformedBody(_)));
    }

    #[tokio::test]
    async fn invalid_fields_fail_before_any_dispatch() {
        let mailer = MockTestMailer::new();
        let body = serde_json::json!({"name": "A", "email": "a@b.co", "message": "hi"});
        let err = handler(mailer)
            .submit(body.to_string().as_bytes())
            .await
            .unwrap_err();

        match err {
            ContactError::ValidationFailed(fields) => {
                assert_eq!(fields["name"], "Name must be at least 2 characters");
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn admin_send_failure_skips_guest_confirmation() {
        let mut mailer = MockTestMailer::new();
        mailer
            .expect_send()
            .with(predicate::function(|email: &EmailMessage| email.to == ADMIN))
            .times(1)
            .returning(|_| Err(MailError("535 invalid login".to_string())));

        let err = handler(mailer).submit(&valid_body()).await.unwrap_err();
        assert!(matches!(err, ContactError::TransportAuthFailed(_)));
    }

    #[tokio::test]
    async fn guest_send_failure_surfaces_as_overall_failure() {
        let mut mailer = MockTestMailer::new();
        let mut seq = Sequence::new();

        mailer
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(SendReceipt { id: "admin-1".to_string() }));
        mailer
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(MailError("connection refused".to_string())));

        let err = handler(mailer).submit(&valid_body()).await.unwrap_err();
        assert!(matches!(err, ContactError::TransportUnavailable(_)));
    }
}
