/// Rendered subject/body pair produced by a template builder.
#[derive(Debug, Clone)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
}

/// A fully addressed outbound email. Built fresh per send, never retained
/// after dispatch.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, content: EmailContent) -> Self {
        EmailMessage {
            to: to.into(),
            subject: content.subject,
            html: content.html,
        }
    }
}
