use crate::entities::email::EmailContent;

// Shared styling for both emails. Kept out of the format strings so the CSS
// braces stay literal.
const EMAIL_STYLES: &str = "\
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6; color: #333; } \
.container { max-width: 600px; margin: 0 auto; } \
.header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; text-align: center; border-radius: 8px 8px 0 0; } \
.header h1 { margin: 0; font-size: 24px; } \
.content { background: #f9fafb; padding: 30px; } \
.info-box { background: white; border-left: 4px solid #667eea; padding: 15px; margin: 15px 0; border-radius: 4px; } \
.info-box strong { color: #667eea; } \
.message-box { background: white; border: 1px solid #e5e7eb; padding: 20px; margin: 20px 0; border-radius: 4px; white-space: pre-wrap; word-wrap: break-word; } \
.highlight-box { background: white; border-left: 4px solid #10b981; padding: 20px; margin: 20px 0; border-radius: 4px; } \
.highlight-box h3 { color: #10b981; margin: 0 0 10px 0; } \
.social-links { margin: 20px 0; text-align: center; } \
.social-links a { margin: 0 10px; color: #667eea; text-decoration: none; } \
.footer { background: #f3f4f6; padding: 20px; text-align: center; font-size: 12px; color: #6b7280; border-radius: 0 0 8px 8px; }";

/// Notification sent to the site owner for every submission. `message` is
/// expected to be escaped already; `<` and `>` are escaped again at the
/// interpolation site regardless.
pub fn admin_notification(
    name: &str,
    email: &str,
    message: &str,
    phone: Option<&str>,
) -> EmailContent {
    let phone_row = phone
        .filter(|p| !p.trim().is_empty())
        .map(|p| format!("<p><strong>Phone:</strong> {p}</p>"))
        .unwrap_or_default();
    let message = message.replace('<', "&lt;").replace('>', "&gt;");

    EmailContent {
        subject: format!("[New message] Contact from {name}"),
        html: format!(
            r#"<html>
  <head>
    <meta charset="UTF-8">
    <style>{EMAIL_STYLES}</style>
  </head>
  <body>
    <div class="container">
      <div class="header">
        <h1>New message from your portfolio</h1>
      </div>
      <div class="content">
        <p>Someone just reached out through the contact form:</p>
        <div class="info-box">
          <p><strong>Name:</strong> {name}</p>
          <p><strong>Email:</strong> <a href="mailto:{email}">{email}</a></p>
          {phone_row}
        </div>
        <p><strong>Message:</strong></p>
        <div class="message-box">{message}</div>
        <p style="color: #6b7280; font-size: 14px; margin-top: 20px;">
          Reply promptly to leave a good impression.
        </p>
      </div>
      <div class="footer">
        <p>Portfolio contact form &bull; automated message</p>
      </div>
    </div>
  </body>
</html>"#
        ),
    }
}

/// Confirmation sent back to the person who submitted the form.
pub fn guest_confirmation(name: &str) -> EmailContent {
    EmailContent {
        subject: "Thanks for reaching out! Your message has been received".to_string(),
        html: format!(
            r#"<html>
  <head>
    <meta charset="UTF-8">
    <style>{EMAIL_STYLES}</style>
  </head>
  <body>
    <div class="container">
      <div class="header">
        <h1>Thank you!</h1>
      </div>
      <div class="content">
        <p>Hi <strong>{name}</strong>,</p>
        <p>Thanks a lot for your message. I have received it and will read it carefully.</p>
        <div class="highlight-box">
          <h3>What happens next?</h3>
          <p>I will get back to you within <strong>1&ndash;2 business days</strong>. If it is urgent, feel free to reach me directly through one of the channels below.</p>
        </div>
        <p>I am glad you got in touch and look forward to talking more!</p>
        <div class="social-links">
          <p style="margin-bottom: 10px; color: #6b7280;"><strong>Connect with me:</strong></p>
          <a href="https://github.com">GitHub</a>
          <a href="https://linkedin.com">LinkedIn</a>
        </div>
      </div>
      <div class="footer">
        <p>Portfolio &bull; automated confirmation</p>
      </div>
    </div>
  </body>
</html>"#
        ),
    }
}
