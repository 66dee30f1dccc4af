use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::RelayConfig;
use api::contact::ContactReq;

pub mod log;
pub mod smtp;
pub use log::LogBackend;
pub use smtp::SmtpBackend;

// the one call every mail backend must handle
#[async_trait]
pub trait MailBackend: Send + Sync + 'static {
    fn new(config: Arc<RelayConfig>) -> Result<Self>
    where
        Self: Sized;

    async fn send(&self, email: ContactEmail) -> Result<()>;
}

// a composed message, ready to be handed to a backend
//
// sender and recipient are properties of the backend (they come from the
// config), so only the per-submission parts are carried here
#[derive(Clone, Debug, PartialEq)]
pub struct ContactEmail {
    pub subject: String,
    pub html: String,
}

impl ContactEmail {
    pub fn compose(subject_prefix: &str, req: &ContactReq) -> Self {
        let subject = format!("{subject_prefix}: {}", or(&req.subject, "New Message"));

        // submissions come straight from the public form, so everything is
        // escaped before it is spliced into the html
        let html = format!(
            r#"
      <h2>New Contact Form Submission</h2>
      <p><strong>Name:</strong> {} {}</p>
      <p><strong>Email:</strong> {}</p>
      <p><strong>Phone:</strong> {}</p>
      <p><strong>Subject:</strong> {}</p>
      <p><strong>Message:</strong></p>
      <p>{}</p>
    "#,
            escape(&req.first_name),
            escape(&req.last_name),
            escape(&req.email),
            escape(or(&req.phone, "Not provided")),
            escape(or(&req.subject, "No subject")),
            escape(&req.message).replace('\n', "<br>"),
        );

        ContactEmail { subject, html }
    }
}

fn or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req() -> ContactReq {
        ContactReq {
            first_name: String::from("Jo"),
            email: String::from("jo@x.com"),
            message: String::from("hi"),
            ..Default::default()
        }
    }

    #[test]
    fn subject_defaults_to_new_message() {
        let email = ContactEmail::compose("Portfolio Contact", &req());

        assert_eq!(email.subject, "Portfolio Contact: New Message");
    }

    #[test]
    fn subject_uses_submission() {
        let req = ContactReq {
            subject: String::from("Hiring"),
            ..req()
        };

        let email = ContactEmail::compose("Portfolio Contact", &req);

        assert_eq!(email.subject, "Portfolio Contact: Hiring");
        assert!(email.html.contains("<p><strong>Subject:</strong> Hiring</p>"));
    }

    #[test]
    fn optional_fields_render_placeholders() {
        let email = ContactEmail::compose("Portfolio Contact", &req());

        assert!(email.html.contains("<h2>New Contact Form Submission</h2>"));
        assert!(email.html.contains("<p><strong>Name:</strong> Jo </p>"));
        assert!(email.html.contains("<p><strong>Email:</strong> jo@x.com</p>"));
        assert!(email.html.contains("<p><strong>Phone:</strong> Not provided</p>"));
        assert!(email.html.contains("<p><strong>Subject:</strong> No subject</p>"));
    }

    #[test]
    fn every_field_is_embedded() {
        let req = ContactReq {
            first_name: String::from("Jo"),
            last_name: String::from("Doe"),
            email: String::from("jo@x.com"),
            phone: String::from("555-0100"),
            subject: String::from("Hello"),
            message: String::from("hi"),
        };

        let email = ContactEmail::compose("Portfolio Contact", &req);

        assert!(email.html.contains("<p><strong>Name:</strong> Jo Doe</p>"));
        assert!(email.html.contains("<p><strong>Phone:</strong> 555-0100</p>"));
        assert!(email.html.contains("<p>hi</p>"));
    }

    #[test]
    fn newlines_become_line_breaks() {
        let req = ContactReq {
            message: String::from("line one\nline two\n\nline four"),
            ..req()
        };

        let email = ContactEmail::compose("Portfolio Contact", &req);

        assert!(email.html.contains("<p>line one<br>line two<br><br>line four</p>"));
    }

    #[test]
    fn markup_is_escaped() {
        let req = ContactReq {
            first_name: String::from("<script>"),
            message: String::from("a & b\n\"quoted\""),
            ..req()
        };

        let email = ContactEmail::compose("Portfolio Contact", &req);

        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains("&lt;script&gt;"));
        assert!(email.html.contains("<p>a &amp; b<br>&quot;quoted&quot;</p>"));
    }
}
