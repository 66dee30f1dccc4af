use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::{debug, info, instrument};

use crate::{
    config::RelayConfig,
    mail::{ContactEmail, MailBackend},
};

pub struct SmtpBackend {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipient: Mailbox,
}

#[async_trait]
impl MailBackend for SmtpBackend {
    fn new(config: Arc<RelayConfig>) -> Result<Self> {
        let mail = &config.mail;

        info!({ relay = %mail.relay }, "creating smtp transport");

        let sender: Mailbox = mail.sender()?.parse()?;
        let recipient: Mailbox = mail.recipient()?.parse()?;

        let username = mail
            .username
            .clone()
            .ok_or_else(|| anyhow::Error::msg("smtp backend requires a username (EMAIL_USER)"))?;

        let password = mail
            .password
            .clone()
            .ok_or_else(|| anyhow::Error::msg("smtp backend requires a password (EMAIL_PASS)"))?;

        // relay() means implicit tls on the submission port unless a port is configured
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&mail.relay)?
            .credentials(Credentials::new(username, password));

        if let Some(port) = mail.port {
            builder = builder.port(port);
        }

        // the connection pool spawns onto the runtime, so this has to be
        // called from within one
        Ok(SmtpBackend {
            transport: builder.build(),
            sender,
            recipient,
        })
    }

    #[instrument(skip_all)]
    async fn send(&self, email: ContactEmail) -> Result<()> {
        debug!({ subject = %email.subject }, "sending contact email");

        let message = Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html)?;

        self.transport.send(message).await?;

        Ok(())
    }
}
