use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::{
    config::RelayConfig,
    mail::{ContactEmail, MailBackend},
};

// dry-run backend
//
// useful when working on the page locally without mail credentials; every
// submission is accepted and written to the log instead of being sent
pub struct LogBackend {
    recipient: String,
}

#[async_trait]
impl MailBackend for LogBackend {
    fn new(config: Arc<RelayConfig>) -> Result<Self> {
        Ok(LogBackend {
            recipient: config
                .mail
                .recipient()
                .unwrap_or("(no recipient configured)")
                .to_owned(),
        })
    }

    async fn send(&self, email: ContactEmail) -> Result<()> {
        info!(
            { recipient = %self.recipient, subject = %email.subject },
            "dry run, not sending contact email:\n{}", email.html
        );

        Ok(())
    }
}
