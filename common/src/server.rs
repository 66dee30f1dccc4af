use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

// relay configuration subtables
//
// split out of config.rs the same way the backends are, so that each table
// can carry its own defaults
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    // ip and port for http server; the port can be overridden by PORT
    pub socket: String,

    // directory served at the site root, which holds the page and its assets
    pub doc_root: PathBuf,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            socket: String::from("0.0.0.0:3001"),
            doc_root: PathBuf::from("."),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct MailConfig {
    // smtp submission host; lettre picks the implicit tls port unless told otherwise
    pub relay: String,
    pub port: Option<u16>,

    // account credentials, normally supplied as EMAIL_USER and EMAIL_PASS
    pub username: Option<String>,
    pub password: Option<String>,

    // defaults to the account itself
    pub sender: Option<String>,

    // where submissions are delivered; defaults to the sender
    pub recipient: Option<String>,

    // "{subject_prefix}: {subject}"
    pub subject_prefix: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        MailConfig {
            relay: String::from("smtp.gmail.com"),
            port: None,
            username: None,
            password: None,
            sender: None,
            recipient: None,
            subject_prefix: String::from("Portfolio Contact"),
        }
    }
}

impl MailConfig {
    pub fn sender(&self) -> Result<&str> {
        self.sender
            .as_deref()
            .or(self.username.as_deref())
            .ok_or_else(|| anyhow::Error::msg("mail config has neither a sender nor a username"))
    }

    pub fn recipient(&self) -> Result<&str> {
        match self.recipient.as_deref() {
            Some(val) => Ok(val),
            None => self.sender(),
        }
    }
}
