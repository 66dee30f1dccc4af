use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{Level, debug, instrument};

use crate::server::{HttpConfig, MailConfig};

// relay configuration
//
// this struct contains every option used by the relay.  all of it has a
// default, so the relay runs without any config file as long as the mail
// credentials come in through the environment
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct RelayConfig {
    pub mail_backend: MailBackend,

    // core services
    pub http: HttpConfig,
    pub mail: MailConfig,
}

// backends
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub enum MailBackend {
    // authenticated smtp submission
    #[default]
    Smtp,
    // write each message to the log instead of sending it
    Log,
}

// in order to extract the config table from a larger document, we need to specify it
// as a subtable of the root node, i.e. a substruct
#[derive(Debug, Deserialize, Serialize)]
struct TomlConfigFile {
    #[serde(default)]
    config: RelayConfig,
}

pub fn parse_config(doc: &str) -> Result<RelayConfig> {
    // hamfisted way to prevent sensitive info in the config file
    // from being printed to logs
    let data: TomlConfigFile = toml::from_str(doc).map_err(|err| {
        anyhow::Error::msg(format!("failed to parse config file: {}", err.message()))
    })?;

    Ok(data.config)
}

impl RelayConfig {
    // process environment wins over the config file
    //
    // the lookup is passed in so that tests don't have to mutate the real environment
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            let port: u16 = port
                .parse()
                .with_context(|| format!("PORT is not a valid port: {port}"))?;

            let mut socket: SocketAddr = self
                .http
                .socket
                .parse()
                .with_context(|| format!("invalid http socket {}", self.http.socket))?;

            socket.set_port(port);
            self.http.socket = socket.to_string();
        }

        if let Some(user) = lookup("EMAIL_USER") {
            self.mail.username = Some(user);
        }

        if let Some(pass) = lookup("EMAIL_PASS") {
            self.mail.password = Some(pass);
        }

        if let Some(to) = lookup("EMAIL_TO") {
            self.mail.recipient = Some(to);
        }

        Ok(())
    }
}

#[instrument(level=Level::DEBUG)]
pub async fn read_config(filename: Option<PathBuf>) -> Result<Arc<RelayConfig>> {
    let mut config = match filename {
        Some(filename) => {
            debug!("reading config file");

            let doc = tokio::fs::read_to_string(&filename)
                .await
                .with_context(|| format!("failed to read config file {filename:?}"))?;

            let config = parse_config(&doc)?;

            debug!("successfully parsed config file");
            config
        }
        None => {
            debug!("no config file, using defaults");
            RelayConfig::default()
        }
    };

    config.apply_env(|key| std::env::var(key).ok())?;

    Ok(Arc::new(config))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = RelayConfig::default();

        assert_eq!(config.mail_backend, MailBackend::Smtp);
        assert_eq!(config.http.socket, "0.0.0.0:3001");
        assert_eq!(config.http.doc_root, PathBuf::from("."));
        assert_eq!(config.mail.relay, "smtp.gmail.com");
        assert_eq!(config.mail.subject_prefix, "Portfolio Contact");
    }

    #[test]
    fn empty_document_is_the_default_config() {
        assert_eq!(parse_config("").unwrap(), RelayConfig::default());
    }

    #[test]
    fn partial_tables_keep_their_defaults() {
        let config = parse_config(
            r#"
            [config]
            mail_backend = "Log"

            [config.http]
            doc_root = "/srv/portfolio"

            [config.mail]
            recipient = "inbox@example.com"
            port = 587
            "#,
        )
        .unwrap();

        assert_eq!(config.mail_backend, MailBackend::Log);
        assert_eq!(config.http.socket, "0.0.0.0:3001");
        assert_eq!(config.http.doc_root, PathBuf::from("/srv/portfolio"));
        assert_eq!(config.mail.recipient.as_deref(), Some("inbox@example.com"));
        assert_eq!(config.mail.port, Some(587));
        assert_eq!(config.mail.relay, "smtp.gmail.com");
    }

    #[test]
    fn parse_errors_do_not_echo_the_document() {
        let err = parse_config("[config.mail]\npassword = hunter2").unwrap_err();

        assert!(!err.to_string().contains("hunter2"));
    }

    #[test]
    fn environment_overrides() {
        let mut config = RelayConfig::default();
        config
            .apply_env(env(&[
                ("PORT", "8080"),
                ("EMAIL_USER", "me@example.com"),
                ("EMAIL_PASS", "secret"),
            ]))
            .unwrap();

        assert_eq!(config.http.socket, "0.0.0.0:8080");
        assert_eq!(config.mail.username.as_deref(), Some("me@example.com"));
        assert_eq!(config.mail.password.as_deref(), Some("secret"));
        assert_eq!(config.mail.sender().unwrap(), "me@example.com");
        assert_eq!(config.mail.recipient().unwrap(), "me@example.com");
    }

    #[test]
    fn bad_port_is_an_error() {
        let mut config = RelayConfig::default();

        assert!(config.apply_env(env(&[("PORT", "http")])).is_err());
    }

    #[test]
    fn missing_sender_is_an_error() {
        assert!(MailConfig::default().recipient().is_err());
    }

    #[tokio::test]
    async fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[config.http]\nsocket = \"127.0.0.1:4000\"\n").unwrap();

        let config = read_config(Some(path)).await.unwrap();

        // PORT may be set in the environment running the tests
        assert!(config.http.socket.starts_with("127.0.0.1:"));
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        assert!(read_config(Some(dir.path().join("absent.toml"))).await.is_err());
    }
}
