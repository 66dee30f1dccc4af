use std::marker::PhantomData;
use std::sync::Arc;

use anyhow::Result;
use async_cell::sync::AsyncCell;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

use crate::mail::{RelayMailService, msg::MailMsg};
use crate::service::{RSM, RSMReceiver, RSMRegistry, RelayInner, RelayService, ServiceType};
use api::contact::ContactReq;
use common::config::RelayConfig;
use common::mail::{ContactEmail, MailBackend};

pub struct MailService<B: MailBackend> {
    config: Arc<RelayConfig>,
    receiver: Arc<Mutex<RSMReceiver>>,
    handle: AsyncCell<tokio::task::JoinHandle<Result<()>>>,
    backend: PhantomData<B>,
}

#[async_trait]
impl<B: MailBackend> RelayService for MailService<B> {
    fn create(config: Arc<RelayConfig>, registry: &RSMRegistry) -> Self {
        let (tx, rx) = tokio::sync::mpsc::channel::<RSM>(1024);

        registry
            .insert(ServiceType::Mail, tx)
            .expect("failed to add mail sender to registry");

        MailService {
            config: config.clone(),
            receiver: Arc::new(Mutex::new(rx)),
            handle: AsyncCell::new(),
            backend: PhantomData::<B>,
        }
    }

    #[instrument(skip(self, registry))]
    async fn start(&self, registry: &RSMRegistry) -> Result<()> {
        info!("starting mail service");

        let receiver = Arc::clone(&self.receiver);
        let state = Arc::new(MailRunner::<B>::new(self.config.clone(), registry.clone())?);

        // each message gets its own task, so concurrent submissions are
        // dispatched concurrently with no ordering between them
        let serve = {
            async move {
                let mut receiver = receiver.lock().await;

                while let Some(msg) = receiver.recv().await {
                    let state = Arc::clone(&state);
                    tokio::task::spawn(async move {
                        match state.message_handler(msg).await {
                            Ok(()) => (),
                            Err(err) => {
                                error!({service = "mail", channel = "rsm", error = %err})
                            }
                        }
                    });
                }

                Err::<(), anyhow::Error>(anyhow::Error::msg("mail service rsm channel disconnected"))
            }
        };

        let handle = tokio::task::spawn(serve);

        self.handle.set(handle);

        debug!("started mail service");

        Ok(())
    }
}

pub struct MailRunner<B: MailBackend> {
    backend: B,
    subject_prefix: String,
}

#[async_trait]
impl<B: MailBackend> RelayMailService for MailRunner<B> {
    #[instrument(skip_all)]
    async fn send_contact(&self, req: ContactReq) -> Result<()> {
        let email = ContactEmail::compose(&self.subject_prefix, &req);

        self.backend.send(email).await
    }
}

#[async_trait]
impl<B: MailBackend> RelayInner for MailRunner<B> {
    fn new(config: Arc<RelayConfig>, _registry: RSMRegistry) -> Result<Self> {
        Ok(MailRunner {
            backend: B::new(config.clone())?,
            subject_prefix: config.mail.subject_prefix.clone(),
        })
    }

    async fn message_handler(&self, rsm: RSM) -> Result<()> {
        match rsm {
            RSM::Mail(message) => match message {
                MailMsg::SendContact { resp, req } => {
                    self.respond(resp, self.send_contact(req)).await
                }
            },
        }
    }
}
