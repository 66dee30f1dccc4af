use std::{future::Future, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

use common::config::RelayConfig;

// the services that take messages; the http service only sends, so it has
// no entry here
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ServiceType {
    Mail,
}

// Relay Service Messages
//
// without higher-kinded types, we use the normal enum-of-enums
// to enable general safe message passing between services
pub type RSMSender = tokio::sync::mpsc::Sender<RSM>;
pub type RSMReceiver = tokio::sync::mpsc::Receiver<RSM>;

// message responses are carried back via oneshot channels.  this
// type eliminates quite a bit of boilerplate in the responder logic.
pub type RSMResp<T> = tokio::sync::oneshot::Sender<Result<T>>;

#[derive(Debug)]
pub enum RSM {
    Mail(crate::mail::msg::MailMsg),
}

// service registry
//
// each receiving service is instantiated once and there is one message
// namespace, so a sender is looked up by service type alone
//
// services clone the senders they need at startup, so the registry must be
// fully populated (every create() called) before any start()
#[derive(Clone, Debug)]
pub struct RSMRegistry(Arc<DashMap<ServiceType, RSMSender>>);

impl RSMRegistry {
    pub fn new() -> Self {
        RSMRegistry(Arc::new(DashMap::new()))
    }

    pub fn insert(&self, k: ServiceType, v: RSMSender) -> Result<()> {
        match self.0.insert(k.clone(), v) {
            None => Ok(()),
            Some(w) => {
                self.0.insert(k, w);
                Err(anyhow::Error::msg(
                    "internal error: a sender was added twice to the registry",
                ))
            }
        }
    }

    pub fn get(&self, k: &ServiceType) -> Result<RSMSender> {
        Ok(self
            .0
            .get(k)
            .ok_or_else(|| {
                anyhow::Error::msg(format!(
                    "internal error: a service was started without a necessary dependency ({:?})",
                    k
                ))
            })?
            .clone())
    }
}

// core service trait
//
// the outer part holds the channel, handles, and config; services that
// answer messages keep that logic in a RelayInner
#[async_trait]
pub trait RelayService: Send + Sync + 'static {
    fn create(config: Arc<RelayConfig>, registry: &RSMRegistry) -> Self;

    async fn start(&self, registry: &RSMRegistry) -> Result<()>;
}

// service message responder
//
// services answer rpc messages in message_handler; the registry is handed
// over in new() so that an inner can keep the senders it calls out to
#[async_trait]
pub trait RelayInner: Sized + Send + Sync + 'static {
    fn new(config: Arc<RelayConfig>, registry: RSMRegistry) -> Result<Self>;

    async fn message_handler(&self, rsm: RSM) -> Result<()>;

    // rather than have the inner service trait functions (i.e., the rpc calls) respond directly,
    // we define this helper function for use in the message_handler loop
    //
    // this is necessary so that the rpc functions can be used by each other without any weird
    // Option<resp> or the like
    async fn respond<T, Fut>(&self, resp: RSMResp<T>, fut: Fut) -> Result<()>
    where
        T: Send + Sync,
        Fut: Future<Output = Result<T>> + Send,
    {
        resp.send(fut.await).map_err(|_| {
            anyhow::Error::msg(format!(
                "failed to respond to a {} message",
                std::any::type_name::<T>()
            ))
        })
    }
}
