use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_cell::sync::AsyncCell;
use async_trait::async_trait;
use axum::{Router, extract::Request, routing::post};
use hyper::body::Incoming;
use hyper_util::rt::{TokioExecutor, TokioIo};
use tokio::net::TcpListener;
use tower::Service;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::{debug, error, info, instrument};

use crate::http::api::submit_contact;
use crate::service::{RSMRegistry, RSMSender, RelayService, ServiceType};
use api::CONTACT_PATH;
use common::config::RelayConfig;

// the http service only ever sends; nothing in the relay messages it, so it
// has no channel of its own and stays out of the registry
pub struct HttpService {
    config: Arc<RelayConfig>,
    hyper_handle: AsyncCell<tokio::task::JoinHandle<Result<()>>>,
}

#[async_trait]
impl RelayService for HttpService {
    fn create(config: Arc<RelayConfig>, _registry: &RSMRegistry) -> Self {
        HttpService {
            config: config.clone(),
            hyper_handle: AsyncCell::new(),
        }
    }

    #[instrument(skip(self, registry))]
    async fn start(&self, registry: &RSMRegistry) -> Result<()> {
        info!("starting http service");

        let state = Arc::new(HttpEndpoint::new(registry)?);

        let socket: SocketAddr = self
            .config
            .http
            .socket
            .parse()
            .with_context(|| format!("failed to parse http socket {}", self.config.http.socket))?;

        // bind here rather than in the spawned task, so that a socket that is
        // already in use fails startup instead of a background task
        let listener = TcpListener::bind(socket)
            .await
            .with_context(|| format!("http listener failed to bind {socket}"))?;

        info!({ socket = %socket, doc_root = ?self.config.http.doc_root }, "relay listening");

        let router = router(state, &self.config.http.doc_root);

        let hyper_handle = tokio::task::spawn(serve_http(listener, router));

        self.hyper_handle.set(hyper_handle);

        debug!("started http service");

        Ok(())
    }
}

// axum state shared by the handlers
#[derive(Clone, Debug)]
pub struct HttpEndpoint {
    pub(super) mail_svc_sender: RSMSender,
}

impl HttpEndpoint {
    pub fn new(registry: &RSMRegistry) -> Result<Self> {
        Ok(HttpEndpoint {
            mail_svc_sender: registry.get(&ServiceType::Mail)?,
        })
    }
}

// the relay's whole surface: the contact endpoint, with every other path
// falling through to the static files that make up the page
//
// ServeDir never lists directories and sets no caching headers
pub(crate) fn router(state: Arc<HttpEndpoint>, doc_root: &Path) -> Router {
    Router::new()
        .route(CONTACT_PATH, post(submit_contact))
        .fallback_service(ServeDir::new(doc_root))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn serve_http(listener: TcpListener, router: Router) -> Result<()> {
    let service = hyper::service::service_fn(move |request: Request<Incoming>| {
        router.clone().call(request)
    });

    // the main http server loop
    loop {
        let (stream, addr) = match listener.accept().await {
            Ok(val) => val,
            Err(err) => {
                error!({ error = %err }, "failed to accept connection");
                continue;
            }
        };

        let service = service.clone();

        let io = TokioIo::new(stream);

        tokio::task::spawn(async move {
            match hyper_util::server::conn::auto::Builder::new(TokioExecutor::new())
                .serve_connection(io, service)
                .await
            {
                Ok(()) => (),
                Err(err) => debug!({ peer = %addr, error = %err }, "connection closed with error"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::svc::{MailService, tests::{OutboxBackend, config}};

    #[test]
    fn endpoint_needs_the_mail_service() {
        let registry = RSMRegistry::new();
        let _http_svc = HttpService::create(config("endpoint@example.com"), &registry);

        assert!(HttpEndpoint::new(&registry).is_err());
    }

    #[tokio::test]
    async fn only_receiving_services_register() {
        let registry = RSMRegistry::new();
        let _http_svc = HttpService::create(config("register@example.com"), &registry);
        let _mail_svc = MailService::<OutboxBackend>::create(config("register@example.com"), &registry);

        // the mail sender is the one the endpoint sends on
        let endpoint = HttpEndpoint::new(&registry).unwrap();
        assert!(!endpoint.mail_svc_sender.is_closed());
    }
}
