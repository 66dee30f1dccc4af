use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::{
    filter::FilterFn,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

mod checks;
mod http;
mod mail;
mod service;

use common::{
    config::{MailBackend as MailBackendKind, RelayConfig, read_config},
    mail::{LogBackend, MailBackend, SmtpBackend},
};
use service::{RSMRegistry, RelayService};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// config file; every setting has a default, and PORT, EMAIL_USER, EMAIL_PASS
    /// and EMAIL_TO in the environment (or a .env file) take precedence
    #[arg(short, long)]
    config: Option<String>,

    /// log contact messages instead of sending them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let crate_filter = FilterFn::new(|metadata| {
        *metadata.level() <= Level::INFO
            && !metadata.target().starts_with("h2")
            && !metadata.target().starts_with("hyper")
    });

    let fmt_layer = tracing_subscriber::fmt::layer();

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(crate_filter))
        .init();

    let args = Args::parse();

    // a missing .env is fine; the variables may come from the real environment
    dotenv::dotenv().ok();

    info!("portfolio relay starting up, processing config");

    let mut config = read_config(args.config.map(PathBuf::from)).await?;

    if args.dry_run {
        Arc::make_mut(&mut config).mail_backend = MailBackendKind::Log;
    }

    info!("performing filesystem sanity checks");

    checks::doc_root(&config.http.doc_root)?;

    match config.mail_backend {
        MailBackendKind::Smtp => run::<SmtpBackend>(config).await,
        MailBackendKind::Log => run::<LogBackend>(config).await,
    }
}

async fn run<B: MailBackend>(config: Arc<RelayConfig>) -> anyhow::Result<()> {
    info!("starting core services");

    let registry = RSMRegistry::new();

    let mail_svc = mail::svc::MailService::<B>::create(config.clone(), &registry);
    let http_svc = http::svc::HttpService::create(config.clone(), &registry);

    mail_svc.start(&registry).await?;
    http_svc.start(&registry).await?;

    info!("startup complete!");

    tokio::signal::ctrl_c().await?;

    info!("shutting down");

    Ok(())
}
