pub mod admission_response;
pub mod admission_review;
pub mod api;
mod certs;
pub mod cli;
pub mod config;
pub mod mutation;
pub mod tracing;

use ::tracing::{info, warn};
use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use axum_server::Handle;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::trace::TraceLayer;

use api::{
    handlers::{mutate_pod_handler, readiness_handler},
    state::ApiServerState,
};
use config::{Config, TlsConfig};
use mutation::PodNamer;

pub struct NameWebhook {
    router: Router,
    addr: SocketAddr,
    tls_config: TlsConfig,
    shutdown_grace_period: Duration,
}

impl NameWebhook {
    pub fn new_from_config(config: Config) -> Self {
        let state = ApiServerState {
            hostname: config.hostname,
            pod_namer: PodNamer::new(config.node_name_filter),
            rejection_mode: config.rejection_mode,
        };

        let router = Router::new()
            .route("/mutate-pod", post(mutate_pod_handler))
            .route("/readiness", get(readiness_handler))
            .with_state(Arc::new(state))
            .layer(TraceLayer::new_for_http());

        Self {
            router,
            addr: config.addr,
            tls_config: config.tls_config,
            shutdown_grace_period: config.shutdown_grace_period,
        }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve HTTPS until SIGINT or SIGTERM. In-flight requests are then
    /// given the shutdown grace period to complete before being dropped.
    pub async fn run(self) -> Result<()> {
        let rustls_config =
            certs::create_tls_config_and_watch_certificate_changes(self.tls_config).await?;

        let handle = Handle::new();
        tokio::spawn(graceful_shutdown(
            handle.clone(),
            self.shutdown_grace_period,
        ));

        info!(address = self.addr.to_string().as_str(), "started HTTPS server");
        axum_server::bind_rustls(self.addr, rustls_config)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;
        info!("Graceful shutdown complete");

        Ok(())
    }
}

async fn graceful_shutdown(handle: Handle, grace_period: Duration) {
    shutdown_signal().await;
    info!(
        grace_period_seconds = grace_period.as_secs(),
        "caught shutdown signal, draining connections"
    );
    handle.graceful_shutdown(Some(grace_period));
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Cannot listen for SIGINT: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Cannot listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
