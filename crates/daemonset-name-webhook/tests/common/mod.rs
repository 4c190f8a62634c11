use axum::Router;
use daemonset_name_webhook::{
    config::{Config, RejectionMode, TlsConfig},
    mutation::NodeNameFilter,
    NameWebhook,
};
use std::{net::SocketAddr, path::PathBuf, time::Duration};

pub(crate) fn default_test_config() -> Config {
    Config {
        addr: SocketAddr::from(([127, 0, 0, 1], 8443)),
        hostname: "test-host".to_owned(),
        node_name_filter: NodeNameFilter::Identity,
        rejection_mode: RejectionMode::TransportError,
        tls_config: TlsConfig {
            cert_file: PathBuf::from("/certs/tls.crt"),
            key_file: PathBuf::from("/certs/tls.key"),
        },
        shutdown_grace_period: Duration::from_secs(10),
        log_level: "info".to_owned(),
        log_fmt: "json".to_owned(),
        log_no_color: false,
    }
}

pub(crate) fn app(config: Config) -> Router {
    NameWebhook::new_from_config(config).router()
}
