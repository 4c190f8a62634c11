use anyhow::{anyhow, Result};
use clap::ArgMatches;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::mutation::NodeNameFilter;

/// How rejected Pods are reported back to the API server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RejectionMode {
    /// Non-2xx HTTP status with a plain text message.
    #[default]
    TransportError,
    /// `200` with an admission response holding `allowed: false` and the
    /// reason. Unreadable requests are still answered with an HTTP error.
    AdmissionDeny,
}

pub struct Config {
    pub addr: SocketAddr,
    pub hostname: String,
    pub node_name_filter: NodeNameFilter,
    pub rejection_mode: RejectionMode,
    pub tls_config: TlsConfig,
    pub shutdown_grace_period: Duration,
    pub log_level: String,
    pub log_fmt: String,
    pub log_no_color: bool,
}

#[derive(Clone, Debug)]
pub struct TlsConfig {
    pub cert_file: PathBuf,
    pub key_file: PathBuf,
}

impl Config {
    pub fn from_args(matches: &ArgMatches) -> Result<Self> {
        let addr = listen_address(matches)?;
        let hostname = matches
            .get_one::<String>("hostname")
            .expect("This should not happen, there's a default value for hostname")
            .to_owned();
        let node_name_filter = node_name_filter(matches)?;
        let rejection_mode = if *matches
            .get_one::<bool>("deny-via-admission-response")
            .expect("clap should have set a default value")
        {
            RejectionMode::AdmissionDeny
        } else {
            RejectionMode::TransportError
        };
        let tls_config = TlsConfig {
            cert_file: matches
                .get_one::<String>("cert-file")
                .map(PathBuf::from)
                .expect("This should not happen, there's a default value for cert-file"),
            key_file: matches
                .get_one::<String>("key-file")
                .map(PathBuf::from)
                .expect("This should not happen, there's a default value for key-file"),
        };
        let shutdown_grace_period = matches
            .get_one::<String>("shutdown-timeout")
            .expect("This should not happen, there's a default value for shutdown-timeout")
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| anyhow!("error parsing arguments: invalid shutdown-timeout: {}", e))?;

        let log_level = matches
            .get_one::<String>("log-level")
            .expect("This should not happen, there's a default value for log-level")
            .to_owned();
        let log_fmt = matches
            .get_one::<String>("log-fmt")
            .expect("This should not happen, there's a default value for log-fmt")
            .to_owned();
        let log_no_color = matches
            .get_one::<bool>("log-no-color")
            .expect("clap should have assigned a default value")
            .to_owned();

        Ok(Self {
            addr,
            hostname,
            node_name_filter,
            rejection_mode,
            tls_config,
            shutdown_grace_period,
            log_level,
            log_fmt,
            log_no_color,
        })
    }
}

fn listen_address(matches: &ArgMatches) -> Result<SocketAddr> {
    let address = matches
        .get_one::<String>("listen-address")
        .expect("This should not happen, there's a default value for listen-address");
    parse_listen_address(address)
}

/// Accepts `host:port` as well as the `:port` shorthand, which binds every
/// IPv4 interface.
fn parse_listen_address(address: &str) -> Result<SocketAddr> {
    let address = if address.starts_with(':') {
        format!("0.0.0.0{address}")
    } else {
        address.to_owned()
    };

    address
        .parse()
        .map_err(|e| anyhow!("error parsing arguments: invalid listen address {}: {}", address, e))
}

fn node_name_filter(matches: &ArgMatches) -> Result<NodeNameFilter> {
    match matches.get_one::<String>("node-regex") {
        None => Ok(NodeNameFilter::Identity),
        Some(pattern) => NodeNameFilter::from_pattern(pattern)
            .map_err(|e| anyhow!("error parsing arguments: invalid node-regex: {}", e)),
    }
}
