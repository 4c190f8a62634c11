use clap::builder::PossibleValue;
use clap::{crate_description, crate_name, crate_version, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    let mut args = vec![
        Arg::new("log-level")
            .long("log-level")
            .value_name("LOG_LEVEL")
            .env("LOG_LEVEL")
            .default_value("info")
            .value_parser([
                PossibleValue::new("trace"),
                PossibleValue::new("debug"),
                PossibleValue::new("info"),
                PossibleValue::new("warn"),
                PossibleValue::new("error"),
            ])
            .help("Log level"),
        Arg::new("log-fmt")
            .long("log-fmt")
            .value_name("LOG_FMT")
            .env("LOG_FMT")
            .default_value("json")
            .value_parser([PossibleValue::new("text"), PossibleValue::new("json")])
            .help("Log output format"),
        Arg::new("log-no-color")
            .long("log-no-color")
            .env("NO_COLOR")
            .action(ArgAction::SetTrue)
            .help("Disable colored output for logs"),
        Arg::new("listen-address")
            .long("listen-address")
            .value_name("LISTEN_ADDRESS")
            .env("LISTEN_ADDRESS")
            .default_value(":8443")
            .help("Address to listen on, `:PORT` binds every IPv4 interface"),
        Arg::new("hostname")
            .long("hostname")
            .value_name("HOSTNAME")
            .env("HOSTNAME")
            .default_value("unknown")
            .help("Hostname to use in logs"),
        Arg::new("node-regex")
            .long("node-regex")
            .value_name("NODE_REGEX")
            .env("NODE_REGEX")
            .help("Limit the part of the node name used in the pod name to the first capture group of this expression. Unset: the whole node name is used"),
        Arg::new("cert-file")
            .long("cert-file")
            .value_name("CERT_FILE")
            .env("TLS_CERT_FILE")
            .default_value("/certs/tls.crt")
            .help("Path to an X.509 certificate file for HTTPS"),
        Arg::new("key-file")
            .long("key-file")
            .value_name("KEY_FILE")
            .env("TLS_KEY_FILE")
            .default_value("/certs/tls.key")
            .help("Path to an X.509 private key file for HTTPS"),
        Arg::new("deny-via-admission-response")
            .long("deny-via-admission-response")
            .env("DENY_VIA_ADMISSION_RESPONSE")
            .action(ArgAction::SetTrue)
            .help("Report rejected pods with an `allowed: false` admission response instead of an HTTP error"),
        Arg::new("shutdown-timeout")
            .long("shutdown-timeout")
            .value_name("SECONDS")
            .env("SHUTDOWN_TIMEOUT")
            .default_value("10")
            .help("Time granted to in-flight requests when shutting down"),
    ];
    args.sort_by(|a, b| a.get_id().cmp(b.get_id()));

    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .args(args)
}
