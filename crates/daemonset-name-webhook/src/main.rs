use anyhow::Result;
use daemonset_name_webhook::{cli, config::Config, tracing::setup_tracing, NameWebhook};
use tokio::runtime::Runtime;
use tracing::debug;

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    let config = Config::from_args(&matches)?;

    let rt = Runtime::new()?;
    rt.block_on(async {
        setup_tracing(&config.log_level, &config.log_fmt, config.log_no_color)?;
        debug!("tracing system ready");

        NameWebhook::new_from_config(config).run().await
    })
}
