use clap::Parser;

use casper_deployer::cli::{self, Cli};
use casper_deployer::config::load_config;
use casper_deployer::observability::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config, &cli.overrides())?;
    init_logging(&config.observability.log_level)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config.display(),
        node = %config.node.address,
        chain = %config.node.chain_name,
        "casper-deployer starting"
    );

    cli::run(cli.command, &config).await
}
