//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::blockchain::{wait_for_execution, DeployHash, KeyPair, NodeClient};
use crate::config::{ConfigOverrides, DeployerConfig};
use crate::deployment::{archive_directory, ContractKind, DeployError, DeploymentCounter, Orchestrator};
use crate::resilience::RetryPolicy;

#[derive(Debug, Parser)]
#[command(name = "casper-deployer")]
#[command(version, about = "Installs the Curve contract suite on a Casper network", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, global = true, env = "DEPLOYER_CONFIG", default_value = "deployer.toml")]
    pub config: PathBuf,

    /// Node address, overriding [node].address.
    #[arg(long, global = true, env = "CASPER_NODE_ADDRESS")]
    pub node_address: Option<String>,

    /// Chain name, overriding [node].chain_name.
    #[arg(long, global = true, env = "CASPER_CHAIN_NAME")]
    pub chain_name: Option<String>,

    /// Key directory, overriding [keys].key_pair_path.
    #[arg(long, global = true, env = "DEPLOYER_KEY_PATH")]
    pub key_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install every contract in order
    Deploy {
        /// Load hashes of contracts planned before this id from the output directory
        #[arg(long, value_name = "CONTRACT_ID")]
        resume_from: Option<String>,
    },
    /// Wait for a submitted deploy to be executed
    Wait {
        /// Hex deploy hash
        deploy_hash: String,
    },
    /// Inspect or change the deployment count
    Counter {
        #[command(subcommand)]
        action: CounterAction,
    },
    /// Zip the output directory
    Archive,
}

#[derive(Debug, Subcommand)]
pub enum CounterAction {
    /// Print the current count
    Show,
    /// Overwrite the count
    Set { value: u64 },
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            node_address: self.node_address.clone(),
            chain_name: self.chain_name.clone(),
            key_pair_path: self.key_path.clone(),
        }
    }
}

/// Execute a parsed command against a loaded configuration.
pub async fn run(command: Commands, config: &DeployerConfig) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Deploy { resume_from } => {
            let resume_from = resume_from
                .map(|id| ContractKind::from_id(&id).ok_or(DeployError::UnknownContract(id)))
                .transpose()?;

            let keys = KeyPair::from_dir(&config.keys.key_pair_path)?;
            let client = NodeClient::new(&config.node)?;
            let report = Orchestrator::new(config, &client, &keys).run(resume_from).await?;

            for (kind, contract) in &report.contracts {
                println!("{:<32} {}", kind.id(), contract.package_hash);
            }
            println!(
                "Deployed {} contracts ({} resumed) as version {}; next version {}",
                report.contracts.len() - report.resumed,
                report.resumed,
                report.version,
                report.next_version
            );
            println!("{} files archived to {}", report.archived_files, report.archive.display());
        }
        Commands::Wait { deploy_hash } => {
            let client = NodeClient::new(&config.node)?;
            let policy = RetryPolicy::from(&config.poll);
            let executed = wait_for_execution(&client, &DeployHash(deploy_hash), &policy).await?;
            println!("Executed in block {}", executed.block_hash);
            if let Some(cost) = executed.cost {
                println!("Cost: {cost} motes");
            }
        }
        Commands::Counter { action } => {
            let counter = DeploymentCounter::new(config.output.counter_path());
            match action {
                CounterAction::Show => println!("{}", counter.read()?),
                CounterAction::Set { value } => {
                    counter.write(value)?;
                    tracing::info!(path = %counter.path().display(), value, "Deployment count set");
                }
            }
        }
        Commands::Archive => {
            let files = archive_directory(&config.output.dir, &config.output.archive_path)?;
            println!("{files} files archived to {}", config.output.archive_path.display());
        }
    }
    Ok(())
}
