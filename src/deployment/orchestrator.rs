//! Sequential installation of the contract suite.
//!
//! # Flow (per contract)
//! ```text
//! plan.rs (arguments) → transaction.rs (submit) → confirmation.rs (wait)
//!     → named keys lookup → store.rs (hash files)
//! ```
//!
//! After the last contract the deployment count is bumped and the output
//! directory archived. Any failure aborts the run; files already written are
//! left in place and the count is not changed.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::blockchain::client::NodeClient;
use crate::blockchain::confirmation::wait_for_execution;
use crate::blockchain::transaction::{DeployRequest, DeploySubmitter};
use crate::blockchain::types::{BlockchainError, BlockchainResult, DeployedContract, NamedKey};
use crate::blockchain::wallet::KeyPair;
use crate::config::schema::{ContractConfig, DeployerConfig};
use crate::deployment::error::{DeployError, DeployResult};
use crate::deployment::plan::{ContractKind, PlanContext};
use crate::deployment::store::{archive_directory, DeploymentCounter, HashStore};
use crate::resilience::RetryPolicy;

const HASH_PREFIX: &str = "hash-";

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct DeployReport {
    /// Deployment count used for contract names.
    pub version: u64,
    /// Count stored for the next run.
    pub next_version: u64,
    /// Every contract in plan order with its hashes.
    pub contracts: Vec<(ContractKind, DeployedContract)>,
    /// Contracts loaded from hash files instead of being installed.
    pub resumed: usize,
    pub archive: PathBuf,
    pub archived_files: usize,
}

/// Runs the plan against one node with one key pair.
pub struct Orchestrator<'a> {
    config: &'a DeployerConfig,
    client: &'a NodeClient,
    submitter: DeploySubmitter<'a>,
    keys: &'a KeyPair,
    store: HashStore,
    counter: DeploymentCounter,
    policy: RetryPolicy,
}

impl<'a> Orchestrator<'a> {
    pub fn new(config: &'a DeployerConfig, client: &'a NodeClient, keys: &'a KeyPair) -> Self {
        Self {
            config,
            client,
            submitter: DeploySubmitter::new(client, keys, config.node.chain_name.clone()),
            keys,
            store: HashStore::new(&config.output.dir),
            counter: DeploymentCounter::new(config.output.counter_path()),
            policy: RetryPolicy::from(&config.poll),
        }
    }

    /// Install every contract in plan order.
    ///
    /// With `resume_from`, contracts planned before it are read from the hash
    /// files of an earlier run instead of being installed again.
    pub async fn run(&self, resume_from: Option<ContractKind>) -> DeployResult<DeployReport> {
        let version = self.counter.read()?;
        tracing::info!(
            version,
            contracts = ContractKind::ALL.len(),
            resume_from = resume_from.map(ContractKind::id),
            "Starting deployment"
        );

        let resume_index = resume_from
            .and_then(|kind| ContractKind::ALL.iter().position(|k| *k == kind))
            .unwrap_or(0);

        let mut deployed = BTreeMap::new();
        let mut contracts = Vec::with_capacity(ContractKind::ALL.len());

        for (index, kind) in ContractKind::ALL.into_iter().enumerate() {
            let contract = if index < resume_index {
                let contract = self.store.read(kind)?;
                tracing::info!(contract = %kind, package_hash = %contract.package_hash, "Resumed from hash files");
                contract
            } else {
                self.deploy_contract(kind, version, &deployed).await?
            };
            deployed.insert(kind, contract.clone());
            contracts.push((kind, contract));
        }

        let next_version = self.counter.increment()?;
        let archive = self.config.output.archive_path.clone();
        let archived_files = archive_directory(self.store.dir(), &archive)?;

        tracing::info!(version, next_version, "Deployment complete");

        Ok(DeployReport {
            version,
            next_version,
            contracts,
            resumed: resume_index,
            archive,
            archived_files,
        })
    }

    async fn deploy_contract(
        &self,
        kind: ContractKind,
        version: u64,
        deployed: &BTreeMap<ContractKind, DeployedContract>,
    ) -> DeployResult<DeployedContract> {
        let contract_config = self.contract_config(kind)?;
        let contract_name = format!("{}{}", contract_config.name_prefix, version);

        tracing::info!(contract = %kind, name = %contract_name, "{} being deployed", kind.display_name());

        let ctx = PlanContext {
            contract_name: contract_name.clone(),
            admin_account_hash: &self.config.accounts.admin_account_hash,
            admin_account_str: &self.config.accounts.admin_account_str,
            deployed,
            now_ms: millis_since_epoch(SystemTime::now())?,
        };
        let args = kind.runtime_args(&ctx)?.to_runtime_args()?;

        let module_bytes = tokio::fs::read(&contract_config.wasm_path)
            .await
            .map_err(|e| DeployError::io(&contract_config.wasm_path, e))?;

        let deploy_hash = self
            .submitter
            .submit(DeployRequest {
                module_bytes,
                payment_amount: contract_config.payment_amount,
                args,
            })
            .await?;

        wait_for_execution(self.client, &deploy_hash, &self.policy).await?;

        let contract = self.lookup_hashes(&contract_name).await?;
        self.store.write(kind, &contract)?;

        tracing::info!(
            contract = %kind,
            deploy_hash = %deploy_hash,
            contract_hash = %contract.contract_hash,
            package_hash = %contract.package_hash,
            "{} deployed successfully",
            kind.display_name()
        );
        Ok(contract)
    }

    /// Read `<name>_contract_hash` and `<name>_package_hash` from the account.
    async fn lookup_hashes(&self, contract_name: &str) -> DeployResult<DeployedContract> {
        let named_keys = self.client.get_named_keys(&self.keys.public_key_hex()).await?;
        Ok(DeployedContract {
            contract_hash: find_named_key(&named_keys, &format!("{contract_name}_contract_hash"))?,
            package_hash: find_named_key(&named_keys, &format!("{contract_name}_package_hash"))?,
        })
    }

    fn contract_config(&self, kind: ContractKind) -> DeployResult<&'a ContractConfig> {
        self.config
            .contracts
            .get(kind.id())
            .ok_or_else(|| DeployError::MissingContractConfig(kind.id().to_string()))
    }
}

/// Value of a named key with the `hash-` prefix removed.
pub fn find_named_key(named_keys: &[NamedKey], name: &str) -> BlockchainResult<String> {
    named_keys
        .iter()
        .find(|key| key.name == name)
        .map(|key| strip_hash_prefix(&key.key).to_string())
        .ok_or_else(|| BlockchainError::MissingNamedKey {
            name: name.to_string(),
        })
}

pub fn strip_hash_prefix(key: &str) -> &str {
    key.strip_prefix(HASH_PREFIX).unwrap_or(key)
}

fn millis_since_epoch(time: SystemTime) -> DeployResult<u64> {
    let elapsed = time
        .duration_since(UNIX_EPOCH)
        .map_err(|e| DeployError::Clock(e.to_string()))?;
    u64::try_from(elapsed.as_millis()).map_err(|e| DeployError::Clock(e.to_string()))
}
