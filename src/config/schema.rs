//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a deployment run.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the deployer.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DeployerConfig {
    /// Node connection settings.
    pub node: NodeConfig,

    /// Signing key location.
    pub keys: KeyConfig,

    /// Administrative accounts referenced by contract constructors.
    pub accounts: AccountsConfig,

    /// Confirmation polling settings.
    pub poll: PollConfig,

    /// Where hashes, the deployment counter and the archive live.
    pub output: OutputConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Per-contract module paths, fee budgets and name prefixes, keyed by plan id.
    pub contracts: BTreeMap<String, ContractConfig>,
}

/// Node connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// JSON-RPC node address (e.g., "http://127.0.0.1:7777").
    pub address: String,

    /// Network name the deploys are signed for (e.g., "casper-test").
    pub chain_name: String,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            address: "http://127.0.0.1:7777".to_string(),
            chain_name: "casper-net-1".to_string(),
            rpc_timeout_secs: 30,
        }
    }
}

/// Signing key configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Directory holding `public_key.pem` and `secret_key.pem`.
    pub key_pair_path: PathBuf,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            key_pair_path: PathBuf::from("keys"),
        }
    }
}

/// Administrative accounts.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AccountsConfig {
    /// Admin account hash as 64 hex characters (no `account-hash-` prefix).
    pub admin_account_hash: String,

    /// Admin account in its formatted string form, passed to vesting escrow fund admins.
    pub admin_account_str: String,
}

/// Confirmation polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollConfig {
    /// Maximum number of status queries per deploy.
    pub max_attempts: u32,

    /// Delay between status queries in milliseconds.
    pub interval_ms: u64,

    /// Enables capped exponential backoff when set; the cap in milliseconds.
    pub backoff_max_ms: Option<u64>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 300,
            interval_ms: 1000,
            backoff_max_ms: None,
        }
    }
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Output locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving one file per contract/package hash.
    pub dir: PathBuf,

    /// Deployment counter file name, relative to `dir`.
    pub counter_file: String,

    /// Archive written after a complete run.
    pub archive_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("hashes"),
            counter_file: "deploymentCount".to_string(),
            archive_path: PathBuf::from("hashes.zip"),
        }
    }
}

impl OutputConfig {
    pub fn counter_path(&self) -> PathBuf {
        self.dir.join(&self.counter_file)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// A single contract installation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContractConfig {
    /// Path to the compiled `.wasm` module.
    pub wasm_path: PathBuf,

    /// Fee budget in motes.
    pub payment_amount: u64,

    /// Prefix of the on-chain contract name; the deployment count is appended.
    pub name_prefix: String,
}
