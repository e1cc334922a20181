//! Shared utilities for integration tests: a mocked Casper node and configs.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use casper_deployer::config::schema::{AccountsConfig, ContractConfig, DeployerConfig};
use casper_deployer::deployment::ContractKind;
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};

pub const ADMIN_ACCOUNT_HASH: &str =
    "0202020202020202020202020202020202020202020202020202020202020202";
pub const DEPLOY_HASH: &str = "5d1f0000000000000000000000000000000000000000000000000000000000aa";

pub fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// A complete configuration pointing at `node_url`, writing into `out_dir`.
pub fn test_config(node_url: &str, out_dir: &Path) -> DeployerConfig {
    let mut config = DeployerConfig::default();
    config.node.address = node_url.to_string();
    config.node.chain_name = "casper-test".to_string();
    config.node.rpc_timeout_secs = 5;
    config.keys.key_pair_path = fixtures().join("keys");
    config.accounts = AccountsConfig {
        admin_account_hash: ADMIN_ACCOUNT_HASH.to_string(),
        admin_account_str: format!("account-hash-{ADMIN_ACCOUNT_HASH}"),
    };
    config.poll.max_attempts = 3;
    config.poll.interval_ms = 10;
    config.output.dir = out_dir.join("hashes");
    config.output.archive_path = out_dir.join("hashes.zip");
    config.contracts = ContractKind::ALL
        .into_iter()
        .map(|kind| {
            (
                kind.id().to_string(),
                ContractConfig {
                    wasm_path: fixtures().join("wasm/empty.wasm"),
                    payment_amount: 150_000_000_000,
                    name_prefix: format!("{}_", kind.id()),
                },
            )
        })
        .collect::<BTreeMap<_, _>>();
    config
}

pub fn contract_hash(kind: ContractKind) -> String {
    format!("{:064x}", 0xc000 + kind as u32)
}

pub fn package_hash(kind: ContractKind) -> String {
    format!("{:064x}", 0xa000 + kind as u32)
}

/// Named keys an account holds after installing every contract at `version`.
pub fn named_keys(version: u64) -> Vec<Value> {
    ContractKind::ALL
        .into_iter()
        .flat_map(|kind| {
            [
                json!({
                    "name": format!("{}_{}_contract_hash", kind.id(), version),
                    "key": format!("hash-{}", contract_hash(kind)),
                }),
                json!({
                    "name": format!("{}_{}_package_hash", kind.id(), version),
                    "key": format!("hash-{}", package_hash(kind)),
                }),
            ]
        })
        .collect()
}

pub fn rpc_result(result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": 1, "result": result })
}

pub fn mock_put_deploy(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(POST)
            .path("/rpc")
            .body_includes("\"account_put_deploy\"");
        then.status(200).json_body(rpc_result(json!({
            "api_version": "1.5.6",
            "deploy_hash": DEPLOY_HASH,
        })));
    })
}

/// `info_get_deploy` answering with the given `execution_results` list.
pub fn mock_get_deploy(server: &MockServer, execution_results: Value) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(POST)
            .path("/rpc")
            .body_includes("\"info_get_deploy\"")
            .body_includes(DEPLOY_HASH);
        then.status(200).json_body(rpc_result(json!({
            "api_version": "1.5.6",
            "deploy": {},
            "execution_results": execution_results,
        })));
    })
}

pub fn executed_success() -> Value {
    json!([{
        "block_hash": "b10c000000000000000000000000000000000000000000000000000000000001",
        "result": { "Success": { "effect": {}, "transfers": [], "cost": "148000000000" } }
    }])
}

pub fn executed_failure(message: &str) -> Value {
    json!([{
        "block_hash": "b10c000000000000000000000000000000000000000000000000000000000001",
        "result": { "Failure": { "effect": {}, "transfers": [], "cost": "1", "error_message": message } }
    }])
}

pub fn mock_account(server: &MockServer, version: u64) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(POST)
            .path("/rpc")
            .body_includes("\"state_get_account_info\"");
        then.status(200).json_body(rpc_result(json!({
            "api_version": "1.5.6",
            "account": {
                "account_hash": format!("account-hash-{ADMIN_ACCOUNT_HASH}"),
                "named_keys": named_keys(version),
                "main_purse": "uref-00-007",
                "associated_keys": [],
                "action_thresholds": { "deployment": 1, "key_management": 1 }
            }
        })));
    })
}
