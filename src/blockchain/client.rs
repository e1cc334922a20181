//! Node JSON-RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the node's JSON-RPC endpoint
//! - Submit deploys, query execution results and account named keys
//! - Handle timeouts, transport errors and JSON-RPC error objects

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::time::timeout;
use url::Url;

use crate::blockchain::confirmation::DeployStatusSource;
use crate::blockchain::types::{
    BlockchainError, BlockchainResult, DeployHash, ExecutedDeploy, ExecutionOutcome, NamedKey,
};
use crate::config::schema::NodeConfig;

const RPC_PATH: &str = "rpc";

/// JSON-RPC client for a single node.
#[derive(Debug)]
pub struct NodeClient {
    http: reqwest::Client,
    endpoint: Url,
    /// Request timeout duration.
    timeout_duration: Duration,
    next_id: AtomicU64,
}

impl NodeClient {
    /// Create a new node client.
    ///
    /// The address may name the node (`http://node:7777`) or its RPC endpoint
    /// (`http://node:7777/rpc`).
    pub fn new(config: &NodeConfig) -> BlockchainResult<Self> {
        let endpoint = rpc_endpoint(&config.address)?;
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);

        tracing::info!(endpoint = %endpoint, "Node client initialized");

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
            timeout_duration,
            next_id: AtomicU64::new(1),
        })
    }

    /// Submit a signed deploy. Single attempt.
    pub async fn put_deploy<D: Serialize + Sync>(&self, deploy: &D) -> BlockchainResult<DeployHash> {
        let deploy = serde_json::to_value(deploy)
            .map_err(|e| BlockchainError::Submission(format!("Deploy serialization failed: {e}")))?;
        let result: PutDeployResult = self
            .call("account_put_deploy", json!({ "deploy": deploy }))
            .await
            .map_err(|e| match e {
                BlockchainError::Rpc(msg) => BlockchainError::Submission(msg),
                other => other,
            })?;
        Ok(result.deploy_hash)
    }

    /// Fetch the execution outcome of a deploy.
    pub async fn get_execution_outcome(&self, deploy_hash: &DeployHash) -> BlockchainResult<ExecutionOutcome> {
        let result: GetDeployResult = self
            .call(
                "info_get_deploy",
                json!({ "deploy_hash": deploy_hash, "finalized_approvals": false }),
            )
            .await?;
        Ok(result.into_outcome())
    }

    /// Fetch the named keys of the account identified by a hex public key.
    pub async fn get_named_keys(&self, public_key_hex: &str) -> BlockchainResult<Vec<NamedKey>> {
        let result: GetAccountResult = self
            .call(
                "state_get_account_info",
                json!({ "account_identifier": public_key_hex }),
            )
            .await?;
        Ok(result.account.named_keys)
    }

    async fn call<P, R>(&self, method: &'static str, params: P) -> BlockchainResult<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!(method, id, "Sending RPC request");

        let fut = async {
            let response = self
                .http
                .post(self.endpoint.clone())
                .json(&request)
                .send()
                .await
                .map_err(|e| BlockchainError::Rpc(format!("{method}: {e}")))?;
            let status = response.status();
            if !status.is_success() {
                return Err(BlockchainError::Rpc(format!("{method}: HTTP status {status}")));
            }
            let body = response
                .json::<RpcResponse<R>>()
                .await
                .map_err(|e| BlockchainError::Rpc(format!("{method}: invalid response: {e}")))?;
            Ok::<_, BlockchainError>(body)
        };

        let response = match timeout(self.timeout_duration, fut).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!(method, "RPC timeout");
                return Err(BlockchainError::Timeout(self.timeout_duration.as_secs()));
            }
        };

        match (response.result, response.error) {
            (_, Some(error)) => {
                tracing::warn!(method, code = error.code, message = %error.message, "RPC error");
                Err(BlockchainError::Rpc(error.to_string()))
            }
            (Some(result), None) => Ok(result),
            (None, None) => Err(BlockchainError::Rpc(format!("{method}: response has no result"))),
        }
    }
}

#[async_trait]
impl DeployStatusSource for NodeClient {
    async fn execution_outcome(&self, deploy_hash: &DeployHash) -> BlockchainResult<ExecutionOutcome> {
        self.get_execution_outcome(deploy_hash).await
    }
}

/// Resolve the JSON-RPC endpoint from a node address.
pub fn rpc_endpoint(address: &str) -> BlockchainResult<Url> {
    let mut url: Url = address
        .parse()
        .map_err(|e| BlockchainError::Rpc(format!("Invalid node address '{}': {}", address, e)))?;

    let trimmed = url.path().trim_end_matches('/').to_string();
    let path = if trimmed.ends_with(&format!("/{RPC_PATH}")) {
        trimmed
    } else {
        format!("{trimmed}/{RPC_PATH}")
    };
    url.set_path(&path);
    Ok(url)
}

#[derive(Debug, Deserialize)]
struct RpcResponse<R> {
    result: Option<R>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
    data: Option<Value>,
}

impl std::fmt::Display for RpcErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)?;
        if let Some(data) = &self.data {
            write!(f, ": {}", data)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct PutDeployResult {
    deploy_hash: DeployHash,
}

#[derive(Debug, Deserialize)]
struct GetAccountResult {
    account: AccountJson,
}

#[derive(Debug, Deserialize)]
struct AccountJson {
    #[serde(default)]
    named_keys: Vec<NamedKey>,
}

/// `info_get_deploy` result; 1.x nodes fill `execution_results`, 2.x nodes `execution_info`.
#[derive(Debug, Deserialize)]
struct GetDeployResult {
    #[serde(default)]
    execution_results: Vec<BlockExecutionResult>,
    execution_info: Option<ExecutionInfo>,
}

#[derive(Debug, Deserialize)]
struct BlockExecutionResult {
    block_hash: String,
    result: ExecutionResultV1,
}

#[derive(Debug, Deserialize)]
struct ExecutionInfo {
    block_hash: String,
    execution_result: Option<VersionedExecutionResult>,
}

#[derive(Debug, Deserialize)]
enum ExecutionResultV1 {
    Success(Value),
    Failure(FailureV1),
}

#[derive(Debug, Deserialize)]
struct FailureV1 {
    error_message: String,
}

#[derive(Debug, Deserialize)]
enum VersionedExecutionResult {
    Version1(ExecutionResultV1),
    Version2(ExecutionResultV2),
}

#[derive(Debug, Deserialize)]
struct ExecutionResultV2 {
    error_message: Option<String>,
    #[serde(flatten)]
    rest: serde_json::Map<String, Value>,
}

impl GetDeployResult {
    fn into_outcome(self) -> ExecutionOutcome {
        if let Some(first) = self.execution_results.into_iter().next() {
            return first.result.into_outcome(first.block_hash);
        }
        match self.execution_info {
            Some(ExecutionInfo {
                block_hash,
                execution_result: Some(result),
            }) => match result {
                VersionedExecutionResult::Version1(v1) => v1.into_outcome(block_hash),
                VersionedExecutionResult::Version2(v2) => match v2.error_message {
                    Some(error_message) => ExecutionOutcome::Failure { error_message },
                    None => {
                        let payload = Value::Object(v2.rest);
                        ExecutionOutcome::Success(ExecutedDeploy {
                            block_hash,
                            cost: cost_of(&payload),
                            payload,
                        })
                    }
                },
            },
            _ => ExecutionOutcome::Pending,
        }
    }
}

impl ExecutionResultV1 {
    fn into_outcome(self, block_hash: String) -> ExecutionOutcome {
        match self {
            ExecutionResultV1::Success(payload) => ExecutionOutcome::Success(ExecutedDeploy {
                block_hash,
                cost: cost_of(&payload),
                payload,
            }),
            ExecutionResultV1::Failure(failure) => ExecutionOutcome::Failure {
                error_message: failure.error_message,
            },
        }
    }
}

fn cost_of(payload: &Value) -> Option<String> {
    payload.get("cost").and_then(Value::as_str).map(str::to_string)
}
