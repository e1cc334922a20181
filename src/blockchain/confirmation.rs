//! Deploy confirmation polling.
//!
//! # States
//! ```text
//! Waiting → Confirmed   first result reports success
//! Waiting → Failed      first result reports failure (never retried)
//! Waiting → TimedOut    attempt budget exhausted with no result
//! ```
//!
//! Only Waiting is retryable. RPC errors while waiting propagate unchanged.
//! There is no cancellation; a poll ends by reaching a terminal state.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::blockchain::types::{
    BlockchainError, BlockchainResult, DeployHash, ExecutedDeploy, ExecutionOutcome,
};
use crate::resilience::RetryPolicy;

/// Anything that can report the execution outcome of a deploy.
#[async_trait]
pub trait DeployStatusSource: Send + Sync {
    async fn execution_outcome(&self, deploy_hash: &DeployHash) -> BlockchainResult<ExecutionOutcome>;
}

/// Poll `source` until the deploy has an execution result.
///
/// Returns the executed deploy on success, `ExecutionFailure` with the node's
/// message on failure, and `ConfirmationTimeout` after `policy.max_attempts`
/// queries without a result.
pub async fn wait_for_execution<S>(
    source: &S,
    deploy_hash: &DeployHash,
    policy: &RetryPolicy,
) -> BlockchainResult<ExecutedDeploy>
where
    S: DeployStatusSource + ?Sized,
{
    let mut waited = Duration::ZERO;

    for attempt in 1..=policy.max_attempts {
        match source.execution_outcome(deploy_hash).await? {
            ExecutionOutcome::Success(executed) => {
                tracing::info!(
                    deploy_hash = %deploy_hash,
                    block_hash = %executed.block_hash,
                    attempt,
                    "Deploy executed"
                );
                return Ok(executed);
            }
            ExecutionOutcome::Failure { error_message } => {
                tracing::error!(deploy_hash = %deploy_hash, error = %error_message, "Deploy execution failed");
                return Err(BlockchainError::ExecutionFailure {
                    deploy_hash: deploy_hash.clone(),
                    message: error_message,
                });
            }
            ExecutionOutcome::Pending => {
                tracing::debug!(
                    deploy_hash = %deploy_hash,
                    remaining = policy.max_attempts - attempt,
                    "Deploy pending"
                );
                if attempt < policy.max_attempts {
                    let delay = policy.delay_after(attempt);
                    sleep(delay).await;
                    waited += delay;
                }
            }
        }
    }

    Err(BlockchainError::ConfirmationTimeout {
        attempts: policy.max_attempts,
        waited_secs: waited.as_secs(),
    })
}
