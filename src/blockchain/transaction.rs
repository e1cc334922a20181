//! Deploy building, signing, and submission.
//!
//! # Responsibilities
//! - Build module-bytes deploys with standard payment
//! - Sign with the loaded key pair
//! - Submit to the node in a single attempt
//!
//! Confirmation lives in `confirmation.rs`.

use casper_types::bytesrepr::{self, Bytes, ToBytes};
use casper_types::{
    Deploy, DeployHeader, Digest, ExecutableDeployItem, RuntimeArgs, TimeDiff, Timestamp,
};

use crate::blockchain::client::NodeClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult, DeployHash};
use crate::blockchain::wallet::KeyPair;

/// Time a deploy stays eligible for inclusion.
const DEPLOY_TTL_SECS: u32 = 30 * 60;
/// Gas price multiplier accepted by the standard payment.
const GAS_PRICE: u64 = 1;

/// An unsigned module installation.
#[derive(Debug, Clone)]
pub struct DeployRequest {
    /// Compiled WASM module.
    pub module_bytes: Vec<u8>,
    /// Fee budget in motes.
    pub payment_amount: u64,
    /// Constructor arguments.
    pub args: RuntimeArgs,
}

/// Builds, signs and submits deploys for one account on one chain.
pub struct DeploySubmitter<'a> {
    client: &'a NodeClient,
    keys: &'a KeyPair,
    chain_name: String,
}

impl<'a> DeploySubmitter<'a> {
    pub fn new(client: &'a NodeClient, keys: &'a KeyPair, chain_name: impl Into<String>) -> Self {
        Self {
            client,
            keys,
            chain_name: chain_name.into(),
        }
    }

    /// Build and sign a deploy without sending it.
    pub fn build(&self, request: DeployRequest) -> BlockchainResult<Deploy> {
        let payment = ExecutableDeployItem::new_standard_payment(request.payment_amount);
        let session =
            ExecutableDeployItem::new_module_bytes(Bytes::from(request.module_bytes), request.args);

        let mut body = payment.to_bytes().map_err(encoding_error)?;
        body.extend(session.to_bytes().map_err(encoding_error)?);

        let header = DeployHeader::new(
            self.keys.public_key().clone(),
            Timestamp::now(),
            TimeDiff::from_seconds(DEPLOY_TTL_SECS),
            GAS_PRICE,
            Digest::hash(body),
            Vec::new(),
            self.chain_name.clone(),
        );
        let hash = casper_types::DeployHash::new(Digest::hash(
            header.to_bytes().map_err(encoding_error)?,
        ));

        let mut deploy = Deploy::new(hash, header, payment, session);
        deploy.sign(self.keys.secret_key());
        Ok(deploy)
    }

    /// Build, sign and submit a deploy, returning the hash the node reports.
    pub async fn submit(&self, request: DeployRequest) -> BlockchainResult<DeployHash> {
        let module_len = request.module_bytes.len();
        let payment = request.payment_amount;
        let deploy = self.build(request)?;

        tracing::info!(
            local_hash = %deploy.hash(),
            module_bytes = module_len,
            payment,
            chain = %self.chain_name,
            "Submitting deploy"
        );

        let deploy_hash = self.client.put_deploy(&deploy).await?;

        tracing::info!(deploy_hash = %deploy_hash, "Deploy accepted by node");
        Ok(deploy_hash)
    }
}

fn encoding_error(e: bytesrepr::Error) -> BlockchainError {
    BlockchainError::Submission(format!("Failed to encode deploy: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::NodeConfig;
    use std::path::PathBuf;

    fn keys() -> KeyPair {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/keys");
        KeyPair::from_dir(&dir).unwrap()
    }

    fn request() -> DeployRequest {
        let mut args = RuntimeArgs::new();
        args.insert("contract_name", "erc20_token_0".to_string()).unwrap();
        DeployRequest {
            module_bytes: vec![0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00],
            payment_amount: 250_000_000_000,
            args,
        }
    }

    #[test]
    fn test_build_signs_for_account_and_chain() {
        let keys = keys();
        let client = NodeClient::new(&NodeConfig::default()).unwrap();
        let submitter = DeploySubmitter::new(&client, &keys, "casper-test");

        let deploy = submitter.build(request()).unwrap();

        assert_eq!(deploy.header().chain_name(), "casper-test");
        assert_eq!(deploy.header().account(), keys.public_key());
        assert_eq!(deploy.approvals().len(), 1);
        assert!(matches!(deploy.session(), ExecutableDeployItem::ModuleBytes { .. }));
    }

    #[test]
    fn test_signed_deploy_is_valid() {
        let keys = keys();
        let client = NodeClient::new(&NodeConfig::default()).unwrap();
        let submitter = DeploySubmitter::new(&client, &keys, "casper-test");

        let deploy = submitter.build(request()).unwrap();

        assert!(deploy.is_valid().is_ok());
        let expected = casper_types::DeployHash::new(Digest::hash(deploy.header().to_bytes().unwrap()));
        assert_eq!(deploy.hash(), &expected);
        assert_eq!(deploy.header().ttl(), TimeDiff::from_seconds(DEPLOY_TTL_SECS));
        assert!(matches!(deploy.payment(), ExecutableDeployItem::ModuleBytes { module_bytes, .. } if module_bytes.is_empty()));
    }

    #[test]
    fn test_deploy_serializes_to_json() {
        let keys = keys();
        let client = NodeClient::new(&NodeConfig::default()).unwrap();
        let submitter = DeploySubmitter::new(&client, &keys, "casper-test");

        let deploy = submitter.build(request()).unwrap();
        let value = serde_json::to_value(&deploy).unwrap();

        let hash = value["hash"].as_str().unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.bytes().all(|b| b.is_ascii_hexdigit()));
        assert_eq!(value["header"]["chain_name"], "casper-test");
    }
}
