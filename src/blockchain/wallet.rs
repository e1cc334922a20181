//! Signing key pair management.
//!
//! # Security
//! - Keys are loaded ONLY from PEM files in the configured key directory
//! - Secret keys are never logged or serialized

use std::fs;
use std::path::Path;

use casper_types::{AsymmetricType, PublicKey, SecretKey};

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// File name of the public key inside a key directory.
pub const PUBLIC_KEY_FILE: &str = "public_key.pem";
/// File name of the secret key inside a key directory.
pub const SECRET_KEY_FILE: &str = "secret_key.pem";

/// Key pair used to sign deploys; the public key owns the named keys.
pub struct KeyPair {
    secret_key: SecretKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Load `public_key.pem` and `secret_key.pem` from a directory.
    pub fn from_dir(dir: &Path) -> BlockchainResult<Self> {
        Self::from_files(&dir.join(PUBLIC_KEY_FILE), &dir.join(SECRET_KEY_FILE))
    }

    /// Load a key pair from two PEM files and check that they belong together.
    pub fn from_files(public_key_path: &Path, secret_key_path: &Path) -> BlockchainResult<Self> {
        let secret_key = SecretKey::from_pem(read_pem(secret_key_path)?).map_err(|e| {
            BlockchainError::Wallet(format!(
                "Invalid secret key file {}: {}",
                secret_key_path.display(),
                e
            ))
        })?;
        let public_key = PublicKey::from_pem(read_pem(public_key_path)?).map_err(|e| {
            BlockchainError::Wallet(format!(
                "Invalid public key file {}: {}",
                public_key_path.display(),
                e
            ))
        })?;

        if PublicKey::from(&secret_key) != public_key {
            return Err(BlockchainError::Wallet(format!(
                "Public key {} does not match secret key {}",
                public_key_path.display(),
                secret_key_path.display()
            )));
        }

        tracing::info!(public_key = %public_key.to_hex(), "Key pair loaded");

        Ok(Self {
            secret_key,
            public_key,
        })
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Hex form of the public key, as accepted by the node's account queries.
    pub fn public_key_hex(&self) -> String {
        self.public_key.to_hex()
    }
}

fn read_pem(path: &Path) -> BlockchainResult<Vec<u8>> {
    fs::read(path).map_err(|e| {
        BlockchainError::Wallet(format!("Cannot read key file {}: {}", path.display(), e))
    })
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key.to_hex())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const TEST_PUBLIC_KEY_HEX: &str =
        "0168e86c85ffea45089691fbf9a128f82c42f28c2c45b2e11fb60340998c36077e";

    fn fixture(dir: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(dir)
    }

    #[test]
    fn test_key_pair_from_dir() {
        let keys = KeyPair::from_dir(&fixture("keys")).unwrap();
        assert_eq!(keys.public_key_hex(), TEST_PUBLIC_KEY_HEX);
        assert_eq!(&PublicKey::from(keys.secret_key()), keys.public_key());
    }

    #[test]
    fn test_mismatched_key_pair() {
        let err = KeyPair::from_dir(&fixture("mismatched_keys")).unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn test_missing_key_files() {
        let err = KeyPair::from_dir(&fixture("no_such_dir")).unwrap_err();
        assert!(matches!(err, BlockchainError::Wallet(_)));
        assert!(err.to_string().contains("secret_key.pem"));
    }

    #[test]
    fn test_debug_hides_secret() {
        let keys = KeyPair::from_dir(&fixture("keys")).unwrap();
        let debug = format!("{keys:?}");
        assert!(debug.contains(TEST_PUBLIC_KEY_HEX));
        assert!(!debug.contains("secret"));
    }
}
