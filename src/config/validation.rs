//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (every plan entry has a contract section)
//! - Validate value ranges (timeouts > 0, hashes well-formed)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DeployerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::DeployerConfig;
use crate::deployment::plan::ContractKind;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "contracts.minter.payment_amount").
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &DeployerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.node.address) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "node.address",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "node.address",
            format!("invalid URL '{}': {}", config.node.address, e),
        )),
    }
    if config.node.chain_name.trim().is_empty() {
        errors.push(ValidationError::new("node.chain_name", "must not be empty"));
    }
    if config.node.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("node.rpc_timeout_secs", "must be greater than 0"));
    }

    if config.poll.max_attempts == 0 {
        errors.push(ValidationError::new("poll.max_attempts", "must be greater than 0"));
    }
    if let Some(max) = config.poll.backoff_max_ms {
        if max < config.poll.interval_ms {
            errors.push(ValidationError::new(
                "poll.backoff_max_ms",
                "must not be lower than poll.interval_ms",
            ));
        }
    }

    if !is_hash_hex(&config.accounts.admin_account_hash) {
        errors.push(ValidationError::new(
            "accounts.admin_account_hash",
            "must be 64 hex characters",
        ));
    }
    if config.accounts.admin_account_str.trim().is_empty() {
        errors.push(ValidationError::new("accounts.admin_account_str", "must not be empty"));
    }

    if config.output.counter_file.trim().is_empty() {
        errors.push(ValidationError::new("output.counter_file", "must not be empty"));
    }
    if config.output.archive_path.starts_with(&config.output.dir) {
        errors.push(ValidationError::new(
            "output.archive_path",
            "must be outside output.dir",
        ));
    }

    for kind in ContractKind::ALL {
        let field = format!("contracts.{}", kind.id());
        match config.contracts.get(kind.id()) {
            None => errors.push(ValidationError::new(field, "missing contract section")),
            Some(contract) => {
                if contract.wasm_path.as_os_str().is_empty() {
                    errors.push(ValidationError::new(format!("{field}.wasm_path"), "must not be empty"));
                }
                if contract.payment_amount == 0 {
                    errors.push(ValidationError::new(
                        format!("{field}.payment_amount"),
                        "must be greater than 0",
                    ));
                }
                if contract.name_prefix.trim().is_empty() {
                    errors.push(ValidationError::new(format!("{field}.name_prefix"), "must not be empty"));
                }
            }
        }
    }
    for id in config.contracts.keys() {
        if ContractKind::from_id(id).is_none() {
            errors.push(ValidationError::new(
                format!("contracts.{id}"),
                "unknown contract id",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// True for a bare 32-byte hash in hex.
pub(crate) fn is_hash_hex(value: &str) -> bool {
    value.len() == 64 && value.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ContractConfig;

    fn valid_config() -> DeployerConfig {
        let mut config = DeployerConfig::default();
        config.accounts.admin_account_hash = "ab".repeat(32);
        config.accounts.admin_account_str = format!("account-hash-{}", "ab".repeat(32));
        for kind in ContractKind::ALL {
            config.contracts.insert(
                kind.id().to_string(),
                ContractConfig {
                    wasm_path: format!("wasm/{}.wasm", kind.id()).into(),
                    payment_amount: 200_000_000_000,
                    name_prefix: kind.id().to_string(),
                },
            );
        }
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert_eq!(validate_config(&valid_config()), Ok(()));
    }

    #[test]
    fn test_reports_all_errors() {
        let mut config = valid_config();
        config.node.address = "not a url".to_string();
        config.poll.max_attempts = 0;
        config.accounts.admin_account_hash = "xyz".to_string();
        config.contracts.remove("minter");

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "node.address",
                "poll.max_attempts",
                "accounts.admin_account_hash",
                "contracts.minter"
            ]
        );
    }

    #[test]
    fn test_rejects_unknown_contract_and_bad_values() {
        let mut config = valid_config();
        config.contracts.insert(
            "mystery".to_string(),
            ContractConfig {
                wasm_path: "x.wasm".into(),
                payment_amount: 1,
                name_prefix: "x".into(),
            },
        );
        config.contracts.get_mut("ownable").unwrap().payment_amount = 0;
        config.poll.backoff_max_ms = Some(10);

        let errors = validate_config(&config).unwrap_err();
        let rendered: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        assert!(rendered.contains(&"poll.backoff_max_ms: must not be lower than poll.interval_ms".to_string()));
        assert!(rendered.contains(&"contracts.ownable.payment_amount: must be greater than 0".to_string()));
        assert!(rendered.contains(&"contracts.mystery: unknown contract id".to_string()));
    }

    #[test]
    fn test_rejects_archive_inside_output_dir() {
        let mut config = valid_config();
        config.output.archive_path = config.output.dir.join("hashes.zip");

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "output.archive_path: must be outside output.dir");
    }

    #[test]
    fn test_hash_hex() {
        assert!(is_hash_hex(&"0f".repeat(32)));
        assert!(!is_hash_hex(&"0f".repeat(31)));
        assert!(!is_hash_hex(&format!("hash-{}", "0f".repeat(32))));
    }
}
