//! Configuration loading from disk.

use std::path::{Path, PathBuf};
use std::fs;
use crate::config::schema::DeployerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Values taken from the command line or environment, applied over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub node_address: Option<String>,
    pub chain_name: Option<String>,
    pub key_pair_path: Option<PathBuf>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut DeployerConfig) {
        if let Some(address) = &self.node_address {
            config.node.address = address.clone();
        }
        if let Some(chain_name) = &self.chain_name {
            config.node.chain_name = chain_name.clone();
        }
        if let Some(path) = &self.key_pair_path {
            config.keys.key_pair_path = path.clone();
        }
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path, overrides: &ConfigOverrides) -> Result<DeployerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content, overrides)
}

/// Parse, override and validate configuration text.
pub fn parse_config(content: &str, overrides: &ConfigOverrides) -> Result<DeployerConfig, ConfigError> {
    let mut config: DeployerConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
    overrides.apply(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deployment::plan::ContractKind;
    use std::fmt::Write;

    fn full_config_text() -> String {
        let mut text = String::from(
            r#"
            [node]
            address = "http://localhost:7777"
            chain_name = "casper-test"

            [accounts]
            admin_account_hash = "0101010101010101010101010101010101010101010101010101010101010101"
            admin_account_str = "account-hash-0101010101010101010101010101010101010101010101010101010101010101"
            "#,
        );
        for kind in ContractKind::ALL {
            write!(
                text,
                "\n[contracts.{id}]\nwasm_path = \"wasm/{id}.wasm\"\npayment_amount = 150000000000\nname_prefix = \"{id}_\"\n",
                id = kind.id()
            )
            .unwrap();
        }
        text
    }

    #[test]
    fn test_parse_and_override() {
        let overrides = ConfigOverrides {
            node_address: Some("http://node:7777".to_string()),
            chain_name: None,
            key_pair_path: Some(PathBuf::from("/secrets/master")),
        };
        let config = parse_config(&full_config_text(), &overrides).unwrap();
        assert_eq!(config.node.address, "http://node:7777");
        assert_eq!(config.node.chain_name, "casper-test");
        assert_eq!(config.keys.key_pair_path, PathBuf::from("/secrets/master"));
        assert_eq!(config.contracts.len(), ContractKind::ALL.len());
    }

    #[test]
    fn test_override_is_validated() {
        let overrides = ConfigOverrides {
            node_address: Some("ftp://node".to_string()),
            ..Default::default()
        };
        let err = parse_config(&full_config_text(), &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("node.address"));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[node\naddress = 1", &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/deployer.toml"), &ConfigOverrides::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_example_config_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("deployer.example.toml");
        let config = load_config(&path, &ConfigOverrides::default()).unwrap();
        assert_eq!(config.poll.max_attempts, 300);
        assert_eq!(config.contracts["erc20_reward"].wasm_path, PathBuf::from("wasm/erc20_token.wasm"));
    }
}
