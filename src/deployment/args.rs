//! Typed constructor arguments.
//!
//! Arguments are kept as plain values until submission so that plans can be
//! inspected and logged. `NamedArgs::to_runtime_args` performs the encoding.

use casper_types::account::AccountHash;
use casper_types::{Key, RuntimeArgs, U256};

use crate::deployment::error::{DeployError, DeployResult};

const HASH_LENGTH: usize = 32;

/// A single constructor argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    String(String),
    U8(u8),
    /// Decimal representation.
    U256(String),
    Bool(bool),
    StringList(Vec<String>),
    /// Hex package hash of an installed contract, passed as `Key::Hash`.
    PackageRef(String),
    /// Hex account hash, passed as `Key::Account`.
    Account(String),
}

/// Ordered list of named arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedArgs(Vec<(String, ArgValue)>);

impl NamedArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an argument, builder style.
    pub fn with(mut self, name: &str, value: ArgValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert an argument, replacing any previous value under the same name.
    pub fn insert(&mut self, name: &str, value: ArgValue) {
        match self.0.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode into the runtime arguments carried by a deploy.
    pub fn to_runtime_args(&self) -> DeployResult<RuntimeArgs> {
        let mut args = RuntimeArgs::new();
        for (name, value) in &self.0 {
            let inserted = match value {
                ArgValue::String(s) => args.insert(name.as_str(), s.clone()),
                ArgValue::U8(v) => args.insert(name.as_str(), *v),
                ArgValue::U256(decimal) => {
                    let v = U256::from_dec_str(decimal)
                        .map_err(|e| invalid(name, format!("not a U256 '{decimal}': {e:?}")))?;
                    args.insert(name.as_str(), v)
                }
                ArgValue::Bool(v) => args.insert(name.as_str(), *v),
                ArgValue::StringList(list) => args.insert(name.as_str(), list.clone()),
                ArgValue::PackageRef(hex_hash) => {
                    let bytes = decode_hash(name, hex_hash)?;
                    args.insert(name.as_str(), Key::Hash(bytes))
                }
                ArgValue::Account(hex_hash) => {
                    let bytes = decode_hash(name, hex_hash)?;
                    args.insert(name.as_str(), Key::Account(AccountHash::new(bytes)))
                }
            };
            inserted.map_err(|e| invalid(name, e.to_string()))?;
        }
        Ok(args)
    }
}

fn invalid(name: &str, reason: String) -> DeployError {
    DeployError::InvalidArgument {
        name: name.to_string(),
        reason,
    }
}

/// Decode a 32-byte hash, accepting an optional `hash-` or `account-hash-` prefix.
fn decode_hash(name: &str, value: &str) -> DeployResult<[u8; HASH_LENGTH]> {
    let trimmed = value
        .strip_prefix("account-hash-")
        .or_else(|| value.strip_prefix("hash-"))
        .unwrap_or(value);
    let bytes = hex::decode(trimmed).map_err(|e| invalid(name, format!("invalid hex: {e}")))?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        invalid(
            name,
            format!("expected {HASH_LENGTH} bytes, got {}", bytes.len()),
        )
    })
}
