// crates/mintplan-deploy/src/config.rs
//
// Optional TOML overrides for the deployment profile.
//
// Example:
//
//   [networks.matic]
//   url = "wss://polygon-mainnet.example/ws"
//   confirmations = 3
//
//   [compiler]
//   version = "0.8.19"
//   runs = 200

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::compiler::CompilerConfig;
use crate::network::NetworkTable;
use mintplan_core::MintPlanError;

/// Default location of the overrides file.
pub const DEFAULT_OVERRIDES_PATH: &str = "~/.mintplan/deploy.toml";

/// Per-network fields that may be overridden. Unset fields keep the built-in value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkOverride {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub confirmations: Option<u32>,
    #[serde(default)]
    pub timeout_blocks: Option<u64>,
    #[serde(default)]
    pub gas: Option<u64>,
    #[serde(default)]
    pub gas_price: Option<u64>,
}

/// Compiler fields that may be overridden.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerOverride {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub runs: Option<u32>,
    #[serde(default)]
    pub optimizer: Option<bool>,
    #[serde(default)]
    pub evm_version: Option<String>,
}

/// Overrides loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployOverrides {
    /// Overrides keyed by network name.
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkOverride>,

    #[serde(default)]
    pub compiler: Option<CompilerOverride>,

    /// Path of the mnemonic file the toolchain reads. Never opened here.
    #[serde(default)]
    pub mnemonic_path: Option<String>,
}

impl DeployOverrides {
    /// Load overrides from a TOML file at the given path.
    ///
    /// # Errors
    /// Returns `MintPlanError::Io` if the file cannot be read and
    /// `MintPlanError::Serialization` if it is not valid TOML for this schema.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MintPlanError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::parse(&contents)
    }

    /// Parse overrides from TOML text.
    pub fn parse(contents: &str) -> Result<Self, MintPlanError> {
        toml::from_str(contents).map_err(|e| MintPlanError::Serialization(e.to_string()))
    }

    /// Apply network overrides in place. Overrides naming an unknown network
    /// are skipped with a warning.
    pub fn apply_networks(&self, networks: &mut NetworkTable) {
        for (name, o) in &self.networks {
            let Some(profile) = networks.get_mut(name) else {
                tracing::warn!("Ignoring override for unknown network '{}'", name);
                continue;
            };
            if let Some(url) = &o.url {
                profile.provider.url = url.clone();
            }
            if let Some(confirmations) = o.confirmations {
                profile.confirmations = Some(confirmations);
            }
            if let Some(timeout_blocks) = o.timeout_blocks {
                profile.timeout_blocks = Some(timeout_blocks);
            }
            if let Some(gas) = o.gas {
                profile.gas = Some(gas);
            }
            if let Some(gas_price) = o.gas_price {
                profile.gas_price = Some(gas_price);
            }
            tracing::debug!("Applied overrides to network '{}'", name);
        }
    }

    /// Apply compiler overrides in place.
    pub fn apply_compiler(&self, compiler: &mut CompilerConfig) {
        let Some(o) = &self.compiler else {
            return;
        };
        if let Some(version) = &o.version {
            compiler.solc.version = version.clone();
        }
        if let Some(runs) = o.runs {
            compiler.solc.settings.optimizer.runs = runs;
        }
        if let Some(enabled) = o.optimizer {
            compiler.solc.settings.optimizer.enabled = enabled;
        }
        if let Some(evm_version) = &o.evm_version {
            compiler.solc.settings.evm_version = evm_version.clone();
        }
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::build_networks;
    use mintplan_core::EnvMap;
    use std::io::Write;

    fn networks() -> NetworkTable {
        let env = EnvMap::from_pairs([("GAS_LIMIT", "6000000"), ("GAS_PRICE", "1")]);
        build_networks(&env).unwrap()
    }

    #[test]
    fn test_parse_empty() {
        let overrides = DeployOverrides::parse("").unwrap();
        assert_eq!(overrides, DeployOverrides::default());
    }

    #[test]
    fn test_apply_network_override() {
        let overrides = DeployOverrides::parse(
            r#"
            [networks.matic]
            url = "wss://rpc.example/ws"
            confirmations = 3
            gas_price = 50000000000
            "#,
        )
        .unwrap();
        let mut nets = networks();
        overrides.apply_networks(&mut nets);
        let matic = nets.get("matic").unwrap();
        assert_eq!(matic.provider.url, "wss://rpc.example/ws");
        assert_eq!(matic.confirmations, Some(3));
        assert_eq!(matic.gas_price, Some(50_000_000_000));
        // Untouched fields keep built-in values.
        assert_eq!(matic.gas, Some(6_000_000));
    }

    #[test]
    fn test_unknown_network_is_ignored() {
        let overrides = DeployOverrides::parse(
            r#"
            [networks.goerli]
            confirmations = 3
            "#,
        )
        .unwrap();
        let mut nets = networks();
        let before = nets.clone();
        overrides.apply_networks(&mut nets);
        assert_eq!(nets, before);
    }

    #[test]
    fn test_apply_compiler_override() {
        let overrides = DeployOverrides::parse(
            r#"
            [compiler]
            version = "0.8.19"
            runs = 200
            evm_version = "london"
            "#,
        )
        .unwrap();
        let mut compiler = CompilerConfig::default();
        overrides.apply_compiler(&mut compiler);
        assert_eq!(compiler.solc.version, "0.8.19");
        assert_eq!(compiler.solc.settings.optimizer.runs, 200);
        assert!(compiler.solc.settings.optimizer.enabled);
        assert_eq!(compiler.solc.settings.evm_version, "london");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = DeployOverrides::parse("[networks.matic]\nprivate_key = \"0x00\"\n").unwrap_err();
        assert!(matches!(err, MintPlanError::Serialization(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mnemonic_path = \"/secure/.secret\"").unwrap();
        file.flush().unwrap();
        let overrides = DeployOverrides::load(file.path()).unwrap();
        assert_eq!(overrides.mnemonic_path.as_deref(), Some("/secure/.secret"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = DeployOverrides::load("/nonexistent/mintplan/deploy.toml").unwrap_err();
        assert!(matches!(err, MintPlanError::Io(_)));
    }

    #[test]
    fn test_expand_tilde_passthrough() {
        assert_eq!(expand_tilde("/etc/deploy.toml"), PathBuf::from("/etc/deploy.toml"));
        assert_eq!(expand_tilde("relative.toml"), PathBuf::from("relative.toml"));
    }
}
