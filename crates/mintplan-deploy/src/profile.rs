// crates/mintplan-deploy/src/profile.rs
//
// The toolchain-facing deployment profile: networks, compiler, test runner,
// and plugins, assembled once from the configuration source plus any TOML
// overrides.

use serde::Serialize;

use crate::compiler::{CompilerConfig, MochaConfig};
use crate::config::DeployOverrides;
use crate::network::{build_networks, NetworkProfile, NetworkTable};
use mintplan_core::{ConfigSource, MintPlanError};

/// Toolchain plugins enabled for every deployment.
pub const PLUGINS: [&str; 1] = ["truffle-plugin-verify"];

/// Mnemonic file the toolchain reads, relative to the project root.
pub const DEFAULT_MNEMONIC_PATH: &str = ".secret";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentProfile {
    pub plugins: Vec<String>,
    pub networks: NetworkTable,
    pub mocha: MochaConfig,
    pub compilers: CompilerConfig,
    pub mnemonic_path: String,
}

impl DeploymentProfile {
    pub fn network(&self, name: &str) -> Option<&NetworkProfile> {
        self.networks.get(name)
    }
}

/// Build the profile from built-in defaults and `src`.
///
/// # Errors
/// Returns `MintPlanError::MissingConfiguration` if the gas settings are
/// missing or malformed.
pub fn build_deployment_profile<S: ConfigSource + ?Sized>(
    src: &S,
) -> Result<DeploymentProfile, MintPlanError> {
    build_deployment_profile_with(src, &DeployOverrides::default())
}

/// Build the profile and then apply `overrides`.
pub fn build_deployment_profile_with<S: ConfigSource + ?Sized>(
    src: &S,
    overrides: &DeployOverrides,
) -> Result<DeploymentProfile, MintPlanError> {
    let mut networks = build_networks(src)?;
    overrides.apply_networks(&mut networks);

    let mut compilers = CompilerConfig::default();
    overrides.apply_compiler(&mut compilers);

    let profile = DeploymentProfile {
        plugins: PLUGINS.iter().map(|p| p.to_string()).collect(),
        networks,
        mocha: MochaConfig::default(),
        compilers,
        mnemonic_path: overrides
            .mnemonic_path
            .clone()
            .unwrap_or_else(|| DEFAULT_MNEMONIC_PATH.to_string()),
    };

    tracing::info!(
        networks = profile.networks.len(),
        solc = %profile.compilers.solc.version,
        "Deployment profile built"
    );

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mintplan_core::EnvMap;

    fn gas_env() -> EnvMap {
        EnvMap::from_pairs([("GAS_LIMIT", "6000000"), ("GAS_PRICE", "35000000000")])
    }

    #[test]
    fn test_build_default_profile() {
        let profile = build_deployment_profile(&gas_env()).unwrap();
        assert_eq!(profile.plugins, vec!["truffle-plugin-verify".to_string()]);
        assert_eq!(profile.networks.len(), 9);
        assert_eq!(profile.mnemonic_path, ".secret");
        assert_eq!(profile.compilers.solc.version, "0.8.14");
        assert_eq!(profile.network("matic").unwrap().gas, Some(6_000_000));
        assert!(profile.network("mainnet").is_none());
    }

    #[test]
    fn test_missing_gas_price_fails() {
        let mut env = gas_env();
        env.remove("GAS_PRICE");
        let err = build_deployment_profile(&env).unwrap_err();
        assert_eq!(err.missing_key(), Some("GAS_PRICE"));
    }

    #[test]
    fn test_overrides_applied() {
        let overrides = DeployOverrides::parse(
            r#"
            mnemonic_path = "/keys/mnemonic"

            [networks.bsc]
            confirmations = 20

            [compiler]
            optimizer = false
            "#,
        )
        .unwrap();
        let profile = build_deployment_profile_with(&gas_env(), &overrides).unwrap();
        assert_eq!(profile.mnemonic_path, "/keys/mnemonic");
        assert_eq!(profile.network("bsc").unwrap().confirmations, Some(20));
        assert!(!profile.compilers.solc.settings.optimizer.enabled);
    }

    #[test]
    fn test_json_sections() {
        let profile = build_deployment_profile(&gas_env()).unwrap();
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json["networks"]["neon_devnet"].is_object());
        assert_eq!(json["compilers"]["solc"]["version"], "0.8.14");
        assert_eq!(json["mnemonicPath"], ".secret");
    }
}
