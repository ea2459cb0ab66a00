// crates/mintplan-cli/src/commands/render.rs
//
// `mintplan render`: print the complete configuration as JSON for the
// deployment toolchain.

use serde::Serialize;

use crate::output::format_json;
use mintplan_core::{EnvMap, MintPlanError};
use mintplan_deploy::{build_deployment_profile_with, DeployOverrides, DeploymentProfile};
use mintplan_economics::{log_warnings, validate_governance, TokenPlan};

/// Everything the toolchain consumes, in one document.
#[derive(Debug, Serialize)]
pub struct RenderedConfig {
    #[serde(flatten)]
    pub plan: TokenPlan,
    pub deployment: DeploymentProfile,
}

impl RenderedConfig {
    /// Build the document. Allocation warnings are logged, never fatal.
    pub fn build(env: &EnvMap, overrides: &DeployOverrides) -> Result<Self, MintPlanError> {
        let plan = TokenPlan::from_source(env)?;
        log_warnings(&validate_governance(&plan.governance));
        let deployment = build_deployment_profile_with(env, overrides)?;
        Ok(Self { plan, deployment })
    }
}

/// Run the render command. Always prints JSON.
pub fn run(env: &EnvMap, overrides: &DeployOverrides) -> Result<(), Box<dyn std::error::Error>> {
    let rendered = RenderedConfig::build(env, overrides)?;
    println!("{}", format_json(&rendered)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::check::tests::sample_env;

    #[test]
    fn test_rendered_top_level_keys() {
        let rendered = RenderedConfig::build(&sample_env(), &DeployOverrides::default()).unwrap();
        let json = serde_json::to_value(&rendered).unwrap();
        let mut keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["dai", "deployment", "governance", "ico", "icoAtm", "swap", "token"]
        );
    }

    #[test]
    fn test_rendered_sections() {
        let overrides = DeployOverrides::parse("mnemonic_path = \"/keys/mnemonic\"").unwrap();
        let rendered = RenderedConfig::build(&sample_env(), &overrides).unwrap();
        let json = serde_json::to_value(&rendered).unwrap();

        assert_eq!(json["token"]["maxCap"], "1000000000000000000000000");
        assert_eq!(json["icoAtm"]["price"], "0.07");
        assert_eq!(json["governance"]["airDrop"]["percentage"], 0.009);
        assert_eq!(json["deployment"]["mnemonicPath"], "/keys/mnemonic");
        assert_eq!(json["deployment"]["networks"]["matic"]["gasPrice"], 35_000_000_000u64);
    }

    #[test]
    fn test_render_requires_gas_settings() {
        let mut env = sample_env();
        env.remove("GAS_LIMIT");
        let err = RenderedConfig::build(&env, &DeployOverrides::default()).unwrap_err();
        assert_eq!(err.missing_key(), Some("GAS_LIMIT"));
    }
}
