// crates/mintplan-cli/src/commands/networks.rs
//
// `mintplan networks`: show the deployment profile's network table.

use tabled::Tabled;

use crate::output::{cell, emit, OutputFormat};
use mintplan_core::EnvMap;
use mintplan_deploy::{build_deployment_profile_with, DeployOverrides, DeploymentProfile};

#[derive(Tabled)]
struct NetworkRow {
    #[tabled(rename = "Network")]
    name: String,
    #[tabled(rename = "Chain id")]
    network_id: String,
    #[tabled(rename = "Endpoint")]
    endpoint: String,
    #[tabled(rename = "Confirmations")]
    confirmations: String,
    #[tabled(rename = "Gas")]
    gas: String,
    #[tabled(rename = "Gas price")]
    gas_price: String,
}

fn rows(profile: &DeploymentProfile) -> Vec<NetworkRow> {
    profile
        .networks
        .iter()
        .map(|(name, n)| NetworkRow {
            name: name.to_string(),
            network_id: n.network_id.to_string(),
            endpoint: n.provider.url.clone(),
            confirmations: cell(n.confirmations),
            gas: cell(n.gas),
            gas_price: cell(n.gas_price),
        })
        .collect()
}

/// Run the networks command.
pub fn run(
    env: &EnvMap,
    overrides: &DeployOverrides,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = build_deployment_profile_with(env, overrides)?;
    emit(format, &profile, || rows(&profile))?;
    if format == OutputFormat::Table {
        let solc = &profile.compilers.solc;
        println!(
            "solc {} (optimizer: {}, runs: {}, evm: {})",
            solc.version,
            solc.settings.optimizer.enabled,
            solc.settings.optimizer.runs,
            solc.settings.evm_version
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::check::tests::sample_env;

    #[test]
    fn test_rows_in_declaration_order() {
        let profile =
            build_deployment_profile_with(&sample_env(), &DeployOverrides::default()).unwrap();
        let rows = rows(&profile);
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0].name, "development");
        assert_eq!(rows[0].network_id, "*");
        assert_eq!(rows[0].gas, "-");
        let matic = rows.iter().find(|r| r.name == "matic").unwrap();
        assert_eq!(matic.gas_price, "35000000000");
    }
}
