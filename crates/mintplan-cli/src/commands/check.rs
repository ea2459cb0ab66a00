// crates/mintplan-cli/src/commands/check.rs
//
// `mintplan check [--strict]`: build everything once and report problems.
//
// Missing keys are listed all at once rather than one per run. Allocation
// warnings are reported but only fail the check with `--strict`.

use clap::Args;
use tabled::Tabled;

use crate::output::{emit, OutputFormat};
use mintplan_core::{EnvMap, MintPlanError};
use mintplan_deploy::{build_deployment_profile_with, DeployOverrides, NETWORK_KEYS};
use mintplan_economics::{required_keys, AllocationWarning, TokenPlan};

/// Check command arguments.
#[derive(Debug, Args)]
pub struct CheckCmd {
    /// Treat allocation warnings as errors.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Tabled)]
struct WarningRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Warning")]
    message: String,
}

/// Outcome of a configuration check.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Required keys that are unset or empty. When non-empty nothing was built.
    pub missing: Vec<String>,
    pub warnings: Vec<AllocationWarning>,
    pub networks: usize,
}

impl CheckReport {
    /// Why the check fails, if it does. Warnings only count in strict mode.
    pub fn failure(&self, strict: bool) -> Option<String> {
        if !self.missing.is_empty() {
            return Some(format!(
                "{} required variable(s) unset or empty: {}",
                self.missing.len(),
                self.missing.join(", ")
            ));
        }
        if strict && !self.warnings.is_empty() {
            return Some(format!(
                "{} allocation warning(s) in strict mode",
                self.warnings.len()
            ));
        }
        None
    }
}

/// Every key the full configuration needs.
pub fn all_required_keys() -> Vec<&'static str> {
    let mut keys = required_keys();
    keys.extend(NETWORK_KEYS);
    keys
}

/// Build the plan, deployment profile, and vesting amounts, collecting
/// missing keys and allocation warnings along the way.
///
/// # Errors
/// Returns an error only for malformed values or amount overflow; absent
/// keys are reported in `CheckReport::missing`.
pub fn check_config(
    env: &EnvMap,
    overrides: &DeployOverrides,
) -> Result<CheckReport, MintPlanError> {
    let missing: Vec<String> = env
        .missing_keys(&all_required_keys())
        .into_iter()
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Ok(CheckReport {
            missing,
            ..CheckReport::default()
        });
    }

    let plan = TokenPlan::from_source(env)?;
    let profile = build_deployment_profile_with(env, overrides)?;
    plan.allocation_amounts()?;

    Ok(CheckReport {
        missing,
        warnings: plan.warnings(),
        networks: profile.networks.len(),
    })
}

/// Run the check command.
pub fn run(
    cmd: &CheckCmd,
    env: &EnvMap,
    overrides: &DeployOverrides,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = check_config(env, overrides)?;
    for key in &report.missing {
        tracing::error!("Missing configuration: {}", key);
    }

    if report.missing.is_empty() {
        emit(format, &report.warnings, || {
            report
                .warnings
                .iter()
                .enumerate()
                .map(|(i, w)| WarningRow {
                    index: i + 1,
                    message: w.to_string(),
                })
                .collect()
        })?;
    }

    if let Some(reason) = report.failure(cmd.strict) {
        return Err(reason.into());
    }

    tracing::info!(
        warnings = report.warnings.len(),
        networks = report.networks,
        "Configuration OK"
    );
    Ok(())
}
