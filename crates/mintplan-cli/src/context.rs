// crates/mintplan-cli/src/context.rs
//
// Startup inputs: the variable map and the deploy overrides.
//
// Variables come from the dotenv file (if any) with the process environment
// layered on top, so an exported variable always wins over the file.

use std::path::Path;

use mintplan_core::{EnvMap, MintPlanError};
use mintplan_deploy::{expand_tilde, DeployOverrides, DEFAULT_OVERRIDES_PATH};

/// Build the variable map. A missing dotenv file is not an error; a
/// malformed one is.
pub fn load_env(env_file: Option<&Path>) -> Result<EnvMap, MintPlanError> {
    let process = EnvMap::from_process();
    let Some(path) = env_file else {
        return Ok(process);
    };
    if !path.exists() {
        tracing::warn!(
            "Env file {} not found. Using process environment only.",
            path.display()
        );
        return Ok(process);
    }
    let file = EnvMap::from_dotenv_file(path)?;
    tracing::info!("Loaded {} variables from {}", file.len(), path.display());
    Ok(file.merge(process))
}

/// Load deploy overrides. An explicit path must exist; the default path is
/// used only if present.
pub fn load_overrides(explicit: Option<&str>) -> Result<DeployOverrides, MintPlanError> {
    if let Some(path) = explicit {
        let overrides = DeployOverrides::load(expand_tilde(path))?;
        tracing::info!("Loaded deploy overrides from {}", path);
        return Ok(overrides);
    }
    let default_path = expand_tilde(DEFAULT_OVERRIDES_PATH);
    if default_path.exists() {
        let overrides = DeployOverrides::load(&default_path)?;
        tracing::info!("Loaded deploy overrides from {}", default_path.display());
        return Ok(overrides);
    }
    Ok(DeployOverrides::default())
}
