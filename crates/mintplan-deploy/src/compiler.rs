// crates/mintplan-deploy/src/compiler.rs
//
// Solidity compiler and test-runner settings for the toolchain.

use serde::{Deserialize, Serialize};

/// Pinned solc release.
pub const SOLC_VERSION: &str = "0.8.14";

/// Optimizer runs: tuned for cheap calls over cheap deployment.
pub const OPTIMIZER_RUNS: u32 = 200_000;

/// Target EVM version.
pub const EVM_VERSION: &str = "byzantium";

/// Hook timeout for the test runner: 24 hours, in milliseconds.
pub const BEFORE_TIMEOUT_MS: u64 = 60_000 * 60 * 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    pub enabled: bool,
    pub runs: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolcSettings {
    pub optimizer: OptimizerSettings,
    pub evm_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolcConfig {
    pub version: String,
    pub settings: SolcSettings,
}

/// Compiler section; only solc is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    pub solc: SolcConfig,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            solc: SolcConfig {
                version: SOLC_VERSION.to_string(),
                settings: SolcSettings {
                    optimizer: OptimizerSettings {
                        enabled: true,
                        runs: OPTIMIZER_RUNS,
                    },
                    evm_version: EVM_VERSION.to_string(),
                },
            },
        }
    }
}

/// Test-runner options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MochaConfig {
    #[serde(rename = "enableTimeouts")]
    pub enable_timeouts: bool,
    pub before_timeout: u64,
}

impl Default for MochaConfig {
    fn default() -> Self {
        Self {
            enable_timeouts: false,
            before_timeout: BEFORE_TIMEOUT_MS,
        }
    }
}
