// crates/mintplan-deploy/src/lib.rs
//
// mintplan-deploy: network, gas, compiler, and test-runner settings consumed
// by the external contract deployment toolchain.
//
// Nothing here connects to a network or reads key material; the crate only
// describes where and how the toolchain should deploy.

pub mod compiler;
pub mod config;
pub mod network;
pub mod profile;

pub use compiler::{CompilerConfig, MochaConfig};
pub use config::{expand_tilde, DeployOverrides, NetworkOverride, DEFAULT_OVERRIDES_PATH};
pub use network::{
    build_networks, NetworkId, NetworkProfile, NetworkTable, ProviderSpec, NETWORK_KEYS,
};
pub use profile::{build_deployment_profile, build_deployment_profile_with, DeploymentProfile};
