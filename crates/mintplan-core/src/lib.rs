// crates/mintplan-core/src/lib.rs
//
// mintplan-core: shared primitives for the mintplan workspace.
//
// This is the leaf crate that every other crate depends on. It defines the
// error type, the exact fixed-point amount types, and the configuration
// source abstraction that the builders read from.

pub mod amount;
pub mod error;
pub mod source;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use mintplan_core::TokenAmount;`

pub use amount::{AmountParseError, Share, TokenAmount, TOKEN_DECIMALS, WEI_PER_TOKEN};
pub use error::{MintPlanError, MissingReason};
pub use source::{ConfigSource, EnvMap};
