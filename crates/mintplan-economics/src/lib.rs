// crates/mintplan-economics/src/lib.rs
//
// mintplan-economics: token parameters, sale descriptors, and the governance
// allocation model for a token deployment.
//
// All token quantities are 18-decimal fixed point (1 token = 10^18 wei).
// Allocation shares are exact fractions in parts per million.

pub mod governance;
pub mod offering;
pub mod plan;
pub mod token;
pub mod validation;
pub mod vesting;

// Re-export key types for ergonomic access from downstream crates.
pub use governance::{build_governance_config, AllocationEntry, GovernanceConfig};
pub use offering::{build_dai, build_ico, build_ico_atm, build_swap, OfferingDetail, TokenInfo};
pub use plan::{required_keys, TokenPlan};
pub use token::{
    build_token_detail, per_second_rate_in_ray, TokenDetail, MAX_MANUAL_MINTABLE, RAY,
    STAKING_DURATION_SECS, STAKING_YEARLY_RATE_IN_RAY,
};
pub use validation::{log_warnings, validate_governance, AllocationWarning};
pub use vesting::{installment_schedule, AllocationAmount, AllocationSummary, InstallmentSchedule};
