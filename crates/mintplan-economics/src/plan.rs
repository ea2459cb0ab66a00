// crates/mintplan-economics/src/plan.rs
//
// The complete set of contract parameters, built once at startup.

use serde::Serialize;

use crate::governance::{build_governance_config, GovernanceConfig, GOVERNANCE_KEYS};
use crate::offering::{
    build_dai, build_ico, build_ico_atm, build_swap, OfferingDetail, TokenInfo, OFFERING_KEYS,
};
use crate::token::{build_token_detail, TokenDetail, TOKEN_KEYS};
use crate::validation::{log_warnings, validate_governance, AllocationWarning};
use crate::vesting::AllocationSummary;
use mintplan_core::{ConfigSource, MintPlanError};

/// Every key read by `TokenPlan::from_source`, in the order they are checked.
pub fn required_keys() -> Vec<&'static str> {
    TOKEN_KEYS
        .iter()
        .chain(OFFERING_KEYS.iter())
        .chain(GOVERNANCE_KEYS.iter())
        .copied()
        .collect()
}

/// Token, sale and allocation parameters for one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPlan {
    pub token: TokenDetail,
    pub ico: OfferingDetail,
    pub ico_atm: OfferingDetail,
    pub swap: TokenInfo,
    pub dai: TokenInfo,
    pub governance: GovernanceConfig,
}

impl TokenPlan {
    /// Build every section from `src`. Fails on the first missing or
    /// malformed key.
    pub fn from_source<S: ConfigSource + ?Sized>(src: &S) -> Result<Self, MintPlanError> {
        let plan = Self {
            token: build_token_detail(src)?,
            ico: build_ico(src)?,
            ico_atm: build_ico_atm(src)?,
            swap: build_swap(src)?,
            dai: build_dai(src)?,
            governance: build_governance_config(src)?,
        };
        tracing::info!(
            token = %plan.token.symbol,
            max_cap = %plan.token.max_cap,
            "Token plan built"
        );
        Ok(plan)
    }

    /// Validation warnings for the allocation graph. Each one is also logged.
    pub fn warnings(&self) -> Vec<AllocationWarning> {
        let warnings = validate_governance(&self.governance);
        log_warnings(&warnings);
        warnings
    }

    /// Vesting amounts against the configured token cap.
    pub fn allocation_amounts(&self) -> Result<AllocationSummary, MintPlanError> {
        self.governance.allocation_amounts(self.token.max_cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::governance::tests::governance_env;
    use mintplan_core::{EnvMap, TokenAmount};

    fn plan_env() -> EnvMap {
        governance_env().merge(EnvMap::from_pairs([
            ("TOKEN_NAME", "Mint Token"),
            ("TOKEN_SYMBOL", "MNT"),
            ("TOKEN_MAX_CAP", "1000000000"),
            ("TOKEN_STAKING_RATE", "15"),
            ("TOKEN_TERM", "7776000"),
            ("ICO_NAME", "Mint ICO"),
            ("ICO_SYMBOL", "MICO"),
            ("ICO_PRICE", "0.05"),
            ("ICO_ATM_NAME", "Mint ATM"),
            ("ICO_ATM_SYMBOL", "MATM"),
            ("ICO_ATM_PRICE", "0.07"),
            ("SWAP_NAME", "Mint Swap"),
            ("SWAP_SYMBOL", "MSWP"),
            ("DAI_NAME", "Dai Stablecoin"),
            ("DAI_SYMBOL", "DAI"),
        ]))
    }

    #[test]
    fn test_required_keys_complete() {
        let keys = required_keys();
        assert_eq!(keys.len(), 28);
        assert!(keys.contains(&"TOKEN_MAX_CAP"));
        assert!(keys.contains(&"AIR_DROP"));
        assert!(keys.contains(&"DAI_SYMBOL"));
    }

    #[test]
    fn test_from_source() {
        let plan = TokenPlan::from_source(&plan_env()).unwrap();
        assert_eq!(plan.token.max_cap, TokenAmount::from_tokens(1_000_000_000));
        assert_eq!(plan.ico.term, "7776000");
        assert_eq!(plan.governance.founders.len(), 5);
    }

    #[test]
    fn test_any_missing_key_fails() {
        for key in required_keys() {
            let mut env = plan_env();
            env.remove(key);
            let err = TokenPlan::from_source(&env).unwrap_err();
            assert_eq!(err.missing_key(), Some(key), "removing {}", key);
        }
    }

    #[test]
    fn test_warnings() {
        let plan = TokenPlan::from_source(&plan_env()).unwrap();
        assert_eq!(plan.warnings().len(), 1);
    }

    #[test]
    fn test_allocation_amounts_use_cap() {
        let plan = TokenPlan::from_source(&plan_env()).unwrap();
        let summary = plan.allocation_amounts().unwrap();
        assert_eq!(summary.max_cap, plan.token.max_cap);
        assert_eq!(summary.unallocated, TokenAmount::from_tokens(100_000_000));
    }

    #[test]
    fn test_json_sections() {
        let plan = TokenPlan::from_source(&plan_env()).unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        for section in ["token", "ico", "icoAtm", "swap", "dai", "governance"] {
            assert!(json.get(section).is_some(), "missing {}", section);
        }
    }
}
