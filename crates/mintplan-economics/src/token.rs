// crates/mintplan-economics/src/token.rs
//
// Token detail: the parameters the token contract is constructed with.
//
// Name, symbol, cap and staking rate come from the configuration source; the
// manual-mint ceiling, staking duration and per-second staking factor are
// protocol constants.
//
// All quantities are 18-decimal fixed point (1 token = 10^18 wei).

use serde::{Deserialize, Serialize};

use mintplan_core::{ConfigSource, MintPlanError, Share, TokenAmount};

/// One year in seconds (365 days), as used by the staking schedule.
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 60 * 60;

/// Length of the staking program in years.
pub const STAKING_DURATION_YEARS: u64 = 10;

/// Length of the staking program in seconds (10 years of 365 days).
pub const STAKING_DURATION_SECS: u64 = STAKING_DURATION_YEARS * SECONDS_PER_YEAR;

/// Upper bound on tokens the owner may mint outside of staking: 400,000,000 tokens.
pub const MAX_MANUAL_MINTABLE: TokenAmount = TokenAmount::from_tokens(400_000_000);

/// 1.0 in ray precision (27 decimals).
pub const RAY: u128 = 1_000_000_000_000_000_000_000_000_000;

/// Yearly staking rate the contract is configured for (15%).
pub const STAKING_YEARLY_RATE: Share = Share::from_ppm(150_000);

/// Per-second staking growth factor in ray for `STAKING_YEARLY_RATE`.
/// Equal to `per_second_rate_in_ray(STAKING_YEARLY_RATE)`.
pub const STAKING_YEARLY_RATE_IN_RAY: &str = "1000000004756468797564687976";

/// Environment keys read by `build_token_detail`.
pub const TOKEN_KEYS: [&str; 4] = [
    "TOKEN_NAME",
    "TOKEN_SYMBOL",
    "TOKEN_MAX_CAP",
    "TOKEN_STAKING_RATE",
];

/// Convert a yearly rate into the per-second linear growth factor in ray:
///
///   factor = RAY + round_half_up(yearly * RAY / SECONDS_PER_YEAR)
pub fn per_second_rate_in_ray(yearly: Share) -> u128 {
    // RAY / 10^6 converts parts-per-million to ray units.
    let numerator = u128::from(yearly.ppm) * (RAY / 1_000_000);
    let seconds = u128::from(SECONDS_PER_YEAR);
    RAY + (numerator + seconds / 2) / seconds
}

/// Constructor parameters of the token contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDetail {
    pub name: String,
    pub symbol: String,
    /// Hard cap on total supply, in wei.
    pub max_cap: TokenAmount,
    /// Staking rate, in wei.
    pub staking_rate: TokenAmount,
    /// Staking program duration in seconds.
    pub staking_duration: u64,
    /// Ceiling on manual mints, in wei.
    pub max_manual_mintable: TokenAmount,
    /// Per-second staking factor in ray, as a decimal string.
    pub calculated_staking_yearly_rate_in_ray: String,
}

/// Build the token detail from `TOKEN_NAME`, `TOKEN_SYMBOL`, `TOKEN_MAX_CAP`
/// and `TOKEN_STAKING_RATE`.
///
/// # Errors
/// Returns `MintPlanError::MissingConfiguration` if any key is unset, empty,
/// or (for the two amounts) not a non-negative decimal number.
pub fn build_token_detail<S: ConfigSource + ?Sized>(src: &S) -> Result<TokenDetail, MintPlanError> {
    let detail = TokenDetail {
        name: src.require_string("TOKEN_NAME")?,
        symbol: src.require_string("TOKEN_SYMBOL")?,
        max_cap: src.require_amount("TOKEN_MAX_CAP")?,
        staking_rate: src.require_amount("TOKEN_STAKING_RATE")?,
        staking_duration: STAKING_DURATION_SECS,
        max_manual_mintable: MAX_MANUAL_MINTABLE,
        calculated_staking_yearly_rate_in_ray: STAKING_YEARLY_RATE_IN_RAY.to_string(),
    };

    if detail.max_manual_mintable > detail.max_cap {
        tracing::warn!(
            max_cap = %detail.max_cap,
            max_manual_mintable = %detail.max_manual_mintable,
            "Manual-mint ceiling exceeds the token cap"
        );
    }

    Ok(detail)
}
