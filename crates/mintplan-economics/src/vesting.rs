// crates/mintplan-economics/src/vesting.rs
//
// Token amounts implied by the allocation graph.
//
// Each entry with a share receives `max_cap * share` (rounded down to the
// wei). That total is paid out in `installments` equal parts; any remainder
// from the division is added to the final installment so that the schedule
// sums exactly to the total.
//
// Whatever the explicit shares do not cover is reported as unallocated. It is
// not assigned to the pre-sale entry.

use serde::Serialize;

use crate::governance::{AllocationEntry, GovernanceConfig};
use mintplan_core::{MintPlanError, Share, TokenAmount};

/// Payouts for one allocation: `installments` equal parts of the total, the
/// last one carrying the division remainder.
///
/// The schedule is produced lazily; installment counts come straight from
/// configuration and may be as large as `u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallmentSchedule {
    per_installment: TokenAmount,
    final_installment: TokenAmount,
    installments: u32,
    emitted: u32,
}

impl InstallmentSchedule {
    /// Split `total` into `installments` payouts. Zero installments yield an
    /// empty schedule.
    pub fn new(total: TokenAmount, installments: u32) -> Self {
        if installments == 0 {
            return Self {
                per_installment: TokenAmount::zero(),
                final_installment: TokenAmount::zero(),
                installments: 0,
                emitted: 0,
            };
        }
        let n = u128::from(installments);
        let per = total.wei / n;
        // per + remainder <= total, so this cannot overflow.
        let last = per + total.wei % n;
        Self {
            per_installment: TokenAmount::from_wei(per),
            final_installment: TokenAmount::from_wei(last),
            installments,
            emitted: 0,
        }
    }

    pub fn installments(&self) -> u32 {
        self.installments
    }

    /// Size of every payout except the last. Zero for an empty schedule.
    pub fn per_installment(&self) -> TokenAmount {
        self.per_installment
    }

    /// Size of the last payout. Zero for an empty schedule.
    pub fn final_installment(&self) -> TokenAmount {
        self.final_installment
    }
}

impl Iterator for InstallmentSchedule {
    type Item = TokenAmount;

    fn next(&mut self) -> Option<TokenAmount> {
        if self.emitted >= self.installments {
            return None;
        }
        self.emitted += 1;
        if self.emitted == self.installments {
            Some(self.final_installment)
        } else {
            Some(self.per_installment)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.installments - self.emitted) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for InstallmentSchedule {}

/// Split `total` into `installments` payouts, the last one carrying the
/// division remainder.
pub fn installment_schedule(total: TokenAmount, installments: u32) -> InstallmentSchedule {
    InstallmentSchedule::new(total, installments)
}

/// Amounts for a single allocation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationAmount {
    pub label: String,
    pub address: String,
    pub share: Share,
    pub installments: u32,
    pub total: TokenAmount,
    pub per_installment: TokenAmount,
    pub final_installment: TokenAmount,
}

/// Amounts for the whole allocation graph against a given cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSummary {
    pub max_cap: TokenAmount,
    pub allocations: Vec<AllocationAmount>,
    pub allocated: TokenAmount,
    pub unallocated: TokenAmount,
}

impl AllocationEntry {
    /// Payout schedule for this entry's share of `max_cap`. Empty if the
    /// entry has no share or no installments.
    pub fn installment_schedule(
        &self,
        max_cap: TokenAmount,
    ) -> Result<InstallmentSchedule, MintPlanError> {
        match (self.percentage, self.installments) {
            (Some(share), Some(installments)) => {
                let total = share_of(share, max_cap, &self.label)?;
                Ok(InstallmentSchedule::new(total, installments))
            }
            _ => Ok(InstallmentSchedule::new(TokenAmount::zero(), 0)),
        }
    }
}

impl GovernanceConfig {
    /// Compute per-entry totals and installment sizes against `max_cap`.
    ///
    /// # Errors
    /// Returns `MintPlanError::Amount` if the shares add up to more than the
    /// cap or an intermediate product overflows.
    pub fn allocation_amounts(
        &self,
        max_cap: TokenAmount,
    ) -> Result<AllocationSummary, MintPlanError> {
        let mut allocations = Vec::new();
        let mut allocated = TokenAmount::zero();

        for entry in self.entries() {
            let (share, installments) = match (entry.percentage, entry.installments) {
                (Some(share), Some(installments)) => (share, installments),
                _ => continue,
            };
            let total = share_of(share, max_cap, &entry.label)?;
            let schedule = InstallmentSchedule::new(total, installments);
            allocated = allocated.checked_add(total).ok_or_else(|| {
                MintPlanError::Amount("allocated total overflows".to_string())
            })?;
            allocations.push(AllocationAmount {
                label: entry.label.clone(),
                address: entry.address.clone(),
                share,
                installments,
                total,
                per_installment: schedule.per_installment(),
                final_installment: schedule.final_installment(),
            });
        }

        let unallocated = max_cap.checked_sub(allocated).ok_or_else(|| {
            MintPlanError::Amount(format!(
                "allocations ({}) exceed the token cap ({})",
                allocated, max_cap
            ))
        })?;

        Ok(AllocationSummary {
            max_cap,
            allocations,
            allocated,
            unallocated,
        })
    }
}

fn share_of(share: Share, max_cap: TokenAmount, label: &str) -> Result<TokenAmount, MintPlanError> {
    share
        .apply(max_cap)
        .ok_or_else(|| MintPlanError::Amount(format!("share of '{}' overflows", label)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::governance::build_governance_config;
    use crate::governance::tests::governance_env;

    #[test]
    fn test_schedule_even_split() {
        let schedule = installment_schedule(TokenAmount::from_tokens(12), 12);
        assert_eq!(schedule.len(), 12);
        assert!(schedule.into_iter().all(|a| a == TokenAmount::from_tokens(1)));
    }

    #[test]
    fn test_schedule_remainder_on_last() {
        let schedule: Vec<TokenAmount> =
            installment_schedule(TokenAmount::from_wei(10), 3).collect();
        assert_eq!(
            schedule,
            vec![
                TokenAmount::from_wei(3),
                TokenAmount::from_wei(3),
                TokenAmount::from_wei(4)
            ]
        );
    }

    #[test]
    fn test_schedule_zero_installments() {
        let mut schedule = installment_schedule(TokenAmount::from_tokens(5), 0);
        assert_eq!(schedule.len(), 0);
        assert_eq!(schedule.per_installment(), TokenAmount::zero());
        assert!(schedule.next().is_none());
    }

    #[test]
    fn test_allocation_amounts() {
        let config = build_governance_config(&governance_env()).unwrap();
        let cap = TokenAmount::from_tokens(1_000_000);
        let summary = config.allocation_amounts(cap).unwrap();

        // Pre-sale has no share and is skipped.
        assert_eq!(summary.allocations.len(), 10);
        assert_eq!(summary.allocated, TokenAmount::from_tokens(900_000));
        assert_eq!(summary.unallocated, TokenAmount::from_tokens(100_000));

        let founder = &summary.allocations[0];
        assert_eq!(founder.total, TokenAmount::from_tokens(100_000));
        assert_eq!(founder.installments, 12);

        let charity = summary
            .allocations
            .iter()
            .find(|a| a.label == "Charity")
            .unwrap();
        assert_eq!(charity.total, TokenAmount::from_tokens(1_000));
    }

    #[test]
    fn test_schedule_sums_to_total() {
        let config = build_governance_config(&governance_env()).unwrap();
        let cap = TokenAmount::from_decimal_str("1234567.891").unwrap();
        let founder = &config.founders[0];
        let schedule = founder.installment_schedule(cap).unwrap();
        let total: u128 = schedule.map(|a| a.wei).sum();
        assert_eq!(total, Share::from_ppm(100_000).apply(cap).unwrap().wei);
    }

    #[test]
    fn test_pre_sale_has_no_schedule() {
        let config = build_governance_config(&governance_env()).unwrap();
        let schedule = config
            .pre_sale
            .installment_schedule(TokenAmount::from_tokens(1))
            .unwrap();
        assert_eq!(schedule.len(), 0);
    }

    #[test]
    fn test_over_allocation_is_an_error() {
        let mut config = build_governance_config(&governance_env()).unwrap();
        config.developers.push(AllocationEntry::new(
            "Developer",
            Share::from_ppm(200_000),
            1,
            "0xdddddddddddddddddddddddddddddddddddddddd",
        ));
        let err = config
            .allocation_amounts(TokenAmount::from_tokens(100))
            .unwrap_err();
        assert!(matches!(err, MintPlanError::Amount(_)));
    }

    #[test]
    fn test_max_installment_count() {
        let mut env = governance_env();
        env.set("FOUNDERS_INSTALLMENTS", u32::MAX.to_string());
        let config = build_governance_config(&env).unwrap();
        let summary = config
            .allocation_amounts(TokenAmount::from_tokens(1_000_000))
            .unwrap();

        let founder = &summary.allocations[0];
        let total = TokenAmount::from_tokens(100_000).wei;
        let n = u128::from(u32::MAX);
        assert_eq!(founder.installments, u32::MAX);
        assert_eq!(founder.per_installment.wei, total / n);
        assert_eq!(founder.final_installment.wei, total / n + total % n);

        let schedule = config.founders[0]
            .installment_schedule(TokenAmount::from_tokens(1_000_000))
            .unwrap();
        assert_eq!(schedule.len(), u32::MAX as usize);
    }

    #[test]
    fn test_schedule_iterates_to_final() {
        let mut schedule = installment_schedule(TokenAmount::from_wei(7), 2);
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.next(), Some(TokenAmount::from_wei(3)));
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.next(), Some(TokenAmount::from_wei(4)));
        assert_eq!(schedule.next(), None);
    }
}
