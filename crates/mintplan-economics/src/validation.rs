// crates/mintplan-economics/src/validation.rs
//
// Startup checks over the allocation graph.
//
// None of these checks fail the build or change the configuration. They
// produce warnings that the caller logs (and may treat as fatal in a strict
// mode):
//   - shares that do not add up to exactly 1.0,
//   - addresses that are not `0x` followed by 40 hex digits,
//   - the same address used by more than one entry.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::governance::GovernanceConfig;
use mintplan_core::Share;

/// A suspicious property of the allocation graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AllocationWarning {
    /// The explicit shares do not sum to 1.0.
    PercentageSum { total: Share },
    /// An address is not a 20-byte hex account identifier.
    MalformedAddress { label: String, address: String },
    /// Several entries pay out to the same account.
    DuplicateAddress { address: String, labels: Vec<String> },
}

impl fmt::Display for AllocationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationWarning::PercentageSum { total } => write!(
                f,
                "allocation shares sum to {} instead of 1 ({} unaccounted)",
                total,
                Share::from_ppm(Share::ONE.ppm.saturating_sub(total.ppm))
            ),
            AllocationWarning::MalformedAddress { label, address } => {
                write!(f, "'{}' has a malformed address: {:?}", label, address)
            }
            AllocationWarning::DuplicateAddress { address, labels } => write!(
                f,
                "address {} is shared by: {}",
                address,
                labels.join(", ")
            ),
        }
    }
}

/// Whether `address` looks like an Ethereum account: `0x` + 40 hex digits.
/// Checksum casing is not verified.
pub fn is_account_address(address: &str) -> bool {
    match address.strip_prefix("0x").or_else(|| address.strip_prefix("0X")) {
        Some(hex) => hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Check the allocation graph and return every warning found, in a stable
/// order: share sum first, then per-entry address problems, then duplicates.
pub fn validate_governance(config: &GovernanceConfig) -> Vec<AllocationWarning> {
    let mut warnings = Vec::new();

    let total = config.total_share();
    if !total.is_whole() {
        warnings.push(AllocationWarning::PercentageSum { total });
    }

    let mut by_address: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for entry in config.entries() {
        if !is_account_address(&entry.address) {
            warnings.push(AllocationWarning::MalformedAddress {
                label: entry.label.clone(),
                address: entry.address.clone(),
            });
        }
        by_address
            .entry(entry.address.to_ascii_lowercase())
            .or_default()
            .push(entry.label.clone());
    }

    for (address, labels) in by_address {
        if labels.len() > 1 {
            warnings.push(AllocationWarning::DuplicateAddress { address, labels });
        }
    }

    warnings
}

/// Emit each warning through `tracing` at warn level.
pub fn log_warnings(warnings: &[AllocationWarning]) {
    for warning in warnings {
        tracing::warn!("Governance allocation: {}", warning);
    }
}
