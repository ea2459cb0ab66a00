// crates/mintplan-economics/src/governance.rs
//
// Governance allocation model: how the token supply is divided among
// stakeholder categories at deployment.
//
//   - Founders:        5 entries, 10% each, FOUNDERS_INSTALLMENTS payouts
//   - Developers:      none at present
//   - Company areas:   development 4%, marketing 5%, charity 0.1%,
//                      AREAS_INSTALLMENTS payouts
//   - Liquidity pool:  10%, single installment
//   - Pre-sale:        address only; share and schedule are set elsewhere
//   - Airdrop/listing: 0.9%, single installment
//
// Shares are fixed here; addresses and installment counts come from the
// configuration source. Addresses are passed through exactly as given.

use serde::{Deserialize, Serialize};

use mintplan_core::{ConfigSource, MintPlanError, Share};

/// Share of each founder: 10%.
pub const FOUNDER_SHARE: Share = Share::from_ppm(100_000);

/// Share of the development area: 4%.
pub const DEVELOPMENT_AREA_SHARE: Share = Share::from_ppm(40_000);

/// Share of the marketing area: 5%.
pub const MARKETING_AREA_SHARE: Share = Share::from_ppm(50_000);

/// Share of the charity area: 0.1%.
pub const CHARITY_SHARE: Share = Share::from_ppm(1_000);

/// Share of the liquidity pool: 10%.
pub const POOL_SHARE: Share = Share::from_ppm(100_000);

/// Share of airdrops and listing agreements: 0.9%.
pub const AIRDROP_SHARE: Share = Share::from_ppm(9_000);

/// Founder payout addresses, in order.
pub const FOUNDER_ADDRESS_KEYS: [&str; 5] =
    ["PERSON_0", "PERSON_1", "PERSON_2", "PERSON_3", "PERSON_4"];

/// Environment keys read by `build_governance_config`.
pub const GOVERNANCE_KEYS: [&str; 13] = [
    "FOUNDERS_INSTALLMENTS",
    "PERSON_0",
    "PERSON_1",
    "PERSON_2",
    "PERSON_3",
    "PERSON_4",
    "AREAS_INSTALLMENTS",
    "DEV",
    "MKT",
    "CHARITY",
    "POOL",
    "PRE_SALE",
    "AIR_DROP",
];

pub const FOUNDER_LABEL: &str = "Founder";
pub const DEVELOPMENT_AREA_LABEL: &str = "Development Area";
pub const MARKETING_AREA_LABEL: &str = "Marketing Area";
pub const CHARITY_LABEL: &str = "Charity";
pub const POOL_LABEL: &str = "Liquidity Pool";
pub const PRE_SALE_LABEL: &str = "PreSale";
pub const AIRDROP_LABEL: &str = "Airdrop & Listing agreements";

/// A named share of the supply with a payout address and vesting schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub label: String,
    /// Number of vesting payouts. `None` only for the pre-sale entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<u32>,
    /// Fraction of the total supply. `None` only for the pre-sale entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Share>,
    /// Payout account, verbatim from the configuration source.
    pub address: String,
}

impl AllocationEntry {
    /// An entry with a fixed share and installment count.
    pub fn new(
        label: impl Into<String>,
        percentage: Share,
        installments: u32,
        address: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            installments: Some(installments),
            percentage: Some(percentage),
            address: address.into(),
        }
    }

    /// An entry that only names a payout address.
    pub fn address_only(label: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            installments: None,
            percentage: None,
            address: address.into(),
        }
    }
}

/// The full allocation graph handed to the governance contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceConfig {
    pub founders: Vec<AllocationEntry>,
    pub developers: Vec<AllocationEntry>,
    pub company_areas: Vec<AllocationEntry>,
    pub pool: AllocationEntry,
    pub pre_sale: AllocationEntry,
    pub air_drop: AllocationEntry,
}

impl GovernanceConfig {
    /// Every entry in declaration order: founders, developers, company areas,
    /// pool, pre-sale, airdrop.
    pub fn entries(&self) -> impl Iterator<Item = &AllocationEntry> {
        self.founders
            .iter()
            .chain(self.developers.iter())
            .chain(self.company_areas.iter())
            .chain([&self.pool, &self.pre_sale, &self.air_drop])
    }

    /// Sum of every explicit share. Entries without a share contribute nothing.
    pub fn total_share(&self) -> Share {
        self.entries().filter_map(|e| e.percentage).sum()
    }
}

/// Build the allocation graph.
///
/// # Errors
/// Returns `MintPlanError::MissingConfiguration` if an address is unset or
/// empty, or if an installment count is not a positive integer.
pub fn build_governance_config<S: ConfigSource + ?Sized>(
    src: &S,
) -> Result<GovernanceConfig, MintPlanError> {
    let founder_installments: u32 = src.require_positive("FOUNDERS_INSTALLMENTS")?;
    let area_installments: u32 = src.require_positive("AREAS_INSTALLMENTS")?;

    let founders = FOUNDER_ADDRESS_KEYS
        .iter()
        .map(|key| -> Result<AllocationEntry, MintPlanError> {
            Ok(AllocationEntry::new(
                FOUNDER_LABEL,
                FOUNDER_SHARE,
                founder_installments,
                src.require_string(key)?,
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let company_areas = vec![
        AllocationEntry::new(
            DEVELOPMENT_AREA_LABEL,
            DEVELOPMENT_AREA_SHARE,
            area_installments,
            src.require_string("DEV")?,
        ),
        AllocationEntry::new(
            MARKETING_AREA_LABEL,
            MARKETING_AREA_SHARE,
            area_installments,
            src.require_string("MKT")?,
        ),
        AllocationEntry::new(
            CHARITY_LABEL,
            CHARITY_SHARE,
            area_installments,
            src.require_string("CHARITY")?,
        ),
    ];

    let config = GovernanceConfig {
        founders,
        developers: Vec::new(),
        company_areas,
        pool: AllocationEntry::new(POOL_LABEL, POOL_SHARE, 1, src.require_string("POOL")?),
        pre_sale: AllocationEntry::address_only(PRE_SALE_LABEL, src.require_string("PRE_SALE")?),
        air_drop: AllocationEntry::new(
            AIRDROP_LABEL,
            AIRDROP_SHARE,
            1,
            src.require_string("AIR_DROP")?,
        ),
    };

    tracing::debug!(
        entries = config.entries().count(),
        total_share = %config.total_share(),
        "Built governance allocation"
    );

    Ok(config)
}
