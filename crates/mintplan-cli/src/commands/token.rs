// crates/mintplan-cli/src/commands/token.rs
//
// `mintplan token`: show the token contract parameters.

use tabled::Tabled;

use crate::output::{emit, OutputFormat};
use mintplan_core::EnvMap;
use mintplan_economics::{build_token_detail, TokenDetail};

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Raw")]
    raw: String,
}

fn rows(detail: &TokenDetail) -> Vec<FieldRow> {
    vec![
        FieldRow {
            field: "name",
            value: detail.name.clone(),
            raw: detail.name.clone(),
        },
        FieldRow {
            field: "symbol",
            value: detail.symbol.clone(),
            raw: detail.symbol.clone(),
        },
        FieldRow {
            field: "maxCap",
            value: format!("{} tokens", detail.max_cap),
            raw: detail.max_cap.to_wei_string(),
        },
        FieldRow {
            field: "stakingRate",
            value: detail.staking_rate.to_string(),
            raw: detail.staking_rate.to_wei_string(),
        },
        FieldRow {
            field: "stakingDuration",
            value: format!("{} days", detail.staking_duration / 86_400),
            raw: detail.staking_duration.to_string(),
        },
        FieldRow {
            field: "maxManualMintable",
            value: format!("{} tokens", detail.max_manual_mintable),
            raw: detail.max_manual_mintable.to_wei_string(),
        },
        FieldRow {
            field: "calculatedStakingYearlyRateInRay",
            value: "per-second factor (ray)".to_string(),
            raw: detail.calculated_staking_yearly_rate_in_ray.clone(),
        },
    ]
}

/// Run the token command.
pub fn run(env: &EnvMap, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let detail = build_token_detail(env)?;
    emit(format, &detail, || rows(&detail))
}
