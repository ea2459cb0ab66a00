// crates/mintplan-cli/src/commands/governance.rs
//
// `mintplan governance [--amounts]`: show the allocation graph, or the token
// amounts it implies against the configured cap.

use clap::Args;
use tabled::Tabled;

use crate::output::{cell, emit, OutputFormat};
use mintplan_core::EnvMap;
use mintplan_economics::validation::log_warnings;
use mintplan_economics::{
    build_governance_config, build_token_detail, validate_governance, AllocationSummary,
    GovernanceConfig,
};

/// Governance command arguments.
#[derive(Debug, Args)]
pub struct GovernanceCmd {
    /// Show token amounts per entry and per installment.
    #[arg(long)]
    pub amounts: bool,
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Group")]
    group: &'static str,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Installments")]
    installments: String,
    #[tabled(rename = "Address")]
    address: String,
}

#[derive(Tabled)]
struct AmountRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Installments")]
    installments: u32,
    #[tabled(rename = "Per installment")]
    per_installment: String,
    #[tabled(rename = "Final installment")]
    final_installment: String,
}

fn entry_rows(config: &GovernanceConfig) -> Vec<EntryRow> {
    let groups = [
        ("founders", &config.founders),
        ("developers", &config.developers),
        ("companyAreas", &config.company_areas),
    ];
    let singles = [
        ("pool", &config.pool),
        ("preSale", &config.pre_sale),
        ("airDrop", &config.air_drop),
    ];

    groups
        .iter()
        .flat_map(|(group, entries)| entries.iter().map(move |e| (*group, e)))
        .chain(singles.iter().map(|(group, e)| (*group, *e)))
        .map(|(group, e)| EntryRow {
            group,
            label: e.label.clone(),
            share: cell(e.percentage),
            installments: cell(e.installments),
            address: e.address.clone(),
        })
        .collect()
}

fn amount_rows(summary: &AllocationSummary) -> Vec<AmountRow> {
    summary
        .allocations
        .iter()
        .map(|a| AmountRow {
            label: a.label.clone(),
            share: a.share.to_string(),
            total: a.total.to_string(),
            installments: a.installments,
            per_installment: a.per_installment.to_string(),
            final_installment: a.final_installment.to_string(),
        })
        .collect()
}

/// Run the governance command.
pub fn run(
    cmd: &GovernanceCmd,
    env: &EnvMap,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_governance_config(env)?;
    log_warnings(&validate_governance(&config));

    if !cmd.amounts {
        return emit(format, &config, || entry_rows(&config));
    }

    let detail = build_token_detail(env)?;
    let summary = config.allocation_amounts(detail.max_cap)?;
    emit(format, &summary, || amount_rows(&summary))?;
    if format == OutputFormat::Table {
        println!(
            "Allocated: {} of {} tokens ({} unallocated)",
            summary.allocated, summary.max_cap, summary.unallocated
        );
    }
    Ok(())
}
