// crates/mintplan-cli/src/commands/offerings.rs
//
// `mintplan offerings`: show the sale contracts and auxiliary tokens.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{emit, OutputFormat};
use mintplan_core::EnvMap;
use mintplan_economics::{build_dai, build_ico, build_ico_atm, build_swap, OfferingDetail, TokenInfo};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Offerings {
    ico: OfferingDetail,
    ico_atm: OfferingDetail,
    swap: TokenInfo,
    dai: TokenInfo,
}

#[derive(Tabled)]
struct OfferingRow {
    #[tabled(rename = "Contract")]
    contract: &'static str,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Term")]
    term: String,
}

impl OfferingRow {
    fn sale(contract: &'static str, o: &OfferingDetail) -> Self {
        Self {
            contract,
            name: o.name.clone(),
            symbol: o.symbol.clone(),
            price: o.price.clone(),
            term: o.term.clone(),
        }
    }

    fn token(contract: &'static str, t: &TokenInfo) -> Self {
        Self {
            contract,
            name: t.name.clone(),
            symbol: t.symbol.clone(),
            price: "-".to_string(),
            term: "-".to_string(),
        }
    }
}

/// Run the offerings command.
pub fn run(env: &EnvMap, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let offerings = Offerings {
        ico: build_ico(env)?,
        ico_atm: build_ico_atm(env)?,
        swap: build_swap(env)?,
        dai: build_dai(env)?,
    };
    emit(format, &offerings, || {
        vec![
            OfferingRow::sale("ICO", &offerings.ico),
            OfferingRow::sale("ICO ATM", &offerings.ico_atm),
            OfferingRow::token("Swap", &offerings.swap),
            OfferingRow::token("DAI", &offerings.dai),
        ]
    })
}
