// crates/mintplan-economics/src/offering.rs
//
// Auxiliary token descriptors deployed next to the main token: the ICO and
// ICO ATM sale contracts, the swap token and the DAI stand-in used on test
// networks. Prices and terms are passed to the deployment tool verbatim.

use serde::{Deserialize, Serialize};

use mintplan_core::{ConfigSource, MintPlanError};

/// Environment keys read by the offering builders.
pub const OFFERING_KEYS: [&str; 11] = [
    "ICO_NAME",
    "ICO_SYMBOL",
    "ICO_PRICE",
    "ICO_ATM_NAME",
    "ICO_ATM_SYMBOL",
    "ICO_ATM_PRICE",
    "TOKEN_TERM",
    "SWAP_NAME",
    "SWAP_SYMBOL",
    "DAI_NAME",
    "DAI_SYMBOL",
];

/// A token sale contract: name, symbol, unit price and sale term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferingDetail {
    pub name: String,
    pub symbol: String,
    pub price: String,
    pub term: String,
}

/// A plain ERC-20 descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
}

fn build_offering<S: ConfigSource + ?Sized>(
    src: &S,
    prefix: &str,
) -> Result<OfferingDetail, MintPlanError> {
    Ok(OfferingDetail {
        name: src.require_string(&format!("{}_NAME", prefix))?,
        symbol: src.require_string(&format!("{}_SYMBOL", prefix))?,
        price: src.require_string(&format!("{}_PRICE", prefix))?,
        term: src.require_string("TOKEN_TERM")?,
    })
}

fn build_token_info<S: ConfigSource + ?Sized>(
    src: &S,
    prefix: &str,
) -> Result<TokenInfo, MintPlanError> {
    Ok(TokenInfo {
        name: src.require_string(&format!("{}_NAME", prefix))?,
        symbol: src.require_string(&format!("{}_SYMBOL", prefix))?,
    })
}

/// ICO sale: `ICO_NAME`, `ICO_SYMBOL`, `ICO_PRICE`, `TOKEN_TERM`.
pub fn build_ico<S: ConfigSource + ?Sized>(src: &S) -> Result<OfferingDetail, MintPlanError> {
    build_offering(src, "ICO")
}

/// ICO ATM sale: `ICO_ATM_NAME`, `ICO_ATM_SYMBOL`, `ICO_ATM_PRICE`, `TOKEN_TERM`.
pub fn build_ico_atm<S: ConfigSource + ?Sized>(src: &S) -> Result<OfferingDetail, MintPlanError> {
    build_offering(src, "ICO_ATM")
}

/// Swap token: `SWAP_NAME`, `SWAP_SYMBOL`.
pub fn build_swap<S: ConfigSource + ?Sized>(src: &S) -> Result<TokenInfo, MintPlanError> {
    build_token_info(src, "SWAP")
}

/// DAI stand-in: `DAI_NAME`, `DAI_SYMBOL`.
pub fn build_dai<S: ConfigSource + ?Sized>(src: &S) -> Result<TokenInfo, MintPlanError> {
    build_token_info(src, "DAI")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mintplan_core::EnvMap;

    fn offering_env() -> EnvMap {
        EnvMap::from_pairs([
            ("ICO_NAME", "Mint ICO"),
            ("ICO_SYMBOL", "MICO"),
            ("ICO_PRICE", "0.05"),
            ("ICO_ATM_NAME", "Mint ATM"),
            ("ICO_ATM_SYMBOL", "MATM"),
            ("ICO_ATM_PRICE", "0.07"),
            ("TOKEN_TERM", "7776000"),
            ("SWAP_NAME", "Mint Swap"),
            ("SWAP_SYMBOL", "MSWP"),
            ("DAI_NAME", "Dai Stablecoin"),
            ("DAI_SYMBOL", "DAI"),
        ])
    }

    #[test]
    fn test_build_ico() {
        let ico = build_ico(&offering_env()).unwrap();
        assert_eq!(ico.name, "Mint ICO");
        assert_eq!(ico.symbol, "MICO");
        assert_eq!(ico.price, "0.05");
        assert_eq!(ico.term, "7776000");
    }

    #[test]
    fn test_ico_atm_shares_term() {
        let env = offering_env();
        let ico = build_ico(&env).unwrap();
        let atm = build_ico_atm(&env).unwrap();
        assert_eq!(atm.price, "0.07");
        assert_eq!(atm.term, ico.term);
    }

    #[test]
    fn test_swap_and_dai() {
        let env = offering_env();
        assert_eq!(build_swap(&env).unwrap().symbol, "MSWP");
        assert_eq!(build_dai(&env).unwrap().name, "Dai Stablecoin");
    }

    #[test]
    fn test_missing_term_fails_both_sales() {
        let mut env = offering_env();
        env.remove("TOKEN_TERM");
        assert_eq!(build_ico(&env).unwrap_err().missing_key(), Some("TOKEN_TERM"));
        assert_eq!(build_ico_atm(&env).unwrap_err().missing_key(), Some("TOKEN_TERM"));
    }

    #[test]
    fn test_price_passed_through() {
        let mut env = offering_env();
        env.set("ICO_PRICE", " 1e-3 ");
        assert_eq!(build_ico(&env).unwrap().price, " 1e-3 ");
    }
}
