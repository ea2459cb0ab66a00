// crates/mintplan-cli/src/commands/mod.rs
//
// Command module declarations for the mintplan CLI.

pub mod check;
pub mod governance;
pub mod networks;
pub mod offerings;
pub mod render;
pub mod token;
