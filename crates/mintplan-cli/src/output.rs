// crates/mintplan-cli/src/output.rs
//
// Output formatting utilities for the mintplan CLI.
// Supports table and JSON output modes.

use clap::ValueEnum;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}

/// Print `data` as JSON, or `rows` as a table.
pub fn emit<T: Serialize, R: Tabled>(
    format: OutputFormat,
    data: &T,
    rows: impl FnOnce() -> Vec<R>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => println!("{}", format_json(data)?),
        OutputFormat::Table => println!("{}", format_table(&rows())),
    }
    Ok(())
}

/// Render an optional value for a table cell.
pub fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Tabled, Serialize)]
    struct Row {
        #[tabled(rename = "Key")]
        key: String,
    }

    #[test]
    fn test_format_table_has_header() {
        let table = format_table(&[Row { key: "TOKEN_NAME".to_string() }]);
        assert!(table.contains("Key"));
        assert!(table.contains("TOKEN_NAME"));
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&Row { key: "x".to_string() }).unwrap();
        assert!(json.contains("\"key\": \"x\""));
    }

    #[test]
    fn test_cell() {
        assert_eq!(cell(Some(3)), "3");
        assert_eq!(cell::<u32>(None), "-");
    }
}
