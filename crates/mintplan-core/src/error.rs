// crates/mintplan-core/src/error.rs
//
// Workspace-wide error type. Every configuration failure is fatal at startup;
// there is no partial-configuration mode.

use std::fmt;

use thiserror::Error;

/// Why a required configuration key could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingReason {
    /// The key is not present in the source mapping.
    Unset,
    /// The key is present but empty (or whitespace only).
    Empty,
    /// The key is present but its value failed to parse.
    Malformed(String),
}

impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingReason::Unset => write!(f, "is not set"),
            MissingReason::Empty => write!(f, "is empty"),
            MissingReason::Malformed(detail) => write!(f, "is malformed: {}", detail),
        }
    }
}

/// Errors produced while building the deployment configuration.
#[derive(Debug, Error)]
pub enum MintPlanError {
    /// A required key is absent, empty, or not parseable as the expected type.
    #[error("Missing configuration: {key} {reason}")]
    MissingConfiguration { key: String, reason: MissingReason },

    /// Fixed-point arithmetic overflowed or a derived amount is out of range.
    #[error("Amount error: {0}")]
    Amount(String),

    /// Serialization/deserialization error (JSON output, TOML overrides).
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Reading a configuration file failed.
    #[error("IO error: {0}")]
    Io(String),
}

impl MintPlanError {
    /// Shorthand for a `MissingConfiguration` error.
    pub fn missing(key: impl Into<String>, reason: MissingReason) -> Self {
        MintPlanError::MissingConfiguration {
            key: key.into(),
            reason,
        }
    }

    /// Returns the offending key if this is a `MissingConfiguration` error.
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            MintPlanError::MissingConfiguration { key, .. } => Some(key),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MintPlanError {
    fn from(e: serde_json::Error) -> Self {
        MintPlanError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for MintPlanError {
    fn from(e: std::io::Error) -> Self {
        MintPlanError::Io(e.to_string())
    }
}

impl From<dotenvy::Error> for MintPlanError {
    fn from(e: dotenvy::Error) -> Self {
        match e {
            dotenvy::Error::Io(io) => MintPlanError::Io(io.to_string()),
            other => MintPlanError::Serialization(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_display() {
        let err = MintPlanError::missing("TOKEN_MAX_CAP", MissingReason::Unset);
        assert_eq!(err.to_string(), "Missing configuration: TOKEN_MAX_CAP is not set");
    }

    #[test]
    fn test_malformed_display() {
        let err = MintPlanError::missing(
            "GAS_PRICE",
            MissingReason::Malformed("invalid digit".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "Missing configuration: GAS_PRICE is malformed: invalid digit"
        );
    }

    #[test]
    fn test_missing_key() {
        let err = MintPlanError::missing("DEV", MissingReason::Empty);
        assert_eq!(err.missing_key(), Some("DEV"));
        assert_eq!(MintPlanError::Amount("x".into()).missing_key(), None);
    }
}
