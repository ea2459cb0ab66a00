// crates/mintplan-core/src/source.rs
//
// Key-value configuration sources.
//
// Builders never read ambient process state directly: they take a
// `ConfigSource`, which is usually an `EnvMap` snapshot of the process
// environment merged with a dotenv file. Tests inject a synthetic map.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::str::FromStr;

use crate::amount::{Share, TokenAmount};
use crate::error::{MintPlanError, MissingReason};

/// A read-only mapping from configuration keys to raw string values.
///
/// Only `lookup` must be implemented; the typed accessors all funnel their
/// failures into `MintPlanError::MissingConfiguration`.
pub trait ConfigSource {
    /// Raw value for `key`, if present.
    fn lookup(&self, key: &str) -> Option<&str>;

    /// A required, non-empty string value (surrounding whitespace preserved).
    fn require(&self, key: &str) -> Result<&str, MintPlanError> {
        match self.lookup(key) {
            None => Err(MintPlanError::missing(key, MissingReason::Unset)),
            Some(v) if v.trim().is_empty() => {
                Err(MintPlanError::missing(key, MissingReason::Empty))
            }
            Some(v) => Ok(v),
        }
    }

    /// A required value as an owned `String`.
    fn require_string(&self, key: &str) -> Result<String, MintPlanError> {
        self.require(key).map(str::to_string)
    }

    /// A required decimal token quantity, converted to wei.
    fn require_amount(&self, key: &str) -> Result<TokenAmount, MintPlanError> {
        let raw = self.require(key)?;
        TokenAmount::from_decimal_str(raw)
            .map_err(|e| MintPlanError::missing(key, MissingReason::Malformed(e.to_string())))
    }

    /// A required decimal fraction in [0, 1].
    fn require_share(&self, key: &str) -> Result<Share, MintPlanError> {
        let raw = self.require(key)?;
        Share::from_decimal_str(raw)
            .map_err(|e| MintPlanError::missing(key, MissingReason::Malformed(e.to_string())))
    }

    /// A required unsigned integer that must be greater than zero.
    fn require_positive<T>(&self, key: &str) -> Result<T, MintPlanError>
    where
        T: FromStr + PartialEq + Default,
        T::Err: std::fmt::Display,
    {
        let raw = self.require(key)?;
        let value = raw
            .trim()
            .parse::<T>()
            .map_err(|e| MintPlanError::missing(key, MissingReason::Malformed(e.to_string())))?;
        if value == T::default() {
            return Err(MintPlanError::missing(
                key,
                MissingReason::Malformed("must be greater than zero".to_string()),
            ));
        }
        Ok(value)
    }
}

impl ConfigSource for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl ConfigSource for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// An immutable snapshot of configuration variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap {
    vars: BTreeMap<String, String>,
}

impl EnvMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Snapshot the current process environment. Variables whose name or
    /// value is not valid Unicode are skipped.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    /// Parse a dotenv file without touching the process environment.
    pub fn from_dotenv_file(path: impl AsRef<Path>) -> Result<Self, MintPlanError> {
        let path = path.as_ref();
        let mut vars = BTreeMap::new();
        for item in dotenvy::from_path_iter(path)? {
            let (key, value) = item?;
            vars.insert(key, value);
        }
        tracing::debug!("Read {} variables from {}", vars.len(), path.display());
        Ok(Self { vars })
    }

    /// Layer `overrides` on top of `self`; keys present in both take the
    /// value from `overrides`.
    pub fn merge(mut self, overrides: EnvMap) -> Self {
        self.vars.extend(overrides.vars);
        self
    }

    /// Insert or replace a single variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Remove a variable, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Keys from `keys` that are unset or empty in this map.
    pub fn missing_keys<'a>(&self, keys: &[&'a str]) -> Vec<&'a str> {
        keys.iter()
            .copied()
            .filter(|k| self.require(k).is_err())
            .collect()
    }
}

impl ConfigSource for EnvMap {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_require_present() {
        let env = EnvMap::from_pairs([("TOKEN_NAME", "Mint")]);
        assert_eq!(env.require("TOKEN_NAME").unwrap(), "Mint");
    }

    #[test]
    fn test_require_unset() {
        let env = EnvMap::new();
        let err = env.require("TOKEN_NAME").unwrap_err();
        assert!(matches!(
            err,
            MintPlanError::MissingConfiguration { ref key, reason: MissingReason::Unset } if key == "TOKEN_NAME"
        ));
    }

    #[test]
    fn test_require_empty() {
        let env = EnvMap::from_pairs([("TOKEN_NAME", "   ")]);
        let err = env.require("TOKEN_NAME").unwrap_err();
        assert!(matches!(
            err,
            MintPlanError::MissingConfiguration { reason: MissingReason::Empty, .. }
        ));
    }

    #[test]
    fn test_require_amount() {
        let env = EnvMap::from_pairs([("TOKEN_MAX_CAP", "1000000")]);
        let cap = env.require_amount("TOKEN_MAX_CAP").unwrap();
        assert_eq!(cap, TokenAmount::from_tokens(1_000_000));
    }

    #[test]
    fn test_require_amount_not_numeric() {
        let env = EnvMap::from_pairs([("TOKEN_MAX_CAP", "lots")]);
        let err = env.require_amount("TOKEN_MAX_CAP").unwrap_err();
        assert!(matches!(
            err,
            MintPlanError::MissingConfiguration { reason: MissingReason::Malformed(_), .. }
        ));
        assert_eq!(err.missing_key(), Some("TOKEN_MAX_CAP"));
    }

    #[test]
    fn test_require_positive() {
        let env = EnvMap::from_pairs([("A", "12"), ("B", "0"), ("C", "-3")]);
        assert_eq!(env.require_positive::<u32>("A").unwrap(), 12);
        assert!(env.require_positive::<u32>("B").is_err());
        assert!(env.require_positive::<u32>("C").is_err());
    }

    #[test]
    fn test_hashmap_source() {
        let mut map = HashMap::new();
        map.insert("DEV".to_string(), "0xabc".to_string());
        assert_eq!(map.require("DEV").unwrap(), "0xabc");
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let base = EnvMap::from_pairs([("A", "file"), ("B", "file")]);
        let overrides = EnvMap::from_pairs([("B", "process")]);
        let merged = base.merge(overrides);
        assert_eq!(merged.lookup("A"), Some("file"));
        assert_eq!(merged.lookup("B"), Some("process"));
    }

    #[test]
    fn test_missing_keys() {
        let env = EnvMap::from_pairs([("A", "1"), ("B", "")]);
        assert_eq!(env.missing_keys(&["A", "B", "C"]), vec!["B", "C"]);
    }

    #[test]
    fn test_from_dotenv_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# deployment").unwrap();
        writeln!(file, "TOKEN_NAME=Mint Token").unwrap();
        writeln!(file, "TOKEN_MAX_CAP=\"1000000\"").unwrap();
        file.flush().unwrap();

        let env = EnvMap::from_dotenv_file(file.path()).unwrap();
        assert_eq!(env.len(), 2);
        assert_eq!(env.lookup("TOKEN_NAME"), Some("Mint Token"));
        assert_eq!(env.lookup("TOKEN_MAX_CAP"), Some("1000000"));
    }

    #[test]
    fn test_from_dotenv_file_missing() {
        let err = EnvMap::from_dotenv_file("/nonexistent/mintplan/.env").unwrap_err();
        assert!(matches!(err, MintPlanError::Io(_)));
    }
}
