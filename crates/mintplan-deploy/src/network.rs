// crates/mintplan-deploy/src/network.rs
//
// Network table handed to the deployment toolchain.
//
// Each profile mirrors the toolchain's network options: where to connect,
// which chain id to expect, how many confirmations to wait for, and gas caps.
// Only `matic` takes its gas limit and price from the configuration source;
// the other networks use fixed values or the toolchain defaults.
//
// The table keeps declaration order, so `development` (the toolchain's default
// network) comes first in every listing and in the rendered JSON.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use mintplan_core::{ConfigSource, MintPlanError};

/// Placeholder for the Infura project id in hosted endpoint URLs.
pub const INFURA_PROJECT_PLACEHOLDER: &str = "YOUR_ID";

/// Optional key that replaces `INFURA_PROJECT_PLACEHOLDER` in endpoint URLs.
pub const INFURA_PROJECT_KEY: &str = "INFURA_PROJECT_ID";

/// Keys read by `build_networks`.
pub const NETWORK_KEYS: [&str; 2] = ["GAS_LIMIT", "GAS_PRICE"];

/// Gas cap used by the public test networks (the block gas limit there is 4M).
pub const TESTNET_GAS_LIMIT: u64 = 4_000_000;

/// Chain id a network accepts. `Any` is rendered as `"*"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkId {
    Any,
    Id(u64),
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkId::Any => write!(f, "*"),
            NetworkId::Id(id) => write!(f, "{}", id),
        }
    }
}

impl Serialize for NetworkId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NetworkId::Any => serializer.serialize_str("*"),
            NetworkId::Id(id) => serializer.serialize_u64(*id),
        }
    }
}

impl<'de> Deserialize<'de> for NetworkId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Id(u64),
            Text(String),
        }
        match Repr::deserialize(deserializer)? {
            Repr::Id(id) => Ok(NetworkId::Id(id)),
            Repr::Text(s) if s == "*" => Ok(NetworkId::Any),
            Repr::Text(s) => s
                .parse::<u64>()
                .map(NetworkId::Id)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// How the toolchain reaches the node: an HD wallet provider over `url`.
/// The mnemonic itself is never read here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSpec {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_addresses: Option<u32>,
    /// Wrap the provider with a nonce tracker (needed on busy networks).
    #[serde(default)]
    pub nonce_tracking: bool,
}

impl ProviderSpec {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            number_of_addresses: None,
            nonce_tracking: false,
        }
    }
}

/// A single deployment target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(rename = "network_id")]
    pub network_id: NetworkId,
    pub provider: ProviderSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_blocks: Option<u64>,
    #[serde(default)]
    pub skip_dry_run: bool,
    #[serde(default)]
    pub websockets: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_check_timeout: Option<u64>,
    #[serde(default)]
    pub allow_unlimited_contract_size: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u64>,
}

impl NetworkProfile {
    /// A remote network reached through `url`, with the common defaults:
    /// 200 timeout blocks and no dry run.
    fn remote(url: impl Into<String>, network_id: u64) -> Self {
        Self {
            host: None,
            port: None,
            network_id: NetworkId::Id(network_id),
            provider: ProviderSpec::new(url),
            confirmations: None,
            timeout_blocks: Some(200),
            skip_dry_run: true,
            websockets: false,
            network_check_timeout: None,
            allow_unlimited_contract_size: false,
            gas: None,
            gas_price: None,
        }
    }

    /// Same as `remote`, over websockets with unlimited contract size and the
    /// test-network gas cap.
    fn hosted_testnet(url: impl Into<String>, network_id: u64) -> Self {
        Self {
            websockets: true,
            network_check_timeout: Some(1_000_000),
            allow_unlimited_contract_size: true,
            gas: Some(TESTNET_GAS_LIMIT),
            ..Self::remote(url, network_id)
        }
    }

    fn with_confirmations(mut self, confirmations: u32) -> Self {
        self.confirmations = Some(confirmations);
        self
    }
}

/// Named network profiles in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkTable {
    entries: Vec<(String, NetworkProfile)>,
}

impl NetworkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a network, or replace an existing one in place.
    pub fn insert(&mut self, name: impl Into<String>, profile: NetworkProfile) {
        let name = name.into();
        match self.get_mut(&name) {
            Some(existing) => *existing = profile,
            None => self.entries.push((name, profile)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&NetworkProfile> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut NetworkProfile> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NetworkProfile)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p))
    }
}

impl Serialize for NetworkTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, profile) in &self.entries {
            map.serialize_entry(name, profile)?;
        }
        map.end()
    }
}

fn infura_url(path: &str, project_id: &str) -> String {
    format!("wss://{}.infura.io/ws/v3/{}", path, project_id)
}

/// Build the network table.
///
/// # Errors
/// Returns `MintPlanError::MissingConfiguration` if `GAS_LIMIT` or
/// `GAS_PRICE` is unset, empty, or not a positive integer.
pub fn build_networks<S: ConfigSource + ?Sized>(
    src: &S,
) -> Result<NetworkTable, MintPlanError> {
    let gas_limit: u64 = src.require_positive("GAS_LIMIT")?;
    let gas_price: u64 = src.require_positive("GAS_PRICE")?;

    let project_id = match src.lookup(INFURA_PROJECT_KEY).map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            tracing::debug!(
                "{} not set; hosted endpoints keep the {} placeholder",
                INFURA_PROJECT_KEY,
                INFURA_PROJECT_PLACEHOLDER
            );
            INFURA_PROJECT_PLACEHOLDER.to_string()
        }
    };

    let mut networks = NetworkTable::new();

    networks.insert(
        "development",
        NetworkProfile {
            host: Some("127.0.0.1".to_string()),
            port: Some(8545),
            network_id: NetworkId::Any,
            provider: ProviderSpec {
                url: "ws://localhost:8545".to_string(),
                number_of_addresses: Some(100),
                nonce_tracking: false,
            },
            confirmations: None,
            timeout_blocks: Some(200),
            skip_dry_run: true,
            websockets: true,
            network_check_timeout: Some(1_000_000),
            allow_unlimited_contract_size: true,
            gas: None,
            gas_price: None,
        },
    );
    networks.insert(
        "neon_devnet",
        NetworkProfile::remote("https://proxy.devnet.neonlabs.org/solana", 245_022_926)
            .with_confirmations(2),
    );
    networks.insert(
        "neon_testnet",
        NetworkProfile::remote("https://proxy.testnet.neonlabs.org/solana", 245_022_940)
            .with_confirmations(10),
    );
    networks.insert(
        "bsc_testnet",
        NetworkProfile::remote("https://data-seed-prebsc-1-s1.binance.org:8545", 97)
            .with_confirmations(10),
    );
    networks.insert(
        "bsc",
        NetworkProfile::remote("https://bsc-dataseed1.binance.org", 56).with_confirmations(10),
    );
    networks.insert(
        "mumbai",
        NetworkProfile::hosted_testnet(infura_url("polygon-mumbai", &project_id), 80_001),
    );
    networks.insert(
        "matic",
        NetworkProfile {
            provider: ProviderSpec {
                url: infura_url("polygon-mainnet", &project_id),
                number_of_addresses: None,
                nonce_tracking: true,
            },
            confirmations: Some(1),
            timeout_blocks: Some(50_000),
            websockets: true,
            network_check_timeout: Some(10_000_000),
            allow_unlimited_contract_size: true,
            gas: Some(gas_limit),
            gas_price: Some(gas_price),
            ..NetworkProfile::remote("", 137)
        },
    );
    networks.insert(
        "ropsten",
        NetworkProfile::hosted_testnet(infura_url("ropsten", &project_id), 3),
    );
    networks.insert(
        "rinkeby",
        NetworkProfile::hosted_testnet(infura_url("rinkeby", &project_id), 4),
    );

    Ok(networks)
}
