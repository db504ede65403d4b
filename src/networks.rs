//! Registry of well-known Steem-family networks.
//!
//! Looking up a chain by name avoids hand-copying 64-character chain IDs
//! into application code. The table covers the networks this crate is
//! routinely pointed at: Steem mainnet, the public Steem testnet, and the
//! Hive fork (which kept the `STM` address prefix but replaced the chain
//! ID at the fork point).

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::chain::ChainConfig;

/// A known network: a human-readable name plus its chain constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainInfo {
    /// Lookup name, e.g. `"steem"`.
    pub name: &'static str,
    /// Chain ID as 64 hex characters.
    pub id: &'static str,
    /// Public-key string prefix.
    pub address_prefix: &'static str,
}

impl ChainInfo {
    /// Materializes the owned [`ChainConfig`] for this network.
    pub fn chain_config(&self) -> ChainConfig {
        ChainConfig::new(self.id, self.address_prefix).expect("registry chain ids are valid hex")
    }
}

/// All networks known to this crate, mainnet first.
pub static KNOWN_CHAINS: &[ChainInfo] = &[
    ChainInfo {
        name: "steem",
        id: "0000000000000000000000000000000000000000000000000000000000000000",
        address_prefix: "STM",
    },
    ChainInfo {
        name: "steem-testnet",
        id: "18dcf0a285365fc58b71f18b3d3fec954aa0c141c44e4e5cb4cf777b9eab274e",
        address_prefix: "TST",
    },
    ChainInfo {
        name: "hive",
        id: "beeab0de00000000000000000000000000000000000000000000000000000000",
        address_prefix: "STM",
    },
];

static BY_NAME: LazyLock<HashMap<&'static str, &'static ChainInfo>> =
    LazyLock::new(|| KNOWN_CHAINS.iter().map(|info| (info.name, info)).collect());

/// Finds a known network by name.
pub fn chain_by_name(name: &str) -> Option<&'static ChainInfo> {
    BY_NAME.get(name).copied()
}

impl ChainConfig {
    /// Steem mainnet: the all-zero chain ID with the `STM` prefix.
    pub fn steem() -> Self {
        chain_by_name("steem").expect("registered").chain_config()
    }

    /// The public Steem testnet (`TST` prefix).
    pub fn steem_testnet() -> Self {
        chain_by_name("steem-testnet").expect("registered").chain_config()
    }

    /// Hive mainnet after the fork-point chain-ID change.
    pub fn hive() -> Self {
        chain_by_name("hive").expect("registered").chain_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mainnet_id_is_all_zeroes() {
        let config = ChainConfig::steem();
        assert_eq!(config.id.as_bytes(), &[0u8; 32]);
        assert_eq!(config.address_prefix, "STM");
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(
            chain_by_name("steem-testnet").unwrap().address_prefix,
            "TST"
        );
        assert!(chain_by_name("unknown").is_none());
    }

    #[test]
    fn every_registry_entry_materializes() {
        for info in KNOWN_CHAINS {
            let config = info.chain_config();
            assert_eq!(config.id.to_string(), info.id);
        }
    }
}
