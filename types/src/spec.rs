//! Configuration profiles and protocol-upgrade labels.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A slot number.
pub type Slot = u64;

/// An epoch number.
pub type Epoch = u64;

/// Maximum number of entries in `historical_roots` and `historical_summaries`.
pub const HISTORICAL_ROOTS_LIMIT: usize = 1 << 24;

/// An immutable bundle of protocol parameters.
///
/// A [ChainSpec] is selected once per run and passed by reference to everything
/// that needs it. Nothing reads it from process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSpec {
    pub config_name: String,
    pub slots_per_epoch: u64,
    pub slots_per_historical_root: u64,
    pub epochs_per_eth1_voting_period: u64,
    pub epochs_per_slashings_vector: u64,
    pub epochs_per_historical_vector: u64,
}

impl ChainSpec {
    /// Names of all built-in profiles.
    pub const NAMES: [&'static str; 2] = ["minimal", "mainnet"];

    /// The `minimal` preset used by most conformance fixtures.
    pub fn minimal() -> Self {
        Self {
            config_name: "minimal".into(),
            slots_per_epoch: 8,
            slots_per_historical_root: 64,
            epochs_per_eth1_voting_period: 4,
            epochs_per_slashings_vector: 64,
            epochs_per_historical_vector: 64,
        }
    }

    /// The `mainnet` preset.
    pub fn mainnet() -> Self {
        Self {
            config_name: "mainnet".into(),
            slots_per_epoch: 32,
            slots_per_historical_root: 8192,
            epochs_per_eth1_voting_period: 64,
            epochs_per_slashings_vector: 8192,
            epochs_per_historical_vector: 65536,
        }
    }

    /// Resolve a built-in profile by name.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        match name {
            "minimal" => Ok(Self::minimal()),
            "mainnet" => Ok(Self::mainnet()),
            other => Err(Error::UnknownConfig(other.to_string())),
        }
    }

    /// Epoch containing `slot`.
    pub fn epoch_at(&self, slot: Slot) -> Epoch {
        slot / self.slots_per_epoch
    }

    /// Number of epochs covered by one historical summary.
    pub fn epochs_per_historical_root(&self) -> u64 {
        self.slots_per_historical_root / self.slots_per_epoch
    }
}

/// A protocol-upgrade label.
///
/// Variants are declared in activation order so they can be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fork {
    Phase0,
    Altair,
    Bellatrix,
    Capella,
    Deneb,
    Electra,
}

impl Fork {
    /// All forks, in activation order.
    pub const ALL: [Fork; 6] = [
        Fork::Phase0,
        Fork::Altair,
        Fork::Bellatrix,
        Fork::Capella,
        Fork::Deneb,
        Fork::Electra,
    ];

    /// Label used in fixture paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Fork::Phase0 => "phase0",
            Fork::Altair => "altair",
            Fork::Bellatrix => "bellatrix",
            Fork::Capella => "capella",
            Fork::Deneb => "deneb",
            Fork::Electra => "electra",
        }
    }
}

impl fmt::Display for Fork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Fork {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fork::ALL
            .into_iter()
            .find(|fork| fork.as_str() == s)
            .ok_or_else(|| Error::UnknownFork(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_from_name() {
        assert_eq!(ChainSpec::from_name("minimal").unwrap(), ChainSpec::minimal());
        assert_eq!(ChainSpec::from_name("mainnet").unwrap(), ChainSpec::mainnet());
        assert_eq!(
            ChainSpec::from_name("testnet"),
            Err(Error::UnknownConfig("testnet".into()))
        );
    }

    #[test]
    fn test_names_resolve() {
        for name in ChainSpec::NAMES {
            assert_eq!(ChainSpec::from_name(name).unwrap().config_name, name);
        }
    }

    #[test_case(ChainSpec::minimal(), 8; "minimal")]
    #[test_case(ChainSpec::mainnet(), 256; "mainnet")]
    fn test_epochs_per_historical_root(spec: ChainSpec, expected: u64) {
        assert_eq!(spec.epochs_per_historical_root(), expected);
    }

    #[test]
    fn test_epoch_at() {
        let spec = ChainSpec::minimal();
        assert_eq!(spec.epoch_at(0), 0);
        assert_eq!(spec.epoch_at(7), 0);
        assert_eq!(spec.epoch_at(8), 1);
        assert_eq!(spec.epoch_at(63), 7);
    }

    #[test]
    fn test_fork_labels() {
        for fork in Fork::ALL {
            assert_eq!(fork.as_str().parse::<Fork>().unwrap(), fork);
        }
        assert!(Fork::Bellatrix < Fork::Capella);
        assert_eq!(
            "fulu".parse::<Fork>(),
            Err(Error::UnknownFork("fulu".into()))
        );
    }
}
