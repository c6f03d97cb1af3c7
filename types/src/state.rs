use crate::{ChainSpec, Error, Fork, Root, Slot};
use serde::{Deserialize, Serialize};

/// Summary of one historical period, appended from Capella onwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalSummary {
    pub block_summary_root: Root,
    pub state_summary_root: Root,
}

/// Eth1 deposit contract snapshot voted on by proposers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eth1Data {
    pub deposit_root: Root,
    pub deposit_count: u64,
    pub block_hash: Root,
}

/// The subset of the beacon state read and written by epoch processing.
///
/// A state is transitioned by value: rules consume a state and return a new
/// one (or an error), so a failed transition never leaves a half-applied
/// state behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconState {
    pub fork: Fork,
    pub slot: Slot,
    pub block_roots: Vec<Root>,
    pub state_roots: Vec<Root>,
    #[serde(default)]
    pub historical_roots: Vec<Root>,
    #[serde(default)]
    pub historical_summaries: Vec<HistoricalSummary>,
    pub eth1_data: Eth1Data,
    #[serde(default)]
    pub eth1_data_votes: Vec<Eth1Data>,
    pub randao_mixes: Vec<Root>,
    pub slashings: Vec<u64>,
}

impl BeaconState {
    /// Create an empty state at slot 0 with vectors sized for `spec`.
    pub fn new(spec: &ChainSpec, fork: Fork) -> Self {
        Self {
            fork,
            slot: 0,
            block_roots: vec![Root::ZERO; spec.slots_per_historical_root as usize],
            state_roots: vec![Root::ZERO; spec.slots_per_historical_root as usize],
            historical_roots: Vec::new(),
            historical_summaries: Vec::new(),
            eth1_data: Eth1Data::default(),
            eth1_data_votes: Vec::new(),
            randao_mixes: vec![Root::ZERO; spec.epochs_per_historical_vector as usize],
            slashings: vec![0; spec.epochs_per_slashings_vector as usize],
        }
    }

    /// Check that every fixed-length vector matches `spec`.
    pub fn validate(&self, spec: &ChainSpec) -> Result<(), Error> {
        check_len(
            "block_roots",
            spec.slots_per_historical_root,
            self.block_roots.len(),
        )?;
        check_len(
            "state_roots",
            spec.slots_per_historical_root,
            self.state_roots.len(),
        )?;
        check_len(
            "randao_mixes",
            spec.epochs_per_historical_vector,
            self.randao_mixes.len(),
        )?;
        check_len(
            "slashings",
            spec.epochs_per_slashings_vector,
            self.slashings.len(),
        )
    }
}

fn check_len(field: &'static str, expected: u64, found: usize) -> Result<(), Error> {
    let expected = expected as usize;
    if expected != found {
        return Err(Error::InvalidLength {
            field,
            expected,
            found,
        });
    }
    Ok(())
}
