//! Model the beacon state touched by epoch processing.
//!
//! # Overview
//!
//! This crate provides the pieces an epoch-processing conformance run needs:
//! - [ChainSpec]: an immutable configuration profile (`minimal`, `mainnet`)
//! - [Fork]: the protocol-upgrade label a state (and a fixture) belongs to
//! - [BeaconState]: the versioned snapshot each rule transitions
//! - [epoch_processing]: the per-epoch rules themselves
//!
//! Configuration is never global. Every rule takes the [ChainSpec] it should
//! read parameters from, so states from different profiles can be processed
//! concurrently.
//!
//! # Status
//!
//! `beacon-types` is **ALPHA** software and only models the fields required by
//! the epoch-processing rules it ships.

pub mod epoch_processing;
mod root;
pub use root::{merkle_root, Root};
mod spec;
pub use spec::{ChainSpec, Epoch, Fork, Slot};
mod state;
pub use state::{BeaconState, Eth1Data, HistoricalSummary};

use thiserror::Error;

/// Errors that can occur when building or transitioning a [BeaconState].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown config: {0}")]
    UnknownConfig(String),
    #[error("unknown fork: {0}")]
    UnknownFork(String),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("invalid length for {field}: expected {expected}, found {found}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("list full: {0} (limit {1})")]
    ListFull(&'static str, usize),
    #[error("{rule} is not defined for {fork}")]
    UnsupportedFork { rule: &'static str, fork: Fork },
    #[error("slot overflow: {0}")]
    SlotOverflow(Slot),
}
