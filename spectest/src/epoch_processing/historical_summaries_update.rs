//! Replay `historical_summaries_update` fixtures.

use crate::{Error, Failure, Operation, Report, Suite};
use beacon_types::{
    epoch_processing::process_historical_summaries_update, BeaconState, ChainSpec, Fork,
};

pub const RULE: &str = "historical_summaries_update";

pub const OPERATION: Operation = Operation {
    rule: RULE,
    supports,
    wrapper,
};

fn supports(fork: Fork) -> bool {
    fork >= Fork::Capella
}

/// Every fixture for this rule expects the update to succeed.
fn wrapper(spec: &ChainSpec, state: BeaconState) -> Result<BeaconState, Failure> {
    process_historical_summaries_update(spec, state).map_err(Failure::transition(RULE))
}

/// Replay every `historical_summaries_update` fixture for `(config_name, fork)`.
pub fn run(config_name: &str, fork: Fork) -> Result<Report, Error> {
    Suite::default().run(config_name, fork, &OPERATION)
}
