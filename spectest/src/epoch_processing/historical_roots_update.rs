//! Replay `historical_roots_update` fixtures.

use crate::{Error, Failure, Operation, Report, Suite};
use beacon_types::{
    epoch_processing::process_historical_roots_update, BeaconState, ChainSpec, Fork,
};

pub const RULE: &str = "historical_roots_update";

pub const OPERATION: Operation = Operation {
    rule: RULE,
    supports,
    wrapper,
};

fn supports(fork: Fork) -> bool {
    fork < Fork::Capella
}

fn wrapper(spec: &ChainSpec, state: BeaconState) -> Result<BeaconState, Failure> {
    process_historical_roots_update(spec, state).map_err(Failure::transition(RULE))
}

pub fn run(config_name: &str, fork: Fork) -> Result<Report, Error> {
    Suite::default().run(config_name, fork, &OPERATION)
}
