//! Replay `eth1_data_reset` fixtures.

use crate::{Error, Failure, Operation, Report, Suite};
use beacon_types::{epoch_processing::process_eth1_data_reset, BeaconState, ChainSpec, Fork};

pub const RULE: &str = "eth1_data_reset";

pub const OPERATION: Operation = Operation {
    rule: RULE,
    supports,
    wrapper,
};

fn supports(_: Fork) -> bool {
    true
}

fn wrapper(spec: &ChainSpec, state: BeaconState) -> Result<BeaconState, Failure> {
    process_eth1_data_reset(spec, state).map_err(Failure::transition(RULE))
}

pub fn run(config_name: &str, fork: Fork) -> Result<Report, Error> {
    Suite::default().run(config_name, fork, &OPERATION)
}
