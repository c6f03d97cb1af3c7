//! Suites for the epoch-processing rules.
//!
//! Each rule module exposes its [Operation] and a `run(config_name, fork)`
//! entry point that replays the vendored fixtures for that rule.

use crate::Operation;

pub mod eth1_data_reset;
pub mod historical_roots_update;
pub mod historical_summaries_update;
pub mod randao_mixes_reset;
pub mod slashings_reset;

/// Every epoch-processing rule with fixtures.
pub const ALL: [&Operation; 5] = [
    &eth1_data_reset::OPERATION,
    &historical_roots_update::OPERATION,
    &historical_summaries_update::OPERATION,
    &randao_mixes_reset::OPERATION,
    &slashings_reset::OPERATION,
];

/// Look up a rule by name.
pub fn by_name(rule: &str) -> Option<&'static Operation> {
    ALL.into_iter().find(|op| op.rule == rule)
}
