//! Apply one epoch-processing rule to one fixture case.

use crate::{diff::diff, fixture::Fixture, locator::TestFolder, Failure};
use beacon_types::{BeaconState, ChainSpec, Fork};

/// Adapter from a domain transition function to the runner.
///
/// A wrapper returns the transitioned state or a [Failure] (never both) and
/// reads nothing besides its arguments.
pub type Wrapper = fn(&ChainSpec, BeaconState) -> Result<BeaconState, Failure>;

/// A testable epoch-processing rule.
#[derive(Clone, Copy)]
pub struct Operation {
    /// Rule name, as used in fixture paths and failure messages.
    pub rule: &'static str,
    /// Whether the rule exists at a given fork.
    pub supports: fn(Fork) -> bool,
    pub wrapper: Wrapper,
}

impl Operation {
    /// Fixture category of this rule.
    pub fn category(&self) -> String {
        format!("epoch_processing/{}", self.rule)
    }
}

/// Run `operation` against the fixture case in `folder`.
///
/// When the case has a post-state, the wrapper must succeed and produce a state
/// equal to it. When it does not, the wrapper must report a transition failure.
pub fn run_epoch_operation_test(
    spec: &ChainSpec,
    fork: Fork,
    folder: &TestFolder,
    operation: &Operation,
) -> Result<(), Failure> {
    let Fixture { pre, post } = Fixture::load(spec, fork, folder)?;
    let result = (operation.wrapper)(spec, pre);
    match (post, result) {
        (Some(expected), Ok(actual)) => {
            if expected == actual {
                return Ok(());
            }
            Err(Failure::Mismatch(diff(&expected, &actual)?))
        }
        (Some(_), Err(failure)) => Err(failure),
        (None, Ok(_)) => Err(Failure::UnexpectedSuccess {
            rule: operation.rule,
        }),
        (None, Err(Failure::Transition { .. })) => Ok(()),
        (None, Err(failure)) => Err(failure),
    }
}
