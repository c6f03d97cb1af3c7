//! Per-epoch state updates applied at the last slot of an epoch.
//!
//! Each rule consumes a [BeaconState] and returns the updated state. Rules read
//! parameters only from the [ChainSpec] they are given.

use crate::{
    merkle_root, spec::HISTORICAL_ROOTS_LIMIT, BeaconState, ChainSpec, Epoch, Error, Fork,
    HistoricalSummary, Root,
};
use tracing::debug;

fn next_epoch(spec: &ChainSpec, state: &BeaconState) -> Result<Epoch, Error> {
    spec.epoch_at(state.slot)
        .checked_add(1)
        .ok_or(Error::SlotOverflow(state.slot))
}

/// Append a [HistoricalSummary] when the next epoch starts a new historical period.
///
/// Defined from Capella onwards.
pub fn process_historical_summaries_update(
    spec: &ChainSpec,
    mut state: BeaconState,
) -> Result<BeaconState, Error> {
    const RULE: &str = "historical_summaries_update";
    if state.fork < Fork::Capella {
        return Err(Error::UnsupportedFork {
            rule: RULE,
            fork: state.fork,
        });
    }
    state.validate(spec)?;

    let next_epoch = next_epoch(spec, &state)?;
    if next_epoch % spec.epochs_per_historical_root() != 0 {
        return Ok(state);
    }
    if state.historical_summaries.len() >= HISTORICAL_ROOTS_LIMIT {
        return Err(Error::ListFull("historical_summaries", HISTORICAL_ROOTS_LIMIT));
    }
    let summary = HistoricalSummary {
        block_summary_root: merkle_root(&state.block_roots),
        state_summary_root: merkle_root(&state.state_roots),
    };
    debug!(next_epoch, ?summary, "appending historical summary");
    state.historical_summaries.push(summary);
    Ok(state)
}

/// Append the root of the current historical batch when the next epoch starts a
/// new historical period.
///
/// Replaced by [process_historical_summaries_update] at Capella.
pub fn process_historical_roots_update(
    spec: &ChainSpec,
    mut state: BeaconState,
) -> Result<BeaconState, Error> {
    const RULE: &str = "historical_roots_update";
    if state.fork >= Fork::Capella {
        return Err(Error::UnsupportedFork {
            rule: RULE,
            fork: state.fork,
        });
    }
    state.validate(spec)?;

    let next_epoch = next_epoch(spec, &state)?;
    if next_epoch % spec.epochs_per_historical_root() != 0 {
        return Ok(state);
    }
    if state.historical_roots.len() >= HISTORICAL_ROOTS_LIMIT {
        return Err(Error::ListFull("historical_roots", HISTORICAL_ROOTS_LIMIT));
    }
    let batch = Root::hash_pair(
        &merkle_root(&state.block_roots),
        &merkle_root(&state.state_roots),
    );
    debug!(next_epoch, %batch, "appending historical root");
    state.historical_roots.push(batch);
    Ok(state)
}

/// Clear eth1 data votes at the end of a voting period.
pub fn process_eth1_data_reset(
    spec: &ChainSpec,
    mut state: BeaconState,
) -> Result<BeaconState, Error> {
    let next_epoch = next_epoch(spec, &state)?;
    if next_epoch % spec.epochs_per_eth1_voting_period == 0 {
        state.eth1_data_votes.clear();
    }
    Ok(state)
}

/// Zero the slashings balance for the next epoch.
pub fn process_slashings_reset(
    spec: &ChainSpec,
    mut state: BeaconState,
) -> Result<BeaconState, Error> {
    state.validate(spec)?;
    let next_epoch = next_epoch(spec, &state)?;
    let index = (next_epoch % spec.epochs_per_slashings_vector) as usize;
    state.slashings[index] = 0;
    Ok(state)
}

/// Carry the current randao mix forward into the next epoch's slot.
pub fn process_randao_mixes_reset(
    spec: &ChainSpec,
    mut state: BeaconState,
) -> Result<BeaconState, Error> {
    state.validate(spec)?;
    let current_epoch = spec.epoch_at(state.slot);
    let next_epoch = next_epoch(spec, &state)?;
    let len = spec.epochs_per_historical_vector;
    let mix = state.randao_mixes[(current_epoch % len) as usize];
    state.randao_mixes[(next_epoch % len) as usize] = mix;
    Ok(state)
}
