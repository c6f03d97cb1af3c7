//! Process-wide feature flags.
//!
//! Flags are set once at startup with [init] and read with [get]. Reading before
//! [init] pins the defaults.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static FLAGS: OnceLock<Flags> = OnceLock::new();

/// Snapshot of every feature flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flags {
    /// Talk to the beacon node over the REST API instead of RPC.
    pub enable_beacon_rest_api: bool,
}

/// Pin `flags` for the rest of the process.
///
/// Returns the rejected flags if a snapshot was already pinned.
pub fn init(flags: Flags) -> Result<(), Flags> {
    FLAGS.set(flags)
}

/// The pinned snapshot (defaults if [init] was never called).
pub fn get() -> &'static Flags {
    FLAGS.get_or_init(Flags::default)
}
