//! Replay epoch-processing conformance fixtures.
//!
//! # Overview
//!
//! Fixtures are externally authored `(pre, post)` state pairs laid out as:
//!
//! ```text
//! <root>/<config>/<fork>/epoch_processing/<rule>/pyspec_tests/<case>/
//!     pre.yaml
//!     post.yaml   (absent when the transition is expected to fail)
//! ```
//!
//! A run proceeds in three layers:
//! - [locator] resolves the case directories for a `(config, fork, category)` triple.
//! - [runner] loads one case, applies the rule's [Operation] wrapper, and compares
//!   the result against the expected post-state, producing a [diff] on mismatch.
//! - [Suite] drives one isolated subtest per case (in parallel) and collects a [Report].
//!
//! Setup problems (an unknown config, a fork the rule does not exist in, or no
//! fixtures at all) are fatal [Error]s returned before any subtest runs. Problems
//! with a single case are [Failure]s recorded against that case only.
//!
//! # Example
//!
//! ```no_run
//! use beacon_spectest::epoch_processing::historical_summaries_update;
//! use beacon_types::Fork;
//!
//! historical_summaries_update::run("minimal", Fork::Capella)
//!     .expect("suite misconfigured")
//!     .assert_passed();
//! ```

use beacon_types::Fork;
use std::path::PathBuf;
use thiserror::Error;

pub mod diff;
pub mod epoch_processing;
pub mod fixture;
pub mod locator;
pub mod runner;
pub mod selection;
mod suite;
pub use runner::{Operation, Wrapper};
pub use suite::{Report, Subtest, Suite};

/// Errors that abort an entire suite run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown config: {0}")]
    UnknownConfig(String),
    #[error("{rule} is not defined for {fork}")]
    UnsupportedFork { rule: &'static str, fork: Fork },
    #[error("no fixtures found in {} (are the test vectors vendored?)", .0.display())]
    NoFixtures(PathBuf),
    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, std::io::Error),
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Reasons a single fixture case fails.
#[derive(Error, Debug)]
pub enum Failure {
    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, std::io::Error),
    #[error("failed to parse {}: {}", .0.display(), .1)]
    Parse(PathBuf, serde_yaml::Error),
    #[error("invalid state in {}: {}", .0.display(), .1)]
    InvalidState(PathBuf, beacon_types::Error),
    #[error("fixture fork mismatch: expected {expected}, found {found}")]
    ForkMismatch { expected: Fork, found: Fork },
    #[error("{rule} failed: {source}")]
    Transition {
        rule: &'static str,
        source: beacon_types::Error,
    },
    #[error("{rule} succeeded but the fixture expects it to fail")]
    UnexpectedSuccess { rule: &'static str },
    #[error("post-state mismatch:\n{0}")]
    Mismatch(diff::Diff),
    #[error("failed to encode state for diff: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("subtest panicked: {0}")]
    Panicked(String),
}

impl Failure {
    /// Map a transition error into a [Failure::Transition] naming `rule`.
    pub fn transition(rule: &'static str) -> impl Fn(beacon_types::Error) -> Failure {
        move |source| Failure::Transition { rule, source }
    }
}
