//! Run a selection of suites and decide whether the selection passed.
//!
//! Without an explicit `(fork, rule)` pair, combinations with no vendored
//! fixtures are skipped. Every selected rule must still run at least one suite
//! across the selected forks that define it, so a fixture source missing an
//! entire rule never passes.

use crate::{epoch_processing, Error, Operation, Report, Suite};
use beacon_types::Fork;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// The suites to run.
#[derive(Clone)]
pub struct Selection {
    pub config: String,
    pub forks: Vec<Fork>,
    pub rules: Vec<&'static Operation>,
    /// Both forks and rules were named, so every combination must have fixtures.
    pub explicit: bool,
}

impl Selection {
    /// Select `forks` and `rules` for `config`. Empty lists select everything.
    pub fn new(
        config: impl Into<String>,
        forks: Vec<Fork>,
        rules: Vec<&'static Operation>,
    ) -> Self {
        let explicit = !forks.is_empty() && !rules.is_empty();
        let forks = if forks.is_empty() {
            Fork::ALL.to_vec()
        } else {
            forks
        };
        let rules = if rules.is_empty() {
            epoch_processing::ALL.to_vec()
        } else {
            rules
        };
        Self {
            config: config.into(),
            forks,
            rules,
            explicit,
        }
    }
}

/// Outcome of running a [Selection].
#[derive(Debug, Default)]
pub struct Summary {
    pub reports: Vec<Report>,
    /// Suites that could not run.
    pub errors: Vec<Error>,
    /// Directories skipped for lack of fixtures.
    pub skipped: Vec<PathBuf>,
    /// Selected rules that ran no suite at all.
    pub missing: Vec<&'static str>,
}

impl Summary {
    pub fn passed(&self) -> bool {
        !self.reports.is_empty()
            && self.errors.is_empty()
            && self.missing.is_empty()
            && self.reports.iter().all(Report::passed)
    }
}

/// Run every suite in `selection` on `suite`.
pub fn run(suite: &Suite, selection: &Selection) -> Summary {
    let mut summary = Summary::default();
    for operation in &selection.rules {
        let mut attempted = false;
        let mut ran = false;
        for &fork in &selection.forks {
            // An explicit pair is run as asked, so an undefined rule is reported
            if !selection.explicit && !(operation.supports)(fork) {
                continue;
            }
            attempted = true;
            match suite.run(&selection.config, fork, operation) {
                Ok(report) => {
                    ran = true;
                    if report.passed() {
                        info!(%report, "suite passed");
                    } else {
                        for (case, failure) in report.failures() {
                            error!(rule = report.rule, %fork, case, %failure, "fixture failed");
                        }
                        error!(%report, "suite failed");
                    }
                    summary.reports.push(report);
                }
                Err(Error::NoFixtures(dir)) if !selection.explicit => {
                    warn!(dir = %dir.display(), "no fixtures, skipping");
                    summary.skipped.push(dir);
                }
                Err(e) => {
                    error!(error = %e, rule = operation.rule, %fork, "suite aborted");
                    summary.errors.push(e);
                }
            }
        }
        if attempted && !ran {
            error!(rule = operation.rule, config = %selection.config, "no suite ran for rule");
            summary.missing.push(operation.rule);
        }
    }
    summary
}
