use crate::{
    locator::{self, TestFolder},
    runner::{run_epoch_operation_test, Operation},
    Error, Failure,
};
use beacon_types::{ChainSpec, Fork};
use rayon::{prelude::*, ThreadPoolBuilder};
use std::{
    any::Any,
    fmt,
    panic::{catch_unwind, AssertUnwindSafe},
    path::PathBuf,
    thread,
    time::Instant,
};
use tracing::{info, warn};

/// Outcome of one fixture case.
#[derive(Debug)]
pub struct Subtest {
    /// Base name of the case directory.
    pub name: String,
    pub result: Result<(), Failure>,
}

/// Outcome of a suite run, with subtests in registration (name) order.
#[derive(Debug)]
pub struct Report {
    pub config: String,
    pub fork: Fork,
    pub rule: &'static str,
    pub subtests: Vec<Subtest>,
}

impl Report {
    pub fn passed(&self) -> bool {
        self.subtests.iter().all(|s| s.result.is_ok())
    }

    /// Names of all registered subtests.
    pub fn names(&self) -> Vec<&str> {
        self.subtests.iter().map(|s| s.name.as_str()).collect()
    }

    /// Failed subtests and their failures.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &Failure)> {
        self.subtests
            .iter()
            .filter_map(|s| s.result.as_ref().err().map(|f| (s.name.as_str(), f)))
    }

    /// Panic with every failing subtest if any failed.
    pub fn assert_passed(&self) {
        if self.passed() {
            return;
        }
        let mut msg = format!("{self}\n");
        for (name, failure) in self.failures() {
            msg.push_str(&format!("--- FAIL: {name}\n{failure}\n"));
        }
        panic!("{msg}");
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failed = self.failures().count();
        write!(
            f,
            "{}/{}/{}: {} passed, {} failed",
            self.config,
            self.fork,
            self.rule,
            self.subtests.len() - failed,
            failed
        )
    }
}

/// Drives one subtest per fixture case of an [Operation].
#[derive(Debug, Clone)]
pub struct Suite {
    root: PathBuf,
    concurrency: usize,
}

impl Default for Suite {
    fn default() -> Self {
        let concurrency = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            root: locator::vectors_root(),
            concurrency,
        }
    }
}

impl Suite {
    /// Read fixtures from `root` instead of [locator::vectors_root].
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Number of subtests to run at once (`1` runs them sequentially).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Run every fixture case of `operation` for `(config_name, fork)`.
    ///
    /// Fails without running anything if the config is unknown, the rule does
    /// not exist at `fork`, or no cases are found.
    pub fn run(
        &self,
        config_name: &str,
        fork: Fork,
        operation: &Operation,
    ) -> Result<Report, Error> {
        let spec = ChainSpec::from_name(config_name)
            .map_err(|_| Error::UnknownConfig(config_name.to_string()))?;
        if !(operation.supports)(fork) {
            return Err(Error::UnsupportedFork {
                rule: operation.rule,
                fork,
            });
        }
        let category = operation.category();
        let folders = locator::test_folders(&self.root, &spec, fork, &category)?;
        if folders.is_empty() {
            return Err(Error::NoFixtures(locator::category_dir(
                &self.root, &spec, fork, &category,
            )));
        }
        info!(
            config = config_name,
            %fork,
            rule = operation.rule,
            cases = folders.len(),
            "running suite"
        );

        let run = |folder: &TestFolder| subtest(&spec, fork, folder, operation);
        let subtests: Vec<Subtest> = if self.concurrency > 1 {
            let pool = ThreadPoolBuilder::new()
                .num_threads(self.concurrency)
                .build()?;
            pool.install(|| folders.par_iter().map(run).collect())
        } else {
            folders.iter().map(run).collect()
        };

        Ok(Report {
            config: config_name.to_string(),
            fork,
            rule: operation.rule,
            subtests,
        })
    }
}

/// Run one case in isolation, converting a panic into a [Failure].
fn subtest(spec: &ChainSpec, fork: Fork, folder: &TestFolder, operation: &Operation) -> Subtest {
    let start = Instant::now();
    let result = catch_unwind(AssertUnwindSafe(|| {
        run_epoch_operation_test(spec, fork, folder, operation)
    }))
    .unwrap_or_else(|err| Err(Failure::Panicked(extract_panic_message(&*err))));

    let elapsed = start.elapsed();
    match &result {
        Ok(()) => info!(rule = operation.rule, case = %folder.name, ?elapsed, "subtest passed"),
        Err(failure) => warn!(
            rule = operation.rule,
            case = %folder.name,
            ?elapsed,
            %failure,
            "subtest failed"
        ),
    }
    Subtest {
        name: folder.name.clone(),
        result,
    }
}

fn extract_panic_message(err: &(dyn Any + Send)) -> String {
    if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else {
        format!("{err:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{POST_FILE, PRE_FILE};
    use beacon_types::BeaconState;
    use std::{fs, path::Path};

    fn any_fork(_: Fork) -> bool {
        true
    }

    fn capella_only(fork: Fork) -> bool {
        fork == Fork::Capella
    }

    /// Increments the slot, but panics on slot 13.
    fn bump_slot(_: &ChainSpec, mut state: BeaconState) -> Result<BeaconState, Failure> {
        assert_ne!(state.slot, 13, "unlucky slot");
        state.slot += 1;
        Ok(state)
    }

    const BUMP: Operation = Operation {
        rule: "bump_slot",
        supports: any_fork,
        wrapper: bump_slot,
    };

    const CAPELLA_BUMP: Operation = Operation {
        rule: "bump_slot",
        supports: capella_only,
        wrapper: bump_slot,
    };

    /// Write a case whose post-state has slot `post_slot`.
    fn write_case(root: &Path, name: &str, pre_slot: u64, post_slot: u64) {
        let spec = ChainSpec::minimal();
        let dir = locator::category_dir(root, &spec, Fork::Capella, &BUMP.category()).join(name);
        fs::create_dir_all(&dir).unwrap();
        let mut state = BeaconState::new(&spec, Fork::Capella);
        state.slot = pre_slot;
        fs::write(dir.join(PRE_FILE), serde_yaml::to_string(&state).unwrap()).unwrap();
        state.slot = post_slot;
        fs::write(dir.join(POST_FILE), serde_yaml::to_string(&state).unwrap()).unwrap();
    }

    #[test]
    fn test_one_subtest_per_case() {
        let root = tempfile::tempdir().unwrap();
        for (i, name) in ["c", "a", "b"].into_iter().enumerate() {
            write_case(root.path(), name, i as u64, i as u64 + 1);
        }
        let report = Suite::default()
            .with_root(root.path())
            .run("minimal", Fork::Capella, &BUMP)
            .unwrap();
        assert_eq!(report.names(), ["a", "b", "c"]);
        assert!(report.passed());
        report.assert_passed();
    }

    #[test]
    fn test_failures_are_isolated() {
        for concurrency in [1, 4] {
            let root = tempfile::tempdir().unwrap();
            write_case(root.path(), "good", 1, 2);
            write_case(root.path(), "mismatch", 1, 3);
            write_case(root.path(), "panics", 13, 14);
            write_case(root.path(), "zz_good", 5, 6);

            let report = Suite::default()
                .with_root(root.path())
                .with_concurrency(concurrency)
                .run("minimal", Fork::Capella, &BUMP)
                .unwrap();
            assert_eq!(report.subtests.len(), 4);
            let failed: Vec<_> = report.failures().map(|(name, _)| name).collect();
            assert_eq!(failed, ["mismatch", "panics"]);
            assert!(matches!(
                report.subtests[1].result,
                Err(Failure::Mismatch(_))
            ));
            match &report.subtests[2].result {
                Err(Failure::Panicked(msg)) => assert!(msg.contains("unlucky slot")),
                other => panic!("expected panic failure, got {other:?}"),
            }
            assert!(report.to_string().ends_with("2 passed, 2 failed"));
        }
    }

    #[test]
    #[should_panic(expected = "--- FAIL: mismatch")]
    fn test_assert_passed_lists_failures() {
        let root = tempfile::tempdir().unwrap();
        write_case(root.path(), "mismatch", 1, 3);
        Suite::default()
            .with_root(root.path())
            .run("minimal", Fork::Capella, &BUMP)
            .unwrap()
            .assert_passed();
    }

    #[test]
    fn test_no_fixtures_is_fatal() {
        let root = tempfile::tempdir().unwrap();
        let err = Suite::default()
            .with_root(root.path())
            .run("minimal", Fork::Capella, &BUMP)
            .unwrap_err();
        match err {
            Error::NoFixtures(dir) => assert!(dir.ends_with("bump_slot/pyspec_tests")),
            other => panic!("expected no fixtures, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_config_is_fatal() {
        let root = tempfile::tempdir().unwrap();
        write_case(root.path(), "a", 0, 1);
        assert!(matches!(
            Suite::default()
                .with_root(root.path())
                .run("devnet", Fork::Capella, &BUMP),
            Err(Error::UnknownConfig(name)) if name == "devnet"
        ));
    }

    #[test]
    fn test_unsupported_fork_is_fatal() {
        let root = tempfile::tempdir().unwrap();
        assert!(matches!(
            Suite::default()
                .with_root(root.path())
                .run("minimal", Fork::Deneb, &CAPELLA_BUMP),
            Err(Error::UnsupportedFork {
                rule: "bump_slot",
                fork: Fork::Deneb,
            })
        ));
    }
}
