//! Resolve fixture case directories on disk.

use crate::Error;
use beacon_types::{ChainSpec, Fork};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Environment variable overriding the fixture root.
pub const VECTORS_ENV: &str = "CONSENSUS_SPEC_TESTS_DIR";

/// Directory every category keeps its cases in.
const CASES_DIR: &str = "pyspec_tests";

/// A handle to one on-disk fixture case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFolder {
    /// Base name of the case directory, used as the subtest name.
    pub name: String,
    pub path: PathBuf,
}

/// Fixture root: [VECTORS_ENV] if set, otherwise the vectors vendored with this crate.
pub fn vectors_root() -> PathBuf {
    env::var_os(VECTORS_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("vectors"))
}

/// Directory holding the cases of `category` (a `/`-separated path such as
/// `epoch_processing/slashings_reset`).
pub fn category_dir(root: &Path, spec: &ChainSpec, fork: Fork, category: &str) -> PathBuf {
    let mut dir = root.join(&spec.config_name).join(fork.as_str());
    for component in category.split('/').filter(|c| !c.is_empty()) {
        dir.push(component);
    }
    dir.join(CASES_DIR)
}

/// List the case directories of `category`, sorted by name.
///
/// A category directory that does not exist resolves to no cases. Files next
/// to the case directories are ignored.
pub fn test_folders(
    root: &Path,
    spec: &ChainSpec,
    fork: Fork,
    category: &str,
) -> Result<Vec<TestFolder>, Error> {
    let dir = category_dir(root, spec, fork, category);
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "category directory missing");
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(&dir).map_err(|e| Error::Io(dir.clone(), e))?;
    let mut folders = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::Io(dir.clone(), e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        folders.push(TestFolder { name, path });
    }
    folders.sort_by(|a, b| a.name.cmp(&b.name));
    debug!(dir = %dir.display(), cases = folders.len(), "resolved fixtures");
    Ok(folders)
}
