//! Load the pre-state and expected post-state of a fixture case.

use crate::{locator::TestFolder, Failure};
use beacon_types::{BeaconState, ChainSpec, Fork};
use std::{fs, path::Path};

/// File holding the state before the transition.
pub const PRE_FILE: &str = "pre.yaml";

/// File holding the expected state after the transition. Absent when the
/// transition is expected to fail.
pub const POST_FILE: &str = "post.yaml";

/// A loaded fixture case.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub pre: BeaconState,
    pub post: Option<BeaconState>,
}

impl Fixture {
    /// Load the case in `folder`, checking both states belong to `fork` and fit `spec`.
    pub fn load(spec: &ChainSpec, fork: Fork, folder: &TestFolder) -> Result<Self, Failure> {
        let pre = read_state(spec, fork, &folder.path.join(PRE_FILE))?;
        let post_path = folder.path.join(POST_FILE);
        let post = if post_path.exists() {
            Some(read_state(spec, fork, &post_path)?)
        } else {
            None
        };
        Ok(Self { pre, post })
    }
}

fn read_state(spec: &ChainSpec, fork: Fork, path: &Path) -> Result<BeaconState, Failure> {
    let contents = fs::read_to_string(path).map_err(|e| Failure::Io(path.to_path_buf(), e))?;
    let state: BeaconState =
        serde_yaml::from_str(&contents).map_err(|e| Failure::Parse(path.to_path_buf(), e))?;
    if state.fork != fork {
        return Err(Failure::ForkMismatch {
            expected: fork,
            found: state.fork,
        });
    }
    state
        .validate(spec)
        .map_err(|e| Failure::InvalidState(path.to_path_buf(), e))?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder_with(
        pre: Option<&BeaconState>,
        post: Option<&BeaconState>,
    ) -> (tempfile::TempDir, TestFolder) {
        let dir = tempfile::tempdir().unwrap();
        if let Some(pre) = pre {
            fs::write(dir.path().join(PRE_FILE), serde_yaml::to_string(pre).unwrap()).unwrap();
        }
        if let Some(post) = post {
            fs::write(dir.path().join(POST_FILE), serde_yaml::to_string(post).unwrap()).unwrap();
        }
        let folder = TestFolder {
            name: "case".into(),
            path: dir.path().to_path_buf(),
        };
        (dir, folder)
    }

    #[test]
    fn test_load_with_and_without_post() {
        let spec = ChainSpec::minimal();
        let state = BeaconState::new(&spec, Fork::Capella);

        let (_dir, folder) = folder_with(Some(&state), Some(&state));
        let fixture = Fixture::load(&spec, Fork::Capella, &folder).unwrap();
        assert_eq!(fixture.pre, state);
        assert_eq!(fixture.post, Some(state.clone()));

        let (_dir, folder) = folder_with(Some(&state), None);
        let fixture = Fixture::load(&spec, Fork::Capella, &folder).unwrap();
        assert!(fixture.post.is_none());
    }

    #[test]
    fn test_missing_pre_is_io_failure() {
        let spec = ChainSpec::minimal();
        let (_dir, folder) = folder_with(None, None);
        assert!(matches!(
            Fixture::load(&spec, Fork::Capella, &folder),
            Err(Failure::Io(..))
        ));
    }

    #[test]
    fn test_fork_mismatch() {
        let spec = ChainSpec::minimal();
        let state = BeaconState::new(&spec, Fork::Bellatrix);
        let (_dir, folder) = folder_with(Some(&state), None);
        assert!(matches!(
            Fixture::load(&spec, Fork::Capella, &folder),
            Err(Failure::ForkMismatch {
                expected: Fork::Capella,
                found: Fork::Bellatrix,
            })
        ));
    }

    #[test]
    fn test_profile_mismatch() {
        let state = BeaconState::new(&ChainSpec::minimal(), Fork::Capella);
        let (_dir, folder) = folder_with(Some(&state), None);
        assert!(matches!(
            Fixture::load(&ChainSpec::mainnet(), Fork::Capella, &folder),
            Err(Failure::InvalidState(..))
        ));
    }

    #[test]
    fn test_unparseable_pre() {
        let spec = ChainSpec::minimal();
        let (dir, folder) = folder_with(None, None);
        fs::write(dir.path().join(PRE_FILE), "slot: [not, a, number]").unwrap();
        assert!(matches!(
            Fixture::load(&spec, Fork::Capella, &folder),
            Err(Failure::Parse(..))
        ));
    }
}
