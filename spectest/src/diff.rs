//! Field-by-field comparison of serializable values.
//!
//! Both sides are encoded to JSON and walked in parallel. Every differing leaf
//! (including entries present on only one side of a collection) is reported
//! with its path, e.g. `historical_summaries[1].block_summary_root`.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Maximum number of differences rendered by [Diff]'s `Display`.
const MAX_RENDERED: usize = 32;

/// A single differing leaf. `None` means the path is absent on that side.
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    pub path: String,
    pub expected: Option<Value>,
    pub actual: Option<Value>,
}

/// All differences between an expected and an actual value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diff(pub Vec<Difference>);

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Difference> {
        self.0.iter()
    }
}

/// Compare `expected` against `actual`.
pub fn diff<T: Serialize>(expected: &T, actual: &T) -> Result<Diff, serde_json::Error> {
    let expected = serde_json::to_value(expected)?;
    let actual = serde_json::to_value(actual)?;
    let mut out = Vec::new();
    walk(String::new(), Some(&expected), Some(&actual), &mut out);
    Ok(Diff(out))
}

fn walk(
    path: String,
    expected: Option<&Value>,
    actual: Option<&Value>,
    out: &mut Vec<Difference>,
) {
    match (expected, actual) {
        (Some(Value::Object(e)), Some(Value::Object(a))) => {
            let mut keys: Vec<&String> = e.keys().chain(a.keys()).collect();
            keys.sort();
            keys.dedup();
            for key in keys {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                walk(child, e.get(key), a.get(key), out);
            }
        }
        (Some(Value::Array(e)), Some(Value::Array(a))) => {
            for i in 0..e.len().max(a.len()) {
                walk(format!("{path}[{i}]"), e.get(i), a.get(i), out);
            }
        }
        (e, a) if e == a => {}
        (e, a) => out.push(Difference {
            path,
            expected: e.cloned(),
            actual: a.cloned(),
        }),
    }
}

fn render(value: &Option<Value>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "<missing>".to_string(),
    }
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in self.0.iter().take(MAX_RENDERED) {
            let path: &str = if d.path.is_empty() { "<root>" } else { &d.path };
            writeln!(
                f,
                "  {path}: expected {}, got {}",
                render(&d.expected),
                render(&d.actual)
            )?;
        }
        if self.0.len() > MAX_RENDERED {
            writeln!(f, "  ... and {} more", self.0.len() - MAX_RENDERED)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_types::{BeaconState, ChainSpec, Fork, HistoricalSummary, Root};

    #[test]
    fn test_equal_states_have_no_diff() {
        let spec = ChainSpec::minimal();
        let state = BeaconState::new(&spec, Fork::Capella);
        assert!(diff(&state, &state.clone()).unwrap().is_empty());
    }

    #[test]
    fn test_scalar_and_nested_differences() {
        let spec = ChainSpec::minimal();
        let expected = BeaconState::new(&spec, Fork::Capella);
        let mut actual = expected.clone();
        actual.slot = 9;
        actual.eth1_data.deposit_count = 3;

        let d = diff(&expected, &actual).unwrap();
        let paths: Vec<_> = d.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, ["eth1_data.deposit_count", "slot"]);
        assert_eq!(d.0[1].expected, Some(Value::from(0u64)));
        assert_eq!(d.0[1].actual, Some(Value::from(9u64)));
    }

    #[test]
    fn test_collection_length_difference() {
        let spec = ChainSpec::minimal();
        let expected = BeaconState::new(&spec, Fork::Capella);
        let mut actual = expected.clone();
        actual.historical_summaries.push(HistoricalSummary {
            block_summary_root: Root([1; 32]),
            state_summary_root: Root::ZERO,
        });

        let d = diff(&expected, &actual).unwrap();
        assert_eq!(d.len(), 1);
        assert_eq!(d.0[0].path, "historical_summaries[0]");
        assert!(d.0[0].expected.is_none());
        assert!(d.0[0].actual.is_some());
        assert!(d.to_string().contains("expected <missing>"));
    }

    #[test]
    fn test_render_truncates() {
        let spec = ChainSpec::minimal();
        let expected = BeaconState::new(&spec, Fork::Capella);
        let mut actual = expected.clone();
        for root in actual.block_roots.iter_mut() {
            *root = Root([0xff; 32]);
        }
        let d = diff(&expected, &actual).unwrap();
        assert_eq!(d.len(), 64);
        assert!(d.to_string().ends_with("... and 32 more\n"));
    }
}
