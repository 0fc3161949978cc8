//! Process environment snapshot.

use std::collections::BTreeMap;

/// Immutable mapping of environment variable names to values.
///
/// Built once per invocation and only ever used as a lookup table, both
/// for `${VAR}` interpolation and for build arguments declared without a
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Create an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an environment from `KEY=VALUE` entries.
    ///
    /// Each entry is split on its first `=`, so values may contain `=`.
    /// Entries without `=` are skipped. Later duplicates overwrite earlier
    /// ones.
    pub fn from_pairs<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vars = BTreeMap::new();
        for entry in entries {
            if let Some((key, value)) = entry.as_ref().split_once('=') {
                vars.insert(key.to_string(), value.to_string());
            }
        }
        Self { vars }
    }

    /// Snapshot the environment of the current process.
    ///
    /// Each variable is rejoined as `KEY=VALUE` and normalized like any
    /// other entry, so a name containing `=` is split at its first `=`.
    /// Names and values that are not valid UTF-8 are converted lossily.
    #[must_use]
    pub fn from_process() -> Self {
        Self::from_pairs(std::env::vars_os().map(|(key, value)| {
            format!("{}={}", key.to_string_lossy(), value.to_string_lossy())
        }))
    }

    /// Look up a variable.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Whether a variable is defined (possibly as the empty string).
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether no variables are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Environment {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_on_first_equals() {
        let env = Environment::from_pairs(["OPTS=a=b=c", "EMPTY=", "=lead"]);
        assert_eq!(env.get("OPTS"), Some("a=b=c"));
        assert_eq!(env.get("EMPTY"), Some(""));
        assert_eq!(env.get(""), Some("lead"));
        assert_eq!(env.len(), 3);
    }

    #[test]
    fn skips_entries_without_equals() {
        let env: Environment = ["PATH=/bin", "garbage", "HOME=/root"].into_iter().collect();
        assert_eq!(env.len(), 2);
        assert!(!env.contains("garbage"));
    }

    #[test]
    fn last_duplicate_wins() {
        let env = Environment::from_pairs(["A=1", "B=2", "A=3"]);
        assert_eq!(env.get("A"), Some("3"));
        assert_eq!(env.get("B"), Some("2"));
    }

    #[test]
    fn empty_input() {
        let env = Environment::from_pairs(Vec::<String>::new());
        assert!(env.is_empty());
        assert_eq!(env, Environment::new());
    }

    #[test]
    fn process_snapshot_matches_std() {
        let env = Environment::from_process();
        for (key, value) in std::env::vars().filter(|(key, _)| !key.contains('=')) {
            assert_eq!(env.get(&key), Some(value.as_str()), "{key}");
        }
    }

    proptest! {
        #[test]
        fn entries_without_equals_never_appear(key in "[A-Z_]{1,12}") {
            let env = Environment::from_pairs([key.clone()]);
            prop_assert!(env.is_empty());
        }

        #[test]
        fn value_is_everything_after_first_equals(
            key in "[A-Za-z_][A-Za-z0-9_]{0,12}",
            value in "[ -~]{0,24}",
        ) {
            let env = Environment::from_pairs([format!("{key}={value}")]);
            prop_assert_eq!(env.get(&key), Some(value.as_str()));
        }

        #[test]
        fn size_never_exceeds_input(entries in proptest::collection::vec("[A-C=]{0,4}", 0..16)) {
            let env = Environment::from_pairs(&entries);
            prop_assert!(env.len() <= entries.len());
        }
    }
}
