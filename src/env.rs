//! Environment variable abstraction for testability.
//!
//! Production code uses [`Env::real()`] which delegates to [`std::env::var`].
//! Tests use [`Env::mock()`] backed by a `HashMap`, so config resolution can
//! be exercised without mutating the process environment.

use std::collections::HashMap;

/// Environment variable reader.
///
/// CI runners frequently export variables with empty values (for example an
/// unset secret in GitHub Actions), so empty strings are treated as absent.
#[derive(Clone, Debug)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Create an `Env` that reads from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Create an `Env` backed by explicit key-value pairs.
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Look up a non-empty environment variable by name.
    pub fn var(&self, name: &str) -> Option<String> {
        let value = match &self.overrides {
            Some(map) => map.get(name).cloned(),
            None => std::env::var(name).ok(),
        }?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Return the value of the first variable in `names` that is set.
    pub fn first_of(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| self.var(name))
    }

    /// Returns `true` if the variable is present and non-empty.
    pub fn is_set(&self, name: &str) -> bool {
        self.var(name).is_some()
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::real()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_env_reads_cargo_manifest_dir() {
        let env = Env::real();
        assert!(env.var("CARGO_MANIFEST_DIR").is_some());
    }

    #[test]
    fn mock_env_returns_set_values() {
        let env = Env::mock([("FOO", "bar"), ("BAZ", "qux")]);
        assert_eq!(env.var("FOO").as_deref(), Some("bar"));
        assert_eq!(env.var("BAZ").as_deref(), Some("qux"));
    }

    #[test]
    fn empty_values_are_absent() {
        let env = Env::mock([("EMPTY", ""), ("BLANK", "   ")]);
        assert!(env.var("EMPTY").is_none());
        assert!(!env.is_set("BLANK"));
    }

    #[test]
    fn values_are_trimmed() {
        let env = Env::mock([("TOKEN", " ghp_abc\n")]);
        assert_eq!(env.var("TOKEN").as_deref(), Some("ghp_abc"));
    }

    #[test]
    fn first_of_prefers_earlier_names() {
        let env = Env::mock([("SECOND", "2"), ("FIRST", "1")]);
        assert_eq!(env.first_of(&["FIRST", "SECOND"]).as_deref(), Some("1"));
        assert_eq!(env.first_of(&["MISSING", "SECOND"]).as_deref(), Some("2"));
        assert!(env.first_of(&["MISSING"]).is_none());
    }
}
