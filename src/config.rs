//! Per-path policies and run configuration.
//!
//! A suite decides which corpus files are relevant through a [`PathPolicyMap`]:
//! rules are keyed by path prefix (directory or file granularity), and the
//! most specific matching prefix wins. Broad rules ("everything under `test`
//! passes") are narrowed by more specific exceptions without duplicating
//! policy across every file.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Per-path directive for a discovered corpus file.
///
/// `Unknown` is the default and means "no applicable rule". A suite run
/// treats it as a configuration error, not as an implicit skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    #[default]
    #[serde(skip)]
    Unknown,
    /// File must be parsed, executed, and verified.
    Pass,
    /// File is discovered but excluded from execution.
    Skip,
}

/// Maps path prefixes to policies. Insertion order is irrelevant; only
/// exact-prefix lookups are performed during resolution.
#[derive(Debug, Clone, Default)]
pub struct PathPolicyMap {
    rules: HashMap<String, Policy>,
}

impl PathPolicyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, policy: Policy) {
        self.rules.insert(path.into(), policy);
    }

    /// Overlays `other` onto this map, chainable. For keys present in both,
    /// the overlay wins; unrelated keys are unaffected.
    pub fn overlay(mut self, other: &PathPolicyMap) -> Self {
        for (path, policy) in &other.rules {
            self.rules.insert(path.clone(), *policy);
        }
        self
    }

    /// Resolves the effective policy for a slash-delimited path.
    ///
    /// Walks the path's prefixes from root to leaf; each prefix with an
    /// exact rule overwrites the running result, so the longest matching
    /// prefix wins. A miss at any level does not reset an earlier match.
    pub fn resolve(&self, path: &str) -> Policy {
        let mut current = Policy::Unknown;
        let mut prefix = String::new();
        for (i, segment) in path.split('/').enumerate() {
            if i > 0 {
                prefix.push('/');
            }
            prefix.push_str(segment);
            if let Some(policy) = self.rules.get(&prefix) {
                current = *policy;
            }
        }
        current
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<const N: usize> From<[(&str, Policy); N]> for PathPolicyMap {
    fn from(rules: [(&str, Policy); N]) -> Self {
        let mut map = Self::new();
        for (path, policy) in rules {
            map.insert(path, policy);
        }
        map
    }
}

impl FromIterator<(String, Policy)> for PathPolicyMap {
    fn from_iter<I: IntoIterator<Item = (String, Policy)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

// Color constants for terminal output
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

/// Configuration for a harness run, constructed by the entry point and
/// passed by reference into the orchestration layer.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Root directory of the test corpus.
    pub corpus_root: String,
    /// Path to the interpreter binary under test.
    pub binary: PathBuf,
    pub use_colors: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            corpus_root: "test".to_string(),
            binary: PathBuf::from("bin/lox"),
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }
}

impl HarnessConfig {
    /// Apply color formatting to text if colors are enabled.
    pub fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_unknown() {
        assert_eq!(Policy::default(), Policy::Unknown);
        assert_eq!(PathPolicyMap::new().resolve("test/foo.lox"), Policy::Unknown);
    }

    #[test]
    fn longest_matching_prefix_wins() {
        let map = PathPolicyMap::from([
            ("test", Policy::Pass),
            ("test/class", Policy::Skip),
        ]);
        assert_eq!(map.resolve("test/print/hello.lox"), Policy::Pass);
        assert_eq!(map.resolve("test/class/empty.lox"), Policy::Skip);
        assert_eq!(map.resolve("test/class"), Policy::Skip);
    }

    #[test]
    fn miss_at_deeper_level_keeps_earlier_match() {
        let map = PathPolicyMap::from([("test", Policy::Pass)]);
        assert_eq!(map.resolve("test/a/b/c/deep.lox"), Policy::Pass);
    }

    #[test]
    fn file_granularity_overrides_directory_rule() {
        let map = PathPolicyMap::from([
            ("test", Policy::Pass),
            ("test/for", Policy::Skip),
            ("test/for/syntax.lox", Policy::Pass),
        ]);
        assert_eq!(map.resolve("test/for/scope.lox"), Policy::Skip);
        assert_eq!(map.resolve("test/for/syntax.lox"), Policy::Pass);
    }

    #[test]
    fn overlay_wins_for_shared_keys_only() {
        let base = PathPolicyMap::from([
            ("test", Policy::Pass),
            ("test/if", Policy::Pass),
        ]);
        let no_control_flow = PathPolicyMap::from([("test/if", Policy::Skip)]);
        let merged = base.overlay(&no_control_flow);
        assert_eq!(merged.resolve("test/if/else.lox"), Policy::Skip);
        assert_eq!(merged.resolve("test/print.lox"), Policy::Pass);
    }

    #[test]
    fn absolute_paths_keep_their_leading_slash() {
        let map = PathPolicyMap::from([("/corpus/test", Policy::Pass)]);
        assert_eq!(map.resolve("/corpus/test/nil/literal.lox"), Policy::Pass);
        assert_eq!(map.resolve("corpus/test/nil/literal.lox"), Policy::Unknown);
    }

    #[test]
    fn unrelated_path_stays_unknown() {
        let map = PathPolicyMap::from([("test", Policy::Pass)]);
        assert_eq!(map.resolve("bench/fib.lox"), Policy::Unknown);
    }

    #[test]
    fn colorize_respects_toggle() {
        let mut config = HarnessConfig::default();
        config.use_colors = true;
        assert_eq!(config.colorize("FAIL", RED), "\x1b[31mFAIL\x1b[0m");
        config.use_colors = false;
        assert_eq!(config.colorize("FAIL", RED), "FAIL");
    }
}
