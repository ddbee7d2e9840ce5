//! Corpus discovery.
//!
//! Walks the corpus root and yields regular files in a deterministic
//! (lexical) order. Benchmark subtrees are pruned entirely: they measure
//! throughput, not conformance, and carry no expectation comments.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::diagnostics::HarnessError;

/// Returns true for directories that must not be visited at all.
fn is_benchmark_dir(path: &Path) -> bool {
    path.to_string_lossy().contains("benchmark")
}

/// Recursively collects candidate files under the corpus root.
///
/// The returned list is in lexical traversal order so policy resolution and
/// execution happen in a stable order across runs. Every regular file is a
/// candidate; whether it runs is decided by the suite's policy map, not by
/// file extension.
pub fn discover_files(root: &str) -> Result<Vec<PathBuf>, HarnessError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !(entry.file_type().is_dir() && is_benchmark_dir(entry.path())));

    for entry in walker {
        let entry = entry.map_err(|e| HarnessError::Walk {
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        files.push(entry.path().to_path_buf());
    }
    Ok(files)
}

/// Slash-delimited key for policy resolution, stable across platforms.
pub fn policy_key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn scratch_corpus(tag: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("loxcheck-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("test/operator")).unwrap();
        fs::create_dir_all(root.join("test/benchmark")).unwrap();
        fs::create_dir_all(root.join("test/zoo")).unwrap();
        fs::write(root.join("test/precedence.lox"), "// expect: 14\n").unwrap();
        fs::write(root.join("test/operator/add.lox"), "// expect: 3\n").unwrap();
        fs::write(root.join("test/benchmark/fib.lox"), "// timing only\n").unwrap();
        fs::write(root.join("test/zoo/animals.lox"), "// expect: cat\n").unwrap();
        root
    }

    #[test]
    fn walk_is_lexical_and_prunes_benchmarks() {
        let root = scratch_corpus("discovery");
        let corpus = root.join("test");
        let files = discover_files(corpus.to_str().unwrap()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(&root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(
            names,
            [
                "test/operator/add.lox",
                "test/precedence.lox",
                "test/zoo/animals.lox",
            ]
        );
        assert!(names.iter().all(|n| !n.contains("benchmark")));
        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn missing_root_is_a_walk_error() {
        let err = discover_files("no-such-corpus-root").unwrap_err();
        assert!(matches!(err, HarnessError::Walk { .. }));
    }

    #[test]
    fn policy_key_uses_forward_slashes() {
        let key = policy_key(Path::new("test/operator/add.lox"));
        assert_eq!(key, "test/operator/add.lox");
    }
}
