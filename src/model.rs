use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

/// What to look for and where. The location is always canonical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub pattern: String,
    pub location: PathBuf,
    pub include_ignored: bool,
}

impl SearchRequest {
    pub fn new(pattern: impl Into<String>, location: &Path, include_ignored: bool) -> Result<Self> {
        let location = std::fs::canonicalize(location)
            .with_context(|| format!("cannot resolve location {}", location.display()))?;
        Ok(Self {
            pattern: pattern.into(),
            location,
            include_ignored,
        })
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Listed(usize),
    NoMatches,
    Opened(PathBuf),
    Cancelled,
}

/// A set of matches split into the directory they share and the
/// remainder of each path below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouped {
    pub prefix: PathBuf,
    pub relative: Vec<PathBuf>,
}

impl Grouped {
    pub fn from_paths(paths: &[PathBuf]) -> Option<Self> {
        let prefix = common_prefix(paths)?;
        let relative = paths
            .iter()
            .map(|p| p.strip_prefix(&prefix).unwrap_or(p).to_path_buf())
            .collect();
        Some(Self { prefix, relative })
    }

    /// Full path for an entry picked from `relative`.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.prefix.join(relative)
    }
}

/// Longest directory shared by every path, compared component by component
/// so `/a/bc` and `/a/bd` share `/a`, not `/a/b`.
pub fn common_prefix(paths: &[PathBuf]) -> Option<PathBuf> {
    let (first, rest) = paths.split_first()?;
    let mut shared: Vec<Component<'_>> = first.components().collect();
    for path in rest {
        let keep = shared
            .iter()
            .zip(path.components())
            .take_while(|(a, b)| **a == *b)
            .count();
        shared.truncate(keep);
    }

    let mut prefix: PathBuf = shared.iter().collect();
    // A prefix equal to one of the inputs is a file, not a directory.
    if paths.iter().any(|p| p.as_path() == prefix.as_path()) {
        prefix = prefix.parent().map(Path::to_path_buf).unwrap_or_default();
    }
    Some(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(items: &[&str]) -> Vec<PathBuf> {
        items.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn prefix_of_nested_files() {
        let input = paths(&["/a/b/c.txt", "/a/b/d/e.txt"]);
        assert_eq!(common_prefix(&input), Some(PathBuf::from("/a/b")));
    }

    #[test]
    fn prefix_respects_component_boundaries() {
        let input = paths(&["/a/bc/x.rs", "/a/bd/y.rs"]);
        assert_eq!(common_prefix(&input), Some(PathBuf::from("/a")));
    }

    #[test]
    fn prefix_of_nothing_is_none() {
        assert_eq!(common_prefix(&[]), None);
    }

    #[test]
    fn prefix_of_single_file_is_its_directory() {
        let input = paths(&["/srv/app/main.rs"]);
        assert_eq!(common_prefix(&input), Some(PathBuf::from("/srv/app")));
    }

    #[test]
    fn prefix_can_be_root() {
        let input = paths(&["/etc/hosts", "/usr/bin/env"]);
        assert_eq!(common_prefix(&input), Some(PathBuf::from("/")));
    }

    #[test]
    fn grouped_paths_rejoin_to_originals() {
        let input = paths(&["/a/b/c.txt", "/a/b/d/e.txt"]);
        let grouped = Grouped::from_paths(&input).unwrap();

        assert_eq!(grouped.prefix, PathBuf::from("/a/b"));
        assert_eq!(grouped.relative, paths(&["c.txt", "d/e.txt"]));
        let rejoined: Vec<PathBuf> = grouped.relative.iter().map(|r| grouped.resolve(r)).collect();
        assert_eq!(rejoined, input);
    }

    #[test]
    fn request_canonicalizes_location() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("sub");
        std::fs::create_dir(&nested).unwrap();

        let dotted = nested.join("..").join("sub");
        let request = SearchRequest::new("main", &dotted, false).unwrap();

        assert!(request.location.is_absolute());
        assert_eq!(request.location, std::fs::canonicalize(&nested).unwrap());
        assert_eq!(request.pattern, "main");
    }

    #[test]
    fn request_rejects_missing_location() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(SearchRequest::new("main", &missing, false).is_err());
    }
}
