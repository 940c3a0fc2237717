// SPDX-License-Identifier: Apache-2.0

//! In-memory adapter fakes for engine tests: synthetic trees instead of a
//! real filesystem.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use hookguard_adapters::{AdapterError, Fs, Git};

#[derive(Debug, Default)]
pub(crate) struct FakeFs {
    files: BTreeMap<String, String>,
    dirs: BTreeSet<String>,
    executables: BTreeSet<String>,
    fail_walk: bool,
}

fn parent_dirs(path: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let segments: Vec<&str> = path.split('/').collect();
    for segment in &segments[..segments.len().saturating_sub(1)] {
        if !current.is_empty() {
            current.push('/');
        }
        current.push_str(segment);
        out.push(current.clone());
    }
    out
}

impl FakeFs {
    /// Files with content; parent directories are implied.
    pub(crate) fn with_files(entries: &[(&str, &str)]) -> Self {
        let mut fs = Self::default();
        for (path, content) in entries {
            fs.dirs.extend(parent_dirs(path));
            fs.files.insert((*path).to_string(), (*content).to_string());
        }
        fs
    }

    /// Bare tree shape: entries with children become directories, leaves
    /// become empty files.
    pub(crate) fn with_paths(paths: &[&str]) -> Self {
        let mut fs = Self::default();
        for path in paths {
            let is_dir = paths
                .iter()
                .any(|other| other.starts_with(&format!("{path}/")));
            if is_dir {
                fs.dirs.insert((*path).to_string());
            } else {
                fs.files.insert((*path).to_string(), String::new());
            }
            fs.dirs.extend(parent_dirs(path));
        }
        fs
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail_walk: true,
            ..Self::default()
        }
    }

    pub(crate) fn mark_executable(mut self, path: &str) -> Self {
        self.executables.insert(path.to_string());
        self
    }

    fn key(path: &Path) -> String {
        path.to_string_lossy().replace('\\', "/")
    }
}

impl Fs for FakeFs {
    fn read_text(&self, _repo_root: &Path, path: &Path) -> Result<String, AdapterError> {
        self.files
            .get(&Self::key(path))
            .cloned()
            .ok_or_else(|| AdapterError::Io {
                op: "read_to_string",
                path: path.to_path_buf(),
                detail: "no such file".to_string(),
            })
    }

    fn exists(&self, _repo_root: &Path, path: &Path) -> bool {
        let key = Self::key(path);
        self.files.contains_key(&key) || self.dirs.contains(&key)
    }

    fn is_executable(&self, _repo_root: &Path, path: &Path) -> bool {
        self.executables.contains(&Self::key(path))
    }

    fn walk(&self, repo_root: &Path) -> Result<Vec<String>, AdapterError> {
        if self.fail_walk {
            return Err(AdapterError::Io {
                op: "read_dir",
                path: repo_root.to_path_buf(),
                detail: "permission denied".to_string(),
            });
        }
        let mut out: Vec<String> = self
            .dirs
            .iter()
            .chain(self.files.keys())
            .cloned()
            .collect();
        out.sort();
        Ok(out)
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeGit {
    tracked: Vec<String>,
    fail: bool,
}

impl FakeGit {
    pub(crate) fn with_tracked(tracked: &[&str]) -> Self {
        Self {
            tracked: tracked.iter().map(|s| (*s).to_string()).collect(),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            tracked: Vec::new(),
            fail: true,
        }
    }
}

impl Git for FakeGit {
    fn tracked_files(&self, _repo_root: &Path) -> Result<Vec<String>, AdapterError> {
        if self.fail {
            return Err(AdapterError::Git {
                detail: "not a git repository".to_string(),
            });
        }
        Ok(self.tracked.clone())
    }
}
