#![forbid(unsafe_code)]

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    Io {
        op: &'static str,
        path: PathBuf,
        detail: String,
    },
    Git {
        detail: String,
    },
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { op, path, detail } => {
                write!(f, "io error: {op} {} ({detail})", path.display())
            }
            Self::Git { detail } => write!(f, "git error: {detail}"),
        }
    }
}

impl std::error::Error for AdapterError {}

/// Read-only filesystem port. Checks never touch `std::fs` directly so tests
/// can substitute an in-memory tree.
pub trait Fs {
    fn read_text(&self, repo_root: &Path, path: &Path) -> Result<String, AdapterError>;
    fn exists(&self, repo_root: &Path, path: &Path) -> bool;
    fn is_executable(&self, repo_root: &Path, path: &Path) -> bool;
    /// Every file and directory under `repo_root`, repo-relative with `/`
    /// separators, sorted. A traversal failure aborts the walk.
    fn walk(&self, repo_root: &Path) -> Result<Vec<String>, AdapterError>;
}

pub trait Git {
    fn tracked_files(&self, repo_root: &Path) -> Result<Vec<String>, AdapterError>;
}

fn join_from_repo_root(repo_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        repo_root.join(path)
    }
}

fn relative_display(root: &Path, entry: &Path) -> String {
    let rel = entry.strip_prefix(root).unwrap_or(entry);
    rel.components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Debug, Default)]
pub struct RealFs;

impl Fs for RealFs {
    fn read_text(&self, repo_root: &Path, path: &Path) -> Result<String, AdapterError> {
        let target = join_from_repo_root(repo_root, path);
        fs::read_to_string(&target).map_err(|err| AdapterError::Io {
            op: "read_to_string",
            path: target,
            detail: err.to_string(),
        })
    }

    fn exists(&self, repo_root: &Path, path: &Path) -> bool {
        join_from_repo_root(repo_root, path).exists()
    }

    #[cfg(unix)]
    fn is_executable(&self, repo_root: &Path, path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;
        let target = join_from_repo_root(repo_root, path);
        target.is_file()
            && fs::metadata(&target)
                .map(|meta| meta.permissions().mode() & 0o111 != 0)
                .unwrap_or(false)
    }

    #[cfg(not(unix))]
    fn is_executable(&self, _repo_root: &Path, _path: &Path) -> bool {
        false
    }

    fn walk(&self, repo_root: &Path) -> Result<Vec<String>, AdapterError> {
        let mut out = Vec::new();
        let mut stack = vec![repo_root.to_path_buf()];
        while let Some(dir) = stack.pop() {
            let entries = fs::read_dir(&dir).map_err(|err| AdapterError::Io {
                op: "read_dir",
                path: dir.clone(),
                detail: err.to_string(),
            })?;
            for entry in entries {
                let entry = entry.map_err(|err| AdapterError::Io {
                    op: "read_dir",
                    path: dir.clone(),
                    detail: err.to_string(),
                })?;
                let path = entry.path();
                if path.file_name().is_some_and(|name| name == ".git") {
                    continue;
                }
                out.push(relative_display(repo_root, &path));
                if path.is_dir() && !path.is_symlink() {
                    stack.push(path);
                }
            }
        }
        out.sort();
        Ok(out)
    }
}

#[derive(Debug, Default)]
pub struct RealGit;

impl Git for RealGit {
    fn tracked_files(&self, repo_root: &Path) -> Result<Vec<String>, AdapterError> {
        let output = std::process::Command::new("git")
            .args(["ls-files"])
            .current_dir(repo_root)
            .output()
            .map_err(|err| AdapterError::Git {
                detail: err.to_string(),
            })?;
        if !output.status.success() {
            return Err(AdapterError::Git {
                detail: format!("git ls-files exited with {}", output.status),
            });
        }
        let text = String::from_utf8(output.stdout).map_err(|err| AdapterError::Git {
            detail: err.to_string(),
        })?;
        Ok(text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.trim().to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn walk_lists_files_and_directories_sorted() {
        let repo = TempDir::new().expect("tempdir");
        fs::create_dir_all(repo.path().join("docs/deep")).expect("mkdir");
        fs::create_dir_all(repo.path().join(".git/objects")).expect("mkdir");
        fs::write(repo.path().join("README.md"), "hello").expect("write");
        fs::write(repo.path().join("docs/guide.md"), "guide").expect("write");

        let listing = RealFs.walk(repo.path()).expect("walk");
        assert_eq!(
            listing,
            vec![
                "README.md".to_string(),
                "docs".to_string(),
                "docs/deep".to_string(),
                "docs/guide.md".to_string(),
            ]
        );
    }

    #[test]
    fn walk_fails_loud_on_missing_root() {
        let repo = TempDir::new().expect("tempdir");
        let missing = repo.path().join("gone");
        let err = RealFs.walk(&missing).expect_err("must fail");
        assert!(matches!(err, AdapterError::Io { op: "read_dir", .. }));
    }

    #[test]
    fn read_text_reports_io_error() {
        let repo = TempDir::new().expect("tempdir");
        let err = RealFs
            .read_text(repo.path(), Path::new("absent.txt"))
            .expect_err("must fail");
        assert!(matches!(err, AdapterError::Io { .. }));
    }

    #[test]
    fn tracked_files_fails_outside_a_repository() {
        let dir = TempDir::new().expect("tempdir");
        assert!(RealGit.tracked_files(dir.path()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn executable_bit_detection() {
        use std::os::unix::fs::PermissionsExt;
        let repo = TempDir::new().expect("tempdir");
        let script = repo.path().join("run.sh");
        fs::write(&script, "#!/bin/sh\n").expect("write");
        let mut perms = fs::metadata(&script).expect("metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script, perms).expect("chmod");

        assert!(RealFs.is_executable(repo.path(), Path::new("run.sh")));
        fs::write(repo.path().join("notes.txt"), "plain").expect("write");
        assert!(!RealFs.is_executable(repo.path(), Path::new("notes.txt")));
    }
}
