// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use hookguard_adapters::Fs;
use hookguard_model::{Severity, Violation};

use crate::CheckError;

pub const DEFAULT_MAX_LINES: usize = 30;

pub fn check_line_count(
    fs: &dyn Fs,
    repo_root: &Path,
    files: &[PathBuf],
    max_lines: usize,
) -> Result<Vec<Violation>, CheckError> {
    let mut violations = Vec::new();
    for file in files {
        let text = fs
            .read_text(repo_root, file)
            .map_err(|err| CheckError::Failed(err.to_string()))?;
        let count = text.lines().count();
        if count > max_lines {
            violations.push(Violation {
                code: "LINE_COUNT_EXCEEDED".to_string(),
                message: format!("{} ({count} lines) exceeds {max_lines} lines", file.display()),
                hint: Some("split the file or raise the limit explicitly".to_string()),
                path: Some(file.display().to_string()),
                line: None,
                severity: Severity::Error,
            });
        }
    }
    Ok(violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeFs;

    #[test]
    fn file_within_limit_passes() {
        let fs = FakeFs::with_files(&[("short.sh", "a\nb\nc\n")]);
        let violations =
            check_line_count(&fs, Path::new("/repo"), &[PathBuf::from("short.sh")], 3)
                .expect("check");
        assert!(violations.is_empty());
    }

    #[test]
    fn file_over_limit_is_flagged_with_counts() {
        let fs = FakeFs::with_files(&[("long.sh", "a\nb\nc\nd\n")]);
        let violations =
            check_line_count(&fs, Path::new("/repo"), &[PathBuf::from("long.sh")], 3)
                .expect("check");
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("(4 lines) exceeds 3 lines"));
    }

    #[test]
    fn unreadable_file_fails_the_check() {
        let fs = FakeFs::with_files(&[]);
        let err = check_line_count(&fs, Path::new("/repo"), &[PathBuf::from("gone")], 3)
            .expect_err("must fail");
        assert!(matches!(err, CheckError::Failed(_)));
    }
}
