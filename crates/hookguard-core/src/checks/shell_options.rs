// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use hookguard_adapters::Fs;
use hookguard_model::{Severity, Violation};
use regex::Regex;

use crate::CheckError;

pub const BASH_OPTIONS: &str = "set -euxo pipefail";
pub const SH_OPTIONS: &str = "set -eux";
const NOLINT_MARKER: &str = "# nolint(set_options)";

enum ShellKind {
    Bash,
    Sh,
    Unknown,
    /// Not executable and no recognized shebang: not ours to judge.
    Ignored,
}

fn classify(
    fs: &dyn Fs,
    repo_root: &Path,
    file: &Path,
    text: &str,
    shebang: &Regex,
) -> ShellKind {
    let first_line = text.lines().next().unwrap_or("");
    let interpreter = shebang
        .captures(first_line)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str());
    match interpreter {
        Some("bash") => ShellKind::Bash,
        Some("sh") => ShellKind::Sh,
        _ if file.extension().is_some_and(|ext| ext == "bash") => ShellKind::Bash,
        _ if !fs.is_executable(repo_root, file) => ShellKind::Ignored,
        _ => ShellKind::Unknown,
    }
}

fn sets_options_or_is_nolint(line: &str, expected: &str) -> bool {
    let trimmed = line.trim();
    trimmed == expected || trimmed == NOLINT_MARKER
}

/// Bash scripts must set `-euxo pipefail`, sh scripts `-eux`; the nolint
/// marker opts a file out. Executable files with an unrecognized shell are
/// violations of their own.
pub fn check_shell_options(
    fs: &dyn Fs,
    repo_root: &Path,
    files: &[PathBuf],
) -> Result<Vec<Violation>, CheckError> {
    let shebang =
        Regex::new(r"^#!\S*/(?:env\s+)?(\w+)").map_err(|err| CheckError::Failed(err.to_string()))?;
    let mut violations = Vec::new();
    for file in files {
        let text = fs
            .read_text(repo_root, file)
            .map_err(|err| CheckError::Failed(err.to_string()))?;
        let expected = match classify(fs, repo_root, file, &text, &shebang) {
            ShellKind::Bash => BASH_OPTIONS,
            ShellKind::Sh => SH_OPTIONS,
            ShellKind::Ignored => continue,
            ShellKind::Unknown => {
                violations.push(Violation {
                    code: "SHELL_UNKNOWN_SHEBANG".to_string(),
                    message: format!(
                        "unknown shell in {}: `{}`",
                        file.display(),
                        text.lines().next().unwrap_or("").trim()
                    ),
                    hint: Some(
                        "pair this hook with a check that enforces shebangs on executables"
                            .to_string(),
                    ),
                    path: Some(file.display().to_string()),
                    line: Some(1),
                    severity: Severity::Error,
                });
                continue;
            }
        };
        if !text
            .lines()
            .any(|line| sets_options_or_is_nolint(line, expected))
        {
            violations.push(Violation {
                code: "SHELL_OPTIONS_MISSING".to_string(),
                message: format!("{} does not contain `{expected}`", file.display()),
                hint: Some(format!("add `{expected}` near the top of the script")),
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

    fn run(fs: &FakeFs, file: &str) -> Vec<Violation> {
        check_shell_options(fs, Path::new("/repo"), &[PathBuf::from(file)]).expect("check")
    }

    #[test]
    fn bash_script_with_options_passes() {
        let fs = FakeFs::with_files(&[("run.sh", "#!/bin/bash\nset -euxo pipefail\necho ok\n")]);
        assert!(run(&fs, "run.sh").is_empty());
    }

    #[test]
    fn bash_script_missing_options_is_flagged() {
        let fs = FakeFs::with_files(&[("run.sh", "#!/usr/bin/env bash\necho ok\n")]);
        let violations = run(&fs, "run.sh");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, "SHELL_OPTIONS_MISSING");
        assert!(violations[0].message.contains(BASH_OPTIONS));
    }

    #[test]
    fn sh_script_requires_the_shorter_option_set() {
        let fs = FakeFs::with_files(&[("run.sh", "#!/bin/sh\nset -eux\n")]);
        assert!(run(&fs, "run.sh").is_empty());
        let missing = FakeFs::with_files(&[("bad.sh", "#!/bin/sh\necho no\n")]);
        assert!(run(&missing, "bad.sh")[0].message.contains(SH_OPTIONS));
    }

    #[test]
    fn bash_extension_counts_without_shebang() {
        let fs = FakeFs::with_files(&[("lib.bash", "set -euxo pipefail\n")]);
        assert!(run(&fs, "lib.bash").is_empty());
    }

    #[test]
    fn nolint_marker_opts_out() {
        let fs = FakeFs::with_files(&[("run.sh", "#!/bin/bash\n# nolint(set_options)\n")]);
        assert!(run(&fs, "run.sh").is_empty());
    }

    #[test]
    fn executable_with_unknown_shell_is_flagged() {
        let fs = FakeFs::with_files(&[("tool", "#!/usr/bin/python3\nprint()\n")])
            .mark_executable("tool");
        let violations = run(&fs, "tool");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, "SHELL_UNKNOWN_SHEBANG");
    }

    #[test]
    fn non_executable_without_shebang_is_ignored() {
        let fs = FakeFs::with_files(&[("notes.txt", "just text\n")]);
        assert!(run(&fs, "notes.txt").is_empty());
    }
}
