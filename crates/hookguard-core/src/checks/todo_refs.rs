// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use hookguard_adapters::Fs;
use hookguard_model::{Severity, Violation};
use regex::Regex;

use crate::CheckError;

/// A TODO mention in any spelling must carry a ticket reference of the
/// form `TODO(ABC-1234):`. Word boundaries keep identifiers such as
/// `toDouble` from triggering.
pub fn check_todo_refs(
    fs: &dyn Fs,
    repo_root: &Path,
    files: &[PathBuf],
) -> Result<Vec<Violation>, CheckError> {
    let todo_marker =
        Regex::new(r"(?i)\bto[- ]?do\b").map_err(|err| CheckError::Failed(err.to_string()))?;
    let ticket_reference = Regex::new(r"TODO\([A-Z]+-[0-9]+\):")
        .map_err(|err| CheckError::Failed(err.to_string()))?;

    let mut violations = Vec::new();
    for file in files {
        let text = fs
            .read_text(repo_root, file)
            .map_err(|err| CheckError::Failed(err.to_string()))?;
        for (index, line) in text.lines().enumerate() {
            if todo_marker.is_match(line) && !ticket_reference.is_match(line) {
                violations.push(Violation {
                    code: "TODO_MISSING_TICKET_REFERENCE".to_string(),
                    message: format!("`{}`", line.trim()),
                    hint: Some("use the ticket format `TODO(ABC-1234):`".to_string()),
                    path: Some(file.display().to_string()),
                    line: Some(u32::try_from(index + 1).unwrap_or(u32::MAX)),
                    severity: Severity::Error,
                });
            }
        }
    }
    Ok(violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeFs;

    fn run(content: &str) -> Vec<Violation> {
        let fs = FakeFs::with_files(&[("src/main.c", content)]);
        check_todo_refs(
            &fs,
            Path::new("/repo"),
            &[PathBuf::from("src/main.c")],
        )
        .expect("check")
    }

    #[test]
    fn plain_todo_without_ticket_is_flagged() {
        let violations = run("int x;\n// TODO fix this later\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, Some(2));
        assert!(violations[0].message.contains("TODO fix this later"));
    }

    #[test]
    fn spelled_out_variants_are_flagged() {
        assert_eq!(run("// to-do: cleanup\n").len(), 1);
        assert_eq!(run("/* TO DO item */\n").len(), 1);
    }

    #[test]
    fn ticket_reference_passes() {
        assert!(run("// TODO(ABC-1234): tracked work\n").is_empty());
    }

    #[test]
    fn lowercase_ticket_format_is_still_flagged() {
        assert_eq!(run("// todo(abc-1234): wrong case\n").len(), 1);
    }

    #[test]
    fn identifiers_do_not_trigger() {
        assert!(run("double v = toDouble(raw);\n").is_empty());
        assert!(run("tOdometry odom;\n").is_empty());
        assert!(run("int todos_count = 0;\n").is_empty());
    }
}
