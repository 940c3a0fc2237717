// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::path::Path;

use hookguard_adapters::Fs;
use hookguard_model::{Severity, Violation};
use serde::Deserialize;

use crate::CheckError;

pub const PRE_COMMIT_CONFIG: &str = ".pre-commit-config.yaml";

#[derive(Debug, Deserialize)]
struct PreCommitConfig {
    #[serde(default)]
    repos: Vec<RepoConfig>,
}

#[derive(Debug, Deserialize)]
struct RepoConfig {
    #[serde(default)]
    hooks: Vec<HookConfig>,
}

#[derive(Debug, Deserialize)]
struct HookConfig {
    id: String,
    #[serde(default)]
    exclude: Option<String>,
}

/// Entries of a verbose-regex exclude block, in declaration order. The
/// conventional layout is `(?x)^(` … `)` with `|`-separated alternatives.
fn exclude_entries(raw: &str) -> Vec<String> {
    raw.replace('\n', "")
        .replace(' ', "")
        .replace("(?x)^(", "")
        .replace('^', "")
        .replace(')', "")
        .split('|')
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Entries that still carry regex metacharacters are patterns, not paths,
/// and are left alone.
fn is_regex_entry(entry: &str) -> bool {
    entry.contains('*') || entry.contains('$') || entry.contains('^')
}

/// Literal exclude entries in `.pre-commit-config.yaml` must exist on disk
/// and must not repeat within a hook.
pub fn check_exclude_paths(fs: &dyn Fs, repo_root: &Path) -> Result<Vec<Violation>, CheckError> {
    let text = fs
        .read_text(repo_root, Path::new(PRE_COMMIT_CONFIG))
        .map_err(|err| CheckError::Failed(err.to_string()))?;
    let config: PreCommitConfig =
        serde_yaml::from_str(&text).map_err(|err| CheckError::Failed(err.to_string()))?;

    let mut violations = Vec::new();
    for repo in &config.repos {
        for hook in &repo.hooks {
            let Some(raw) = &hook.exclude else {
                continue;
            };
            if raw.trim() == "^$" {
                continue;
            }
            let literals: Vec<String> = exclude_entries(raw)
                .into_iter()
                .filter(|entry| !is_regex_entry(entry))
                .collect();

            let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
            for entry in &literals {
                *seen.entry(entry.as_str()).or_default() += 1;
            }
            for (entry, count) in seen {
                if count > 1 {
                    violations.push(Violation {
                        code: "EXCLUDE_PATH_DUPLICATE".to_string(),
                        message: format!("hook {}: `{entry}` is excluded more than once", hook.id),
                        hint: Some(format!("remove the duplicate from {PRE_COMMIT_CONFIG}")),
                        path: Some(entry.to_string()),
                        line: None,
                        severity: Severity::Error,
                    });
                }
            }
            for entry in &literals {
                if !fs.exists(repo_root, Path::new(entry)) {
                    violations.push(Violation {
                        code: "EXCLUDE_PATH_MISSING".to_string(),
                        message: format!("hook {}: `{entry}` does not exist", hook.id),
                        hint: Some(format!("remove the stale exclusion from {PRE_COMMIT_CONFIG}")),
                        path: Some(entry.clone()),
                        line: None,
                        severity: Severity::Error,
                    });
                }
            }
        }
    }
    Ok(violations)
}
