// SPDX-License-Identifier: Apache-2.0

//! CODEOWNERS ownership-consistency engine: rule parsing, forge-compatible
//! path resolution, structural validation, and the designated-owner policy.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use hookguard_adapters::{AdapterError, Fs, Git};
use hookguard_model::{OwnerId, RuleSet};

pub mod find_owner;
pub mod policy;
pub mod resolve;
pub mod rules;
pub mod validate;

pub use find_owner::{owners_for_item, render_owner_table, ItemOwners};
pub use policy::{check_designated_owner, PolicyViolation};
pub use resolve::{resolve, ResolvedOwnership};
pub use rules::parse_rules;
pub use validate::{validate, DanglingRule, DuplicatePattern, RedundantRule, ValidationReport};

/// Conventional location of the ownership-declaration file.
pub const DEFAULT_RULE_FILE: &str = ".github/CODEOWNERS";
pub const FALLBACK_RULE_FILE: &str = "CODEOWNERS";

#[derive(Debug)]
pub enum OwnershipError {
    Parse {
        line: u32,
        content: String,
        reason: String,
    },
    MissingRuleFile {
        searched: Vec<PathBuf>,
    },
    MissingItem {
        path: PathBuf,
    },
    Adapter(AdapterError),
}

impl fmt::Display for OwnershipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse {
                line,
                content,
                reason,
            } => write!(f, "malformed ownership rule at line {line}: {reason} (`{content}`)"),
            Self::MissingRuleFile { searched } => {
                let candidates = searched
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "no ownership file found (searched: {candidates})")
            }
            Self::MissingItem { path } => {
                write!(f, "item {} does not exist", path.display())
            }
            Self::Adapter(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for OwnershipError {}

impl From<AdapterError> for OwnershipError {
    fn from(err: AdapterError) -> Self {
        Self::Adapter(err)
    }
}

/// One full `hookguard ownership` invocation.
#[derive(Debug, Clone)]
pub struct OwnershipRequest {
    pub repo_root: PathBuf,
    pub rule_file: Option<PathBuf>,
    pub designated_owner: Option<OwnerId>,
    pub changed_files: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct OwnershipOutcome {
    /// Repo-relative location of the ownership file that was checked.
    pub rule_file: String,
    pub report: ValidationReport,
    /// Set when the designated-owner policy did not run.
    pub policy_skipped: Option<String>,
}

/// Normalize to a repo-relative `/`-separated string. Paths outside the
/// repository are rendered as given.
pub(crate) fn repo_relative(repo_root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(repo_root).unwrap_or(path);
    rel.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn locate_rule_file(
    fs: &dyn Fs,
    repo_root: &Path,
    explicit: Option<&Path>,
) -> Result<String, OwnershipError> {
    if let Some(path) = explicit {
        let rel = repo_relative(repo_root, path);
        if fs.exists(repo_root, Path::new(&rel)) {
            return Ok(rel);
        }
        return Err(OwnershipError::MissingRuleFile {
            searched: vec![path.to_path_buf()],
        });
    }
    for candidate in [DEFAULT_RULE_FILE, FALLBACK_RULE_FILE] {
        if fs.exists(repo_root, Path::new(candidate)) {
            return Ok(candidate.to_string());
        }
    }
    Err(OwnershipError::MissingRuleFile {
        searched: vec![
            PathBuf::from(DEFAULT_RULE_FILE),
            PathBuf::from(FALLBACK_RULE_FILE),
        ],
    })
}

/// Locate and parse the ownership file. Returns its repo-relative location
/// together with the rule set.
pub fn load_rules(
    fs: &dyn Fs,
    repo_root: &Path,
    rule_file: Option<&Path>,
) -> Result<(String, RuleSet), OwnershipError> {
    let located = locate_rule_file(fs, repo_root, rule_file)?;
    let text = fs.read_text(repo_root, Path::new(&located))?;
    let ruleset = parse_rules(&text)?;
    Ok((located, ruleset))
}

/// Parse the ownership file, run the consistency validator, then the
/// designated-owner policy. Violations are accumulated exhaustively; only
/// parse and filesystem errors abort early.
///
/// The policy check covers the changed files when a non-empty set is given
/// and the ownership file itself is not among them; otherwise it covers
/// every git-tracked file, since an edit to the rules can reassign paths
/// that were not touched in the same commit.
pub fn run_ownership_check(
    fs: &dyn Fs,
    git: &dyn Git,
    request: &OwnershipRequest,
) -> Result<OwnershipOutcome, OwnershipError> {
    let (rule_file, ruleset) =
        load_rules(fs, &request.repo_root, request.rule_file.as_deref())?;

    let mut report = validate(&ruleset, &request.repo_root, fs)?;

    let mut policy_skipped = None;
    match &request.designated_owner {
        None => {
            policy_skipped = Some("no designated owner configured".to_string());
        }
        Some(owner) => {
            let changed: Vec<String> = request
                .changed_files
                .iter()
                .map(|path| repo_relative(&request.repo_root, path))
                .collect();
            let paths = if changed.is_empty() || changed.iter().any(|path| path == &rule_file) {
                git.tracked_files(&request.repo_root)?
            } else {
                changed
            };
            report.disallowed_owner_violations =
                check_designated_owner(&ruleset, &paths, &rule_file, owner);
        }
    }

    Ok(OwnershipOutcome {
        rule_file,
        report,
        policy_skipped,
    })
}
