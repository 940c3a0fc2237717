// SPDX-License-Identifier: Apache-2.0

//! Designated-Owner Policy Check: the owner of the ownership file must own
//! nothing except that file.

use hookguard_model::{OwnerId, RuleSet, Severity, Violation};
use serde::Serialize;

use super::resolve::resolve;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyViolation {
    DisallowedOwnership {
        path: String,
        owner: OwnerId,
        pattern: String,
        source_line: u32,
    },
    OwnerFileNotOwned {
        owner_file: String,
        designated_owner: OwnerId,
    },
}

impl PolicyViolation {
    pub fn to_violation(&self) -> Violation {
        match self {
            Self::DisallowedOwnership {
                path,
                owner,
                pattern,
                source_line,
            } => Violation {
                code: "OWNERSHIP_DISALLOWED_OWNER".to_string(),
                message: format!(
                    "{path} should not be owned by {owner} (rule `{pattern}`)"
                ),
                hint: Some("find a different owner for this path".to_string()),
                path: Some(path.clone()),
                line: Some(*source_line),
                severity: Severity::Error,
            },
            Self::OwnerFileNotOwned {
                owner_file,
                designated_owner,
            } => Violation {
                code: "OWNERSHIP_OWNER_FILE_NOT_OWNED".to_string(),
                message: format!(
                    "{owner_file} is not owned by {designated_owner}; the ownership file must name its designated owner"
                ),
                hint: Some("add a rule assigning the ownership file to its designated owner".to_string()),
                path: Some(owner_file.clone()),
                line: None,
                severity: Severity::Error,
            },
        }
    }
}

/// For every path except `owner_file`, the designated owner must not appear
/// in the resolved owners; `owner_file` itself must resolve to a rule that
/// names the designated owner. Paths are repo-relative.
pub fn check_designated_owner(
    ruleset: &RuleSet,
    paths: &[String],
    owner_file: &str,
    designated_owner: &OwnerId,
) -> Vec<PolicyViolation> {
    let mut violations = Vec::new();
    for path in paths {
        if path == owner_file {
            continue;
        }
        if let Some(rule) = resolve(ruleset, path).matching_rule {
            if rule.has_owner(designated_owner) {
                violations.push(PolicyViolation::DisallowedOwnership {
                    path: path.clone(),
                    owner: designated_owner.clone(),
                    pattern: rule.pattern.clone(),
                    source_line: rule.source_line,
                });
            }
        }
    }

    let owned = resolve(ruleset, owner_file)
        .matching_rule
        .is_some_and(|rule| rule.has_owner(designated_owner));
    if !owned {
        violations.push(PolicyViolation::OwnerFileNotOwned {
            owner_file: owner_file.to_string(),
            designated_owner: designated_owner.clone(),
        });
    }
    violations
}
