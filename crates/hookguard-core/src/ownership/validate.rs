// SPDX-License-Identifier: Apache-2.0

//! Consistency Validator: dangling rules, duplicate patterns, and rules
//! made redundant by an ancestor with the same owners.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use hookguard_adapters::Fs;
use hookguard_model::{OwnerId, OwnershipRule, RuleSet, Severity, Violation};
use serde::Serialize;

use super::policy::PolicyViolation;
use super::resolve::{path_segments, pattern_covers};
use super::OwnershipError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingRule {
    pub pattern: String,
    pub source_line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicatePattern {
    pub pattern: String,
    pub lines: Vec<u32>,
    /// False when the repeated pattern carries conflicting owner sets.
    pub same_owners: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedundantRule {
    pub pattern: String,
    pub source_line: u32,
    pub ancestor_pattern: String,
    pub ancestor_line: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub dangling_rules: Vec<DanglingRule>,
    pub duplicate_patterns: Vec<DuplicatePattern>,
    pub redundant_rules: Vec<RedundantRule>,
    pub disallowed_owner_violations: Vec<PolicyViolation>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.dangling_rules.is_empty()
            && self.duplicate_patterns.is_empty()
            && self.redundant_rules.is_empty()
            && self.disallowed_owner_violations.is_empty()
    }

    /// Flatten into report violations, one line per finding. Structural
    /// findings point back at `rule_file`, the ownership-declaration file.
    pub fn violations(&self, rule_file: &str) -> Vec<Violation> {
        let mut out = Vec::new();
        for dangling in &self.dangling_rules {
            out.push(Violation {
                code: "OWNERSHIP_PATTERN_MATCHES_NOTHING".to_string(),
                message: format!(
                    "pattern `{}` matches no existing file or folder",
                    dangling.pattern
                ),
                hint: Some("remove the rule if no longer needed".to_string()),
                path: Some(rule_file.to_string()),
                line: Some(dangling.source_line),
                severity: Severity::Error,
            });
        }
        for duplicate in &self.duplicate_patterns {
            let (code, detail) = if duplicate.same_owners {
                ("OWNERSHIP_DUPLICATE_RULE", "repeats")
            } else {
                ("OWNERSHIP_CONFLICTING_RULE", "repeats with different owners")
            };
            let lines = duplicate
                .lines
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            out.push(Violation {
                code: code.to_string(),
                message: format!(
                    "pattern `{}` {detail} (lines {lines})",
                    duplicate.pattern
                ),
                hint: Some("remove the repetitions".to_string()),
                path: Some(rule_file.to_string()),
                line: duplicate.lines.first().copied(),
                severity: Severity::Error,
            });
        }
        for redundant in &self.redundant_rules {
            out.push(Violation {
                code: "OWNERSHIP_REDUNDANT_RULE".to_string(),
                message: format!(
                    "rule `{}` is redundant: a more generic pattern with the same owners is on line {}",
                    redundant.pattern, redundant.ancestor_line
                ),
                hint: Some("remove the redundant rule".to_string()),
                path: Some(rule_file.to_string()),
                line: Some(redundant.source_line),
                severity: Severity::Error,
            });
        }
        for violation in &self.disallowed_owner_violations {
            out.push(violation.to_violation());
        }
        crate::report::sorted_violations(out)
    }
}

fn owner_set(rule: &OwnershipRule) -> BTreeSet<&OwnerId> {
    rule.owners.iter().collect()
}

/// Pattern identity for duplicate grouping: a trailing slash does not make
/// a different rule target.
fn normalized_pattern(pattern: &str) -> &str {
    if pattern.len() > 1 {
        pattern.trim_end_matches('/')
    } else {
        pattern
    }
}

fn detect_dangling(
    ruleset: &RuleSet,
    repo_root: &Path,
    fs: &dyn Fs,
    tree: &[String],
) -> Vec<DanglingRule> {
    let mut out = Vec::new();
    for rule in ruleset.rules() {
        if rule.pattern == "*" {
            continue;
        }
        let covered = if rule.pattern.contains('*') || !rule.pattern.starts_with('/') {
            tree.iter().any(|path| pattern_covers(&rule.pattern, path))
        } else {
            // Wildcard-free anchored rule: existence is enough, directory
            // contents need not be enumerated.
            let target = normalized_pattern(&rule.pattern).trim_start_matches('/');
            fs.exists(repo_root, Path::new(target))
        };
        if !covered {
            out.push(DanglingRule {
                pattern: rule.pattern.clone(),
                source_line: rule.source_line,
            });
        }
    }
    out
}

fn detect_duplicates(ruleset: &RuleSet) -> Vec<DuplicatePattern> {
    let mut groups: BTreeMap<&str, Vec<&OwnershipRule>> = BTreeMap::new();
    for rule in ruleset.rules() {
        groups
            .entry(normalized_pattern(&rule.pattern))
            .or_default()
            .push(rule);
    }
    groups
        .into_iter()
        .filter(|(_, rules)| rules.len() > 1)
        .map(|(pattern, rules)| {
            let first = owner_set(rules[0]);
            let same_owners = rules.iter().all(|rule| owner_set(rule) == first);
            DuplicatePattern {
                pattern: pattern.to_string(),
                lines: rules.iter().map(|rule| rule.source_line).collect(),
                same_owners,
            }
        })
        .collect()
}

#[derive(Default)]
struct TrieNode {
    children: BTreeMap<String, TrieNode>,
    owners: Option<BTreeSet<OwnerId>>,
    pattern: String,
    source_line: u32,
}

/// Trie key: anchored patterns live under a synthetic `/` segment so that
/// `/docs` and an unanchored `docs` never collide.
fn trie_segments(pattern: &str) -> Vec<String> {
    let mut segments = Vec::new();
    if pattern.starts_with('/') {
        segments.push("/".to_string());
    }
    segments.extend(path_segments(pattern).iter().map(|s| s.to_string()));
    segments
}

fn detect_redundant(ruleset: &RuleSet) -> Vec<RedundantRule> {
    let mut root = TrieNode::default();
    for rule in ruleset.rules() {
        let mut node = &mut root;
        for segment in trie_segments(&rule.pattern) {
            node = node.children.entry(segment).or_default();
        }
        // A repeated pattern lands on an occupied node; the later rule
        // wins, exactly as it does during resolution. The repetition
        // itself is reported by duplicate detection.
        node.owners = Some(rule.owners.iter().cloned().collect());
        node.pattern = rule.pattern.clone();
        node.source_line = rule.source_line;
    }

    fn search(node: &TrieNode, ancestor: Option<&TrieNode>, out: &mut Vec<RedundantRule>) {
        let mut next_ancestor = ancestor;
        if let Some(owners) = &node.owners {
            if let Some(above) = ancestor {
                if above.owners.as_ref() == Some(owners) {
                    out.push(RedundantRule {
                        pattern: node.pattern.clone(),
                        source_line: node.source_line,
                        ancestor_pattern: above.pattern.clone(),
                        ancestor_line: above.source_line,
                    });
                }
            }
            next_ancestor = Some(node);
        }
        for child in node.children.values() {
            search(child, next_ancestor, out);
        }
    }

    let mut out = Vec::new();
    search(&root, None, &mut out);
    out.sort_by_key(|entry| entry.source_line);
    out
}

/// Read-only sweep of the rule set against the live tree. The designated
/// -owner section of the report is filled in separately by the policy
/// check. Deterministic: an unchanged tree and rule set always produce an
/// identical report.
pub fn validate(
    ruleset: &RuleSet,
    repo_root: &Path,
    fs: &dyn Fs,
) -> Result<ValidationReport, OwnershipError> {
    let tree = fs.walk(repo_root)?;
    Ok(ValidationReport {
        dangling_rules: detect_dangling(ruleset, repo_root, fs, &tree),
        duplicate_patterns: detect_duplicates(ruleset),
        redundant_rules: detect_redundant(ruleset),
        disallowed_owner_violations: Vec::new(),
    })
}
