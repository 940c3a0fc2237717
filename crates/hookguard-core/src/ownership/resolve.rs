// SPDX-License-Identifier: Apache-2.0

//! Path Resolver: forge-compatible ownership resolution. Pure, no I/O.
//!
//! Among all rules covering a path, the winner has the greatest
//! specificity (segment count, then pattern character length); an exact
//! tie goes to the rule declared later in the file.

use hookguard_model::{OwnerId, OwnershipRule, RuleSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOwnership<'a> {
    pub path: String,
    pub matching_rule: Option<&'a OwnershipRule>,
}

pub(crate) fn path_segments(value: &str) -> Vec<&str> {
    value.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// Trailing `/` or an extension-free last segment means the pattern covers
/// a directory and everything beneath it. A dot in position zero (hidden
/// files like `.github`) does not count as an extension.
fn is_directory_scope(pattern: &str) -> bool {
    if pattern.ends_with('/') {
        return true;
    }
    match path_segments(pattern).last() {
        Some(last) => !last.chars().skip(1).any(|c| c == '.'),
        None => true,
    }
}

/// Single-segment wildcard match: `*` stands for any run of characters
/// within the segment, never crossing a `/`.
fn segment_matches(pattern: &str, value: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    if !pattern.contains('*') {
        return pattern == value;
    }
    let parts: Vec<&str> = pattern.split('*').collect();
    let mut cursor = 0usize;
    for (idx, part) in parts.iter().enumerate() {
        if part.is_empty() {
            continue;
        }
        if idx == 0 {
            if !value.starts_with(part) {
                return false;
            }
            cursor = part.len();
            continue;
        }
        if idx == parts.len() - 1 {
            return value.len() >= cursor + part.len() && value.ends_with(part);
        }
        match value[cursor..].find(part) {
            Some(pos) => cursor += pos + part.len(),
            None => return false,
        }
    }
    true
}

fn segments_match_at(pattern: &[&str], candidate: &[&str], start: usize) -> bool {
    if candidate.len() < start + pattern.len() {
        return false;
    }
    pattern
        .iter()
        .zip(&candidate[start..])
        .all(|(pat, value)| segment_matches(pat, value))
}

/// Whether `pattern` covers `path` (repo-relative, `/`-separated).
///
/// A leading `/` anchors the pattern at the repository root; without it
/// the pattern may match starting at any directory depth. Directory
/// patterns cover the directory itself and everything beneath it; file
/// patterns must line up with the end of the path. The bare `*` covers
/// every path.
pub(crate) fn pattern_covers(pattern: &str, path: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    let anchored = pattern.starts_with('/');
    let dir_scope = is_directory_scope(pattern);
    let pattern_segments = path_segments(pattern);
    if pattern_segments.is_empty() {
        return false;
    }
    let candidate = path_segments(path);
    if anchored {
        segments_match_at(&pattern_segments, &candidate, 0)
            && (dir_scope || candidate.len() == pattern_segments.len())
    } else {
        let max_start = candidate.len().saturating_sub(pattern_segments.len());
        (0..=max_start).any(|start| {
            segments_match_at(&pattern_segments, &candidate, start)
                && (dir_scope || start + pattern_segments.len() == candidate.len())
        })
    }
}

/// Specificity total order: segment count, then pattern character length.
/// The bare wildcard sorts below everything.
pub(crate) fn specificity(pattern: &str) -> (usize, usize) {
    if pattern == "*" {
        return (0, 0);
    }
    (path_segments(pattern).len(), pattern.chars().count())
}

pub fn resolve<'a>(ruleset: &'a RuleSet, path: &str) -> ResolvedOwnership<'a> {
    let mut best: Option<&OwnershipRule> = None;
    for rule in ruleset.rules() {
        if !pattern_covers(&rule.pattern, path) {
            continue;
        }
        best = match best {
            None => Some(rule),
            Some(current) => {
                let challenger = (specificity(&rule.pattern), rule.source_line);
                let incumbent = (specificity(&current.pattern), current.source_line);
                if challenger >= incumbent {
                    Some(rule)
                } else {
                    Some(current)
                }
            }
        };
    }
    ResolvedOwnership {
        path: path.to_string(),
        matching_rule: best,
    }
}

/// Owners of `path`, empty when no rule covers it.
pub fn owners_of<'a>(ruleset: &'a RuleSet, path: &str) -> &'a [OwnerId] {
    resolve(ruleset, path)
        .matching_rule
        .map(|rule| rule.owners.as_slice())
        .unwrap_or(&[])
}
