#![forbid(unsafe_code)]

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

fn is_lower_kebab(input: &str) -> bool {
    !input.is_empty()
        && input
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Identifier of one hygiene check, e.g. `ownership` or `todo-refs`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HookId(String);

impl HookId {
    pub fn parse(value: &str) -> Result<Self, String> {
        let raw = value.trim();
        if raw.is_empty() {
            return Err("hook id cannot be empty".to_string());
        }
        if !is_lower_kebab(raw) {
            return Err(format!(
                "invalid hook id `{raw}`: expected lowercase kebab-case"
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owner identifier as written in the ownership file, e.g. `@myorg/some-team`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn parse(value: &str) -> Result<Self, String> {
        let raw = value.trim();
        if raw.is_empty() {
            return Err("owner cannot be empty".to_string());
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(format!("invalid owner `{raw}`: contains whitespace"));
        }
        if raw.starts_with('#') {
            return Err(format!("invalid owner `{raw}`: looks like a comment"));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the ownership file: a path pattern and its owners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipRule {
    pub pattern: String,
    pub owners: Vec<OwnerId>,
    pub source_line: u32,
}

impl OwnershipRule {
    pub fn has_owner(&self, owner: &OwnerId) -> bool {
        self.owners.iter().any(|candidate| candidate == owner)
    }
}

/// Ordered rule collection, insertion order = file order. Immutable once parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: Vec<OwnershipRule>,
}

impl RuleSet {
    pub fn from_rules(rules: Vec<OwnershipRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[OwnershipRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub code: String,
    pub message: String,
    pub hint: Option<String>,
    pub path: Option<String>,
    pub line: Option<u32>,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
    Skip,
    Error,
}

/// Outcome of a single check invocation. Built fresh per run, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub hook: HookId,
    pub repo_root: String,
    pub status: CheckStatus,
    pub skip_reason: Option<String>,
    pub violations: Vec<Violation>,
}

impl CheckReport {
    pub fn from_violations(hook: HookId, repo_root: String, violations: Vec<Violation>) -> Self {
        let status = if violations.is_empty() {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        };
        Self {
            hook,
            repo_root,
            status,
            skip_reason: None,
            violations,
        }
    }

    pub fn skipped(hook: HookId, repo_root: String, reason: String) -> Self {
        Self {
            hook,
            repo_root,
            status: CheckStatus::Skip,
            skip_reason: Some(reason),
            violations: Vec::new(),
        }
    }
}

/// Exit code contract: clean run is silent zero, violations are 2, a check
/// that could not run at all is 3.
pub fn exit_code_for_report(report: &CheckReport) -> i32 {
    match report.status {
        CheckStatus::Pass | CheckStatus::Skip => 0,
        CheckStatus::Fail => 2,
        CheckStatus::Error => 3,
    }
}

pub fn report_json_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "hookguard check report",
        "type": "object",
        "required": ["hook", "repo_root", "status", "violations"],
        "properties": {
            "hook": {"type": "string"},
            "repo_root": {"type": "string"},
            "status": {"type": "string", "enum": ["pass", "fail", "skip", "error"]},
            "skip_reason": {"type": ["string", "null"]},
            "violations": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["code", "message", "severity"],
                    "properties": {
                        "code": {"type": "string"},
                        "message": {"type": "string"},
                        "hint": {"type": ["string", "null"]},
                        "path": {"type": ["string", "null"]},
                        "line": {"type": ["integer", "null"], "minimum": 1},
                        "severity": {"type": "string", "enum": ["info", "warn", "error"]}
                    }
                }
            }
        }
    })
}
