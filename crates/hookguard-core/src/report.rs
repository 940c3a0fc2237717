// SPDX-License-Identifier: Apache-2.0

use hookguard_model::{CheckReport, CheckStatus, Violation};

/// Stable ordering so reports are diffable across runs.
pub fn sorted_violations(mut violations: Vec<Violation>) -> Vec<Violation> {
    violations.sort_by(|a, b| {
        a.code
            .cmp(&b.code)
            .then(a.message.cmp(&b.message))
            .then(a.path.cmp(&b.path))
            .then(a.line.cmp(&b.line))
    });
    violations
}

/// One line per violation, then a trailing summary line. A clean report
/// renders to the summary alone.
pub fn render_text(report: &CheckReport) -> String {
    let mut lines = Vec::new();
    for violation in &report.violations {
        let location = match (&violation.path, violation.line) {
            (Some(path), Some(line)) => format!(" [{path}:{line}]"),
            (Some(path), None) => format!(" [{path}]"),
            (None, Some(line)) => format!(" [line {line}]"),
            (None, None) => String::new(),
        };
        lines.push(format!(
            "{}: {}{location}",
            violation.code, violation.message
        ));
        if let Some(hint) = &violation.hint {
            lines.push(format!("  hint: {hint}"));
        }
    }
    let status = match report.status {
        CheckStatus::Pass => "pass",
        CheckStatus::Fail => "fail",
        CheckStatus::Skip => "skip",
        CheckStatus::Error => "error",
    };
    lines.push(format!(
        "summary: hook={} status={status} violations={}",
        report.hook,
        report.violations.len()
    ));
    lines.join("\n")
}

pub fn render_json(report: &CheckReport) -> Result<String, String> {
    serde_json::to_string_pretty(report).map_err(|err| err.to_string())
}

pub fn render_jsonl(report: &CheckReport) -> Result<String, String> {
    let mut lines = Vec::new();
    for violation in &report.violations {
        lines.push(serde_json::to_string(violation).map_err(|err| err.to_string())?);
    }
    Ok(lines.join("\n"))
}
