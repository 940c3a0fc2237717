// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod cli;

use std::path::PathBuf;

use clap::Parser;
use hookguard_adapters::{RealFs, RealGit};
use hookguard_core::checks::{
    check_exclude_paths, check_line_count, check_shell_options, check_todo_refs,
};
use hookguard_core::logging::{render_log, LogFormat, LogLevel, LogRecord};
use hookguard_core::ownership::{
    load_rules, owners_for_item, render_owner_table, run_ownership_check, OwnershipRequest,
};
use hookguard_core::{render_json, render_jsonl, render_text, sorted_violations, CheckError};
use hookguard_model::{
    exit_code_for_report, CheckReport, CheckStatus, HookId, OwnerId, Severity, Violation,
};

use crate::cli::{Cli, Command, FormatArg};

fn resolve_repo_root(arg: Option<PathBuf>) -> Result<PathBuf, String> {
    match arg {
        Some(path) => path
            .canonicalize()
            .map_err(|err| format!("cannot resolve repo root {}: {err}", path.display())),
        None => std::env::current_dir().map_err(|err| err.to_string()),
    }
}

fn write_output_if_requested(out: Option<PathBuf>, rendered: &str) -> Result<(), String> {
    if let Some(path) = out {
        std::fs::write(&path, format!("{rendered}\n"))
            .map_err(|err| format!("cannot write {}: {err}", path.display()))?;
    }
    Ok(())
}

/// A check that could not run still produces a report, so the exit-code
/// contract stays uniform across subcommands.
fn execution_error_report(hook: HookId, repo_root: String, detail: String) -> CheckReport {
    CheckReport {
        hook,
        repo_root,
        status: CheckStatus::Error,
        skip_reason: None,
        violations: vec![Violation {
            code: "CHECK_EXECUTION_ERROR".to_string(),
            message: detail,
            hint: Some("fix the underlying error and rerun".to_string()),
            path: None,
            line: None,
            severity: Severity::Error,
        }],
    }
}

/// A clean text report renders to nothing: a passing hook is silent unless
/// verbose output was requested.
fn render_report(report: &CheckReport, format: FormatArg, verbose: bool) -> Result<String, String> {
    match format {
        FormatArg::Text => {
            if report.status == CheckStatus::Pass && !verbose {
                Ok(String::new())
            } else {
                Ok(render_text(report))
            }
        }
        FormatArg::Json => render_json(report),
        FormatArg::Jsonl => render_jsonl(report),
    }
}

fn finish_report(
    report: &CheckReport,
    format: FormatArg,
    out: Option<PathBuf>,
    verbose: bool,
) -> Result<(String, i32), String> {
    let rendered = render_report(report, format, verbose)?;
    write_output_if_requested(out, &rendered)?;
    Ok((rendered, exit_code_for_report(report)))
}

fn log_to_stderr(level: LogLevel, code: &str, message: &str) {
    let record = LogRecord::new(level, code, message);
    if let Ok(line) = render_log(&record, LogFormat::Human) {
        eprintln!("{line}");
    }
}

fn check_report_from(
    hook: HookId,
    repo_root: String,
    result: Result<Vec<Violation>, CheckError>,
) -> CheckReport {
    match result {
        Ok(violations) => {
            CheckReport::from_violations(hook, repo_root, sorted_violations(violations))
        }
        Err(err) => execution_error_report(hook, repo_root, err.to_string()),
    }
}

fn dispatch(cli: Cli) -> Result<(String, i32), String> {
    let repo_root = resolve_repo_root(cli.repo_root)?;
    let root_display = repo_root.display().to_string();
    match cli.command {
        Command::Ownership {
            codeowners_owner,
            codeowners_file,
            format,
            out,
            files,
        } => {
            let hook = HookId::parse("ownership")?;
            let designated_owner = codeowners_owner
                .as_deref()
                .map(OwnerId::parse)
                .transpose()?;
            let request = OwnershipRequest {
                repo_root: repo_root.clone(),
                rule_file: codeowners_file,
                designated_owner,
                changed_files: files,
            };
            let report = match run_ownership_check(&RealFs, &RealGit, &request) {
                Ok(outcome) => {
                    if cli.verbose {
                        if let Some(reason) = &outcome.policy_skipped {
                            log_to_stderr(LogLevel::Info, "policy_skipped", reason);
                        }
                    }
                    CheckReport::from_violations(
                        hook,
                        root_display,
                        outcome.report.violations(&outcome.rule_file),
                    )
                }
                Err(err) => execution_error_report(hook, root_display, err.to_string()),
            };
            finish_report(&report, format, out, cli.verbose)
        }
        Command::FindOwner {
            item,
            level,
            format,
            out,
        } => {
            let (_, ruleset) =
                load_rules(&RealFs, &repo_root, None).map_err(|err| err.to_string())?;
            let rows = owners_for_item(&ruleset, &RealFs, &repo_root, &item, level)
                .map_err(|err| err.to_string())?;
            let rendered = match format {
                FormatArg::Text => render_owner_table(&rows),
                FormatArg::Json => {
                    serde_json::to_string_pretty(&rows).map_err(|err| err.to_string())?
                }
                FormatArg::Jsonl => rows
                    .iter()
                    .map(|row| serde_json::to_string(row).map_err(|err| err.to_string()))
                    .collect::<Result<Vec<_>, String>>()?
                    .join("\n"),
            };
            write_output_if_requested(out, &rendered)?;
            Ok((rendered, 0))
        }
        Command::TodoRefs { format, out, files } => {
            let hook = HookId::parse("todo-refs")?;
            let result = check_todo_refs(&RealFs, &repo_root, &files);
            let report = check_report_from(hook, root_display, result);
            finish_report(&report, format, out, cli.verbose)
        }
        Command::LineCount {
            max_lines,
            format,
            out,
            files,
        } => {
            let hook = HookId::parse("line-count")?;
            let result = check_line_count(&RealFs, &repo_root, &files, max_lines);
            let report = check_report_from(hook, root_display, result);
            finish_report(&report, format, out, cli.verbose)
        }
        Command::ShellOptions { format, out, files } => {
            let hook = HookId::parse("shell-options")?;
            let result = check_shell_options(&RealFs, &repo_root, &files);
            let report = check_report_from(hook, root_display, result);
            finish_report(&report, format, out, cli.verbose)
        }
        Command::ExcludePaths { format, out } => {
            let hook = HookId::parse("exclude-paths")?;
            let result = check_exclude_paths(&RealFs, &repo_root);
            let report = check_report_from(hook, root_display, result);
            finish_report(&report, format, out, cli.verbose)
        }
    }
}

fn run(cli: Cli) -> i32 {
    let quiet = cli.quiet;
    match dispatch(cli) {
        Ok((rendered, code)) => {
            if !quiet && !rendered.is_empty() {
                if code == 0 {
                    println!("{rendered}");
                } else {
                    eprintln!("{rendered}");
                }
            }
            code
        }
        Err(err) => {
            eprintln!("hookguard: {err}");
            1
        }
    }
}

fn main() {
    std::process::exit(run(Cli::parse()));
}
