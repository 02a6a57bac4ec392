//! Output rendering for lint, format, and groups commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-item fields and a top-level summary.

use crate::format::FormatResult;
use crate::models::LintResult;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn print_json(value: &JsonVal) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("{} {}", crate::utils::error_prefix(), e),
    }
}

/// Print lint results in the requested format.
pub fn print_lint(res: &LintResult, output: &str) {
    match output {
        "json" => print_json(&compose_lint_json(res)),
        _ => {
            let color = use_colors(output);
            for is in &res.issues {
                let (label, icon) = match is.severity.as_str() {
                    "error" => ("⟦error⟧", "✖"),
                    "warning" | "warn" => ("⟦warn⟧", "▲"),
                    _ => ("⟦info⟧", "◆"),
                };
                let (sev, icon, file) = if color {
                    match is.severity.as_str() {
                        "error" => (label.red().bold().to_string(), icon.red().to_string(), is.file.bold().to_string()),
                        "warning" | "warn" => (
                            label.yellow().bold().to_string(),
                            icon.yellow().to_string(),
                            is.file.bold().to_string(),
                        ),
                        _ => (label.blue().bold().to_string(), icon.blue().to_string(), is.file.bold().to_string()),
                    }
                } else {
                    (label.to_string(), icon.to_string(), is.file.clone())
                };
                let rule = match &is.kind {
                    Some(kind) => format!("{}/{}", is.rule, kind),
                    None => is.rule.clone(),
                };
                println!("{} {} {} {} ❲{}❳ {}", icon, sev, file, is.path, rule, is.message);
            }
            let summary = format!(
                "Summary: errors={} warnings={} infos={} files={} sequences={}",
                res.summary.errors, res.summary.warnings, res.summary.infos, res.summary.files, res.summary.sequences
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print formatting results. When `write` is false, previews and diffs
/// can be emitted; otherwise only file statuses are shown.
pub fn print_format(results: &[FormatResult], output: &str, write: bool, diff: bool, errors: &[String]) {
    match output {
        "json" => print_json(&compose_format_json(results, write, diff, errors)),
        _ => {
            let color = use_colors(output);
            for e in errors {
                eprintln!("{} {}", crate::utils::error_prefix(), e);
            }
            for r in results {
                if !r.changed {
                    if color {
                        println!("{} {}", "no changes:".bright_black(), r.file);
                    } else {
                        println!("no changes: {}", r.file);
                    }
                    continue;
                }
                if write {
                    if color {
                        println!("{} {}", "formatted:".green().bold(), r.file.bold());
                    } else {
                        println!("formatted: {}", r.file);
                    }
                    continue;
                }
                let body = if diff {
                    build_naive_diff(r.original.as_deref(), r.preview.as_deref())
                } else {
                    None
                };
                if let Some(text) = body.as_ref().or(r.preview.as_ref()) {
                    if color {
                        println!("{} {}\n{}", "---".cyan().bold(), r.file.bold(), text);
                    } else {
                        println!("--- {}\n{}", r.file, text);
                    }
                }
            }
        }
    }
}

/// Print the predefined groups for a construct kind.
pub fn print_groups(kind: &str, selectors: &[&str], modifiers: &[&str], groups: &[String], output: &str) {
    match output {
        "json" => print_json(&json!({
            "kind": kind,
            "selectors": selectors,
            "modifiers": modifiers,
            "groups": groups,
        })),
        _ => {
            let color = use_colors(output);
            let heading = |label: &str| {
                if color {
                    label.bold().to_string()
                } else {
                    label.to_string()
                }
            };
            println!("{} {}", heading("kind:"), kind);
            println!("{} {}", heading("selectors:"), selectors.join(", "));
            if modifiers.is_empty() {
                println!("{} (none)", heading("modifiers:"));
            } else {
                println!("{} {}", heading("modifiers:"), modifiers.join(", "));
            }
            println!("{}", heading("groups:"));
            for g in groups {
                println!("  {}", g);
            }
        }
    }
}

fn build_naive_diff(old: Option<&str>, new: Option<&str>) -> Option<String> {
    let old = old?;
    let new = new?;
    let mut out = String::new();
    out.push_str("+++ new\n");
    out.push_str(new);
    out.push('\n');
    out.push_str("--- old\n");
    out.push_str(old);
    Some(out)
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(res: &LintResult) -> JsonVal {
    // Directly serialize LintResult as JSON, keeping stable shape
    serde_json::to_value(res).unwrap_or(JsonVal::Null)
}

/// Compose format JSON object (pure) for testing/snapshot purposes.
pub fn compose_format_json(results: &[FormatResult], write: bool, diff: bool, errors: &[String]) -> JsonVal {
    let items: Vec<_> = results
        .iter()
        .map(|r| {
            json!({
                "file": r.file,
                "changed": r.changed,
                "wrote": write && r.changed,
                "preview": if !write { r.preview.as_ref() } else { None },
                "diff": if diff && !write { build_naive_diff(r.original.as_deref(), r.preview.as_deref()) } else { None }
            })
        })
        .collect();
    let summary = json!({
        "changed": results.iter().filter(|r| r.changed).count(),
        "total": results.len(),
        "wrote": if write { results.iter().filter(|r| r.changed).count() } else { 0 },
        "errors": errors.len(),
    });
    json!({"results": items, "errors": errors, "summary": summary})
}
