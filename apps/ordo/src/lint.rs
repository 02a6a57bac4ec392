//! Lint runner for ordering policies over sequence documents.
//!
//! Produces a `LintResult` with issues and a summary. Every violation the
//! engine reports becomes an issue at `$.sequences[i].items[j]` carrying the
//! policy's `level` and optional `message`.

use crate::engine::{ConfigError, ConstructKind, OrderingEngine, Report, ViolationKind};
use crate::models::document::{raw_sequences, Sequence, SequenceBody, SequenceVisitor};
use crate::models::index::{Index, RuleIndex};
use crate::models::policy::OrderPolicy;
use crate::models::{Issue, LintResult, Summary};
use glob::glob;
use rayon::prelude::*;
use serde_json::Value as Json;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Engine output for one sequence plus what callers need to render or fix it.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub report: Report,
    pub names: Vec<String>,
    pub ignored: Vec<bool>,
    /// Blank lines each slot of `report.fixed` should be preceded by.
    pub spacing: Vec<usize>,
    /// How many leading comments travel with each input item.
    pub attached_comments: Vec<usize>,
}

struct Evaluate<'a>(&'a OrderPolicy);

impl SequenceVisitor for Evaluate<'_> {
    type Output = Result<Evaluation, ConfigError>;

    fn visit<K: ConstructKind>(self, body: &SequenceBody<K>) -> Self::Output {
        let engine = OrderingEngine::<K>::new(self.0)?;
        let report = engine.run(&body.items);
        let spacing = engine.spacing_plan(&body.items, &report);
        let attached_comments = body
            .items
            .iter()
            .map(|item| engine.partitioner().attached_comments(&item.comments_before))
            .collect();
        Ok(Evaluation {
            names: body.items.iter().map(|i| i.name.clone()).collect(),
            ignored: body.items.iter().map(|i| i.ignored).collect(),
            report,
            spacing,
            attached_comments,
        })
    }
}

/// Run the engine for one parsed sequence under `policy`.
pub fn evaluate(sequence: &Sequence, policy: &OrderPolicy) -> Result<Evaluation, ConfigError> {
    sequence.accept(Evaluate(policy))
}

/// Run lint across files matched by the index.
///
/// Severity accounting contributes to the final summary; `level = "error"`
/// affects the error count and typical CI exit behavior upstream.
pub fn run_lint(
    repo_root: &str,
    index_path: &str,
    patterns_override: &HashMap<String, Vec<String>>,
) -> LintResult {
    let root = PathBuf::from(repo_root);
    let idx_path = root.join(index_path);
    let index = match load_index(&idx_path) {
        Ok(ix) => ix,
        Err((rule, message)) => {
            return LintResult::single_error(idx_path.to_string_lossy().to_string(), rule, message)
        }
    };

    let mut issues: Vec<Issue> = Vec::new();
    let mut files_count: usize = 0;
    let mut sequences_count: usize = 0;

    // Cache policies across rules by path to avoid repeated I/O and parse when shared
    let mut policy_cache: HashMap<PathBuf, OrderPolicy> = HashMap::new();
    for ri in index.rules {
        let (files, sequences) = lint_rule(
            &root,
            &idx_path,
            &ri,
            &mut issues,
            &mut policy_cache,
            patterns_override,
        );
        files_count += files;
        sequences_count += sequences;
    }

    let mut errs = 0usize;
    let mut warns = 0usize;
    let mut infos = 0usize;
    for is in &issues {
        match is.severity.as_str() {
            "error" => errs += 1,
            "warning" | "warn" => warns += 1,
            _ => infos += 1,
        }
    }
    LintResult {
        issues,
        summary: Summary {
            errors: errs,
            warnings: warns,
            infos,
            files: files_count,
            sequences: sequences_count,
        },
    }
}

/// Read and parse the index, mapping failures to `(rule, message)`.
pub fn load_index(idx_path: &Path) -> Result<Index, (&'static str, String)> {
    let idx_str = fs::read_to_string(idx_path).map_err(|_| {
        (
            "load-index",
            format!(
                "Index file not found. Looked at '{}'. Pass --index or add ordo.{{toml,yaml}}.",
                idx_path.to_string_lossy()
            ),
        )
    })?;
    toml::from_str(&idx_str).map_err(|e| ("parse-index", format!("Index file is not valid TOML: {}", e)))
}

/// Read and parse a policy, mapping failures to `(rule, message)`.
pub fn load_policy(pol_path: &Path, rule_id: &str) -> Result<OrderPolicy, (&'static str, String)> {
    let pol_str = fs::read_to_string(pol_path).map_err(|_| {
        (
            "load-policy",
            format!(
                "Policy file not found for rule '{}': {}",
                rule_id,
                pol_path.to_string_lossy()
            ),
        )
    })?;
    toml::from_str(&pol_str).map_err(|e| ("parse-policy", format!("Policy file is not valid: {}", e)))
}

/// Expand rule patterns relative to `root`; overrides from ordo.toml win.
pub fn collect_targets(
    root: &Path,
    ri: &RuleIndex,
    patterns_override: &HashMap<String, Vec<String>>,
) -> Result<Vec<PathBuf>, glob::PatternError> {
    let use_patterns = patterns_override.get(&ri.id).unwrap_or(&ri.patterns);
    let mut targets: Vec<PathBuf> = Vec::new();
    for pat in use_patterns.iter() {
        let abs_glob = root.join(pat);
        let pattern = abs_glob.to_string_lossy().to_string();
        targets.extend(glob(&pattern)?.flatten());
    }
    targets.sort();
    targets.dedup();
    Ok(targets)
}

fn policy_path(idx_path: &Path, ri: &RuleIndex) -> PathBuf {
    idx_path
        .parent()
        .map(|dir| dir.join(&ri.policy))
        .unwrap_or_else(|| PathBuf::from(&ri.policy))
}

/// Lint a single indexed rule against its targets, collecting issues.
///
/// Returns the number of files and sequences checked.
fn lint_rule(
    root: &Path,
    idx_path: &Path,
    ri: &RuleIndex,
    issues: &mut Vec<Issue>,
    policy_cache: &mut HashMap<PathBuf, OrderPolicy>,
    patterns_override: &HashMap<String, Vec<String>>,
) -> (usize, usize) {
    let pol_path = policy_path(idx_path, ri);
    let file_issue = |file: &Path, rule: &str, message: String| Issue {
        file: file.to_string_lossy().to_string(),
        rule: rule.into(),
        severity: "error".into(),
        path: "$".into(),
        message,
        kind: None,
    };
    if !policy_cache.contains_key(&pol_path) {
        match load_policy(&pol_path, &ri.id) {
            Ok(p) => {
                policy_cache.insert(pol_path.clone(), p);
            }
            Err((rule, message)) => {
                issues.push(file_issue(&pol_path, rule, message));
                return (0, 0);
            }
        }
    }
    let Some(policy) = policy_cache.get(&pol_path) else {
        return (0, 0);
    };

    let targets = match collect_targets(root, ri, patterns_override) {
        Ok(t) => t,
        Err(e) => {
            issues.push(file_issue(idx_path, "config", format!("Invalid pattern in rule '{}': {}", ri.id, e)));
            return (0, 0);
        }
    };
    debug!(rule = %ri.id, targets = targets.len(), "linting rule");

    let per_file: Vec<(Vec<Issue>, usize, usize)> = targets
        .par_iter()
        .map(|path| {
            let data = match fs::read_to_string(path) {
                Ok(s) => s,
                Err(_) => return (Vec::new(), 0, 0),
            };
            let json: Json = match serde_json::from_str(&data) {
                Ok(v) => v,
                Err(e) => {
                    let msg = format!("Sequence document is not valid JSON: {}", e);
                    return (vec![file_issue(path, "parse-document", msg)], 1, 0);
                }
            };
            let (found, sequences) = lint_document(&json, path, ri, policy, &pol_path);
            (found, 1, sequences)
        })
        .collect();

    let mut files = 0;
    let mut sequences = 0;
    // Configuration errors surface once per policy, not once per sequence
    let mut seen_config: HashSet<(String, String)> = HashSet::new();
    let mut combined: Vec<Issue> = Vec::new();
    for (found, f, s) in per_file {
        files += f;
        sequences += s;
        for issue in found {
            if issue.rule == "config" && !seen_config.insert((issue.file.clone(), issue.message.clone())) {
                continue;
            }
            combined.push(issue);
        }
    }
    // Deterministic ordering of issues by file; order inside a file is kept
    combined.sort_by(|a, b| a.file.cmp(&b.file));
    issues.extend(combined);
    (files, sequences)
}

/// Lint every sequence of one document. Returns issues and sequence count.
pub fn lint_document(
    json: &Json,
    path: &Path,
    ri: &RuleIndex,
    policy: &OrderPolicy,
    pol_path: &Path,
) -> (Vec<Issue>, usize) {
    let file = path.to_string_lossy().to_string();
    let Some(raw) = raw_sequences(json) else {
        return (
            vec![Issue {
                file,
                rule: "parse-document".into(),
                severity: "error".into(),
                path: "$".into(),
                message: "Sequence document must be an object with a 'sequences' array".into(),
                kind: None,
            }],
            0,
        );
    };

    let mut issues = Vec::new();
    for (s, raw_seq) in raw.iter().enumerate() {
        let seq_path = format!("$.sequences[{}]", s);
        let sequence = match Sequence::from_json(raw_seq) {
            Ok(seq) => seq,
            Err(e) => {
                issues.push(Issue {
                    file: file.clone(),
                    rule: "parse-document".into(),
                    severity: "error".into(),
                    path: seq_path,
                    message: format!("Invalid sequence: {}", e),
                    kind: None,
                });
                continue;
            }
        };
        let evaluation = match evaluate(&sequence, policy) {
            Ok(ev) => ev,
            Err(e) => {
                warn!(rule = %ri.id, kind = %sequence.kind(), error = %e, "invalid policy");
                issues.push(Issue {
                    file: pol_path.to_string_lossy().to_string(),
                    rule: "config".into(),
                    severity: "error".into(),
                    path: "$".into(),
                    message: format!("Rule '{}' ({} sequences): {}", ri.id, sequence.kind(), e),
                    kind: None,
                });
                continue;
            }
        };
        issues.extend(sequence_issues(&evaluation, &file, &seq_path, &ri.id, policy));
    }
    (issues, raw.len())
}

/// Turn one evaluation into issues.
///
/// Violations whose right-hand item is ignored are dropped, the same way a
/// host suppresses diagnostics on disabled lines.
fn sequence_issues(
    evaluation: &Evaluation,
    file: &str,
    seq_path: &str,
    rule_id: &str,
    policy: &OrderPolicy,
) -> Vec<Issue> {
    let names = &evaluation.names;
    let mut issues = Vec::new();
    for v in &evaluation.report.violations {
        if evaluation.ignored[v.right] {
            continue;
        }
        let (left, right) = (&names[v.left], &names[v.right]);
        let detail = match v.kind {
            ViolationKind::Order => format!("Expected \"{}\" to come before \"{}\"", right, left),
            ViolationKind::GroupOrder => format!(
                "Expected \"{}\" ({}) to come before \"{}\" ({})",
                right, v.right_group, left, v.left_group
            ),
            ViolationKind::DependencyOrder => format!(
                "Expected dependency \"{}\" to come before \"{}\"",
                right,
                v.dependent.map_or(left.as_str(), |d| names[d].as_str())
            ),
            ViolationKind::MissingSpacing => format!("Missed spacing between \"{}\" and \"{}\"", left, right),
            ViolationKind::ExtraSpacing => format!("Extra spacing between \"{}\" and \"{}\"", left, right),
        };
        let message = match &policy.message {
            Some(custom) => format!("{}: {}", custom, detail),
            None => detail,
        };
        issues.push(Issue {
            file: file.to_string(),
            rule: rule_id.to_string(),
            severity: policy.severity().to_string(),
            path: format!("{}.items[{}]", seq_path, v.right),
            message,
            kind: Some(v.kind.as_str().to_string()),
        });
    }
    for u in &evaluation.report.unresolved {
        issues.push(Issue {
            file: file.to_string(),
            rule: rule_id.to_string(),
            severity: "info".into(),
            path: format!("{}.items[{}]", seq_path, u.item),
            message: format!(
                "Could not order \"{}\" after \"{}\": circular dependency",
                names[u.item], names[u.dependency]
            ),
            kind: None,
        });
    }
    if !evaluation.report.converged {
        issues.push(Issue {
            file: file.to_string(),
            rule: rule_id.to_string(),
            severity: "warning".into(),
            path: seq_path.to_string(),
            message: "Dependency order did not settle; the suggested order may be partial".into(),
            kind: None,
        });
    }
    issues
}
