//! Fixer for sequence documents: rewrites each sequence into its fixed order.
//!
//! For every sequence the engine's `fixed` order is applied to the raw
//! `items` array so fields the schema does not model survive untouched.
//!
//! Design notes:
//! - Ignored items stay at their index inside their partition; everything
//!   else moves around them.
//! - Blank lines belong to positions: slot `k` keeps the gap that preceded
//!   input index `k`, unless spacing enforcement computes a new one. The
//!   `afterBarrier` flag is positional too.
//! - Leading comments attached to an item (no blank line between, no
//!   partition comment or block directive in the way) move with it; the
//!   rest stay with the slot.

use crate::lint::{collect_targets, evaluate, load_index, load_policy, Evaluation};
use crate::models::document::{raw_sequences_mut, Sequence};
use crate::models::policy::OrderPolicy;
use rayon::prelude::*;
use serde_json::Value as Json;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub struct FormatResult {
    pub file: String,
    pub changed: bool,
    pub preview: Option<String>,
    pub original: Option<String>,
}

/// Format sequence documents matched by the index using each rule's policy.
///
/// Returns one `FormatResult` per readable document plus error messages for
/// anything that could not be processed. When `write` is false, changed
/// documents carry a pretty-printed preview; `capture_old` keeps the source.
/// With `spacing` off, only the order changes and blank lines stay
/// positional.
pub fn run_format(
    repo_root: &str,
    index_path: &str,
    write: bool,
    capture_old: bool,
    spacing: bool,
    patterns_override: &HashMap<String, Vec<String>>,
) -> (Vec<FormatResult>, Vec<String>) {
    let root = PathBuf::from(repo_root);
    let idx_path = root.join(index_path);
    let index = match load_index(&idx_path) {
        Ok(ix) => ix,
        Err((_, message)) => return (Vec::new(), vec![message]),
    };

    let mut results = Vec::new();
    let mut errors = Vec::new();
    let mut policy_cache: HashMap<PathBuf, OrderPolicy> = HashMap::new();
    for ri in index.rules {
        let pol_path = idx_path
            .parent()
            .map(|dir| dir.join(&ri.policy))
            .unwrap_or_else(|| PathBuf::from(&ri.policy));
        if !policy_cache.contains_key(&pol_path) {
            match load_policy(&pol_path, &ri.id) {
                Ok(p) => {
                    policy_cache.insert(pol_path.clone(), p);
                }
                Err((_, message)) => {
                    errors.push(message);
                    continue;
                }
            }
        }
        let Some(policy) = policy_cache.get(&pol_path) else {
            continue;
        };
        let targets = match collect_targets(&root, &ri, patterns_override) {
            Ok(t) => t,
            Err(e) => {
                errors.push(format!("Invalid pattern in rule '{}': {}", ri.id, e));
                continue;
            }
        };
        debug!(rule = %ri.id, targets = targets.len(), "formatting rule");

        // Process targets in parallel for throughput; gather deterministic order by file path
        let outcomes: Vec<(Option<FormatResult>, Vec<String>)> = targets
            .par_iter()
            .map(|path| {
                let file = path.to_string_lossy().to_string();
                let data = match fs::read_to_string(path) {
                    Ok(s) => s,
                    Err(e) => return (None, vec![format!("{}: {}", file, e)]),
                };
                let mut json: Json = match serde_json::from_str(&data) {
                    Ok(v) => v,
                    Err(e) => return (None, vec![format!("{}: not valid JSON: {}", file, e)]),
                };
                let (changed, problems) = format_document(&mut json, policy, spacing);
                let mut problems: Vec<String> = problems.into_iter().map(|p| format!("{}: {}", file, p)).collect();
                let original = if capture_old { Some(data) } else { None };
                if !changed {
                    let result = FormatResult { file, changed: false, preview: None, original };
                    return (Some(result), problems);
                }
                let rendered = match serde_json::to_string_pretty(&json) {
                    Ok(s) => s + "\n",
                    Err(e) => return (None, vec![format!("{}: {}", file, e)]),
                };
                if write {
                    if let Err(e) = fs::write(path, &rendered) {
                        problems.push(format!("{}: write failed: {}", file, e));
                        return (None, problems);
                    }
                    (Some(FormatResult { file, changed: true, preview: None, original }), problems)
                } else {
                    (Some(FormatResult { file, changed: true, preview: Some(rendered), original }), problems)
                }
            })
            .collect();

        let mut rule_results = Vec::new();
        for (result, problems) in outcomes {
            rule_results.extend(result);
            errors.extend(problems);
        }
        rule_results.sort_by(|a, b| a.file.cmp(&b.file));
        results.extend(rule_results);
    }
    errors.dedup();
    (results, errors)
}

/// Fix every sequence of `doc` in place.
///
/// Returns whether anything changed plus messages for sequences that were
/// left alone because they or the policy are invalid.
pub fn format_document(doc: &mut Json, policy: &OrderPolicy, spacing: bool) -> (bool, Vec<String>) {
    let Some(sequences) = raw_sequences_mut(doc) else {
        return (false, vec!["not a sequence document".to_string()]);
    };
    let mut changed = false;
    let mut problems = Vec::new();
    for (s, raw) in sequences.iter_mut().enumerate() {
        let sequence = match Sequence::from_json(raw) {
            Ok(seq) => seq,
            Err(e) => {
                problems.push(format!("sequences[{}]: {}", s, e));
                continue;
            }
        };
        match evaluate(&sequence, policy) {
            Ok(evaluation) => changed |= apply_fix(raw, &evaluation, spacing),
            Err(e) => problems.push(format!("sequences[{}]: {}", s, e)),
        }
    }
    (changed, problems)
}

/// Rewrite the raw `items` array of one sequence. Returns true on change.
fn apply_fix(raw: &mut Json, evaluation: &Evaluation, spacing: bool) -> bool {
    let Some(items) = raw.get_mut("items").and_then(Json::as_array_mut) else {
        return false;
    };
    if items.len() != evaluation.report.fixed.len() {
        return false;
    }
    let original = std::mem::take(items);

    // (detached, attached) leading comments per input item
    let comments: Vec<(Vec<Json>, Vec<Json>)> = original
        .iter()
        .zip(&evaluation.attached_comments)
        .map(|(item, &attached)| {
            let mut all = item
                .get("commentsBefore")
                .and_then(Json::as_array)
                .cloned()
                .unwrap_or_default();
            let at = all.len().saturating_sub(attached);
            let tail = all.split_off(at);
            (all, tail)
        })
        .collect();

    for (slot, &idx) in evaluation.report.fixed.iter().enumerate() {
        let mut item = original[idx].clone();
        if let Json::Object(map) = &mut item {
            let moved: Vec<Json> = comments[slot]
                .0
                .iter()
                .chain(&comments[idx].1)
                .cloned()
                .collect();
            if !moved.is_empty() || map.contains_key("commentsBefore") {
                map.insert("commentsBefore".into(), Json::Array(moved));
            }
            let lines = if spacing {
                evaluation.spacing[slot]
            } else {
                original[slot]
                    .get("blankLinesBefore")
                    .and_then(Json::as_u64)
                    .unwrap_or(0) as usize
            };
            if lines > 0 || map.contains_key("blankLinesBefore") {
                map.insert("blankLinesBefore".into(), Json::from(lines));
            }
            let barrier = original[slot]
                .get("afterBarrier")
                .and_then(Json::as_bool)
                .unwrap_or(false);
            if barrier || map.contains_key("afterBarrier") {
                map.insert("afterBarrier".into(), Json::Bool(barrier));
            }
        }
        items.push(item);
    }
    *items != original
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn policy(src: &str) -> OrderPolicy {
        toml::from_str(src).unwrap()
    }

    fn names(doc: &Json, s: usize) -> Vec<String> {
        doc["sequences"][s]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_format_reorders_and_keeps_unknown_fields() {
        let mut doc = json!({"sequences": [{"kind": "object-member", "items": [
            {"name": "b", "span": [10, 20]},
            {"name": "a", "span": [0, 5]}
        ]}]});
        let (changed, problems) = format_document(&mut doc, &policy(""), true);
        assert!(changed);
        assert!(problems.is_empty());
        assert_eq!(names(&doc, 0), vec!["a", "b"]);
        assert_eq!(doc["sequences"][0]["items"][0]["span"], json!([0, 5]));

        let (again, _) = format_document(&mut doc, &policy(""), true);
        assert!(!again);
    }

    #[test]
    fn test_ignored_items_keep_their_slot() {
        let mut doc = json!({"sequences": [{"kind": "array-element", "items": [
            {"name": "d"}, {"name": "z", "isIgnored": true}, {"name": "b"}, {"name": "a"}
        ]}]});
        format_document(&mut doc, &policy(""), true);
        assert_eq!(names(&doc, 0), vec!["a", "z", "b", "d"]);
    }

    #[test]
    fn test_attached_comments_move_and_detached_stay() {
        let mut doc = json!({"sequences": [{"kind": "object-member", "items": [
            {"name": "b", "commentsBefore": [{"text": "file header", "blankLinesAfter": 1}]},
            {"name": "a", "commentsBefore": [{"text": "about a"}]}
        ]}]});
        format_document(&mut doc, &policy(""), true);
        let items = &doc["sequences"][0]["items"];
        assert_eq!(items[0]["name"], "a");
        let texts: Vec<&str> = items[0]["commentsBefore"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["text"].as_str().unwrap())
            .collect();
        assert_eq!(texts, vec!["file header", "about a"]);
        assert_eq!(items[1]["commentsBefore"], json!([]));
    }

    #[test]
    fn test_barrier_flag_stays_with_its_slot() {
        let mut doc = json!({"sequences": [{"kind": "object-member", "items": [
            {"name": "x"}, {"name": "c", "afterBarrier": true}, {"name": "a"}
        ]}]});
        let (changed, _) = format_document(&mut doc, &policy(""), true);
        assert!(changed);
        let items = &doc["sequences"][0]["items"];
        assert_eq!(names(&doc, 0), vec!["x", "a", "c"]);
        assert_eq!(items[1]["afterBarrier"], true);
        assert_eq!(items[2]["afterBarrier"], false);

        let (again, _) = format_document(&mut doc, &policy(""), true);
        assert!(!again);
    }

    #[test]
    fn test_spacing_follows_group_boundaries() {
        let p = policy("groups = [\"property\", \"method\"]\nnewlinesBetween = \"always\"\n");
        let mut doc = json!({"sequences": [{"kind": "class-member", "items": [
            {"name": "render", "selectors": ["method"]},
            {"name": "count", "selectors": ["property"]}
        ]}]});
        let (changed, _) = format_document(&mut doc, &p, true);
        assert!(changed);
        let items = &doc["sequences"][0]["items"];
        assert_eq!(items[0]["name"], "count");
        assert!(items[0].get("blankLinesBefore").is_none());
        assert_eq!(items[1]["blankLinesBefore"], 1);

        let mut plain = json!({"sequences": [{"kind": "class-member", "items": [
            {"name": "render", "selectors": ["method"]},
            {"name": "count", "selectors": ["property"]}
        ]}]});
        format_document(&mut plain, &p, false);
        assert!(plain["sequences"][0]["items"][1].get("blankLinesBefore").is_none());
    }

    #[test]
    fn test_invalid_sequences_are_reported_and_skipped() {
        let mut doc = json!({"sequences": [
            {"kind": "enum-member", "items": []},
            {"kind": "object-member", "items": [{"name": "b"}, {"name": "a"}]}
        ]});
        let (changed, problems) = format_document(&mut doc, &policy(""), true);
        assert!(changed);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].starts_with("sequences[0]"));
        let (_, bad) = format_document(&mut json!([1]), &policy(""), true);
        assert_eq!(bad, vec!["not a sequence document"]);
    }

    #[test]
    fn test_run_format_previews_then_writes() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("conv")).unwrap();
        fs::write(
            root.join("conv/index.toml"),
            "[[rules]]\nid = \"o\"\npatterns = [\"seq/*.json\"]\npolicy = \"p.toml\"\n",
        )
        .unwrap();
        fs::write(root.join("conv/p.toml"), "type = \"natural\"\n").unwrap();
        fs::create_dir_all(root.join("seq")).unwrap();
        let doc = json!({"sequences": [{"kind": "array-element", "items": [
            {"name": "item10"}, {"name": "item2"}
        ]}]});
        fs::write(root.join("seq/a.json"), serde_json::to_string(&doc).unwrap()).unwrap();
        let root_str = root.to_str().unwrap();

        let (results, errors) = run_format(root_str, "conv/index.toml", false, true, true, &HashMap::new());
        assert!(errors.is_empty());
        assert!(results[0].changed);
        assert!(results[0].preview.as_deref().unwrap().ends_with("}\n"));
        assert!(results[0].original.is_some());

        let (written, _) = run_format(root_str, "conv/index.toml", true, false, true, &HashMap::new());
        assert!(written[0].preview.is_none());
        let on_disk: Json = serde_json::from_str(&fs::read_to_string(root.join("seq/a.json")).unwrap()).unwrap();
        assert_eq!(names(&on_disk, 0), vec!["item2", "item10"]);

        let (settled, _) = run_format(root_str, "conv/index.toml", true, false, true, &HashMap::new());
        assert!(!settled[0].changed);
    }

    #[test]
    fn test_run_format_reports_missing_index() {
        let dir = tempdir().unwrap();
        let (results, errors) = run_format(dir.path().to_str().unwrap(), "none.toml", false, false, true, &HashMap::new());
        assert!(results.is_empty());
        assert!(errors[0].contains("Index file not found"));
    }
}
