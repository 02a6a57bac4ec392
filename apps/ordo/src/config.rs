//! Configuration discovery and effective settings resolution.
//!
//! Ordo reads `ordo.toml|yaml|yml` from the repository root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `index`: none (must be passed or configured)
//! - `output`: `human`
//! - `format.write|diff|check`: false
//! - `format.spacing`: true (apply `newlinesBetween` when fixing)
//!
//! Overrides precedence: CLI > config file > defaults.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const CONFIG_FILES: [&str; 3] = ["ordo.toml", "ordo.yaml", "ordo.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Formatting-related configuration section under `[format]`.
pub struct FormatCfg {
    pub write: Option<bool>,
    pub diff: Option<bool>,
    pub check: Option<bool>,
    /// Rewrite blank lines between items when fixing.
    pub spacing: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `ordo.toml|yaml`.
pub struct OrdoConfig {
    pub index: Option<String>,
    pub output: Option<String>,
    pub format: Option<FormatCfg>,
    #[serde(default)]
    pub rules: Option<HashMap<String, RulePatternOverride>>, // [rules.<id>].patterns
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct RulePatternOverride {
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub index: String,
    pub index_configured: bool,
    pub output: String,
    pub write: bool,
    pub diff: bool,
    pub check: bool,
    pub spacing: bool,
    pub pattern_overrides: HashMap<String, Vec<String>>, // id -> patterns
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when an `ordo.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|name| cur.join(name).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `OrdoConfig` from `ordo.toml` or `ordo.yaml|yml` if present.
///
/// An unreadable or invalid file is logged and treated as absent.
pub fn load_config(root: &Path) -> Option<OrdoConfig> {
    let toml_path = root.join("ordo.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        return toml::from_str(&s)
            .map_err(|e| warn!(path = %toml_path.display(), error = %e, "ignoring invalid config"))
            .ok();
    }
    for yml in ["ordo.yaml", "ordo.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            return serde_yaml::from_str(&s)
                .map_err(|e| warn!(path = %p.display(), error = %e, "ignoring invalid config"))
                .ok();
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_index: Option<&str>,
    cli_output: Option<&str>,
    cli_write: Option<bool>,
    cli_diff: Option<bool>,
    cli_check: Option<bool>,
) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = load_config(&repo_root).unwrap_or_default();

    let (index, index_configured) = match cli_index.map(|s| s.to_string()).or(cfg.index) {
        Some(s) => (s, true),
        None => (String::new(), false),
    };

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let format = cfg.format.unwrap_or_default();
    let write = cli_write.or(format.write).unwrap_or(false);
    let diff = cli_diff.or(format.diff).unwrap_or(false);
    let check = cli_check.or(format.check).unwrap_or(false);
    let spacing = format.spacing.unwrap_or(true);

    // rules pattern overrides: support map form [rules.<id>].patterns
    let pattern_overrides = cfg
        .rules
        .unwrap_or_default()
        .into_iter()
        .map(|(id, ov)| (id, ov.patterns))
        .collect::<HashMap<_, _>>();

    Effective {
        repo_root,
        index,
        index_configured,
        output,
        write,
        diff,
        check,
        spacing,
        pattern_overrides,
    }
}
