//! Ordo CLI binary entry point.
//! Delegates to library modules for lint/format/groups and prints results.

use clap::Parser;
use ordo::cli::{Cli, Commands};
use ordo::config::{self, Effective};
use ordo::engine::KindName;
use ordo::models::index::Index;
use ordo::utils::{error_prefix, info_prefix, note_prefix};
use ordo::{format, groups, lint, output};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::process::exit;
use tracing_subscriber::EnvFilter;

/// Issues raised before any document could be checked.
const CONFIG_RULES: [&str; 5] = ["load-index", "parse-index", "load-policy", "parse-policy", "config"];

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ORDO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Shared preflight for lint/format: index must be configured and exist.
fn require_index(eff: &Effective) {
    if !eff.index_configured {
        eprintln!("{} Index is not configured. Pass --index or add ordo.toml.", error_prefix());
        exit(2);
    }
    if config::load_config(&eff.repo_root).is_none() {
        eprintln!("{} No ordo.toml found; using defaults.", note_prefix());
    }
    let idx_path = eff.repo_root.join(&eff.index);
    if !idx_path.is_file() {
        eprintln!(
            "{} Index file not found: {} (pass --index or configure ordo.toml)",
            error_prefix(),
            idx_path.to_string_lossy()
        );
        exit(2);
    }
    // Emit single top info when default patterns from index are used (no overrides in ordo.toml)
    if eff.output != "json" {
        announce_default_patterns(&idx_path, eff);
    }
}

fn announce_default_patterns(idx_path: &Path, eff: &Effective) {
    let Ok(s) = fs::read_to_string(idx_path) else {
        return;
    };
    let Ok(ix) = toml::from_str::<Index>(&s) else {
        return;
    };
    let pat_set: BTreeSet<&String> = ix
        .rules
        .iter()
        .filter(|r| !eff.pattern_overrides.contains_key(&r.id))
        .flat_map(|r| r.patterns.iter())
        .collect();
    if !pat_set.is_empty() {
        let joined: Vec<&str> = pat_set.into_iter().map(String::as_str).collect();
        eprintln!("{} Using default patterns: [{}]", info_prefix(), joined.join(", "));
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Lint {
            repo_root,
            output,
            index,
        } => {
            let eff = config::resolve_effective(repo_root.as_deref(), index.as_deref(), output.as_deref(), None, None, None);
            require_index(&eff);
            let repo_root_str = eff.repo_root.to_string_lossy().to_string();
            let result = lint::run_lint(&repo_root_str, &eff.index, &eff.pattern_overrides);
            output::print_lint(&result, &eff.output);
            if result.issues.iter().any(|i| CONFIG_RULES.contains(&i.rule.as_str())) {
                exit(2);
            }
            if result.summary.errors > 0 {
                exit(1);
            }
        }
        Commands::Format {
            repo_root,
            write,
            diff,
            check,
            output,
            index,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                index.as_deref(),
                output.as_deref(),
                if write { Some(true) } else { None },
                if diff { Some(true) } else { None },
                if check { Some(true) } else { None },
            );
            require_index(&eff);
            // CLI/config precedence at runtime:
            // - If diff or check is enabled, force write=false for this run.
            // - Otherwise respect write.
            let eff_write = if eff.diff || eff.check { false } else { eff.write };
            let repo_root_str = eff.repo_root.to_string_lossy().to_string();
            let (results, errors) = format::run_format(
                &repo_root_str,
                &eff.index,
                eff_write,
                eff.diff || eff.check,
                eff.spacing,
                &eff.pattern_overrides,
            );
            output::print_format(&results, &eff.output, eff_write, eff.diff, &errors);
            if results.is_empty() && !errors.is_empty() {
                exit(2);
            }
            if eff.check && results.iter().any(|r| r.changed) {
                exit(1);
            }
        }
        Commands::Groups {
            kind,
            policy,
            selector,
            modifier,
            output,
        } => {
            let kind: KindName = match kind.parse() {
                Ok(k) => k,
                Err(e) => {
                    eprintln!("{} {}", error_prefix(), e);
                    exit(2);
                }
            };
            let policy = match policy {
                Some(path) => match lint::load_policy(Path::new(&path), kind.as_str()) {
                    Ok(p) => Some(p),
                    Err((_, message)) => {
                        eprintln!("{} {}", error_prefix(), message);
                        exit(2);
                    }
                },
                None => None,
            };
            match groups::describe(kind, &selector, &modifier, policy.as_ref()) {
                Ok(listing) => {
                    let output = output.unwrap_or_else(|| "human".to_string());
                    output::print_groups(kind.as_str(), &listing.selectors, &listing.modifiers, &listing.groups, &output);
                    if policy.is_some() && output != "json" {
                        eprintln!("{} Policy is valid for {}.", info_prefix(), kind);
                    }
                }
                Err(e) => {
                    eprintln!("{} {}", error_prefix(), e);
                    exit(2);
                }
            }
        }
    }
}
