//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ordo",
    version,
    about = "Ordo: order and group sequences by policy",
    long_about = "Ordo lints and fixes the order of projected syntactic elements (array entries, object members, class members, import specifiers) using TOML policies.\n\nConfiguration precedence: CLI > ordo.toml > defaults.",
    after_help = "Examples:\n  ordo lint --index conventions/order/index.toml\n  ordo format --index conv/index.toml --diff\n  ordo groups --kind class-member --selector method --modifier static --modifier async",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for linting, formatting, and group inspection.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current ordo version.")]
    Version,
    /// Lint sequence documents using TOML policies
    #[command(
        about = "Run lint checks",
        long_about = "Check the order and spacing of every sequence in documents matched by index rules. Severity levels contribute to CI exits.",
        after_help = "Examples:\n  ordo lint --index conv/index.toml\n  ordo lint --index conv/index.toml --output json"
    )]
    Lint {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Path to index.toml (required)")]
        index: Option<String>,
    },
    /// Rewrite sequences into their fixed order
    #[command(
        about = "Apply the fixed order",
        long_about = "Reorder items and adjust blank lines per policy. When --diff or --check is set, write is disabled.",
        after_help = "Examples:\n  ordo format --index conv/index.toml --diff\n  ordo format --index conv/index.toml --write"
    )]
    Format {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Write changes to files")]
        write: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Show diffs for changed files (implies write=false)")]
        diff: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero if changes would occur (implies write=false)")]
        check: bool,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Path to index.toml (required)")]
        index: Option<String>,
    },
    /// Inspect predefined groups for a construct kind
    #[command(
        about = "List predefined groups",
        long_about = "Print the selectors, modifiers and predefined group names of a construct kind. With --policy, also validate a policy file against that kind.",
        after_help = "Examples:\n  ordo groups --kind import-specifier\n  ordo groups --kind class-member --policy conv/classes.toml"
    )]
    Groups {
        #[arg(long, help = "Construct kind: array-element|object-member|class-member|import-specifier")]
        kind: String,
        #[arg(long, help = "Policy TOML to validate for this kind")]
        policy: Option<String>,
        #[arg(long, help = "Restrict to these selectors (repeatable; default: all)")]
        selector: Vec<String>,
        #[arg(long, help = "Restrict to these modifiers (repeatable; default: all)")]
        modifier: Vec<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_groups_with_repeated_flags() {
        let cli = Cli::try_parse_from([
            "ordo", "groups", "--kind", "class-member", "--selector", "method", "--modifier", "static",
            "--modifier", "async",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Groups { kind, selector, modifier, policy, .. } => {
                assert_eq!(kind, "class-member");
                assert_eq!(selector, vec!["method"]);
                assert_eq!(modifier, vec!["static", "async"]);
                assert!(policy.is_none());
            }
            _ => panic!("expected groups"),
        }
    }

    #[test]
    fn test_parse_format_flags() {
        let cli = Cli::try_parse_from(["ordo", "format", "--index", "i.toml", "--check"]).unwrap();
        match cli.cmd {
            Commands::Format { check, write, index, .. } => {
                assert!(check);
                assert!(!write);
                assert_eq!(index.as_deref(), Some("i.toml"));
            }
            _ => panic!("expected format"),
        }
    }
}
