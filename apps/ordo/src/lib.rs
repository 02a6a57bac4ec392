//! Ordo core library.
//!
//! This crate exposes a generic ordering-and-grouping engine plus the
//! programmatic APIs behind the `ordo` CLI, which lints and fixes the order
//! of projected syntactic elements (array entries, object members, class
//! members, import specifiers) according to TOML-based policies.
//!
//! High-level modules:
//! - `engine`: Comparator, group classifier, partitioner, dependency
//!   resolver, newlines enforcer and the ordering engine composing them.
//! - `models`: Index, policy and sequence-document schemas plus lint output.
//! - `config`: Discovery and effective configuration resolution.
//! - `lint`: Runs the engine across files matched by the index.
//! - `format`: Rewrites sequence documents into their fixed order.
//! - `groups`: Predefined group listing and policy validation.
//! - `output`: Human/JSON printers for lint/format/groups.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `utils`: Supporting helpers.
pub mod cli;
pub mod config;
pub mod engine;
pub mod format;
pub mod groups;
pub mod lint;
pub mod models;
pub mod output;
pub mod utils;
