//! Configuration errors raised once, before any item is processed.

use thiserror::Error;

/// Malformed ordering configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid group(s): {}", .0.join(", "))]
    InvalidGroups(Vec<String>),

    #[error("Duplicated group(s): {}", .0.join(", "))]
    DuplicatedGroups(Vec<String>),

    #[error("Unknown selector '{selector}' for {kind}")]
    UnknownSelector { kind: &'static str, selector: String },

    #[error("Unknown modifier '{modifier}' for {kind}")]
    UnknownModifier { kind: &'static str, modifier: String },

    #[error("Custom group '{0}' is missing a groupName")]
    MissingGroupName(String),

    #[error("The 'partitionByNewLine' and 'newlinesBetween' options cannot be used together")]
    NewlinesWithPartitionByNewLine,

    #[error("Custom group '{0}' sets 'newlinesInside' while 'partitionByNewLine' is enabled")]
    NewlinesInsideWithPartitionByNewLine(String),

    #[error("Misplaced newlinesBetween marker at groups[{0}]: markers must sit between two groups")]
    MisplacedNewlinesMarker(usize),

    #[error("`alphabet` option must not be empty when sorting with type 'custom'")]
    MissingAlphabet,

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid pattern flag '{flag}' in '{pattern}'")]
    InvalidPatternFlag { pattern: String, flag: char },

    #[error("Invalid partition comment pattern '{pattern}': {source}")]
    InvalidPartitionPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}
