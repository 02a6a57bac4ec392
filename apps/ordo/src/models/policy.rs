//! Policy schema used by lint and format passes.
//!
//! Key components:
//! - Sorting: `type`, `order`, `ignoreCase`, `locales`, `alphabet`,
//!   `specialCharacters` and an optional `fallbackSort` for ties.
//! - Grouping: `groups` (ordered slots, nested lists share a rank, inline
//!   tables `{ newlinesBetween = "..." }` are markers) and `customGroups`.
//! - Regions: `partitionByComment` and `partitionByNewLine`.
//! - Spacing: `newlinesBetween` (ignore|always|never).
//! - Lint metadata: `message` and `level` (info|warn|error).

use crate::engine::compare::{CompareOptions, FallbackSort, SortOrder, SortType, SpecialCharacters};
use crate::engine::group::{CustomGroupRule, GroupSlot};
use crate::engine::newlines::NewlinesPolicy;
use crate::engine::partition::PartitionByComment;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
/// Root policy loaded from TOML files referenced by the index.
pub struct OrderPolicy {
    #[serde(default, rename = "type")]
    pub sort_type: SortType,
    #[serde(default)]
    pub order: SortOrder,
    #[serde(default = "default_true")]
    pub ignore_case: bool,
    #[serde(default = "default_locales", deserialize_with = "one_or_many")]
    pub locales: Vec<String>,
    #[serde(default)]
    pub alphabet: String,
    #[serde(default)]
    pub special_characters: SpecialCharacters,
    #[serde(default)]
    pub fallback_sort: Option<FallbackSort>,
    #[serde(default)]
    pub groups: Vec<GroupSlot>,
    #[serde(default)]
    pub custom_groups: Vec<CustomGroupRule>,
    #[serde(default)]
    pub partition_by_comment: PartitionByComment,
    #[serde(default)]
    pub partition_by_new_line: bool,
    #[serde(default)]
    pub newlines_between: NewlinesPolicy,
    /// Keep referenced items ahead of the items using them.
    #[serde(default = "default_true")]
    pub track_dependencies: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub level: Option<String>, // info|warn|error (treated as error for exit code when 'error')
}

impl Default for OrderPolicy {
    fn default() -> Self {
        OrderPolicy {
            sort_type: SortType::default(),
            order: SortOrder::default(),
            ignore_case: true,
            locales: default_locales(),
            alphabet: String::new(),
            special_characters: SpecialCharacters::default(),
            fallback_sort: None,
            groups: Vec::new(),
            custom_groups: Vec::new(),
            partition_by_comment: PartitionByComment::default(),
            partition_by_new_line: false,
            newlines_between: NewlinesPolicy::default(),
            track_dependencies: true,
            message: None,
            level: None,
        }
    }
}

impl OrderPolicy {
    /// Base comparator settings before per-group overrides.
    pub fn compare_options(&self) -> CompareOptions {
        CompareOptions {
            sort_type: self.sort_type,
            order: self.order,
            ignore_case: self.ignore_case,
            locales: self.locales.clone(),
            alphabet: self.alphabet.clone(),
            special_characters: self.special_characters,
            fallback: self.fallback_sort.clone(),
        }
    }

    /// Severity for issues raised under this policy.
    pub fn severity(&self) -> &str {
        self.level.as_deref().unwrap_or("error")
    }
}

fn default_true() -> bool {
    true
}

fn default_locales() -> Vec<String> {
    vec!["en-US".to_string()]
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}
