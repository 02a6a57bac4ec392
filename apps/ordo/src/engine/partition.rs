//! Partitioner: splits a sequence into independently ordered regions.

use crate::engine::error::ConfigError;
use crate::engine::item::{Comment, SortableItem};
use crate::engine::kinds::ConstructKind;
use glob::Pattern;
use serde::{Deserialize, Serialize};

/// `partitionByComment`: `false`, `true` (any comment), or literal/wildcard
/// patterns matched against the trimmed comment text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartitionByComment {
    Enabled(bool),
    Pattern(String),
    Patterns(Vec<String>),
}

impl Default for PartitionByComment {
    fn default() -> Self {
        PartitionByComment::Enabled(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    Disable,
    DisableLine,
    DisableNextLine,
    Enable,
}

fn directive(text: &str) -> Option<Directive> {
    let text = text.trim_start();
    // longest prefixes first
    [
        ("eslint-disable-next-line", Directive::DisableNextLine),
        ("eslint-disable-line", Directive::DisableLine),
        ("eslint-disable", Directive::Disable),
        ("eslint-enable", Directive::Enable),
    ]
    .into_iter()
    .find(|(prefix, _)| text.starts_with(prefix))
    .map(|(_, d)| d)
}

#[derive(Debug, Clone)]
enum CommentMatcher {
    Never,
    Any,
    Patterns(Vec<(String, Pattern)>),
}

impl CommentMatcher {
    fn new(option: &PartitionByComment) -> Result<Self, ConfigError> {
        let raw: Vec<&String> = match option {
            PartitionByComment::Enabled(false) => return Ok(CommentMatcher::Never),
            PartitionByComment::Enabled(true) => return Ok(CommentMatcher::Any),
            PartitionByComment::Pattern(p) => vec![p],
            PartitionByComment::Patterns(ps) => ps.iter().collect(),
        };
        raw.into_iter()
            .map(|p| {
                Pattern::new(p)
                    .map(|compiled| (p.clone(), compiled))
                    .map_err(|source| ConfigError::InvalidPartitionPattern {
                        pattern: p.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(CommentMatcher::Patterns)
    }

    fn matches(&self, text: &str) -> bool {
        let text = text.trim();
        match self {
            CommentMatcher::Never => false,
            CommentMatcher::Any => true,
            CommentMatcher::Patterns(patterns) => patterns
                .iter()
                .any(|(literal, pattern)| literal == text || pattern.matches(text)),
        }
    }
}

/// Decides where new partitions start.
#[derive(Debug, Clone)]
pub struct Partitioner {
    by_new_line: bool,
    comments: CommentMatcher,
}

impl Partitioner {
    pub fn new(by_comment: &PartitionByComment, by_new_line: bool) -> Result<Self, ConfigError> {
        Ok(Partitioner {
            by_new_line,
            comments: CommentMatcher::new(by_comment)?,
        })
    }

    /// Whether `comment` delimits partitions. Lint directives never do.
    pub fn is_partition_comment(&self, comment: &Comment) -> bool {
        directive(&comment.text).is_none() && self.comments.matches(&comment.text)
    }

    /// Whether a new partition starts right before `current`.
    pub fn starts_partition<K: ConstructKind>(&self, current: &SortableItem<K>) -> bool {
        current.after_barrier
            || (self.by_new_line && current.blank_lines_before > 0)
            || current.comments_before.iter().any(|c| self.is_partition_comment(c))
    }

    /// Partition id per item: contiguous, starting at 0, non-decreasing.
    pub fn assign<K: ConstructKind>(&self, items: &[SortableItem<K>]) -> Vec<usize> {
        let mut id = 0;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if i > 0 && self.starts_partition(item) {
                    id += 1;
                }
                id
            })
            .collect()
    }

    /// How many of `comments` (ordered top to bottom) travel with the item
    /// below them. The upward scan stops at a partition comment, a block
    /// `eslint-disable`/`eslint-enable` directive, or a blank line.
    pub fn attached_comments(&self, comments: &[Comment]) -> usize {
        let mut attached = 0;
        for comment in comments.iter().rev() {
            let blocking = matches!(directive(&comment.text), Some(Directive::Disable | Directive::Enable));
            if blocking || self.is_partition_comment(comment) || comment.blank_lines_after > 0 {
                break;
            }
            attached += 1;
        }
        attached
    }
}
