//! Comparator: a total order over two items for a sort specification.
//!
//! Supported types:
//! - `alphabetical`: string comparison after the `specialCharacters` and
//!   `ignoreCase` transforms.
//! - `natural`: like alphabetical, but digit runs compare by numeric value.
//! - `line-length`: by `size`, ties fall back to alphabetical.
//! - `custom`: by index of each character in a caller-supplied alphabet.
//! - `unsorted`: always equal.
//!
//! `order = desc` reverses the result of every type except `unsorted`.
//! Callers sort with a stable sort, so equal items keep their input order.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortType {
    #[default]
    Alphabetical,
    Natural,
    LineLength,
    Custom,
    Unsorted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// How non-alphanumeric characters take part in string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialCharacters {
    #[default]
    Keep,
    /// Strip leading non-alphanumeric characters.
    Trim,
    /// Strip every non-alphanumeric character.
    Remove,
}

/// Secondary sort consulted when the primary comparison ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackSort {
    #[serde(rename = "type")]
    pub sort_type: SortType,
    #[serde(default)]
    pub order: Option<SortOrder>,
}

/// Anything the comparator can order.
pub trait SortKey {
    fn sort_name(&self) -> &str;
    fn sort_size(&self) -> usize;
}

impl SortKey for (&str, usize) {
    fn sort_name(&self) -> &str {
        self.0
    }

    fn sort_size(&self) -> usize {
        self.1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareOptions {
    pub sort_type: SortType,
    pub order: SortOrder,
    pub ignore_case: bool,
    /// Empty means plain code-point comparison.
    pub locales: Vec<String>,
    pub alphabet: String,
    pub special_characters: SpecialCharacters,
    pub fallback: Option<FallbackSort>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        CompareOptions {
            sort_type: SortType::Alphabetical,
            order: SortOrder::Asc,
            ignore_case: true,
            locales: vec!["en-US".to_string()],
            alphabet: String::new(),
            special_characters: SpecialCharacters::Keep,
            fallback: None,
        }
    }
}

impl CompareOptions {
    pub fn with_type(sort_type: SortType) -> Self {
        CompareOptions {
            sort_type,
            ..CompareOptions::default()
        }
    }

    pub fn desc(mut self) -> Self {
        self.order = SortOrder::Desc;
        self
    }
}

/// Compare two items; `Equal` leaves their relative order to the stable sort.
pub fn compare<T: SortKey + ?Sized>(a: &T, b: &T, options: &CompareOptions) -> Ordering {
    let primary = compare_by(a, b, options.sort_type, options.order, options);
    if primary != Ordering::Equal {
        return primary;
    }
    match &options.fallback {
        Some(fallback) if fallback.sort_type != options.sort_type => compare_by(
            a,
            b,
            fallback.sort_type,
            fallback.order.unwrap_or(options.order),
            options,
        ),
        _ => Ordering::Equal,
    }
}

fn compare_by<T: SortKey + ?Sized>(
    a: &T,
    b: &T,
    sort_type: SortType,
    order: SortOrder,
    options: &CompareOptions,
) -> Ordering {
    let ordering = match sort_type {
        SortType::Unsorted => return Ordering::Equal,
        SortType::Alphabetical => compare_alphabetically(a.sort_name(), b.sort_name(), options),
        SortType::Natural => compare_naturally(a.sort_name(), b.sort_name(), options),
        SortType::LineLength => a
            .sort_size()
            .cmp(&b.sort_size())
            .then_with(|| compare_alphabetically(a.sort_name(), b.sort_name(), options)),
        SortType::Custom => compare_by_alphabet(a.sort_name(), b.sort_name(), options),
    };
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

/// Apply `specialCharacters` then `ignoreCase`.
fn normalize<'a>(value: &'a str, options: &CompareOptions) -> Cow<'a, str> {
    let value: Cow<str> = match options.special_characters {
        SpecialCharacters::Keep => Cow::Borrowed(value),
        SpecialCharacters::Trim => {
            Cow::Borrowed(value.trim_start_matches(|c: char| !c.is_alphanumeric()))
        }
        SpecialCharacters::Remove => {
            Cow::Owned(value.chars().filter(|c| c.is_alphanumeric()).collect())
        }
    };
    if options.ignore_case {
        Cow::Owned(value.to_lowercase())
    } else {
        value
    }
}

fn compare_alphabetically(a: &str, b: &str, options: &CompareOptions) -> Ordering {
    let a = normalize(a, options);
    let b = normalize(b, options);
    collate(&a, &b, &options.locales)
}

/// Locale-aware comparison when locales are set, code-point order otherwise.
///
/// The collation approximates the root collation order: punctuation and
/// symbols before digits before letters, letters compared case-insensitively
/// first, then lowercase ahead of uppercase.
pub fn collate(a: &str, b: &str, locales: &[String]) -> Ordering {
    if locales.is_empty() {
        return a.cmp(b);
    }
    let primary = a.chars().map(primary_weight).cmp(b.chars().map(primary_weight));
    if primary != Ordering::Equal {
        return primary;
    }
    let case = a.chars().map(case_weight).cmp(b.chars().map(case_weight));
    case.then_with(|| a.cmp(b))
}

fn primary_weight(c: char) -> (u8, char) {
    let class = if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}

fn case_weight(c: char) -> u8 {
    u8::from(c.is_uppercase())
}

enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn chunks(value: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut digits: Option<bool> = None;
    for (i, c) in value.char_indices() {
        let is_digit = c.is_ascii_digit();
        match digits {
            Some(d) if d != is_digit => {
                out.push(chunk(&value[start..i], d));
                start = i;
            }
            _ => {}
        }
        digits = Some(is_digit);
    }
    if let Some(d) = digits {
        out.push(chunk(&value[start..], d));
    }
    out
}

fn chunk(text: &str, digits: bool) -> Chunk<'_> {
    if digits {
        Chunk::Digits(text)
    } else {
        Chunk::Text(text)
    }
}

fn compare_numeric_runs(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');
    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
        .then_with(|| a.len().cmp(&b.len()))
}

fn compare_naturally(a: &str, b: &str, options: &CompareOptions) -> Ordering {
    let a = normalize(a, options);
    let b = normalize(b, options);
    let left = chunks(&a);
    let right = chunks(&b);
    for (l, r) in left.iter().zip(right.iter()) {
        let ordering = match (l, r) {
            (Chunk::Digits(x), Chunk::Digits(y)) => compare_numeric_runs(x, y),
            (Chunk::Digits(x), Chunk::Text(y))
            | (Chunk::Text(x), Chunk::Digits(y))
            | (Chunk::Text(x), Chunk::Text(y)) => collate(x, y, &options.locales),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    left.len()
        .cmp(&right.len())
        .then_with(|| collate(&a, &b, &options.locales))
}

fn compare_by_alphabet(a: &str, b: &str, options: &CompareOptions) -> Ordering {
    let a = normalize(a, options);
    let b = normalize(b, options);
    let index = |c: char| options.alphabet.chars().position(|x| x == c);
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        let ordering = match (index(x), index(y)) {
            (Some(i), Some(j)) => i.cmp(&j),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => x.cmp(&y),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.chars().count().cmp(&b.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str], options: &CompareOptions) -> Vec<String> {
        let mut keys: Vec<(&str, usize)> = names.iter().map(|n| (*n, n.len())).collect();
        keys.sort_by(|a, b| compare(a, b, options));
        keys.into_iter().map(|(n, _)| n.to_string()).collect()
    }

    #[test]
    fn test_alphabetical_asc_and_desc() {
        let asc = CompareOptions::default();
        assert_eq!(sorted(&["c", "a", "b"], &asc), vec!["a", "b", "c"]);
        assert_eq!(sorted(&["c", "a", "b"], &asc.desc()), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_natural_orders_numeric_runs_by_value() {
        let natural = CompareOptions::with_type(SortType::Natural);
        assert_eq!(sorted(&["v10", "v2"], &natural), vec!["v2", "v10"]);
        assert_eq!(sorted(&["item007", "item7", "item10"], &natural), vec!["item7", "item007", "item10"]);
        let alphabetical = CompareOptions::default();
        assert_eq!(sorted(&["v10", "v2"], &alphabetical), vec!["v10", "v2"]);
    }

    #[test]
    fn test_ignore_case_and_locale_collation() {
        let mut options = CompareOptions::default();
        options.ignore_case = false;
        // lowercase before uppercase for the same letter, letters interleaved
        assert_eq!(sorted(&["B", "b", "a", "A"], &options), vec!["a", "A", "b", "B"]);
        options.locales.clear();
        // code-point order puts every uppercase letter first
        assert_eq!(sorted(&["b", "B", "a", "A"], &options), vec!["A", "B", "a", "b"]);
    }

    #[test]
    fn test_collation_puts_punctuation_before_digits_before_letters() {
        let options = CompareOptions::default();
        assert_eq!(sorted(&["a", "1", "_"], &options), vec!["_", "1", "a"]);
    }

    #[test]
    fn test_special_characters_trim_and_remove() {
        let mut options = CompareOptions::default();
        options.special_characters = SpecialCharacters::Trim;
        assert_eq!(sorted(&["_b", "a"], &options), vec!["a", "_b"]);
        options.special_characters = SpecialCharacters::Remove;
        assert_eq!(sorted(&["a_c", "ab"], &options), vec!["ab", "a_c"]);
        options.special_characters = SpecialCharacters::Keep;
        assert_eq!(sorted(&["ab", "_b"], &options), vec!["_b", "ab"]);
    }

    #[test]
    fn test_line_length_ties_fall_back_to_alphabetical() {
        let options = CompareOptions::with_type(SortType::LineLength);
        let mut keys = vec![("bbb", 3), ("zz", 2), ("aaa", 3)];
        keys.sort_by(|a, b| compare(a, b, &options));
        assert_eq!(keys, vec![("zz", 2), ("aaa", 3), ("bbb", 3)]);
    }

    #[test]
    fn test_custom_alphabet_puts_unknown_characters_last() {
        let mut options = CompareOptions::with_type(SortType::Custom);
        options.alphabet = "cba".to_string();
        assert_eq!(sorted(&["a", "b", "c"], &options), vec!["c", "b", "a"]);
        assert_eq!(sorted(&["z", "a", "y"], &options), vec!["a", "y", "z"]);
        assert_eq!(sorted(&["cb", "c"], &options), vec!["c", "cb"]);
    }

    #[test]
    fn test_unsorted_ignores_direction() {
        let options = CompareOptions::with_type(SortType::Unsorted).desc();
        assert_eq!(sorted(&["b", "c", "a"], &options), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_fallback_sort_breaks_ties() {
        let mut options = CompareOptions::default();
        options.fallback = Some(FallbackSort {
            sort_type: SortType::LineLength,
            order: Some(SortOrder::Desc),
        });
        let mut keys = vec![("a", 1), ("a", 5), ("a", 3)];
        keys.sort_by(|a, b| compare(a, b, &options));
        assert_eq!(keys, vec![("a", 5), ("a", 3), ("a", 1)]);
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        let options = CompareOptions::default();
        let mut keys = vec![("A", 1), ("a", 2)];
        keys.sort_by(|a, b| compare(a, b, &options));
        assert_eq!(keys, vec![("A", 1), ("a", 2)]);
    }
}
