//! Group classification: structural tags and user patterns to a group name.
//!
//! Custom groups are tried first, in configured order, as a fold returning the
//! first referenced group whose rule matches. Predefined groups are the
//! configured names that decompose into `[modifier-]*selector`; the best one
//! for an item is picked by slot rank, then modifier count, then modifier
//! priority, then selector priority.

use crate::engine::compare::{CompareOptions, FallbackSort, SortOrder, SortType};
use crate::engine::error::ConfigError;
use crate::engine::item::SortableItem;
use crate::engine::kinds::{ConstructKind, Tag};
use crate::engine::newlines::NewlinesPolicy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Group of items matching nothing configured.
pub const UNKNOWN_GROUP: &str = "unknown";

const MAX_SELECTOR_WORDS: usize = 3;
const MAX_MODIFIER_WORDS: usize = 2;

/// Overrides the global blank-line policy for the boundary it sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewlinesMarker {
    pub newlines_between: NewlinesPolicy,
}

/// One entry of the `groups` option; the slot index is the group rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupSlot {
    Single(String),
    Many(Vec<String>),
    Newlines(NewlinesMarker),
}

impl GroupSlot {
    pub fn names(&self) -> &[String] {
        match self {
            GroupSlot::Single(name) => std::slice::from_ref(name),
            GroupSlot::Many(names) => names,
            GroupSlot::Newlines(_) => &[],
        }
    }

    pub fn marker(&self) -> Option<NewlinesPolicy> {
        match self {
            GroupSlot::Newlines(m) => Some(m.newlines_between),
            _ => None,
        }
    }
}

/// Rank of `name`: index of the first slot naming it, else `groups.len()`.
pub fn group_rank(groups: &[GroupSlot], name: &str) -> usize {
    groups
        .iter()
        .position(|slot| slot.names().iter().any(|n| n == name))
        .unwrap_or(groups.len())
}

/// A regex source, optionally with JavaScript-style flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternSpec {
    Plain(String),
    Flagged {
        pattern: String,
        #[serde(default)]
        flags: Option<String>,
    },
}

/// A single pattern or a list where any match counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternOption {
    Many(Vec<PatternSpec>),
    One(PatternSpec),
}

/// A user-declared group as written in a policy file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomGroupRule {
    pub group_name: String,
    pub selector: Option<String>,
    pub modifiers: Vec<String>,
    #[serde(alias = "elementNamePattern")]
    pub name_pattern: Option<PatternOption>,
    #[serde(alias = "elementValuePattern")]
    pub value_pattern: Option<PatternOption>,
    pub any_of: Option<Vec<CustomGroupRule>>,
    #[serde(rename = "type")]
    pub sort_type: Option<SortType>,
    pub order: Option<SortOrder>,
    pub fallback_sort: Option<FallbackSort>,
    pub newlines_inside: Option<NewlinesPolicy>,
}

#[derive(Debug, Clone)]
struct CompiledPattern(Vec<Regex>);

impl CompiledPattern {
    fn compile(option: &PatternOption) -> Result<Self, ConfigError> {
        let specs = match option {
            PatternOption::One(spec) => std::slice::from_ref(spec),
            PatternOption::Many(specs) => specs.as_slice(),
        };
        specs
            .iter()
            .map(compile_spec)
            .collect::<Result<Vec<_>, _>>()
            .map(CompiledPattern)
    }

    fn is_match(&self, text: &str) -> bool {
        self.0.iter().any(|re| re.is_match(text))
    }
}

fn compile_spec(spec: &PatternSpec) -> Result<Regex, ConfigError> {
    let (pattern, flags) = match spec {
        PatternSpec::Plain(p) => (p.as_str(), ""),
        PatternSpec::Flagged { pattern, flags } => (pattern.as_str(), flags.as_deref().unwrap_or("")),
    };
    let mut builder = RegexBuilder::new(pattern);
    for flag in flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'x' => {
                builder.ignore_whitespace(true);
            }
            // global, unicode, sticky and indices do not change whether a pattern matches
            'g' | 'u' | 'y' | 'd' => {}
            other => {
                return Err(ConfigError::InvalidPatternFlag {
                    pattern: pattern.to_string(),
                    flag: other,
                })
            }
        }
    }
    builder.build().map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[derive(Debug, Clone)]
struct RuleMatcher<K: ConstructKind> {
    selector: Option<K::Selector>,
    modifiers: Vec<K::Modifier>,
    name: Option<CompiledPattern>,
    value: Option<CompiledPattern>,
    any_of: Option<Vec<RuleMatcher<K>>>,
}

impl<K: ConstructKind> RuleMatcher<K> {
    fn compile(rule: &CustomGroupRule) -> Result<Self, ConfigError> {
        let selector = rule
            .selector
            .as_deref()
            .map(|s| {
                K::Selector::from_name(s).ok_or_else(|| ConfigError::UnknownSelector {
                    kind: K::NAME,
                    selector: s.to_string(),
                })
            })
            .transpose()?;
        let modifiers = rule
            .modifiers
            .iter()
            .map(|m| {
                K::Modifier::from_name(m).ok_or_else(|| ConfigError::UnknownModifier {
                    kind: K::NAME,
                    modifier: m.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let any_of = rule
            .any_of
            .as_ref()
            .map(|rules| rules.iter().map(Self::compile).collect::<Result<Vec<_>, _>>())
            .transpose()?;
        Ok(RuleMatcher {
            selector,
            modifiers,
            name: rule.name_pattern.as_ref().map(CompiledPattern::compile).transpose()?,
            value: rule.value_pattern.as_ref().map(CompiledPattern::compile).transpose()?,
            any_of,
        })
    }

    /// With `anyOf`, at least one nested rule must match; otherwise every
    /// specified constraint must hold.
    fn matches(&self, item: &SortableItem<K>) -> bool {
        if let Some(rules) = &self.any_of {
            return rules.iter().any(|r| r.matches(item));
        }
        if let Some(selector) = self.selector {
            if !item.selectors.contains(&selector) {
                return false;
            }
        }
        if !self.modifiers.iter().all(|m| item.modifiers.contains(m)) {
            return false;
        }
        if let Some(name) = &self.name {
            if !name.is_match(&item.name) {
                return false;
            }
        }
        match (&self.value, &item.value) {
            (None, _) => true,
            (Some(pattern), Some(value)) => pattern.is_match(value),
            (Some(_), None) => false,
        }
    }
}

/// A compiled custom group with its per-group overrides.
#[derive(Debug, Clone)]
pub struct CustomGroup<K: ConstructKind> {
    pub name: String,
    pub sort_type: Option<SortType>,
    pub order: Option<SortOrder>,
    pub fallback_sort: Option<FallbackSort>,
    pub newlines_inside: Option<NewlinesPolicy>,
    rule: RuleMatcher<K>,
}

#[derive(Debug, Clone)]
struct Predefined<K: ConstructKind> {
    name: String,
    rank: usize,
    selector: K::Selector,
    modifiers: Vec<K::Modifier>,
}

impl<K: ConstructKind> Predefined<K> {
    fn applies_to(&self, selectors: &[K::Selector], modifiers: &[K::Modifier]) -> bool {
        selectors.contains(&self.selector) && self.modifiers.iter().all(|m| modifiers.contains(m))
    }
}

type TagKey<K> = (
    Vec<<K as ConstructKind>::Selector>,
    Vec<<K as ConstructKind>::Modifier>,
);

/// Memo table from an item's (selectors, modifiers) to the matching
/// predefined groups, best first.
///
/// Entries depend only on the matcher's configuration; reuse a cache only
/// with the matcher that filled it.
#[derive(Debug)]
pub struct GroupCache<K: ConstructKind> {
    entries: HashMap<TagKey<K>, Vec<usize>>,
}

impl<K: ConstructKind> Default for GroupCache<K> {
    fn default() -> Self {
        GroupCache {
            entries: HashMap::new(),
        }
    }
}

impl<K: ConstructKind> GroupCache<K> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Validated group configuration for one construct kind.
#[derive(Debug, Clone)]
pub struct GroupMatcher<K: ConstructKind> {
    groups: Vec<GroupSlot>,
    custom: Vec<CustomGroup<K>>,
    predefined: Vec<Predefined<K>>,
}

impl<K: ConstructKind> GroupMatcher<K> {
    pub fn new(groups: &[GroupSlot], custom_groups: &[CustomGroupRule]) -> Result<Self, ConfigError> {
        let mut custom = Vec::with_capacity(custom_groups.len());
        for (i, rule) in custom_groups.iter().enumerate() {
            if rule.group_name.is_empty() {
                return Err(ConfigError::MissingGroupName(format!("customGroups[{}]", i)));
            }
            custom.push(CustomGroup {
                name: rule.group_name.clone(),
                sort_type: rule.sort_type,
                order: rule.order,
                fallback_sort: rule.fallback_sort.clone(),
                newlines_inside: rule.newlines_inside,
                rule: RuleMatcher::compile(rule)?,
            });
        }

        let mut seen = BTreeSet::new();
        let mut duplicated = Vec::new();
        let mut invalid = Vec::new();
        let mut predefined = Vec::new();
        for (rank, slot) in groups.iter().enumerate() {
            for name in slot.names() {
                if !seen.insert(name.as_str()) {
                    if !duplicated.contains(name) {
                        duplicated.push(name.clone());
                    }
                    continue;
                }
                if name == UNKNOWN_GROUP || custom.iter().any(|c| &c.name == name) {
                    continue;
                }
                match parse_group_name::<K>(name) {
                    Some((selector, modifiers)) => predefined.push(Predefined {
                        name: name.clone(),
                        rank,
                        selector,
                        modifiers,
                    }),
                    None => invalid.push(name.clone()),
                }
            }
        }
        if !duplicated.is_empty() {
            return Err(ConfigError::DuplicatedGroups(duplicated));
        }
        if !invalid.is_empty() {
            return Err(ConfigError::InvalidGroups(invalid));
        }

        custom.retain(|c| seen.contains(c.name.as_str()));
        predefined.sort_by(|a: &Predefined<K>, b: &Predefined<K>| {
            a.rank
                .cmp(&b.rank)
                .then_with(|| b.modifiers.len().cmp(&a.modifiers.len()))
                .then_with(|| modifier_priorities(&a.modifiers).cmp(&modifier_priorities(&b.modifiers)))
                .then_with(|| a.selector.priority().cmp(&b.selector.priority()))
        });

        Ok(GroupMatcher {
            groups: groups.to_vec(),
            custom,
            predefined,
        })
    }

    pub fn groups(&self) -> &[GroupSlot] {
        &self.groups
    }

    /// Resolve the group of `item`, defaulting to `unknown`.
    pub fn classify<'a>(&'a self, item: &SortableItem<K>, cache: &mut GroupCache<K>) -> &'a str {
        if let Some(name) = self
            .custom
            .iter()
            .find_map(|c| c.rule.matches(item).then_some(c.name.as_str()))
        {
            return name;
        }
        let key = tag_key::<K>(item);
        let candidates = cache.entries.entry(key).or_insert_with_key(|(selectors, modifiers)| {
            self.predefined
                .iter()
                .enumerate()
                .filter(|(_, p)| p.applies_to(selectors, modifiers))
                .map(|(i, _)| i)
                .collect()
        });
        candidates
            .first()
            .map(|&i| self.predefined[i].name.as_str())
            .unwrap_or(UNKNOWN_GROUP)
    }

    pub fn rank(&self, group: &str) -> usize {
        group_rank(&self.groups, group)
    }

    /// Custom group referenced by `name`, if it was kept.
    pub fn custom_group(&self, name: &str) -> Option<&CustomGroup<K>> {
        self.custom.iter().find(|c| c.name == name)
    }

    pub fn custom_groups(&self) -> &[CustomGroup<K>] {
        &self.custom
    }

    /// Comparator settings for items of `rank`: a single-name slot holding a
    /// custom group applies that group's overrides on top of `base`.
    pub fn compare_options_for_rank(&self, rank: usize, base: &CompareOptions) -> CompareOptions {
        let group = match self.groups.get(rank) {
            Some(GroupSlot::Single(name)) => self.custom_group(name),
            _ => None,
        };
        let mut options = base.clone();
        if let Some(group) = group {
            if let Some(sort_type) = group.sort_type {
                options.sort_type = sort_type;
            }
            if let Some(order) = group.order {
                options.order = order;
            }
            if group.fallback_sort.is_some() {
                options.fallback = group.fallback_sort.clone();
            }
        }
        options
    }
}

fn modifier_priorities<M: Tag>(modifiers: &[M]) -> Vec<usize> {
    let mut priorities: Vec<usize> = modifiers.iter().map(|m| m.priority()).collect();
    priorities.sort_unstable();
    priorities
}

fn tag_key<K: ConstructKind>(item: &SortableItem<K>) -> TagKey<K> {
    let mut selectors = item.selectors.clone();
    selectors.sort_unstable();
    selectors.dedup();
    let mut modifiers = item.modifiers.clone();
    modifiers.sort_unstable();
    modifiers.dedup();
    (selectors, modifiers)
}

/// Decompose a predefined group name into its selector and modifiers.
///
/// The longest selector suffix (up to three words) wins; the remaining prefix
/// is consumed greedily as modifiers of up to two words each. Names with an
/// unknown word or a repeated modifier do not decompose.
pub fn parse_group_name<K: ConstructKind>(name: &str) -> Option<(K::Selector, Vec<K::Modifier>)> {
    let words: Vec<&str> = name.split('-').collect();
    let (selector, rest) = (1..=MAX_SELECTOR_WORDS.min(words.len()))
        .rev()
        .find_map(|n| {
            let split = words.len() - n;
            K::Selector::from_name(&words[split..].join("-")).map(|s| (s, &words[..split]))
        })?;

    let mut modifiers = Vec::new();
    let mut i = 0;
    while i < rest.len() {
        let (modifier, used) = (1..=MAX_MODIFIER_WORDS.min(rest.len() - i))
            .rev()
            .find_map(|n| K::Modifier::from_name(&rest[i..i + n].join("-")).map(|m| (m, n)))?;
        if modifiers.contains(&modifier) {
            return None;
        }
        modifiers.push(modifier);
        i += used;
    }
    Some((selector, modifiers))
}

/// Every predefined group name derivable from the given tags: for each
/// selector, every ordering of every modifier subset, largest subsets first.
pub fn generate_predefined_groups<K: ConstructKind>(
    selectors: &[K::Selector],
    modifiers: &[K::Modifier],
) -> Vec<String> {
    fn permutations<M: Tag>(pool: &[M], size: usize, current: &mut Vec<M>, out: &mut Vec<Vec<M>>) {
        if current.len() == size {
            out.push(current.clone());
            return;
        }
        for m in pool {
            if !current.contains(m) {
                current.push(*m);
                permutations(pool, size, current, out);
                current.pop();
            }
        }
    }

    let mut names = Vec::new();
    for selector in selectors {
        for size in (0..=modifiers.len()).rev() {
            let mut combos = Vec::new();
            permutations(modifiers, size, &mut Vec::new(), &mut combos);
            for combo in combos {
                let mut parts: Vec<&str> = combo.iter().map(|m| m.as_str()).collect();
                parts.push(selector.as_str());
                names.push(parts.join("-"));
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::kinds::{ClassMember, ClassModifier, ClassSelector, ObjectMember};

    fn slots(names: &[&str]) -> Vec<GroupSlot> {
        names.iter().map(|n| GroupSlot::Single(n.to_string())).collect()
    }

    fn method(name: &str, modifiers: &[ClassModifier]) -> SortableItem<ClassMember> {
        SortableItem::new(name)
            .with_selectors(&[ClassSelector::Method])
            .with_modifiers(modifiers)
    }

    fn custom(json: &str) -> Vec<CustomGroupRule> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_custom_group_by_name_pattern() {
        let rules = custom(r#"[{"groupName": "g", "namePattern": "^foo"}]"#);
        let matcher = GroupMatcher::<ObjectMember>::new(&slots(&["g", "unknown"]), &rules).unwrap();
        let mut cache = GroupCache::default();
        assert_eq!(matcher.classify(&SortableItem::new("fooBar"), &mut cache), "g");
        assert_eq!(matcher.classify(&SortableItem::new("baz"), &mut cache), UNKNOWN_GROUP);
        assert_eq!(matcher.rank("g"), 0);
        assert_eq!(matcher.rank(UNKNOWN_GROUP), 1);
    }

    #[test]
    fn test_unreferenced_custom_group_falls_through() {
        let rules = custom(r#"[{"groupName": "hidden", "namePattern": "^a"}, {"groupName": "shown", "namePattern": "^a"}]"#);
        let matcher = GroupMatcher::<ClassMember>::new(&slots(&["shown", "method"]), &rules).unwrap();
        let mut cache = GroupCache::default();
        assert_eq!(matcher.classify(&method("alpha", &[]), &mut cache), "shown");
        assert_eq!(matcher.classify(&method("beta", &[]), &mut cache), "method");
        assert!(matcher.custom_group("hidden").is_none());
    }

    #[test]
    fn test_any_of_matches_when_one_nested_rule_matches() {
        let rules = custom(
            r#"[{"groupName": "callbacks", "anyOf": [
                {"selector": "method", "elementNamePattern": "^on"},
                {"selector": "property", "modifiers": ["readonly"]}
            ]}]"#,
        );
        let matcher = GroupMatcher::<ClassMember>::new(&slots(&["callbacks"]), &rules).unwrap();
        let mut cache = GroupCache::default();
        assert_eq!(matcher.classify(&method("onClick", &[]), &mut cache), "callbacks");
        let prop = SortableItem::<ClassMember>::new("x")
            .with_selectors(&[ClassSelector::Property])
            .with_modifiers(&[ClassModifier::Readonly]);
        assert_eq!(matcher.classify(&prop, &mut cache), "callbacks");
        assert_eq!(matcher.classify(&method("render", &[]), &mut cache), UNKNOWN_GROUP);
    }

    #[test]
    fn test_flagged_and_value_patterns() {
        let rules = custom(
            r#"[{"groupName": "ids", "namePattern": {"pattern": "^ID", "flags": "i"}},
                {"groupName": "fns", "valuePattern": ["^function", "=>"]}]"#,
        );
        let matcher = GroupMatcher::<ObjectMember>::new(&slots(&["ids", "fns"]), &rules).unwrap();
        let mut cache = GroupCache::default();
        assert_eq!(matcher.classify(&SortableItem::new("idUser"), &mut cache), "ids");
        assert_eq!(
            matcher.classify(&SortableItem::new("cb").with_value("() => 1"), &mut cache),
            "fns"
        );
        assert_eq!(matcher.classify(&SortableItem::new("cb"), &mut cache), UNKNOWN_GROUP);

        let bad = custom(r#"[{"groupName": "x", "namePattern": {"pattern": "a", "flags": "q"}}]"#);
        assert!(matches!(
            GroupMatcher::<ObjectMember>::new(&slots(&["x"]), &bad),
            Err(ConfigError::InvalidPatternFlag { flag: 'q', .. })
        ));
    }

    #[test]
    fn test_earlier_slot_beats_more_modifiers() {
        let matcher = GroupMatcher::<ClassMember>::new(&slots(&["method", "static-method"]), &[]).unwrap();
        let mut cache = GroupCache::default();
        assert_eq!(matcher.classify(&method("m", &[ClassModifier::Static]), &mut cache), "method");
    }

    #[test]
    fn test_same_slot_prefers_more_modifiers_then_modifier_priority() {
        let groups = vec![GroupSlot::Many(vec![
            "method".into(),
            "static-method".into(),
            "private-method".into(),
            "private-static-method".into(),
        ])];
        let matcher = GroupMatcher::<ClassMember>::new(&groups, &[]).unwrap();
        let mut cache = GroupCache::default();
        let both = method("m", &[ClassModifier::Static, ClassModifier::Private]);
        assert_eq!(matcher.classify(&both, &mut cache), "private-static-method");

        let groups = vec![GroupSlot::Many(vec!["static-method".into(), "private-method".into()])];
        let matcher = GroupMatcher::<ClassMember>::new(&groups, &[]).unwrap();
        let mut cache = GroupCache::default();
        assert_eq!(matcher.classify(&both, &mut cache), "private-method");
    }

    #[test]
    fn test_cache_is_keyed_by_tag_sets() {
        let matcher = GroupMatcher::<ClassMember>::new(&slots(&["static-method", "method"]), &[]).unwrap();
        let mut cache = GroupCache::default();
        let a = method("a", &[ClassModifier::Static, ClassModifier::Async]);
        let b = method("b", &[ClassModifier::Async, ClassModifier::Static, ClassModifier::Async]);
        assert_eq!(matcher.classify(&a, &mut cache), "static-method");
        assert_eq!(matcher.classify(&b, &mut cache), "static-method");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_parse_prefers_longest_selector() {
        let (selector, modifiers) = parse_group_name::<ClassMember>("static-get-method").unwrap();
        assert_eq!(selector, ClassSelector::GetMethod);
        assert_eq!(modifiers, vec![ClassModifier::Static]);
        let (selector, modifiers) = parse_group_name::<ClassMember>("private-static-index-signature").unwrap();
        assert_eq!(selector, ClassSelector::IndexSignature);
        assert_eq!(modifiers, vec![ClassModifier::Private, ClassModifier::Static]);
        assert!(parse_group_name::<ClassMember>("static-static-method").is_none());
        assert!(parse_group_name::<ClassMember>("shiny-method").is_none());
    }

    #[test]
    fn test_invalid_and_duplicated_groups_are_config_errors() {
        let err = GroupMatcher::<ClassMember>::new(&slots(&["method", "shiny-method"]), &[]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid group(s): shiny-method");
        let groups = vec![
            GroupSlot::Single("method".into()),
            GroupSlot::Many(vec!["property".into(), "method".into()]),
        ];
        let err = GroupMatcher::<ClassMember>::new(&groups, &[]).unwrap_err();
        assert_eq!(err.to_string(), "Duplicated group(s): method");
        let rules = custom(r#"[{"groupName": "x", "selector": "getter"}]"#);
        assert!(matches!(
            GroupMatcher::<ClassMember>::new(&slots(&["x"]), &rules),
            Err(ConfigError::UnknownSelector { .. })
        ));
    }

    #[test]
    fn test_custom_group_overrides_compare_options() {
        let rules = custom(r#"[{"groupName": "g", "namePattern": "^x", "type": "line-length", "order": "desc"}]"#);
        let groups = vec![GroupSlot::Single("g".into()), GroupSlot::Many(vec!["method".into()])];
        let matcher = GroupMatcher::<ClassMember>::new(&groups, &rules).unwrap();
        let base = CompareOptions::default();
        let options = matcher.compare_options_for_rank(0, &base);
        assert_eq!(options.sort_type, SortType::LineLength);
        assert_eq!(options.order, SortOrder::Desc);
        assert_eq!(matcher.compare_options_for_rank(1, &base), base);
        assert_eq!(matcher.compare_options_for_rank(2, &base), base);
    }

    #[test]
    fn test_generate_predefined_groups_lists_every_permutation() {
        let names = generate_predefined_groups::<ClassMember>(
            &[ClassSelector::Method],
            &[ClassModifier::Static, ClassModifier::Async],
        );
        assert_eq!(
            names,
            vec![
                "static-async-method",
                "async-static-method",
                "static-method",
                "async-method",
                "method"
            ]
        );
        for name in &names {
            assert!(parse_group_name::<ClassMember>(name).is_some());
        }
    }
}
