//! The unit the engine operates on: a projection of one syntactic element.

use crate::engine::compare::SortKey;
use crate::engine::kinds::ConstructKind;
use serde::{Deserialize, Serialize};

/// A comment found above an item, as projected by the language adapter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub text: String,
    /// Blank lines between this comment and whatever follows it.
    #[serde(default)]
    pub blank_lines_after: usize,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Comment {
            text: text.into(),
            blank_lines_after: 0,
        }
    }
}

/// One sortable element with its name, size and structural tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "", rename_all = "camelCase")]
pub struct SortableItem<K: ConstructKind> {
    pub name: String,
    #[serde(default)]
    pub size: usize,
    /// Pinned at its original index when sorting around disabled items.
    #[serde(default, alias = "isIgnored")]
    pub ignored: bool,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub selectors: Vec<K::Selector>,
    #[serde(default)]
    pub modifiers: Vec<K::Modifier>,
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// Names other items use to reference this one; empty means `[name]`.
    #[serde(default)]
    pub dependency_names: Vec<String>,
    #[serde(default)]
    pub blank_lines_before: usize,
    #[serde(default)]
    pub comments_before: Vec<Comment>,
    /// A non-sortable element (spread, rest) sits right before this item.
    #[serde(default)]
    pub after_barrier: bool,
}

impl<K: ConstructKind> SortableItem<K> {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        SortableItem {
            size: name.chars().count(),
            name,
            ignored: false,
            value: None,
            selectors: Vec::new(),
            modifiers: Vec::new(),
            depends_on: Vec::new(),
            dependency_names: Vec::new(),
            blank_lines_before: 0,
            comments_before: Vec::new(),
            after_barrier: false,
        }
    }

    pub fn with_selectors(mut self, selectors: &[K::Selector]) -> Self {
        self.selectors = selectors.to_vec();
        self
    }

    pub fn with_modifiers(mut self, modifiers: &[K::Modifier]) -> Self {
        self.modifiers = modifiers.to_vec();
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_blank_lines_before(mut self, lines: usize) -> Self {
        self.blank_lines_before = lines;
        self
    }

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comments_before.push(comment);
        self
    }

    pub fn depending_on(mut self, names: &[&str]) -> Self {
        self.depends_on = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    pub fn after_barrier(mut self) -> Self {
        self.after_barrier = true;
        self
    }

    /// Names under which other items may depend on this one.
    pub fn exposed_names(&self) -> impl Iterator<Item = &str> {
        let own = self.dependency_names.is_empty().then_some(self.name.as_str());
        own.into_iter()
            .chain(self.dependency_names.iter().map(String::as_str))
    }
}

impl<K: ConstructKind> SortKey for SortableItem<K> {
    fn sort_name(&self) -> &str {
        &self.name
    }

    fn sort_size(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::kinds::{ClassMember, ClassModifier, ClassSelector};

    #[test]
    fn test_deserialize_item_with_defaults() {
        let item: SortableItem<ClassMember> = serde_json::from_str(
            r#"{"name": "render", "selectors": ["method"], "modifiers": ["static"], "isIgnored": true}"#,
        )
        .unwrap();
        assert_eq!(item.selectors, vec![ClassSelector::Method]);
        assert_eq!(item.modifiers, vec![ClassModifier::Static]);
        assert!(item.ignored);
        assert_eq!(item.size, 0);
        assert!(item.comments_before.is_empty());
    }

    #[test]
    fn test_exposed_names_default_to_own_name() {
        let item = SortableItem::<ClassMember>::new("a");
        assert_eq!(item.exposed_names().collect::<Vec<_>>(), vec!["a"]);
        let mut destructured = SortableItem::<ClassMember>::new("{ x, y }");
        destructured.dependency_names = vec!["x".into(), "y".into()];
        assert_eq!(destructured.exposed_names().collect::<Vec<_>>(), vec!["x", "y"]);
    }
}
