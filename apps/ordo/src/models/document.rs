//! Sequence documents: item projections written by a language adapter.
//!
//! ```json
//! { "sequences": [ { "id": "Foo body", "kind": "class-member", "items": [
//!   { "name": "render", "selectors": ["method"], "blankLinesBefore": 1 }
//! ] } ] }
//! ```
//!
//! Each entry of `sequences` is parsed on its own so one malformed sequence
//! does not hide the others, and so formatting can rewrite the raw JSON
//! without losing fields the schema does not know about.

use crate::engine::item::SortableItem;
use crate::engine::kinds::{ArrayElement, ClassMember, ConstructKind, ImportSpecifier, KindName, ObjectMember};
use serde::Deserialize;
use serde_json::Value as Json;

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "kebab-case")]
/// One ordered sequence, tagged by construct kind.
pub enum Sequence {
    ArrayElement(SequenceBody<ArrayElement>),
    ObjectMember(SequenceBody<ObjectMember>),
    ClassMember(SequenceBody<ClassMember>),
    ImportSpecifier(SequenceBody<ImportSpecifier>),
}

#[derive(Deserialize, Debug, Clone)]
#[serde(bound = "")]
pub struct SequenceBody<K: ConstructKind> {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub items: Vec<SortableItem<K>>,
}

/// Generic code to run over a sequence of any kind.
pub trait SequenceVisitor {
    type Output;

    fn visit<K: ConstructKind>(self, body: &SequenceBody<K>) -> Self::Output;
}

impl Sequence {
    pub fn from_json(raw: &Json) -> Result<Self, serde_json::Error> {
        Sequence::deserialize(raw)
    }

    pub fn kind(&self) -> KindName {
        match self {
            Sequence::ArrayElement(_) => KindName::ArrayElement,
            Sequence::ObjectMember(_) => KindName::ObjectMember,
            Sequence::ClassMember(_) => KindName::ClassMember,
            Sequence::ImportSpecifier(_) => KindName::ImportSpecifier,
        }
    }

    pub fn accept<V: SequenceVisitor>(&self, visitor: V) -> V::Output {
        match self {
            Sequence::ArrayElement(body) => visitor.visit(body),
            Sequence::ObjectMember(body) => visitor.visit(body),
            Sequence::ClassMember(body) => visitor.visit(body),
            Sequence::ImportSpecifier(body) => visitor.visit(body),
        }
    }
}

/// The raw `sequences` array of a document.
pub fn raw_sequences(doc: &Json) -> Option<&Vec<Json>> {
    doc.get("sequences")?.as_array()
}

pub fn raw_sequences_mut(doc: &mut Json) -> Option<&mut Vec<Json>> {
    doc.get_mut("sequences")?.as_array_mut()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::kinds::ClassSelector;
    use serde_json::json;

    struct Count;

    impl SequenceVisitor for Count {
        type Output = (&'static str, usize);

        fn visit<K: ConstructKind>(self, body: &SequenceBody<K>) -> Self::Output {
            (K::NAME, body.items.len())
        }
    }

    #[test]
    fn test_sequence_dispatches_on_kind() {
        let raw = json!({
            "id": "Widget",
            "kind": "class-member",
            "items": [{"name": "render", "selectors": ["method"], "extra": true}]
        });
        let seq = Sequence::from_json(&raw).unwrap();
        assert_eq!(seq.kind(), KindName::ClassMember);
        assert_eq!(seq.accept(Count), ("class-member", 1));
        match seq {
            Sequence::ClassMember(body) => {
                assert_eq!(body.id.as_deref(), Some("Widget"));
                assert_eq!(body.items[0].selectors, vec![ClassSelector::Method]);
            }
            _ => panic!("wrong kind"),
        }
    }

    #[test]
    fn test_unknown_kind_or_tag_is_rejected() {
        assert!(Sequence::from_json(&json!({"kind": "enum-member", "items": []})).is_err());
        let bad_tag = json!({"kind": "import-specifier", "items": [{"name": "x", "modifiers": ["static"]}]});
        assert!(Sequence::from_json(&bad_tag).is_err());
    }

    #[test]
    fn test_raw_sequences_requires_array() {
        assert_eq!(raw_sequences(&json!({"sequences": []})).map(Vec::len), Some(0));
        assert!(raw_sequences(&json!({"sequences": {}})).is_none());
        assert!(raw_sequences(&json!([1, 2])).is_none());
    }
}
