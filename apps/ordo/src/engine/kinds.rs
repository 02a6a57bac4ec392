//! Closed structural-tag enumerations, one set per construct kind.
//!
//! A predefined group name is `[modifier-]*selector`, e.g. `static-private-method`.
//! Tag order in `Tag::ALL` is the priority order used to break ties between
//! predefined groups.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// A selector or modifier value.
pub trait Tag:
    Copy + Eq + Ord + Hash + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Every value of this tag set, highest priority first.
    const ALL: &'static [Self];

    /// Dash-separated configuration name.
    fn as_str(self) -> &'static str;

    fn priority(self) -> usize {
        Self::ALL
            .iter()
            .position(|t| *t == self)
            .unwrap_or(usize::MAX)
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == name)
    }
}

/// A kind of language construct the engine can order.
pub trait ConstructKind: Copy + fmt::Debug + Send + Sync + 'static {
    type Selector: Tag;
    type Modifier: Tag;

    const NAME: &'static str;
}

macro_rules! tags {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant,)*
        }

        impl Tag for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),*];

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }
        }
    };
}

macro_rules! kind {
    ($(#[$meta:meta])* $name:ident, $text:literal, $selector:ty, $modifier:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl ConstructKind for $name {
            type Selector = $selector;
            type Modifier = $modifier;

            const NAME: &'static str = $text;
        }
    };
}

tags!(
    /// Array literal entries.
    ArraySelector { Literal => "literal" }
);

/// Array entries carry no modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NoModifier {}

impl Tag for NoModifier {
    const ALL: &'static [Self] = &[];

    fn as_str(self) -> &'static str {
        match self {}
    }
}

impl Serialize for NoModifier {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        match *self {}
    }
}

impl<'de> Deserialize<'de> for NoModifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Err(de::Error::unknown_variant(&name, &[]))
    }
}

tags!(ObjectSelector {
    Multiline => "multiline",
    Method => "method",
    Property => "property",
    Member => "member",
});

tags!(ObjectModifier { Multiline => "multiline" });

tags!(ClassSelector {
    IndexSignature => "index-signature",
    StaticBlock => "static-block",
    AccessorProperty => "accessor-property",
    FunctionProperty => "function-property",
    Constructor => "constructor",
    GetMethod => "get-method",
    SetMethod => "set-method",
    Property => "property",
    Method => "method",
});

tags!(ClassModifier {
    Declare => "declare",
    Protected => "protected",
    Private => "private",
    Public => "public",
    Static => "static",
    Abstract => "abstract",
    Override => "override",
    Readonly => "readonly",
    Decorated => "decorated",
    Optional => "optional",
    Async => "async",
});

tags!(ImportSelector { Import => "import" });

tags!(ImportModifier {
    Value => "value",
    Type => "type",
});

kind!(
    /// Entries of an array literal (`[a, b].includes(x)`, `new Set([...])`).
    ArrayElement, "array-element", ArraySelector, NoModifier
);
kind!(
    /// Members of an object literal or destructuring pattern.
    ObjectMember, "object-member", ObjectSelector, ObjectModifier
);
kind!(
    /// Members of a class body.
    ClassMember, "class-member", ClassSelector, ClassModifier
);
kind!(
    /// Specifiers of a named import clause.
    ImportSpecifier, "import-specifier", ImportSelector, ImportModifier
);

/// Runtime name of a construct kind, as written in documents and on the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KindName {
    ArrayElement,
    ObjectMember,
    ClassMember,
    ImportSpecifier,
}

impl KindName {
    pub const ALL: [KindName; 4] = [
        KindName::ArrayElement,
        KindName::ObjectMember,
        KindName::ClassMember,
        KindName::ImportSpecifier,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            KindName::ArrayElement => ArrayElement::NAME,
            KindName::ObjectMember => ObjectMember::NAME,
            KindName::ClassMember => ClassMember::NAME,
            KindName::ImportSpecifier => ImportSpecifier::NAME,
        }
    }

    /// Run `visitor` with the static kind this name stands for.
    pub fn accept<V: KindVisitor>(self, visitor: V) -> V::Output {
        match self {
            KindName::ArrayElement => visitor.visit::<ArrayElement>(),
            KindName::ObjectMember => visitor.visit::<ObjectMember>(),
            KindName::ClassMember => visitor.visit::<ClassMember>(),
            KindName::ImportSpecifier => visitor.visit::<ImportSpecifier>(),
        }
    }

    /// Selector and modifier names for this kind, in priority order.
    pub fn tag_names(self) -> (Vec<&'static str>, Vec<&'static str>) {
        struct Names;
        impl KindVisitor for Names {
            type Output = (Vec<&'static str>, Vec<&'static str>);

            fn visit<K: ConstructKind>(self) -> Self::Output {
                (
                    K::Selector::ALL.iter().map(|s| s.as_str()).collect(),
                    K::Modifier::ALL.iter().map(|m| m.as_str()).collect(),
                )
            }
        }
        self.accept(Names)
    }
}

/// Generic code to run for a construct kind only known at runtime.
pub trait KindVisitor {
    type Output;

    fn visit<K: ConstructKind>(self) -> Self::Output;
}

impl fmt::Display for KindName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KindName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KindName::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = KindName::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown kind '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_lookup_and_priority() {
        assert_eq!(ClassSelector::from_name("get-method"), Some(ClassSelector::GetMethod));
        assert_eq!(ClassSelector::from_name("get"), None);
        assert!(ClassModifier::Protected.priority() < ClassModifier::Static.priority());
        assert!(NoModifier::ALL.is_empty());
    }

    #[test]
    fn test_tags_deserialize_from_kebab_names() {
        let sel: ClassSelector = serde_json::from_str("\"index-signature\"").unwrap();
        assert_eq!(sel, ClassSelector::IndexSignature);
        assert!(serde_json::from_str::<ImportModifier>("\"static\"").is_err());
    }

    #[test]
    fn test_kind_name_round_trips_through_str() {
        for kind in KindName::ALL {
            assert_eq!(kind.as_str().parse::<KindName>().unwrap(), kind);
        }
        assert!("enum-member".parse::<KindName>().is_err());
    }

    #[test]
    fn test_tag_names_follow_priority_order() {
        let (selectors, modifiers) = KindName::ImportSpecifier.tag_names();
        assert_eq!(selectors, vec!["import"]);
        assert_eq!(modifiers, vec!["value", "type"]);
        let (_, none) = KindName::ArrayElement.tag_names();
        assert!(none.is_empty());
    }
}
