//! Predefined group listing and policy validation for one construct kind.

use crate::engine::group::generate_predefined_groups;
use crate::engine::{ConstructKind, KindName, KindVisitor, OrderingEngine, Tag};
use crate::models::policy::OrderPolicy;

/// Upper bound on requested modifiers; names grow factorially with it.
pub const MAX_LISTED_MODIFIERS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupListing {
    pub selectors: Vec<&'static str>,
    pub modifiers: Vec<&'static str>,
    pub groups: Vec<String>,
}

struct Describe<'a> {
    selectors: &'a [String],
    modifiers: &'a [String],
    policy: Option<&'a OrderPolicy>,
}

fn lookup<T: Tag>(names: &[String], what: &str, kind: &str) -> Result<Vec<T>, String> {
    names
        .iter()
        .map(|n| T::from_name(n).ok_or_else(|| format!("unknown {} '{}' for {}", what, n, kind)))
        .collect()
}

impl KindVisitor for Describe<'_> {
    type Output = Result<GroupListing, String>;

    fn visit<K: ConstructKind>(self) -> Self::Output {
        if let Some(policy) = self.policy {
            OrderingEngine::<K>::new(policy).map_err(|e| e.to_string())?;
        }
        let selectors: Vec<K::Selector> = if self.selectors.is_empty() {
            K::Selector::ALL.to_vec()
        } else {
            lookup(self.selectors, "selector", K::NAME)?
        };
        let modifiers: Vec<K::Modifier> = lookup(self.modifiers, "modifier", K::NAME)?;
        if modifiers.len() > MAX_LISTED_MODIFIERS {
            return Err(format!("at most {} modifiers can be listed at once", MAX_LISTED_MODIFIERS));
        }
        Ok(GroupListing {
            selectors: K::Selector::ALL.iter().map(|s| s.as_str()).collect(),
            modifiers: K::Modifier::ALL.iter().map(|m| m.as_str()).collect(),
            groups: generate_predefined_groups::<K>(&selectors, &modifiers),
        })
    }
}

/// Describe `kind`: its tags and the group names derivable from the given
/// selectors (all when empty) and modifiers. A policy, when given, must be
/// valid for `kind`.
pub fn describe(
    kind: KindName,
    selectors: &[String],
    modifiers: &[String],
    policy: Option<&OrderPolicy>,
) -> Result<GroupListing, String> {
    kind.accept(Describe {
        selectors,
        modifiers,
        policy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_describe_lists_modifier_permutations() {
        let listing = describe(
            KindName::ClassMember,
            &strings(&["method"]),
            &strings(&["static", "async"]),
            None,
        )
        .unwrap();
        assert_eq!(
            listing.groups,
            vec!["static-async-method", "async-static-method", "static-method", "async-method", "method"]
        );
        assert!(listing.modifiers.contains(&"decorated"));
    }

    #[test]
    fn test_describe_defaults_to_all_selectors() {
        let listing = describe(KindName::ObjectMember, &[], &[], None).unwrap();
        assert_eq!(listing.groups, vec!["multiline", "method", "property", "member"]);
    }

    #[test]
    fn test_describe_rejects_unknown_tags_and_invalid_policy() {
        let err = describe(KindName::ImportSpecifier, &[], &strings(&["static"]), None).unwrap_err();
        assert!(err.contains("unknown modifier 'static'"));

        let policy: OrderPolicy = toml::from_str("groups = [\"method\"]").unwrap();
        assert!(describe(KindName::ClassMember, &[], &[], Some(&policy)).is_ok());
        let err = describe(KindName::ImportSpecifier, &[], &[], Some(&policy)).unwrap_err();
        assert!(err.contains("Invalid group(s): method"));
    }
}
