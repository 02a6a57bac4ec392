//! Blank-line policy between adjacent items.

use crate::engine::error::ConfigError;
use crate::engine::group::{CustomGroupRule, GroupSlot};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewlinesPolicy {
    #[default]
    Ignore,
    Always,
    Never,
}

impl NewlinesPolicy {
    /// Blank lines a fix should leave, `None` to keep what is there.
    pub fn required_lines(self) -> Option<usize> {
        match self {
            NewlinesPolicy::Ignore => None,
            NewlinesPolicy::Always => Some(1),
            NewlinesPolicy::Never => Some(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacingViolation {
    Missing,
    Extra,
}

/// Check the actual blank-line count between two in-order items.
pub fn spacing_violation(policy: NewlinesPolicy, blank_lines: usize) -> Option<SpacingViolation> {
    match policy {
        NewlinesPolicy::Ignore => None,
        NewlinesPolicy::Never if blank_lines > 0 => Some(SpacingViolation::Extra),
        NewlinesPolicy::Never => None,
        NewlinesPolicy::Always if blank_lines == 0 => Some(SpacingViolation::Missing),
        NewlinesPolicy::Always if blank_lines > 1 => Some(SpacingViolation::Extra),
        NewlinesPolicy::Always => None,
    }
}

/// Reject newline settings that contradict each other or the group layout.
pub fn validate_newlines(
    global: NewlinesPolicy,
    partition_by_new_line: bool,
    groups: &[GroupSlot],
    custom_groups: &[CustomGroupRule],
) -> Result<(), ConfigError> {
    let has_markers = groups.iter().any(|slot| slot.marker().is_some());
    if partition_by_new_line {
        if global != NewlinesPolicy::Ignore || has_markers {
            return Err(ConfigError::NewlinesWithPartitionByNewLine);
        }
        if let Some(group) = custom_groups.iter().find(|g| g.newlines_inside.is_some()) {
            return Err(ConfigError::NewlinesInsideWithPartitionByNewLine(group.group_name.clone()));
        }
    }
    for (i, slot) in groups.iter().enumerate() {
        if slot.marker().is_none() {
            continue;
        }
        let first_or_last = i == 0 || i + 1 == groups.len();
        let after_marker = i > 0 && groups[i - 1].marker().is_some();
        if first_or_last || after_marker {
            return Err(ConfigError::MisplacedNewlinesMarker(i));
        }
    }
    Ok(())
}

/// Decides the policy for each adjacent pair from group ranks.
#[derive(Debug, Clone)]
pub struct NewlinesEnforcer {
    global: NewlinesPolicy,
    groups: Vec<GroupSlot>,
    inside: HashMap<String, NewlinesPolicy>,
}

impl NewlinesEnforcer {
    pub fn new(global: NewlinesPolicy, groups: &[GroupSlot], custom_groups: &[CustomGroupRule]) -> Self {
        let inside = custom_groups
            .iter()
            .filter_map(|g| g.newlines_inside.map(|p| (g.group_name.clone(), p)))
            .collect();
        NewlinesEnforcer {
            global,
            groups: groups.to_vec(),
            inside,
        }
    }

    /// Whether any rule can ever demand or forbid blank lines.
    pub fn is_active(&self) -> bool {
        self.global != NewlinesPolicy::Ignore
            || !self.inside.is_empty()
            || self.groups.iter().any(|s| s.marker().is_some())
    }

    /// Policy between an item of rank `left` followed by one of rank `right`.
    ///
    /// A custom group's `newlinesInside` applies when both sit in its
    /// single-name slot. Otherwise markers between the two ranks win
    /// (`always` over `never` over `ignore`), then the global policy, where
    /// `always` inside one rank means `never`.
    pub fn between(&self, left: usize, right: usize) -> NewlinesPolicy {
        if left == right {
            if let Some(GroupSlot::Single(name)) = self.groups.get(left) {
                if let Some(policy) = self.inside.get(name) {
                    return *policy;
                }
            }
        }
        if left < right {
            let end = right.min(self.groups.len());
            let start = (left + 1).min(end);
            let markers: Vec<NewlinesPolicy> = self.groups[start..end]
                .iter()
                .filter_map(GroupSlot::marker)
                .collect();
            if !markers.is_empty() {
                return [NewlinesPolicy::Always, NewlinesPolicy::Never]
                    .into_iter()
                    .find(|p| markers.contains(p))
                    .unwrap_or(NewlinesPolicy::Ignore);
            }
        }
        match self.global {
            NewlinesPolicy::Always if left == right => NewlinesPolicy::Never,
            policy => policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::group::NewlinesMarker;

    fn single(name: &str) -> GroupSlot {
        GroupSlot::Single(name.into())
    }

    fn marker(policy: NewlinesPolicy) -> GroupSlot {
        GroupSlot::Newlines(NewlinesMarker {
            newlines_between: policy,
        })
    }

    #[test]
    fn test_spacing_violation_table() {
        use NewlinesPolicy::*;
        assert_eq!(spacing_violation(Always, 0), Some(SpacingViolation::Missing));
        assert_eq!(spacing_violation(Always, 1), None);
        assert_eq!(spacing_violation(Always, 2), Some(SpacingViolation::Extra));
        assert_eq!(spacing_violation(Never, 0), None);
        assert_eq!(spacing_violation(Never, 3), Some(SpacingViolation::Extra));
        assert_eq!(spacing_violation(Ignore, 7), None);
    }

    #[test]
    fn test_global_always_means_never_inside_one_rank() {
        let groups = vec![single("a"), single("b")];
        let enforcer = NewlinesEnforcer::new(NewlinesPolicy::Always, &groups, &[]);
        assert_eq!(enforcer.between(0, 1), NewlinesPolicy::Always);
        assert_eq!(enforcer.between(1, 1), NewlinesPolicy::Never);
        let never = NewlinesEnforcer::new(NewlinesPolicy::Never, &groups, &[]);
        assert_eq!(never.between(0, 1), NewlinesPolicy::Never);
    }

    #[test]
    fn test_newlines_inside_wins_for_same_custom_group() {
        let groups = vec![single("g"), single("h")];
        let custom: Vec<CustomGroupRule> =
            serde_json::from_str(r#"[{"groupName": "g", "newlinesInside": "always"}]"#).unwrap();
        let enforcer = NewlinesEnforcer::new(NewlinesPolicy::Never, &groups, &custom);
        assert_eq!(enforcer.between(0, 0), NewlinesPolicy::Always);
        assert_eq!(enforcer.between(1, 1), NewlinesPolicy::Never);
        assert_eq!(enforcer.between(0, 1), NewlinesPolicy::Never);
    }

    #[test]
    fn test_markers_override_global_between_their_ranks() {
        let groups = vec![
            single("a"),
            marker(NewlinesPolicy::Never),
            single("b"),
            marker(NewlinesPolicy::Always),
            single("c"),
        ];
        let enforcer = NewlinesEnforcer::new(NewlinesPolicy::Ignore, &groups, &[]);
        assert_eq!(enforcer.between(0, 2), NewlinesPolicy::Never);
        assert_eq!(enforcer.between(2, 4), NewlinesPolicy::Always);
        assert_eq!(enforcer.between(0, 4), NewlinesPolicy::Always);
        assert_eq!(enforcer.between(4, 5), NewlinesPolicy::Ignore);
    }

    #[test]
    fn test_validate_rejects_conflicts() {
        let groups = vec![single("a"), single("b")];
        assert!(validate_newlines(NewlinesPolicy::Always, false, &groups, &[]).is_ok());
        assert!(matches!(
            validate_newlines(NewlinesPolicy::Always, true, &groups, &[]),
            Err(ConfigError::NewlinesWithPartitionByNewLine)
        ));
        let custom: Vec<CustomGroupRule> =
            serde_json::from_str(r#"[{"groupName": "a", "newlinesInside": "never"}]"#).unwrap();
        assert!(matches!(
            validate_newlines(NewlinesPolicy::Ignore, true, &groups, &custom),
            Err(ConfigError::NewlinesInsideWithPartitionByNewLine(name)) if name == "a"
        ));
        let misplaced = vec![marker(NewlinesPolicy::Always), single("a")];
        assert!(matches!(
            validate_newlines(NewlinesPolicy::Ignore, false, &misplaced, &[]),
            Err(ConfigError::MisplacedNewlinesMarker(0))
        ));
        let doubled = vec![single("a"), marker(NewlinesPolicy::Always), marker(NewlinesPolicy::Never), single("b")];
        assert!(matches!(
            validate_newlines(NewlinesPolicy::Ignore, false, &doubled, &[]),
            Err(ConfigError::MisplacedNewlinesMarker(2))
        ));
    }
}
