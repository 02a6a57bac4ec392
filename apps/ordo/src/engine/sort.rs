//! The ordering engine: classify, partition, sort, resolve, diff.
//!
//! `run` produces two orders over item indices:
//! - `sorted`: every item sorted, ignored ones included.
//! - `fixed`: ignored items pinned at their index inside their partition,
//!   everything else sorted around them. This is the order a fix applies.
//!
//! Each adjacent input pair `(l, r)` is an ordering violation when
//! `sorted_pos(l) > sorted_pos(r)` or `sorted_pos(l) >= fixed_pos(r)`.

use crate::engine::compare::{compare, SortType};
use crate::engine::dependency::{resolve, DependencyGraph};
use crate::engine::error::ConfigError;
use crate::engine::group::{GroupCache, GroupMatcher};
use crate::engine::item::SortableItem;
use crate::engine::kinds::ConstructKind;
use crate::engine::newlines::{spacing_violation, validate_newlines, NewlinesEnforcer, SpacingViolation};
use crate::engine::partition::Partitioner;
use crate::engine::CompareOptions;
use crate::models::policy::OrderPolicy;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    Order,
    GroupOrder,
    DependencyOrder,
    MissingSpacing,
    ExtraSpacing,
}

impl ViolationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ViolationKind::Order => "order",
            ViolationKind::GroupOrder => "group-order",
            ViolationKind::DependencyOrder => "dependency-order",
            ViolationKind::MissingSpacing => "missing-spacing",
            ViolationKind::ExtraSpacing => "extra-spacing",
        }
    }

    pub fn is_spacing(self) -> bool {
        matches!(self, ViolationKind::MissingSpacing | ViolationKind::ExtraSpacing)
    }
}

/// A problem between two adjacent input items, by input index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub left: usize,
    pub right: usize,
    pub kind: ViolationKind,
    pub left_group: String,
    pub right_group: String,
    /// For `dependency-order`: the earliest item depending on `right`.
    pub dependent: Option<usize>,
}

/// A dependency edge dropped because it closes a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnresolvedDependency {
    pub item: usize,
    pub dependency: usize,
}

/// Everything computed for one sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub groups: Vec<String>,
    pub ranks: Vec<usize>,
    pub partitions: Vec<usize>,
    pub sorted: Vec<usize>,
    pub fixed: Vec<usize>,
    pub violations: Vec<Violation>,
    pub unresolved: Vec<UnresolvedDependency>,
    /// False when dependency repair hit its iteration cap.
    pub converged: bool,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Whether applying `fixed` would move anything.
    pub fn needs_reorder(&self) -> bool {
        self.fixed.iter().enumerate().any(|(pos, &idx)| pos != idx)
    }
}

/// Validated configuration for one construct kind, reusable across sequences.
#[derive(Debug, Clone)]
pub struct OrderingEngine<K: ConstructKind> {
    options: CompareOptions,
    matcher: GroupMatcher<K>,
    partitioner: Partitioner,
    newlines: NewlinesEnforcer,
    track_dependencies: bool,
}

impl<K: ConstructKind> OrderingEngine<K> {
    pub fn new(policy: &OrderPolicy) -> Result<Self, ConfigError> {
        validate_newlines(
            policy.newlines_between,
            policy.partition_by_new_line,
            &policy.groups,
            &policy.custom_groups,
        )?;
        let options = policy.compare_options();
        let matcher = GroupMatcher::new(&policy.groups, &policy.custom_groups)?;

        let uses_custom = |sort_type: Option<SortType>, fallback: Option<SortType>| {
            sort_type == Some(SortType::Custom) || fallback == Some(SortType::Custom)
        };
        let needs_alphabet = uses_custom(
            Some(options.sort_type),
            options.fallback.as_ref().map(|f| f.sort_type),
        ) || matcher
            .custom_groups()
            .iter()
            .any(|g| uses_custom(g.sort_type, g.fallback_sort.as_ref().map(|f| f.sort_type)));
        if needs_alphabet && options.alphabet.is_empty() {
            return Err(ConfigError::MissingAlphabet);
        }

        Ok(OrderingEngine {
            partitioner: Partitioner::new(&policy.partition_by_comment, policy.partition_by_new_line)?,
            newlines: NewlinesEnforcer::new(policy.newlines_between, &policy.groups, &policy.custom_groups),
            track_dependencies: policy.track_dependencies,
            options,
            matcher,
        })
    }

    pub fn matcher(&self) -> &GroupMatcher<K> {
        &self.matcher
    }

    pub fn partitioner(&self) -> &Partitioner {
        &self.partitioner
    }

    pub fn run(&self, items: &[SortableItem<K>]) -> Report {
        let mut cache = GroupCache::default();
        let groups: Vec<String> = items
            .iter()
            .map(|item| self.matcher.classify(item, &mut cache).to_string())
            .collect();
        let ranks: Vec<usize> = groups.iter().map(|g| self.matcher.rank(g)).collect();
        let partitions = self.partitioner.assign(items);

        let mut sorted = self.sort_partitions(items, &ranks, &partitions, false);
        let mut fixed = self.sort_partitions(items, &ranks, &partitions, true);

        let mut unresolved = Vec::new();
        let mut converged = true;
        let mut graph = None;
        if self.track_dependencies && items.iter().any(|i| !i.depends_on.is_empty()) {
            let full = DependencyGraph::build(items);
            let cycles = full.cycle_edges();
            let acyclic = full.without(&cycles);
            unresolved = cycles
                .into_iter()
                .map(|(item, dependency)| UnresolvedDependency { item, dependency })
                .collect();
            let all = resolve(&sorted, &acyclic, |_| false);
            let pinned = resolve(&fixed, &acyclic, |i| items[i].ignored);
            converged = all.converged && pinned.converged;
            sorted = all.order;
            fixed = pinned.order;
            graph = Some(acyclic);
        }

        let sorted_pos = positions(&sorted);
        let fixed_pos = positions(&fixed);
        let mut violations = Vec::new();
        for right in 1..items.len() {
            let left = right - 1;
            let violation = |kind, dependent| Violation {
                left,
                right,
                kind,
                left_group: groups[left].clone(),
                right_group: groups[right].clone(),
                dependent,
            };

            // an earlier dependent of `right` is reported even when the pair itself is in order
            let dependent = graph.as_ref().and_then(|g| g.first_unordered_dependent(right));
            if dependent.is_some() {
                violations.push(violation(ViolationKind::DependencyOrder, dependent));
            } else if sorted_pos[left] > sorted_pos[right] || sorted_pos[left] >= fixed_pos[right] {
                let kind = if ranks[left] == ranks[right] {
                    ViolationKind::Order
                } else {
                    ViolationKind::GroupOrder
                };
                violations.push(violation(kind, None));
            }

            if partitions[left] != partitions[right] || ranks[left] > ranks[right] {
                continue;
            }
            let policy = self.newlines.between(ranks[left], ranks[right]);
            match spacing_violation(policy, items[right].blank_lines_before) {
                Some(SpacingViolation::Missing) => violations.push(violation(ViolationKind::MissingSpacing, None)),
                Some(SpacingViolation::Extra) => violations.push(violation(ViolationKind::ExtraSpacing, None)),
                None => {}
            }
        }

        debug!(
            kind = K::NAME,
            items = items.len(),
            partitions = partitions.last().map_or(0, |p| p + 1),
            violations = violations.len(),
            unresolved = unresolved.len(),
            "ordered sequence"
        );
        Report {
            groups,
            ranks,
            partitions,
            sorted,
            fixed,
            violations,
            unresolved,
            converged,
        }
    }

    /// Blank lines each slot of `report.fixed` should be preceded by.
    ///
    /// Gaps belong to positions, not items: slot `k` starts from the input
    /// gap before index `k`. Between items of one partition in rank order,
    /// `always` makes it 1 and `never` makes it 0.
    pub fn spacing_plan(&self, items: &[SortableItem<K>], report: &Report) -> Vec<usize> {
        report
            .fixed
            .iter()
            .enumerate()
            .map(|(slot, &idx)| {
                let keep = items[slot].blank_lines_before;
                if slot == 0 {
                    return keep;
                }
                let prev = report.fixed[slot - 1];
                if report.partitions[prev] != report.partitions[idx] || report.ranks[prev] > report.ranks[idx] {
                    return keep;
                }
                self.newlines
                    .between(report.ranks[prev], report.ranks[idx])
                    .required_lines()
                    .unwrap_or(keep)
            })
            .collect()
    }

    /// Sort each partition by rank buckets, optionally pinning ignored items.
    fn sort_partitions(
        &self,
        items: &[SortableItem<K>],
        ranks: &[usize],
        partitions: &[usize],
        pin_ignored: bool,
    ) -> Vec<usize> {
        let mut out = Vec::with_capacity(items.len());
        let mut start = 0;
        while start < items.len() {
            let end = partitions[start..]
                .iter()
                .position(|&p| p != partitions[start])
                .map_or(items.len(), |offset| start + offset);

            let (pinned, movable): (Vec<usize>, Vec<usize>) =
                (start..end).partition(|&i| pin_ignored && items[i].ignored);
            let mut buckets: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
            for i in movable {
                buckets.entry(ranks[i]).or_default().push(i);
            }
            let mut local = Vec::with_capacity(end - start);
            for (rank, mut bucket) in buckets {
                let options = self.matcher.compare_options_for_rank(rank, &self.options);
                bucket.sort_by(|&a, &b| compare(&items[a], &items[b], &options));
                local.extend(bucket);
            }
            for i in pinned {
                let at = (i - start).min(local.len());
                local.insert(at, i);
            }
            out.extend(local);
            start = end;
        }
        out
    }
}

fn positions(order: &[usize]) -> Vec<usize> {
    let mut pos = vec![0; order.len()];
    for (p, &idx) in order.iter().enumerate() {
        pos[idx] = p;
    }
    pos
}
