//! Dependency resolution: keep every dependency ahead of its dependents.
//!
//! Cycles are found up front with Kahn's algorithm. Among the nodes Kahn
//! cannot drain, an edge `a -> b` (a depends on b) is a cycle edge when `b`
//! reaches back to `a`. Cycle edges are dropped before repair and reported,
//! so the repair loop only ever sees an acyclic graph.

use crate::engine::item::SortableItem;
use crate::engine::kinds::ConstructKind;
use std::collections::{HashMap, VecDeque};
use tracing::trace;

/// Direct "depends on" edges between item indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    deps: Vec<Vec<usize>>,
}

impl DependencyGraph {
    pub fn build<K: ConstructKind>(items: &[SortableItem<K>]) -> Self {
        let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, item) in items.iter().enumerate() {
            for name in item.exposed_names() {
                by_name.entry(name).or_default().push(i);
            }
        }
        let deps = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let mut targets: Vec<usize> = item
                    .depends_on
                    .iter()
                    .filter_map(|name| by_name.get(name.as_str()))
                    .flatten()
                    .copied()
                    .filter(|&j| j != i)
                    .collect();
                targets.sort_unstable();
                targets.dedup();
                targets
            })
            .collect();
        DependencyGraph { deps }
    }

    pub fn len(&self) -> usize {
        self.deps.len()
    }

    /// True when no item depends on another.
    pub fn is_empty(&self) -> bool {
        self.deps.iter().all(Vec::is_empty)
    }

    pub fn dependencies(&self, item: usize) -> &[usize] {
        &self.deps[item]
    }

    /// Whether `from` depends on `to`, directly or through other items.
    pub fn reaches(&self, from: usize, to: usize) -> bool {
        let mut seen = vec![false; self.deps.len()];
        let mut queue = VecDeque::from([from]);
        while let Some(node) = queue.pop_front() {
            for &next in &self.deps[node] {
                if next == to {
                    return true;
                }
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
        false
    }

    /// Edges `(dependent, dependency)` that close a cycle, in index order.
    pub fn cycle_edges(&self) -> Vec<(usize, usize)> {
        let n = self.deps.len();
        let mut pending: Vec<usize> = self.deps.iter().map(Vec::len).collect();
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (i, deps) in self.deps.iter().enumerate() {
            for &d in deps {
                dependents[d].push(i);
            }
        }

        let mut queue: VecDeque<usize> = (0..n).filter(|&i| pending[i] == 0).collect();
        let mut drained = vec![false; n];
        while let Some(node) = queue.pop_front() {
            drained[node] = true;
            for &dependent in &dependents[node] {
                pending[dependent] -= 1;
                if pending[dependent] == 0 {
                    queue.push_back(dependent);
                }
            }
        }

        let mut edges = Vec::new();
        for a in (0..n).filter(|&i| !drained[i]) {
            for &b in &self.deps[a] {
                if !drained[b] && self.reaches(b, a) {
                    edges.push((a, b));
                }
            }
        }
        edges
    }

    /// Copy of the graph with `edges` removed.
    pub fn without(&self, edges: &[(usize, usize)]) -> Self {
        let mut deps = self.deps.clone();
        for &(a, b) in edges {
            deps[a].retain(|&d| d != b);
        }
        DependencyGraph { deps }
    }

    /// Earliest item before `right` in input order that depends on it.
    pub fn first_unordered_dependent(&self, right: usize) -> Option<usize> {
        (0..right).find(|&i| self.reaches(i, right))
    }
}

/// Outcome of `resolve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub order: Vec<usize>,
    /// False when the iteration cap stopped the repair loop.
    pub converged: bool,
}

/// Repair `order` so no item precedes one of its dependencies.
///
/// Pinned items keep their positions and are not moved; edges to them are
/// left as they are. Each step moves the first offending item to right after
/// its last dependency. The loop stops at a fixed point or after `n² + 1`
/// steps, where `n` is the number of movable items. Every step rescans the
/// whole order, so the worst case (a long chain given in reverse) costs
/// O(n³).
pub fn resolve(order: &[usize], graph: &DependencyGraph, is_pinned: impl Fn(usize) -> bool) -> Resolution {
    let pinned: Vec<(usize, usize)> = order
        .iter()
        .enumerate()
        .filter(|&(_, &idx)| is_pinned(idx))
        .map(|(pos, &idx)| (pos, idx))
        .collect();
    let mut movable: Vec<usize> = order.iter().copied().filter(|&idx| !is_pinned(idx)).collect();

    let cap = movable.len() * movable.len() + 1;
    let mut converged = false;
    for step in 0..cap {
        let mut position = vec![usize::MAX; graph.len()];
        for (pos, &idx) in movable.iter().enumerate() {
            position[idx] = pos;
        }
        let offender = movable.iter().enumerate().find_map(|(pos, &idx)| {
            graph
                .dependencies(idx)
                .iter()
                .map(|&d| position[d])
                .filter(|&p| p != usize::MAX && p > pos)
                .max()
                .map(|last| (pos, last))
        });
        match offender {
            None => {
                converged = true;
                break;
            }
            Some((from, last)) => {
                let idx = movable.remove(from);
                // `last` shifted down by one with the removal
                movable.insert(last, idx);
                trace!(step, item = idx, "moved after its last dependency");
            }
        }
    }

    for (pos, idx) in pinned {
        let at = pos.min(movable.len());
        movable.insert(at, idx);
    }
    Resolution {
        order: movable,
        converged,
    }
}
