//! Generic ordering-and-grouping engine.
//!
//! Leaves first:
//! - `compare`: total order over two items for a sort specification.
//! - `group`: maps structural tags and user patterns to a group name.
//! - `partition`: splits a sequence into independently ordered regions.
//! - `dependency`: keeps dependencies ahead of their dependents.
//! - `newlines`: blank-line policy between adjacent items.
//! - `sort`: the `OrderingEngine` composing all of the above.
//!
//! The engine is pure: it never mutates caller data and performs no I/O.

pub mod compare;
pub mod dependency;
pub mod error;
pub mod group;
pub mod item;
pub mod kinds;
pub mod newlines;
pub mod partition;
pub mod sort;

pub use compare::{compare, CompareOptions, FallbackSort, SortKey, SortOrder, SortType, SpecialCharacters};
pub use dependency::{resolve, DependencyGraph, Resolution};
pub use error::ConfigError;
pub use group::{CustomGroupRule, GroupCache, GroupMatcher, GroupSlot, NewlinesMarker, UNKNOWN_GROUP};
pub use item::{Comment, SortableItem};
pub use kinds::{ArrayElement, ClassMember, ConstructKind, ImportSpecifier, KindName, KindVisitor, ObjectMember, Tag};
pub use newlines::{NewlinesEnforcer, NewlinesPolicy};
pub use partition::{PartitionByComment, Partitioner};
pub use sort::{OrderingEngine, Report, UnresolvedDependency, Violation, ViolationKind};
