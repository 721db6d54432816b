//! # Rule Engine
//!
//! Walks a node tree and assigns [`Role`](crate::uast::Role)s through a
//! declarative, structurally scoped rule language.
//!
//! ## Invariants
//! - Roles are only ever added; a rule cannot remove or replace a role.
//! - Children are visited in tree order; the tree shape is never changed.
//! - An `Error` action aborts the run immediately.

pub mod engine;
pub mod predicate;
pub mod rule;

pub use engine::{annotate, AnnotationStats, Annotator};
pub use predicate::{MatchContext, PathStep, Predicate};
pub use rule::{Action, Rule, Scope};
