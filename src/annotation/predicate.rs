//! Predicates: boolean tests over a node and its structural context.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::uast::{Node, Role, RoleSet};
use crate::value::Value;

/// A composable test evaluated against one node.
///
/// Predicates see the node itself, the label of the edge it hangs from (its
/// internal role) and a snapshot of its ancestors, which is what [`Path`]
/// steps are matched against.
///
/// [`Path`]: Predicate::Path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum Predicate {
    /// Always true.
    Any,
    Not(Box<Predicate>),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    /// The node's internal type is one of the set.
    HasInternalType(BTreeSet<String>),
    /// The node hangs from an edge whose label is one of the set.
    /// The root has no incoming edge and never matches.
    HasInternalRole(BTreeSet<String>),
    /// The role has already been assigned to the node.
    HasRole(Role),
    HasToken(String),
    /// The property exists, and equals `value` when one is given.
    HasProperty {
        key: String,
        #[serde(default)]
        value: Option<Value>,
    },
    /// Some direct child satisfies the predicate.
    HasChild(Box<Predicate>),
    /// The ancestor chain ending at this node matches the steps; the last
    /// step is the node itself, the one before it its parent, and so on.
    Path(Vec<PathStep>),
}

/// One element of a [`Predicate::Path`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStep {
    Any,
    Type(String),
    InternalRole(String),
    Role(Role),
}

impl Predicate {
    pub fn internal_type(name: impl Into<String>) -> Self {
        Predicate::HasInternalType(BTreeSet::from([name.into()]))
    }

    pub fn internal_types<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Predicate::HasInternalType(names.into_iter().map(Into::into).collect())
    }

    pub fn internal_role(label: impl Into<String>) -> Self {
        Predicate::HasInternalRole(BTreeSet::from([label.into()]))
    }

    pub fn not(predicate: Predicate) -> Self {
        Predicate::Not(Box::new(predicate))
    }

    pub fn has_child(predicate: Predicate) -> Self {
        Predicate::HasChild(Box::new(predicate))
    }

    /// Evaluates the predicate for `node` in context `at`.
    pub fn matches(&self, node: &Node, at: &MatchContext<'_>) -> bool {
        match self {
            Predicate::Any => true,
            Predicate::Not(inner) => !inner.matches(node, at),
            Predicate::And(all) => all.iter().all(|p| p.matches(node, at)),
            Predicate::Or(any) => any.iter().any(|p| p.matches(node, at)),
            Predicate::HasInternalType(types) => types.contains(&node.internal_type),
            Predicate::HasInternalRole(labels) => at.edge.is_some_and(|e| labels.contains(e)),
            Predicate::HasRole(role) => node.has_role(*role),
            Predicate::HasToken(token) => node.token.as_deref() == Some(token.as_str()),
            Predicate::HasProperty { key, value } => match (node.property(key), value) {
                (Some(found), Some(expected)) => found == expected,
                (Some(_), None) => true,
                (None, _) => false,
            },
            Predicate::HasChild(inner) => {
                let lineage = Lineage::of(node, at.edge, at.parent);
                node.children.iter().any(|edge| {
                    let child_at = MatchContext {
                        edge: Some(edge.label.as_str()),
                        parent: Some(&lineage),
                    };
                    inner.matches(&edge.node, &child_at)
                })
            }
            Predicate::Path(steps) => path_matches(steps, node, at),
        }
    }
}

fn path_matches(steps: &[PathStep], node: &Node, at: &MatchContext<'_>) -> bool {
    let Some((last, rest)) = steps.split_last() else {
        return true;
    };
    if !last.matches(&node.internal_type, at.edge, &node.roles) {
        return false;
    }
    let mut ancestor = at.parent;
    for step in rest.iter().rev() {
        match ancestor {
            Some(frame) if step.matches(&frame.internal_type, frame.edge.as_deref(), &frame.roles) => {
                ancestor = frame.parent;
            }
            _ => return false,
        }
    }
    true
}

impl PathStep {
    fn matches(&self, internal_type: &str, edge: Option<&str>, roles: &RoleSet) -> bool {
        match self {
            PathStep::Any => true,
            PathStep::Type(t) => t == internal_type,
            PathStep::InternalRole(label) => edge == Some(label.as_str()),
            PathStep::Role(role) => roles.contains(role),
        }
    }
}

// ============================================================================
// MATCH CONTEXT
// ============================================================================

/// Where the node under test sits in the tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchContext<'a> {
    /// Label of the edge the node hangs from; `None` for the root.
    pub edge: Option<&'a str>,
    /// Snapshot of the parent, linked up to the root.
    pub parent: Option<&'a Lineage<'a>>,
}

/// An owned snapshot of an ancestor, taken when the walk descends past it.
#[derive(Debug, Clone)]
pub struct Lineage<'a> {
    pub internal_type: String,
    pub edge: Option<String>,
    pub roles: RoleSet,
    pub parent: Option<&'a Lineage<'a>>,
}

impl<'a> Lineage<'a> {
    pub fn of(node: &Node, edge: Option<&str>, parent: Option<&'a Lineage<'a>>) -> Self {
        Self {
            internal_type: node.internal_type.clone(),
            edge: edge.map(str::to_string),
            roles: node.roles.clone(),
            parent,
        }
    }
}
