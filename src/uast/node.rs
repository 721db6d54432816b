use serde::{Deserialize, Serialize};

use crate::uast::{Role, RoleSet};
use crate::value::{Value, ValueMap};

/// A location in the original source. Each component is optional because
/// native parsers report different subsets of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl Position {
    pub fn is_empty(&self) -> bool {
        self.line.is_none() && self.column.is_none() && self.offset.is_none()
    }
}

/// A labelled link from a parent to one of its children.
///
/// The label is the raw property name the child came from (`body`,
/// `targets`, `value`, ...). Rules match on it as the child's internal role.
/// Children lifted out of a list also keep their index in the raw list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub node: Node,
}

impl Edge {
    /// Path segment for this edge: `.label` or `.label[index]`.
    pub fn segment(&self) -> String {
        match self.index {
            Some(i) => format!(".{}[{}]", self.label, i),
            None => format!(".{}", self.label),
        }
    }
}

/// A normalized UAST node.
///
/// # Examples
///
/// ```rust
/// use uastify::uast::{Node, Role};
/// let mut node = Node::new("Name");
/// node.token = Some("x".to_string());
/// assert!(node.add_role(Role::SimpleIdentifier));
/// assert!(!node.add_role(Role::SimpleIdentifier));
/// assert!(node.has_role(Role::SimpleIdentifier));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    pub internal_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_position: Option<Position>,
    #[serde(default, skip_serializing_if = "ValueMap::is_empty")]
    pub properties: ValueMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Edge>,
    #[serde(default)]
    pub roles: RoleSet,
}

impl Node {
    pub fn new(internal_type: impl Into<String>) -> Self {
        Self {
            internal_type: internal_type.into(),
            ..Self::default()
        }
    }

    /// Adds a role, returning true if it was not already present.
    pub fn add_role(&mut self, role: Role) -> bool {
        self.roles.insert(role)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Appends a child under the given edge label.
    pub fn push_child(&mut self, label: impl Into<String>, node: Node) {
        self.children.push(Edge {
            label: label.into(),
            index: None,
            node,
        });
    }

    /// Appends a child that was element `index` of the list under `label`.
    pub fn push_element(&mut self, label: impl Into<String>, index: usize, node: Node) {
        self.children.push(Edge {
            label: label.into(),
            index: Some(index),
            node,
        });
    }

    /// Iterates over the children hanging from one edge label, in order.
    pub fn children_labelled<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children
            .iter()
            .filter(move |edge| edge.label == label)
            .map(|edge| &edge.node)
    }

    /// Total number of nodes in this subtree, including self.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(|e| e.node.count()).sum::<usize>()
    }

    /// Visits every node of the subtree in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for edge in &self.children {
            edge.node.walk(visit);
        }
    }

    /// Compact outline used by the CLI and in test assertions:
    /// `Type(Role, Role) "token"` per line, indented by depth.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.outline_into(&mut out, None, 0);
        out
    }

    fn outline_into(&self, out: &mut String, label: Option<&str>, depth: usize) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        if let Some(label) = label {
            out.push_str(label);
            out.push_str(": ");
        }
        out.push_str(&self.internal_type);
        if !self.roles.is_empty() {
            let roles = self
                .roles
                .iter()
                .map(|r| r.as_ref())
                .collect::<Vec<_>>()
                .join(", ");
            out.push('(');
            out.push_str(&roles);
            out.push(')');
        }
        if let Some(token) = &self.token {
            out.push_str(&format!(" {:?}", token));
        }
        out.push('\n');
        for edge in &self.children {
            edge.node.outline_into(out, Some(&edge.label), depth + 1);
        }
    }
}
