//! The rule interpreter.
//!
//! A single pre-order pass: the top-level rule is applied to the root, and
//! scoped actions drive the walk further down. At every scope the rules run in
//! declaration order and every matching rule contributes its roles. Roles are
//! only ever added, so running the same rules twice changes nothing.

use std::sync::Arc;

use tracing::debug;

use crate::annotation::predicate::{Lineage, MatchContext};
use crate::annotation::{Action, Rule, Scope};
use crate::errors::AnnotationError;
use crate::uast::Node;

/// Annotates `tree` in place with `rule`.
///
/// On error the tree may already carry some roles; callers must treat it as
/// unusable.
pub fn annotate(tree: &mut Node, rule: &Rule) -> Result<(), AnnotationError> {
    Walker::default().apply(rule, tree, None, None).map(|_| ())
}

/// Counters collected during one annotation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationStats {
    /// Rule evaluations whose predicate matched.
    pub matched: usize,
    /// Roles newly inserted (re-assignments are not counted).
    pub assigned: usize,
}

/// Shares one rule tree across any number of annotation runs.
#[derive(Debug, Clone)]
pub struct Annotator {
    rule: Arc<Rule>,
}

impl Annotator {
    pub fn new(rule: impl Into<Arc<Rule>>) -> Self {
        Self { rule: rule.into() }
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn annotate(&self, tree: &mut Node) -> Result<AnnotationStats, AnnotationError> {
        let mut walker = Walker::default();
        walker.apply(&self.rule, tree, None, None)?;
        debug!(
            matched = walker.stats.matched,
            assigned = walker.stats.assigned,
            "annotated node tree"
        );
        Ok(walker.stats)
    }
}

// ============================================================================
// WALKER
// ============================================================================

#[derive(Debug, Default)]
struct Walker {
    stats: AnnotationStats,
    segments: Vec<String>,
}

impl Walker {
    fn apply(
        &mut self,
        rule: &Rule,
        node: &mut Node,
        edge: Option<&str>,
        parent: Option<&Lineage<'_>>,
    ) -> Result<(), AnnotationError> {
        let at = MatchContext { edge, parent };
        if !rule.predicate.matches(node, &at) {
            return Ok(());
        }
        self.stats.matched += 1;

        for action in &rule.actions {
            match action {
                Action::AssignRoles(roles) => {
                    for role in roles {
                        if node.add_role(*role) {
                            self.stats.assigned += 1;
                        }
                    }
                }
                Action::Error(message) => {
                    return Err(AnnotationError::Validation {
                        message: message.clone(),
                        internal_type: node.internal_type.clone(),
                        path: self.path(),
                    });
                }
                Action::Recurse { scope, rules } => match scope {
                    Scope::SelfNode => {
                        for nested in rules {
                            self.apply(nested, node, edge, parent)?;
                        }
                    }
                    Scope::Children => self.apply_children(rules, node, edge, parent)?,
                    Scope::Descendants => self.apply_descendants(rules, node, edge, parent)?,
                },
            }
        }
        Ok(())
    }

    fn apply_children(
        &mut self,
        rules: &[Rule],
        node: &mut Node,
        edge: Option<&str>,
        parent: Option<&Lineage<'_>>,
    ) -> Result<(), AnnotationError> {
        let lineage = Lineage::of(node, edge, parent);
        for child in node.children.iter_mut() {
            self.segments.push(child.segment());
            let label = child.label.as_str();
            for rule in rules {
                self.apply(rule, &mut child.node, Some(label), Some(&lineage))?;
            }
            self.segments.pop();
        }
        Ok(())
    }

    fn apply_descendants(
        &mut self,
        rules: &[Rule],
        node: &mut Node,
        edge: Option<&str>,
        parent: Option<&Lineage<'_>>,
    ) -> Result<(), AnnotationError> {
        let lineage = Lineage::of(node, edge, parent);
        for child in node.children.iter_mut() {
            self.segments.push(child.segment());
            let label = child.label.as_str();
            for rule in rules {
                self.apply(rule, &mut child.node, Some(label), Some(&lineage))?;
            }
            self.apply_descendants(rules, &mut child.node, Some(label), Some(&lineage))?;
            self.segments.pop();
        }
        Ok(())
    }

    fn path(&self) -> String {
        let mut path = String::from("$");
        for segment in &self.segments {
            path.push_str(segment);
        }
        path
    }
}
