//! Rules and actions: the declarative annotation language.
//!
//! A [`Rule`] pairs a [`Predicate`] with the [`Action`]s to run when it
//! matches. Actions either add roles, abort the run, or evaluate nested rules
//! over a [`Scope`] relative to the matched node, which is how rule trees
//! express structure ("an `Assign` whose `targets` children are ...").

use serde::{Deserialize, Serialize};

use crate::annotation::Predicate;
use crate::uast::{Role, RoleSet};

/// Which nodes a nested rule list is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// The matched node itself.
    #[serde(rename = "self")]
    SelfNode,
    /// Each direct child, in order.
    Children,
    /// Every node below the matched one, pre-order.
    Descendants,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum Action {
    /// Union the roles into the node's role set.
    AssignRoles(RoleSet),
    /// Abort the whole annotation run.
    Error(String),
    Recurse { scope: Scope, rules: Vec<Rule> },
}

impl Action {
    pub fn roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Action::AssignRoles(roles.into_iter().collect())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Action::Error(message.into())
    }

    pub fn on_self(rules: impl IntoIterator<Item = Rule>) -> Self {
        Action::Recurse {
            scope: Scope::SelfNode,
            rules: rules.into_iter().collect(),
        }
    }

    pub fn children(rules: impl IntoIterator<Item = Rule>) -> Self {
        Action::Recurse {
            scope: Scope::Children,
            rules: rules.into_iter().collect(),
        }
    }

    pub fn descendants(rules: impl IntoIterator<Item = Rule>) -> Self {
        Action::Recurse {
            scope: Scope::Descendants,
            rules: rules.into_iter().collect(),
        }
    }
}

/// An immutable annotation rule.
///
/// Predicates and actions are written as single-key maps (`has_role: Call`,
/// `assign_roles: [File]`) in both YAML and JSON.
///
/// # Examples
///
/// ```rust
/// use uastify::annotation::{Action, Predicate, Rule};
/// use uastify::uast::Role;
///
/// let rule = Rule::new(
///     Predicate::internal_type("Assign"),
///     [
///         Action::roles([Role::Assignment]),
///         Action::children([Rule::roles(
///             Predicate::internal_role("targets"),
///             [Role::AssignmentVariable],
///         )]),
///     ],
/// );
/// assert_eq!(rule.actions.len(), 2);
/// assert_eq!(rule.depth(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    #[serde(rename = "on")]
    pub predicate: Predicate,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Rule {
    pub fn new(predicate: Predicate, actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            predicate,
            actions: actions.into_iter().collect(),
        }
    }

    /// The common case: match, then assign roles.
    pub fn roles(predicate: Predicate, roles: impl IntoIterator<Item = Role>) -> Self {
        Self::new(predicate, [Action::roles(roles)])
    }

    /// Nesting depth of the rule tree, counting this rule as 1.
    pub fn depth(&self) -> usize {
        let nested = self
            .actions
            .iter()
            .filter_map(|action| match action {
                Action::Recurse { rules, .. } => rules.iter().map(Rule::depth).max(),
                _ => None,
            })
            .max()
            .unwrap_or(0);
        1 + nested
    }

    /// Loads a rule tree from YAML.
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::with::singleton_map_recursive::deserialize(serde_yaml::Deserializer::from_str(
            text,
        ))
    }

    /// Total number of rules in the tree, including this one.
    pub fn rule_count(&self) -> usize {
        1 + self
            .actions
            .iter()
            .map(|action| match action {
                Action::Recurse { rules, .. } => rules.iter().map(Rule::rule_count).sum(),
                _ => 0,
            })
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_load_from_yaml() {
        let yaml = r#"
on: any
actions:
  - recurse:
      scope: self
      rules:
        - on:
            not:
              has_internal_type: [Module]
          actions:
            - error: root must be Module
        - on:
            has_internal_type: [Module]
          actions:
            - assign_roles: [File]
"#;
        let rule: Rule = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rule.rule_count(), 3);
        assert_eq!(rule.depth(), 2);
        match &rule.actions[0] {
            Action::Recurse { scope, rules } => {
                assert_eq!(*scope, Scope::SelfNode);
                assert_eq!(rules[1].actions[0], Action::roles([Role::File]));
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn misspelled_keys_are_rejected() {
        let err = Rule::from_yaml_str("on: any\naction:\n  - assign_roles: [File]\n").unwrap_err();
        assert!(err.to_string().contains("action"), "{err}");

        let nested = "on: any\nactions:\n  - recurse:\n      scope: children\n      rule: []\n";
        assert!(Rule::from_yaml_str(nested).is_err());
    }

    #[test]
    fn json_rules_use_the_same_shape() {
        let json = r#"{"on": {"has_internal_type": ["Name"]}, "actions": [{"assign_roles": ["SimpleIdentifier"]}]}"#;
        let rule: Rule = serde_json::from_str(json).unwrap();
        assert_eq!(
            rule,
            Rule::roles(Predicate::internal_type("Name"), [Role::SimpleIdentifier])
        );
        let back = serde_json::to_string(&rule).unwrap();
        assert_eq!(serde_json::from_str::<Rule>(&back).unwrap(), rule);
    }

    #[test]
    fn rule_without_actions_is_a_pure_test() {
        let rule: Rule = serde_yaml::from_str("on: any\n").unwrap();
        assert!(rule.actions.is_empty());
        assert_eq!(rule.rule_count(), 1);
    }
}
