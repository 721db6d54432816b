//! The universal role vocabulary.
//!
//! Roles are language independent: every driver maps its own internal types
//! onto this set. The vocabulary grows as drivers cover more constructs, so
//! nothing should match exhaustively on it outside this module.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// A semantic tag attached to a node by the rule engine.
///
/// # Examples
///
/// ```rust
/// use uastify::uast::Role;
/// let role: Role = "AssignmentVariable".parse().unwrap();
/// assert_eq!(role, Role::AssignmentVariable);
/// assert_eq!(role.to_string(), "AssignmentVariable");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[non_exhaustive]
pub enum Role {
    // Structure
    File,
    Statement,
    Expression,
    Block,
    BlockScope,
    Noop,
    Incomplete,

    // Identifiers
    Identifier,
    SimpleIdentifier,
    QualifiedIdentifier,

    // Literals
    Literal,
    StringLiteral,
    ByteStringLiteral,
    NumberLiteral,
    BooleanLiteral,
    NullLiteral,
    SetLiteral,
    ListLiteral,
    MapLiteral,
    TupleLiteral,

    // Operators
    Operator,
    OpEqual,
    OpNotEqual,
    OpLessThan,
    OpLessThanEqual,
    OpGreaterThan,
    OpGreaterThanEqual,
    OpSame,
    OpNotSame,
    OpContains,
    OpNotContains,
    OpAdd,
    OpSubstract,
    OpMultiply,
    OpDivide,
    OpMod,
    OpBooleanAnd,
    OpBooleanOr,
    OpBooleanNot,

    // Declarations
    FunctionDeclaration,
    FunctionDeclarationName,
    FunctionDeclarationBody,
    FunctionDeclarationArgument,
    TypeDeclaration,
    ImportDeclaration,
    ImportPath,
    ImportAlias,

    // Calls
    Call,
    CallCallee,
    CallReceiver,
    CallPositionalArgument,
    CallNamedArgument,

    // Assignment
    Assignment,
    AssignmentVariable,
    AssignmentValue,
    AugmentedAssignment,

    // Control flow
    If,
    IfCondition,
    IfBody,
    IfElse,
    ForEach,
    ForBody,
    ForExpression,
    ForUpdate,
    While,
    WhileCondition,
    WhileBody,
    Return,
    Break,
    Continue,
    Try,
    TryBody,
    TryCatch,
    TryFinally,
    Throw,
    Assert,

    // Trivia
    Comment,
    Whitespace,
}

impl Role {
    /// Lists every role in declaration order.
    pub fn all() -> Vec<Role> {
        Role::iter().collect()
    }
}

/// The role set of a node. Ordered so that serialized trees are stable.
pub type RoleSet = BTreeSet<Role>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_strum() {
        for role in Role::all() {
            let parsed: Role = role.as_ref().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!("NotARole".parse::<Role>().is_err());
    }

    #[test]
    fn serde_uses_variant_names() {
        let json = serde_json::to_string(&Role::CallCallee).unwrap();
        assert_eq!(json, "\"CallCallee\"");
    }
}
