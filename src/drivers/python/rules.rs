//! Annotation rules for the Python AST.
//!
//! Coverage is partial on purpose: constructs without rules keep an empty
//! role set. Rules only ever add roles, so a construct may collect roles from
//! several of them.

use super::pyast;
use crate::annotation::{Action, Predicate, Rule};
use crate::uast::Role;

fn is(internal_type: &str) -> Predicate {
    Predicate::internal_type(internal_type)
}

fn edge(label: &str) -> Predicate {
    Predicate::internal_role(label)
}

fn tag(predicate: Predicate, roles: impl IntoIterator<Item = Role>) -> Rule {
    Rule::roles(predicate, roles)
}

/// The complete rule tree: validate the root, then annotate every node below it.
pub fn annotation_rules() -> Rule {
    Rule::new(
        Predicate::Any,
        [Action::on_self([
            Rule::new(
                Predicate::not(is(pyast::MODULE)),
                [Action::error("root must be Module")],
            ),
            Rule::new(
                is(pyast::MODULE),
                [
                    Action::roles([Role::File]),
                    Action::descendants(construct_rules()),
                ],
            ),
        ])],
    )
}

fn construct_rules() -> Vec<Rule> {
    let mut rules = Vec::new();
    rules.extend(operator_rules());
    rules.extend(literal_rules());
    rules.extend(declaration_rules());
    rules.extend(assignment_rules());
    rules.extend(control_flow_rules());
    rules.extend(trivia_rules());
    rules
}

fn operator_rules() -> Vec<Rule> {
    vec![
        tag(is(pyast::EQ), [Role::Operator, Role::OpEqual]),
        tag(is(pyast::NOT_EQ), [Role::Operator, Role::OpNotEqual]),
        tag(is(pyast::LT), [Role::Operator, Role::OpLessThan]),
        tag(is(pyast::LT_E), [Role::Operator, Role::OpLessThanEqual]),
        tag(is(pyast::GT), [Role::Operator, Role::OpGreaterThan]),
        tag(is(pyast::GT_E), [Role::Operator, Role::OpGreaterThanEqual]),
        tag(is(pyast::IS), [Role::Operator, Role::OpSame]),
        tag(is(pyast::IS_NOT), [Role::Operator, Role::OpNotSame]),
        tag(is(pyast::IN), [Role::Operator, Role::OpContains]),
        tag(is(pyast::NOT_IN), [Role::Operator, Role::OpNotContains]),
        tag(is(pyast::ADD), [Role::Operator, Role::OpAdd]),
        tag(is(pyast::SUB), [Role::Operator, Role::OpSubstract]),
        tag(is(pyast::MULT), [Role::Operator, Role::OpMultiply]),
        tag(is(pyast::DIV), [Role::Operator, Role::OpDivide]),
        tag(is(pyast::FLOOR_DIV), [Role::Operator, Role::OpDivide]),
        tag(is(pyast::MOD), [Role::Operator, Role::OpMod]),
        tag(is(pyast::POW), [Role::Operator]),
        tag(is(pyast::AND), [Role::Operator, Role::OpBooleanAnd]),
        tag(is(pyast::OR), [Role::Operator, Role::OpBooleanOr]),
        tag(is(pyast::NOT), [Role::Operator, Role::OpBooleanNot]),
        tag(
            Predicate::internal_types([pyast::BIN_OP, pyast::BOOL_OP, pyast::UNARY_OP, pyast::COMPARE]),
            [Role::Expression],
        ),
    ]
}

fn literal_rules() -> Vec<Rule> {
    vec![
        tag(is(pyast::STRING_LITERAL), [Role::StringLiteral]),
        tag(is(pyast::BYTE_LITERAL), [Role::ByteStringLiteral]),
        tag(is(pyast::NUM_LITERAL), [Role::NumberLiteral]),
        tag(is(pyast::STR), [Role::StringLiteral]),
        tag(is(pyast::NUM), [Role::NumberLiteral]),
        tag(is(pyast::BOOL_LITERAL), [Role::BooleanLiteral]),
        // f-strings: a composite of string parts and formatted values.
        tag(is(pyast::JOINED_STR), [Role::StringLiteral]),
        tag(is(pyast::NONE_LITERAL), [Role::NullLiteral]),
        tag(is(pyast::CONSTANT), [Role::Literal]),
        tag(is(pyast::SET), [Role::SetLiteral]),
        tag(is(pyast::LIST), [Role::ListLiteral]),
        tag(is(pyast::DICT), [Role::MapLiteral]),
        tag(is(pyast::TUPLE), [Role::TupleLiteral]),
        tag(is(pyast::ELLIPSIS), [Role::SimpleIdentifier]),
    ]
}

fn declaration_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            is(pyast::FUNCTION_DEF),
            [
                Action::roles([Role::FunctionDeclaration]),
                Action::children([
                    tag(edge("body"), [Role::FunctionDeclarationBody]),
                    Rule::new(
                        edge("args"),
                        [Action::children([tag(
                            edge("args"),
                            [Role::FunctionDeclarationArgument],
                        )])],
                    ),
                ]),
            ],
        ),
        tag(is(pyast::ARG), [Role::FunctionDeclarationArgument]),
        tag(is(pyast::CLASS_DEF), [Role::TypeDeclaration]),
        Rule::new(
            is(pyast::CALL),
            [
                Action::roles([Role::Call]),
                Action::children([
                    tag(edge("args"), [Role::CallPositionalArgument]),
                    tag(edge("keywords"), [Role::CallNamedArgument]),
                    tag(edge("func"), [Role::CallCallee]),
                    Rule::new(
                        Predicate::And(vec![edge("func"), is(pyast::ATTRIBUTE)]),
                        [Action::children([tag(edge("value"), [Role::CallReceiver])])],
                    ),
                ]),
            ],
        ),
        tag(is(pyast::PRINT), [Role::Call]),
        tag(is(pyast::ATTRIBUTE), [Role::QualifiedIdentifier]),
        tag(is(pyast::NAME), [Role::SimpleIdentifier]),
        tag(is(pyast::IMPORT), [Role::ImportDeclaration]),
        tag(is(pyast::IMPORT_FROM), [Role::ImportDeclaration]),
        tag(is(pyast::ALIAS), [Role::ImportPath]),
    ]
}

fn assignment_rules() -> Vec<Rule> {
    let sides = || {
        Action::children([
            tag(edge("targets"), [Role::AssignmentVariable]),
            tag(edge("target"), [Role::AssignmentVariable]),
            tag(edge("value"), [Role::AssignmentValue]),
        ])
    };
    vec![
        Rule::new(is(pyast::ASSIGN), [Action::roles([Role::Assignment]), sides()]),
        Rule::new(is(pyast::ANN_ASSIGN), [Action::roles([Role::Assignment]), sides()]),
        Rule::new(
            is(pyast::AUG_ASSIGN),
            [
                Action::roles([Role::Assignment, Role::AugmentedAssignment]),
                sides(),
            ],
        ),
        tag(is(pyast::EXPRESSION), [Role::Expression]),
        tag(is(pyast::EXPR), [Role::Expression]),
    ]
}

fn control_flow_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            is(pyast::IF),
            [
                Action::roles([Role::If, Role::Statement]),
                Action::children([
                    tag(edge("test"), [Role::IfCondition]),
                    tag(edge("body"), [Role::IfBody]),
                    tag(edge("orelse"), [Role::IfElse]),
                ]),
            ],
        ),
        // The one-line form, as in a ternary.
        Rule::new(
            is(pyast::IF_EXP),
            [
                Action::roles([Role::If, Role::Expression]),
                Action::children([
                    tag(edge("test"), [Role::IfCondition]),
                    tag(edge("body"), [Role::IfBody]),
                    tag(edge("orelse"), [Role::IfElse]),
                ]),
            ],
        ),
        Rule::new(
            is(pyast::FOR),
            [
                Action::roles([Role::ForEach, Role::Statement]),
                Action::children([
                    tag(edge("body"), [Role::ForBody]),
                    tag(edge("iter"), [Role::ForExpression]),
                    tag(edge("target"), [Role::ForUpdate]),
                    tag(edge("orelse"), [Role::IfElse]),
                ]),
            ],
        ),
        Rule::new(
            is(pyast::WHILE),
            [
                Action::roles([Role::While, Role::Statement]),
                Action::children([
                    tag(edge("body"), [Role::WhileBody]),
                    tag(edge("test"), [Role::WhileCondition]),
                    tag(edge("orelse"), [Role::IfElse]),
                ]),
            ],
        ),
        Rule::new(
            is(pyast::TRY),
            [
                Action::roles([Role::Try, Role::Statement]),
                Action::children([
                    tag(edge("body"), [Role::TryBody]),
                    tag(edge("finalbody"), [Role::TryFinally]),
                    tag(edge("handlers"), [Role::TryCatch]),
                    tag(edge("orelse"), [Role::IfElse]),
                ]),
            ],
        ),
        tag(is(pyast::TRY_EXCEPT), [Role::TryCatch]),
        tag(is(pyast::TRY_FINALLY), [Role::TryFinally]),
        tag(is(pyast::RAISE), [Role::Throw, Role::Statement]),
        tag(is(pyast::WITH), [Role::BlockScope, Role::Statement]),
        tag(is(pyast::RETURN), [Role::Return, Role::Statement]),
        tag(is(pyast::BREAK), [Role::Break, Role::Statement]),
        tag(is(pyast::CONTINUE), [Role::Continue, Role::Statement]),
        tag(is(pyast::PASS), [Role::Noop, Role::Statement]),
        tag(is(pyast::ASSERT), [Role::Assert, Role::Statement]),
    ]
}

fn trivia_rules() -> Vec<Rule> {
    vec![
        tag(is(pyast::SAME_LINE_NOOPS), [Role::Comment]),
        Rule::new(
            Predicate::internal_types([pyast::PREVIOUS_NOOPS, pyast::REMAINDER_NOOPS]),
            [
                Action::roles([Role::Whitespace]),
                Action::children([tag(edge("lines"), [Role::Comment])]),
            ],
        ),
    ]
}
