//! The Python driver and the parse service over a realistic native AST.

use pretty_assertions::assert_eq;
use uastify::drivers::{Driver, DriverManifest, DriverRegistry};
use uastify::pipeline::{JsonNativeParser, ParseRequest, ParseService, Status};
use uastify::uast::{Node, Position, Role, RoleSet};

const SAMPLE: &str = include_str!("fixtures/python/sample.json");
const TOY_DRIVER: &str = include_str!("fixtures/drivers/toy.yaml");
const TOY_PROGRAM: &str = include_str!("fixtures/drivers/toy_program.json");

fn normalize_sample() -> Node {
    let service = ParseService::with_builtin();
    let response = service.parse(&ParseRequest::new("python", SAMPLE).with_filename("sample.py"));
    assert_eq!(response.status, Status::Ok, "{:?}", response.errors);
    response.uast.unwrap()
}

fn roles(roles: impl IntoIterator<Item = Role>) -> RoleSet {
    roles.into_iter().collect()
}

fn body(tree: &Node) -> Vec<&Node> {
    tree.children_labelled("body").collect()
}

#[test]
fn module_statements_are_promoted_in_order() {
    let tree = normalize_sample();
    assert_eq!(tree.roles, roles([Role::File]));
    let types: Vec<_> = body(&tree).iter().map(|n| n.internal_type.as_str()).collect();
    assert_eq!(types, vec!["ImportFrom", "Assign", "Expr", "If", "FunctionDef"]);
}

#[test]
fn import_takes_the_module_as_token() {
    let tree = normalize_sample();
    let import = body(&tree)[0];
    assert_eq!(import.token.as_deref(), Some("os"));
    assert!(import.has_role(Role::ImportDeclaration));
    let alias = import.children_labelled("names").next().unwrap();
    assert_eq!(alias.token.as_deref(), Some("path"));
    assert_eq!(alias.roles, roles([Role::ImportPath]));
}

#[test]
fn assignment_sides_and_positions() {
    let tree = normalize_sample();
    let assign = body(&tree)[1];
    assert_eq!(assign.roles, roles([Role::Assignment]));
    assert_eq!(
        assign.end_position,
        Some(Position { line: Some(2), column: Some(5), offset: None })
    );

    let target = assign.children_labelled("targets").next().unwrap();
    assert_eq!(target.token.as_deref(), Some("x"));
    assert_eq!(
        target.roles,
        roles([Role::SimpleIdentifier, Role::AssignmentVariable])
    );
    // Expression context objects become unannotated children.
    assert_eq!(target.children_labelled("ctx").next().map(|n| n.internal_type.as_str()), Some("Store"));

    let value = assign.children_labelled("value").next().unwrap();
    assert_eq!(value.token.as_deref(), Some("1"));
    assert_eq!(value.roles, roles([Role::NumberLiteral, Role::AssignmentValue]));
    assert_eq!(
        value.position,
        Some(Position { line: Some(2), column: Some(4), offset: None })
    );
}

#[test]
fn call_parts_are_distinguished() {
    let tree = normalize_sample();
    let expr = body(&tree)[2];
    assert!(expr.has_role(Role::Expression));
    let call = expr.children_labelled("value").next().unwrap();
    assert!(call.has_role(Role::Call));

    let callee = call.children_labelled("func").next().unwrap();
    assert_eq!(callee.token.as_deref(), Some("join"));
    assert_eq!(callee.roles, roles([Role::QualifiedIdentifier, Role::CallCallee]));
    let receiver = callee.children_labelled("value").next().unwrap();
    assert_eq!(receiver.roles, roles([Role::SimpleIdentifier, Role::CallReceiver]));

    let positional = call.children_labelled("args").next().unwrap();
    assert!(positional.has_role(Role::CallPositionalArgument));
    let named = call.children_labelled("keywords").next().unwrap();
    assert_eq!(named.token.as_deref(), Some("sep"));
    assert!(named.has_role(Role::CallNamedArgument));
    let literal = named.children_labelled("value").next().unwrap();
    assert_eq!(literal.token.as_deref(), Some("/"));
    assert!(literal.has_role(Role::StringLiteral));
}

#[test]
fn if_branches_and_comparison() {
    let tree = normalize_sample();
    let branch = body(&tree)[3];
    assert_eq!(branch.roles, roles([Role::Statement, Role::If]));

    let test = branch.children_labelled("test").next().unwrap();
    assert_eq!(test.roles, roles([Role::Expression, Role::IfCondition]));
    let labels: Vec<_> = test.children.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["left", "ops", "comparators"]);
    let op = test.children_labelled("ops").next().unwrap();
    assert_eq!(op.roles, roles([Role::Operator, Role::OpLessThan]));

    let then = branch.children_labelled("body").next().unwrap();
    assert_eq!(then.roles, roles([Role::Statement, Role::Noop, Role::IfBody]));
    let otherwise = branch.children_labelled("orelse").next().unwrap();
    assert_eq!(otherwise.roles, roles([Role::Statement, Role::Noop, Role::IfElse]));
}

#[test]
fn function_declaration_parts() {
    let tree = normalize_sample();
    let function = body(&tree)[4];
    assert_eq!(function.token.as_deref(), Some("f"));
    assert!(function.has_role(Role::FunctionDeclaration));

    let arguments = function.children_labelled("args").next().unwrap();
    assert!(arguments.roles.is_empty());
    let arg = arguments.children_labelled("args").next().unwrap();
    assert_eq!(arg.token.as_deref(), Some("a"));
    assert_eq!(arg.roles, roles([Role::FunctionDeclarationArgument]));

    let ret = function.children_labelled("body").next().unwrap();
    assert_eq!(
        ret.roles,
        roles([Role::Statement, Role::FunctionDeclarationBody, Role::Return])
    );
    // Empty promoted lists add no children.
    assert_eq!(function.children_labelled("decorator_list").count(), 0);
}

#[test]
fn non_module_roots_are_fatal() {
    let service = ParseService::with_builtin();
    let response = service.parse(&ParseRequest::new(
        "python",
        r#"{"ast_type": "Expression", "body": {"ast_type": "Name", "id": "x"}}"#,
    ));
    assert_eq!(response.status, Status::Fatal);
    assert!(response.uast.is_none());
    assert!(response.errors[0].contains("root must be Module"));
}

#[test]
fn manifest_drivers_plug_into_the_service() {
    let mut registry = DriverRegistry::with_builtin();
    registry.register(Driver::from_manifest(
        DriverManifest::from_yaml_str(TOY_DRIVER).unwrap(),
    ));
    assert_eq!(registry.languages(), vec!["python", "toy"]);

    let service = ParseService::new(registry, JsonNativeParser);
    let tree = service
        .normalize(&ParseRequest::new("toy", TOY_PROGRAM))
        .unwrap();
    assert_eq!(
        tree.outline(),
        "Program(File)\n\
         \x20 items: Let(Statement) \"a\"\n\
         \x20   value: Int \"1\"\n\
         \x20 items: Expr(Statement)\n\
         \x20   op: Plus(Operator, OpAdd) \"+\"\n"
    );
    assert_eq!(tree.children[1].node.position.and_then(|p| p.line), Some(2));
}
