//! The Python driver: builder configuration and annotation rules for the
//! JSON AST produced by the Python native parser.
//!
//! The native side dumps `ast.parse` output with every node's class name
//! under `ast_type`, plus comment/whitespace pseudo-nodes (`*Noops`) and a
//! normalized `LiteralValue` key on literal nodes.

use crate::builder::BuilderConfig;
use crate::drivers::Driver;

pub mod pyast;
mod rules;

pub use rules::annotation_rules;

pub const LANGUAGE: &str = "python";

/// The Python driver, ready to register.
pub fn driver() -> Driver {
    Driver::new(LANGUAGE, builder_config(), annotation_rules())
}

/// How raw Python AST objects map onto nodes.
pub fn builder_config() -> BuilderConfig {
    BuilderConfig::new("ast_type")
        .with_position_keys("lineno", "col_offset", None)
        .with_end_position_keys("end_lineno", "end_col_offset", None)
        .with_token_keys([
            "module",       // ImportFrom
            "name",         // FunctionDef, ClassDef, alias
            "id",           // Name
            "attr",         // something.attr
            "arg",          // function arguments
            "LiteralValue", // string/num/byte/constant literal
            "noop_line",    // comment or non significant whitespace
        ])
        .with_synthetic_token(pyast::PRINT, "print")
        .with_synthetic_token(pyast::ELLIPSIS, "PythonEllipsisOperator")
        .with_synthetic_token(pyast::ADD, "+")
        .with_synthetic_token(pyast::SUB, "-")
        .with_synthetic_token(pyast::MULT, "*")
        .with_synthetic_token(pyast::DIV, "/")
        .with_synthetic_token(pyast::FLOOR_DIV, "//")
        .with_synthetic_token(pyast::MOD, "%")
        .with_synthetic_token(pyast::POW, "^")
        .with_synthetic_token(pyast::AUG_ASSIGN, "?=")
        .with_promoted(pyast::MODULE, ["body"])
        .with_promoted(pyast::ASSIGN, ["targets"])
        .with_promoted(pyast::CALL, ["args", "keywords"])
        .with_promoted(pyast::IF, ["body", "orelse"])
        .with_promoted(pyast::FOR, ["body", "orelse"])
        .with_promoted(pyast::WHILE, ["body", "orelse"])
        .with_promoted(pyast::COMPARE, ["comparators", "ops"])
        .with_promoted(pyast::BOOL_OP, ["values"])
        .with_promoted(pyast::IMPORT, ["names"])
        .with_promoted(pyast::IMPORT_FROM, ["names"])
        .with_promoted(pyast::WITH, ["body", "items"])
        .with_promoted(pyast::FUNCTION_DEF, ["body", "decorator_list"])
        .with_promoted(pyast::ARGUMENTS, ["args", "defaults", "kwonlyargs", "kw_defaults"])
        .with_promoted(pyast::TRY, ["body", "orelse", "finalbody", "handlers"])
        .with_promoted("ExceptHandler", ["body"])
        .with_promoted(pyast::RAISE, ["args"])
        .with_promoted(pyast::CLASS_DEF, ["body", "bases", "decorator_list", "keywords"])
        .with_promoted(pyast::LIST, ["elts"])
        .with_promoted(pyast::TUPLE, ["elts"])
        .with_promoted(pyast::SET, ["elts"])
        // `keys` holds null for `**mapping` entries; promoting it would drop
        // them and misalign keys with values.
        .with_promoted(pyast::DICT, ["values"])
        .with_promoted(pyast::JOINED_STR, ["values"])
        .with_promoted(pyast::PREVIOUS_NOOPS, ["lines"])
        .with_promoted(pyast::REMAINDER_NOOPS, ["lines"])
        .with_promoted(pyast::LIST_COMP, ["generators"])
        .with_promoted("ListComp.generators", ["ifs"])
        .with_promoted("ListComp.generators.ifs", ["comparators", "ops"])
}
