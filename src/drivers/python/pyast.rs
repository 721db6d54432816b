//! Internal type names emitted by the Python native parser.

pub const MODULE: &str = "Module";
pub const EXPRESSION: &str = "Expression";
pub const EXPR: &str = "Expr";

// Comparison operators
pub const EQ: &str = "Eq";
pub const NOT_EQ: &str = "NotEq";
pub const LT: &str = "Lt";
pub const LT_E: &str = "LtE";
pub const GT: &str = "Gt";
pub const GT_E: &str = "GtE";
pub const IS: &str = "Is";
pub const IS_NOT: &str = "IsNot";
pub const IN: &str = "In";
pub const NOT_IN: &str = "NotIn";

// Arithmetic and boolean operators
pub const ADD: &str = "Add";
pub const SUB: &str = "Sub";
pub const MULT: &str = "Mult";
pub const DIV: &str = "Div";
pub const FLOOR_DIV: &str = "FloorDiv";
pub const MOD: &str = "Mod";
pub const POW: &str = "Pow";
pub const AND: &str = "And";
pub const OR: &str = "Or";
pub const NOT: &str = "Not";
pub const BIN_OP: &str = "BinOp";
pub const BOOL_OP: &str = "BoolOp";
pub const UNARY_OP: &str = "UnaryOp";
pub const COMPARE: &str = "Compare";

// Literals
pub const STRING_LITERAL: &str = "StringLiteral";
pub const BYTE_LITERAL: &str = "ByteLiteral";
pub const NUM_LITERAL: &str = "NumLiteral";
pub const STR: &str = "Str";
pub const NUM: &str = "Num";
pub const BOOL_LITERAL: &str = "BoolLiteral";
pub const JOINED_STR: &str = "JoinedStr";
pub const NONE_LITERAL: &str = "NoneLiteral";
pub const CONSTANT: &str = "Constant";
pub const SET: &str = "Set";
pub const LIST: &str = "List";
pub const DICT: &str = "Dict";
pub const TUPLE: &str = "Tuple";
pub const ELLIPSIS: &str = "Ellipsis";

// Declarations and calls
pub const FUNCTION_DEF: &str = "FunctionDef";
pub const ARGUMENTS: &str = "arguments";
pub const ARG: &str = "arg";
pub const CLASS_DEF: &str = "ClassDef";
pub const CALL: &str = "Call";
pub const ATTRIBUTE: &str = "Attribute";
pub const NAME: &str = "Name";
pub const IMPORT: &str = "Import";
pub const IMPORT_FROM: &str = "ImportFrom";
pub const ALIAS: &str = "alias";

// Statements
pub const ASSIGN: &str = "Assign";
pub const ANN_ASSIGN: &str = "AnnAssign";
pub const AUG_ASSIGN: &str = "AugAssign";
pub const PRINT: &str = "Print";
pub const IF: &str = "If";
pub const IF_EXP: &str = "IfExp";
pub const FOR: &str = "For";
pub const WHILE: &str = "While";
pub const TRY: &str = "Try";
pub const TRY_EXCEPT: &str = "TryExcept";
pub const TRY_FINALLY: &str = "TryFinally";
pub const RAISE: &str = "Raise";
pub const WITH: &str = "With";
pub const RETURN: &str = "Return";
pub const BREAK: &str = "Break";
pub const CONTINUE: &str = "Continue";
pub const PASS: &str = "Pass";
pub const ASSERT: &str = "Assert";
pub const LIST_COMP: &str = "ListComp";

// Comments and non significant whitespace
pub const SAME_LINE_NOOPS: &str = "SameLineNoops";
pub const PREVIOUS_NOOPS: &str = "PreviousNoops";
pub const REMAINDER_NOOPS: &str = "RemainderNoops";
