//! Constraint operators and accepted constraint records

use std::fmt;

/// Comparison operator pushed down by the host, decoded from its ABI code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintOp {
    Eq,
    Gt,
    Le,
    Lt,
    Ge,
    Match,
    Like,
    Glob,
    Regexp,
    Ne,
    IsNot,
    IsNotNull,
    IsNull,
    Is,
    /// Overloaded function or any code this layer does not recognize
    Function,
}

impl ConstraintOp {
    pub const EQ: u8 = 2;
    pub const GT: u8 = 4;
    pub const LE: u8 = 8;
    pub const LT: u8 = 16;
    pub const GE: u8 = 32;
    pub const MATCH: u8 = 64;
    pub const LIKE: u8 = 65;
    pub const GLOB: u8 = 66;
    pub const REGEXP: u8 = 67;
    pub const NE: u8 = 68;
    pub const IS_NOT: u8 = 69;
    pub const IS_NOT_NULL: u8 = 70;
    pub const IS_NULL: u8 = 71;
    pub const IS: u8 = 72;
    pub const FUNCTION: u8 = 150;

    /// Decodes a host operator code. Unknown codes decode as `Function`.
    pub fn from_code(code: u8) -> Self {
        match code {
            Self::EQ => ConstraintOp::Eq,
            Self::GT => ConstraintOp::Gt,
            Self::LE => ConstraintOp::Le,
            Self::LT => ConstraintOp::Lt,
            Self::GE => ConstraintOp::Ge,
            Self::MATCH => ConstraintOp::Match,
            Self::LIKE => ConstraintOp::Like,
            Self::GLOB => ConstraintOp::Glob,
            Self::REGEXP => ConstraintOp::Regexp,
            Self::NE => ConstraintOp::Ne,
            Self::IS_NOT => ConstraintOp::IsNot,
            Self::IS_NOT_NULL => ConstraintOp::IsNotNull,
            Self::IS_NULL => ConstraintOp::IsNull,
            Self::IS => ConstraintOp::Is,
            _ => ConstraintOp::Function,
        }
    }

    /// Returns the host ABI code for this operator
    pub fn code(&self) -> u8 {
        match self {
            ConstraintOp::Eq => Self::EQ,
            ConstraintOp::Gt => Self::GT,
            ConstraintOp::Le => Self::LE,
            ConstraintOp::Lt => Self::LT,
            ConstraintOp::Ge => Self::GE,
            ConstraintOp::Match => Self::MATCH,
            ConstraintOp::Like => Self::LIKE,
            ConstraintOp::Glob => Self::GLOB,
            ConstraintOp::Regexp => Self::REGEXP,
            ConstraintOp::Ne => Self::NE,
            ConstraintOp::IsNot => Self::IS_NOT,
            ConstraintOp::IsNotNull => Self::IS_NOT_NULL,
            ConstraintOp::IsNull => Self::IS_NULL,
            ConstraintOp::Is => Self::IS,
            ConstraintOp::Function => Self::FUNCTION,
        }
    }

    /// Returns the SQL spelling used in explain output
    pub fn symbol(&self) -> &'static str {
        match self {
            ConstraintOp::Eq => "=",
            ConstraintOp::Gt => ">",
            ConstraintOp::Le => "<=",
            ConstraintOp::Lt => "<",
            ConstraintOp::Ge => ">=",
            ConstraintOp::Match => "MATCH",
            ConstraintOp::Like => "LIKE",
            ConstraintOp::Glob => "GLOB",
            ConstraintOp::Regexp => "REGEXP",
            ConstraintOp::Ne => "!=",
            ConstraintOp::IsNot => "IS NOT",
            ConstraintOp::IsNotNull => "IS NOT NULL",
            ConstraintOp::IsNull => "IS NULL",
            ConstraintOp::Is => "IS",
            ConstraintOp::Function => "f()",
        }
    }

    /// Returns true for `=`
    pub fn is_equality(&self) -> bool {
        matches!(self, ConstraintOp::Eq)
    }

    /// Returns true for operators that raise a lower bound (`>`, `>=`)
    pub fn is_lower_bound(&self) -> bool {
        matches!(self, ConstraintOp::Gt | ConstraintOp::Ge)
    }

    /// Returns true for operators that lower an upper bound (`<`, `<=`)
    pub fn is_upper_bound(&self) -> bool {
        matches!(self, ConstraintOp::Lt | ConstraintOp::Le)
    }
}

impl fmt::Display for ConstraintOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One accepted predicate of a plan.
///
/// `arg_slot` is the 0-based position of the bound value in the argument
/// array handed to the cursor at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintRecord {
    pub arg_slot: usize,
    pub column: i32,
    pub op: ConstraintOp,
    pub usable: bool,
}

impl ConstraintRecord {
    pub fn new(arg_slot: usize, column: i32, op: ConstraintOp, usable: bool) -> Self {
        Self {
            arg_slot,
            column,
            op,
            usable,
        }
    }

    /// Returns true if this record constrains the given raw column
    pub fn is_on(&self, column: i32) -> bool {
        self.column == column
    }
}

impl fmt::Display for ConstraintRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "col[{}] {} argv[{}]",
            self.column,
            self.op.symbol(),
            self.arg_slot
        )
    }
}
