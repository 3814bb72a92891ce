//! Expression kinds.
//!
//! Every node in the store carries exactly one [`Kind`]. The set is closed
//! and split into numeric and logical halves; the constructors in
//! [`ExprFactory`](crate::ExprFactory) accept only the subset each of them
//! supports, checked with the predicates below.

use std::fmt;

/// Tag identifying which expression variant a node is.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum Kind {
    // Numeric leaves
    Constant,
    Variable,

    // Unary numeric
    Minus,
    Abs,
    Floor,
    Ceil,
    Sqrt,
    Pow2,
    Exp,
    Log,
    Log10,
    Sin,
    Sinh,
    Cos,
    Cosh,
    Tan,
    Tanh,
    Asin,
    Asinh,
    Acos,
    Acosh,
    Atan,
    Atanh,

    // Binary arithmetic
    Add,
    Sub,
    Less,
    Mul,
    Div,
    TruncDiv,
    Mod,
    Pow,
    PowConstBase,
    PowConstExp,
    Atan2,
    Precision,
    Round,
    Trunc,

    // Other numeric
    If,
    PLTerm,
    Call,
    Min,
    Max,
    Sum,
    NumberOf,
    Count,

    // Logical leaves
    LogicalConstant,

    // Logical connectives
    Not,
    Or,
    And,

    // Relational
    Lt,
    Le,
    Eq,
    Ge,
    Gt,
    Ne,

    // Logical count
    AtLeast,
    AtMost,
    Exactly,

    // Other logical
    Implication,
    Exists,
    ForAll,
    AllDiff,
}

impl Kind {
    /// Every kind, in declaration order.
    pub const ALL: [Kind; 62] = [
        Kind::Constant,
        Kind::Variable,
        Kind::Minus,
        Kind::Abs,
        Kind::Floor,
        Kind::Ceil,
        Kind::Sqrt,
        Kind::Pow2,
        Kind::Exp,
        Kind::Log,
        Kind::Log10,
        Kind::Sin,
        Kind::Sinh,
        Kind::Cos,
        Kind::Cosh,
        Kind::Tan,
        Kind::Tanh,
        Kind::Asin,
        Kind::Asinh,
        Kind::Acos,
        Kind::Acosh,
        Kind::Atan,
        Kind::Atanh,
        Kind::Add,
        Kind::Sub,
        Kind::Less,
        Kind::Mul,
        Kind::Div,
        Kind::TruncDiv,
        Kind::Mod,
        Kind::Pow,
        Kind::PowConstBase,
        Kind::PowConstExp,
        Kind::Atan2,
        Kind::Precision,
        Kind::Round,
        Kind::Trunc,
        Kind::If,
        Kind::PLTerm,
        Kind::Call,
        Kind::Min,
        Kind::Max,
        Kind::Sum,
        Kind::NumberOf,
        Kind::Count,
        Kind::LogicalConstant,
        Kind::Not,
        Kind::Or,
        Kind::And,
        Kind::Lt,
        Kind::Le,
        Kind::Eq,
        Kind::Ge,
        Kind::Gt,
        Kind::Ne,
        Kind::AtLeast,
        Kind::AtMost,
        Kind::Exactly,
        Kind::Implication,
        Kind::Exists,
        Kind::ForAll,
        Kind::AllDiff,
    ];

    /// Returns `true` for kinds whose nodes are logical expressions.
    pub const fn is_logical(self) -> bool {
        matches!(
            self,
            Self::LogicalConstant
                | Self::Not
                | Self::Or
                | Self::And
                | Self::Lt
                | Self::Le
                | Self::Eq
                | Self::Ge
                | Self::Gt
                | Self::Ne
                | Self::AtLeast
                | Self::AtMost
                | Self::Exactly
                | Self::Implication
                | Self::Exists
                | Self::ForAll
                | Self::AllDiff
        )
    }

    /// Returns `true` for kinds whose nodes are numeric expressions.
    #[inline]
    pub const fn is_numeric(self) -> bool {
        !self.is_logical()
    }

    /// Kinds accepted by `make_unary`.
    pub const fn is_unary(self) -> bool {
        matches!(
            self,
            Self::Minus
                | Self::Abs
                | Self::Floor
                | Self::Ceil
                | Self::Sqrt
                | Self::Pow2
                | Self::Exp
                | Self::Log
                | Self::Log10
                | Self::Sin
                | Self::Sinh
                | Self::Cos
                | Self::Cosh
                | Self::Tan
                | Self::Tanh
                | Self::Asin
                | Self::Asinh
                | Self::Acos
                | Self::Acosh
                | Self::Atan
                | Self::Atanh
        )
    }

    /// Kinds accepted by `make_binary`.
    pub const fn is_binary(self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::Sub
                | Self::Less
                | Self::Mul
                | Self::Div
                | Self::TruncDiv
                | Self::Mod
                | Self::Pow
                | Self::PowConstBase
                | Self::PowConstExp
                | Self::Atan2
                | Self::Precision
                | Self::Round
                | Self::Trunc
        )
    }

    /// Kinds accepted by `begin_vararg`.
    pub const fn is_vararg(self) -> bool {
        matches!(self, Self::Min | Self::Max)
    }

    /// Kinds accepted by `make_binary_logical`.
    pub const fn is_binary_logical(self) -> bool {
        matches!(self, Self::Or | Self::And)
    }

    /// Kinds accepted by `make_relational`.
    pub const fn is_relational(self) -> bool {
        matches!(
            self,
            Self::Lt | Self::Le | Self::Eq | Self::Ge | Self::Gt | Self::Ne
        )
    }

    /// Kinds accepted by `make_logical_count`.
    pub const fn is_logical_count(self) -> bool {
        matches!(self, Self::AtLeast | Self::AtMost | Self::Exactly)
    }

    /// Kinds accepted by `begin_iterated_logical`.
    pub const fn is_iterated_logical(self) -> bool {
        matches!(self, Self::Exists | Self::ForAll)
    }

    /// Returns `true` for kinds whose operand count is declared at build time.
    pub const fn is_iterated(self) -> bool {
        matches!(
            self,
            Self::Call
                | Self::Min
                | Self::Max
                | Self::Sum
                | Self::NumberOf
                | Self::Count
                | Self::Exists
                | Self::ForAll
                | Self::AllDiff
        )
    }

    /// Returns the conventional operator or function name of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Constant => "number",
            Self::Variable => "variable",
            Self::Minus => "unary -",
            Self::Abs => "abs",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Sqrt => "sqrt",
            Self::Pow2 => "^2",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Log10 => "log10",
            Self::Sin => "sin",
            Self::Sinh => "sinh",
            Self::Cos => "cos",
            Self::Cosh => "cosh",
            Self::Tan => "tan",
            Self::Tanh => "tanh",
            Self::Asin => "asin",
            Self::Asinh => "asinh",
            Self::Acos => "acos",
            Self::Acosh => "acosh",
            Self::Atan => "atan",
            Self::Atanh => "atanh",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Less => "less",
            Self::Mul => "*",
            Self::Div => "/",
            Self::TruncDiv => "div",
            Self::Mod => "mod",
            Self::Pow | Self::PowConstBase | Self::PowConstExp => "^",
            Self::Atan2 => "atan2",
            Self::Precision => "precision",
            Self::Round => "round",
            Self::Trunc => "trunc",
            Self::If => "if",
            Self::PLTerm => "pl term",
            Self::Call => "function call",
            Self::Min => "min",
            Self::Max => "max",
            Self::Sum => "sum",
            Self::NumberOf => "numberof",
            Self::Count => "count",
            Self::LogicalConstant => "bool",
            Self::Not => "!",
            Self::Or => "||",
            Self::And => "&&",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Eq => "=",
            Self::Ge => ">=",
            Self::Gt => ">",
            Self::Ne => "!=",
            Self::AtLeast => "atleast",
            Self::AtMost => "atmost",
            Self::Exactly => "exactly",
            Self::Implication => "==>",
            Self::Exists => "exists",
            Self::ForAll => "forall",
            Self::AllDiff => "alldiff",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
