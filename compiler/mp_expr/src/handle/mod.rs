//! Expression handles.
//!
//! A handle is a `Copy` identity reference to one node in an
//! [`ExprArena`]. Handles never own node data; everything kind-specific is
//! read back through the arena that created them.
//!
//! # Capability hierarchy
//!
//! ```text
//! Expr
//! ├── NumericExpr
//! │   ├── NumericConstant, Variable, UnaryExpr, BinaryExpr, IfExpr, PLTerm
//! │   └── CallExpr, VarArgExpr, SumExpr, NumberOfExpr, CountExpr
//! └── LogicalExpr
//!     ├── LogicalConstant, NotExpr, BinaryLogicalExpr, RelationalExpr
//!     └── LogicalCountExpr, ImplicationExpr, IteratedLogicalExpr, AllDiffExpr
//! ```
//!
//! Upcasts are infallible `From` conversions. Downcasts go through
//! `TryFrom` and fail with [`ExprError::InvalidExpressionKind`] when the
//! node's kind does not satisfy the target view. A null handle casts to
//! the null handle of any type.
//!
//! # Identity
//!
//! Two handles are equal iff they reference the same node, across all
//! handle types that share an ancestor. Every type has a `NULL` sentinel
//! (also its `Default`) that is equal to no node.

mod logical;
mod numeric;

use std::fmt;

use crate::{ExprArena, ExprError, ExprId, FunctionId, Kind};

/// Resolved reference to a stored node: its ID plus its immutable kind.
///
/// Opaque outside the crate; handles wrap `Option<ExprRef>` with `None` as
/// the null sentinel.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ExprRef {
    pub(crate) id: ExprId,
    pub(crate) kind: Kind,
}

impl ExprRef {
    #[inline]
    pub(crate) const fn new(id: ExprId, kind: Kind) -> Self {
        ExprRef { id, kind }
    }
}

mod private {
    /// Crate-only construction and unwrapping of handles.
    pub trait Sealed: Sized {
        fn from_raw(raw: super::ExprRef) -> Self;
        fn raw(self) -> Option<super::ExprRef>;
    }
}

pub(crate) use private::Sealed;

/// Shared behaviour of every expression handle type.
///
/// Sealed: handles are only ever created by the factory or by checked casts.
pub trait ExprHandle: Copy + Eq + Default + fmt::Debug + Into<Expr> + Sealed {
    /// Type name used in diagnostics.
    const NAME: &'static str;

    /// Returns `true` if a node of `kind` may be viewed through this type.
    fn accepts(kind: Kind) -> bool;
}

/// A handle type whose nodes carry a build-time operand list.
pub trait IteratedExpr: ExprHandle {
    /// Operand handle type.
    type Arg: ExprHandle;
}

#[cold]
#[track_caller]
fn null_deref(name: &str) -> ! {
    panic!("null {name} dereferenced")
}

#[cold]
#[track_caller]
pub(crate) fn node_mismatch(name: &str, node: &crate::arena::ExprNode) -> ! {
    panic!("{name} handle resolves to {node:?}; was it created by a different factory?")
}

/// Checked downcast shared by every `TryFrom` impl.
fn cast<H: ExprHandle>(raw: Option<ExprRef>) -> Result<H, ExprError> {
    match raw {
        None => Ok(H::default()),
        Some(raw) if H::accepts(raw.kind) => Ok(H::from_raw(raw)),
        Some(raw) => Err(ExprError::InvalidExpressionKind { kind: raw.kind }),
    }
}

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident, |$kind:ident| $accepts:expr) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
        pub struct $name(Option<ExprRef>);

        impl $name {
            /// The null handle: refers to no expression.
            pub const NULL: Self = Self(None);

            /// Returns `true` if this handle refers to no expression.
            #[inline]
            pub const fn is_null(self) -> bool {
                self.0.is_none()
            }

            /// Store index of the node, or `ExprId::INVALID` for null.
            #[inline]
            pub fn id(self) -> ExprId {
                self.0.map_or(ExprId::INVALID, |raw| raw.id)
            }

            /// Kind tag of the node.
            ///
            /// # Panics
            /// Panics if the handle is null.
            #[inline]
            #[track_caller]
            pub fn kind(self) -> Kind {
                match self.0 {
                    Some(raw) => raw.kind,
                    None => null_deref(stringify!($name)),
                }
            }
        }

        impl Sealed for $name {
            #[inline]
            fn from_raw(raw: ExprRef) -> Self {
                Self(Some(raw))
            }

            #[inline]
            fn raw(self) -> Option<ExprRef> {
                self.0
            }
        }

        impl ExprHandle for $name {
            const NAME: &'static str = stringify!($name);

            #[inline]
            fn accepts($kind: Kind) -> bool {
                $accepts
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.0 {
                    Some(raw) => write!(f, "{}({:?}, {:?})", stringify!($name), raw.kind, raw.id),
                    None => write!(f, "{}::NULL", stringify!($name)),
                }
            }
        }
    };
}

/// Implements infallible upcasts, checked downcasts, and cross-type identity
/// comparison between a handle type and each of its ancestors.
macro_rules! impl_ancestors {
    ($name:ident => $($ancestor:ident),+) => {
        $(
            impl From<$name> for $ancestor {
                #[inline]
                fn from(expr: $name) -> Self {
                    Self(expr.0)
                }
            }

            impl TryFrom<$ancestor> for $name {
                type Error = ExprError;

                fn try_from(expr: $ancestor) -> Result<Self, ExprError> {
                    cast(expr.0)
                }
            }

            impl PartialEq<$ancestor> for $name {
                #[inline]
                fn eq(&self, other: &$ancestor) -> bool {
                    self.0 == other.0
                }
            }

            impl PartialEq<$name> for $ancestor {
                #[inline]
                fn eq(&self, other: &$name) -> bool {
                    self.0 == other.0
                }
            }
        )+
    };
}

define_handle!(
    /// Any expression, numeric or logical.
    Expr, |_kind| true
);
define_handle!(
    /// An expression with a numeric value.
    NumericExpr, |kind| kind.is_numeric()
);
define_handle!(
    /// An expression with a logical value.
    LogicalExpr, |kind| kind.is_logical()
);

impl_ancestors!(NumericExpr => Expr);
impl_ancestors!(LogicalExpr => Expr);

crate::static_assert_size!(Expr, 8);

/// Declares numeric views: handle type plus conversions to `NumericExpr`
/// and `Expr`.
macro_rules! numeric_views {
    ($($(#[$meta:meta])* $name:ident, |$kind:ident| $accepts:expr;)+) => {
        $(
            define_handle!($(#[$meta])* $name, |$kind| $accepts);
            impl_ancestors!($name => NumericExpr, Expr);
        )+
    };
}

/// Declares logical views: handle type plus conversions to `LogicalExpr`
/// and `Expr`.
macro_rules! logical_views {
    ($($(#[$meta:meta])* $name:ident, |$kind:ident| $accepts:expr;)+) => {
        $(
            define_handle!($(#[$meta])* $name, |$kind| $accepts);
            impl_ancestors!($name => LogicalExpr, Expr);
        )+
    };
}

numeric_views! {
    /// Numeric literal.
    NumericConstant, |kind| kind == Kind::Constant;
    /// Reference to a decision variable by index.
    Variable, |kind| kind == Kind::Variable;
    /// Unary numeric function such as `abs` or `exp`.
    UnaryExpr, |kind| kind.is_unary();
    /// Binary arithmetic expression.
    BinaryExpr, |kind| kind.is_binary();
    /// `if condition then true_expr [else false_expr]`.
    IfExpr, |kind| kind == Kind::If;
    /// Piecewise-linear term over a single variable.
    PLTerm, |kind| kind == Kind::PLTerm;
    /// Call of a registered function.
    CallExpr, |kind| kind == Kind::Call;
    /// `min` or `max` over an operand list.
    VarArgExpr, |kind| kind.is_vararg();
    /// Sum over an operand list.
    SumExpr, |kind| kind == Kind::Sum;
    /// Number of operands equal to a reference value (operand 0).
    NumberOfExpr, |kind| kind == Kind::NumberOf;
    /// Number of true operands among a list of logical expressions.
    CountExpr, |kind| kind == Kind::Count;
}

logical_views! {
    /// Logical literal.
    LogicalConstant, |kind| kind == Kind::LogicalConstant;
    /// Logical negation.
    NotExpr, |kind| kind == Kind::Not;
    /// `&&` or `||`.
    BinaryLogicalExpr, |kind| kind.is_binary_logical();
    /// Comparison of two numeric expressions.
    RelationalExpr, |kind| kind.is_relational();
    /// `atleast`/`atmost`/`exactly` of a number against a count.
    LogicalCountExpr, |kind| kind.is_logical_count();
    /// `condition ==> true_expr [else false_expr]`.
    ImplicationExpr, |kind| kind == Kind::Implication;
    /// `exists` or `forall` over an operand list.
    IteratedLogicalExpr, |kind| kind.is_iterated_logical();
    /// All numeric operands take pairwise distinct values.
    AllDiffExpr, |kind| kind == Kind::AllDiff;
}

impl IteratedExpr for CallExpr {
    type Arg = Expr;
}

impl IteratedExpr for VarArgExpr {
    type Arg = NumericExpr;
}

impl IteratedExpr for SumExpr {
    type Arg = NumericExpr;
}

impl IteratedExpr for NumberOfExpr {
    type Arg = NumericExpr;
}

impl IteratedExpr for CountExpr {
    type Arg = LogicalExpr;
}

impl IteratedExpr for IteratedLogicalExpr {
    type Arg = LogicalExpr;
}

impl IteratedExpr for AllDiffExpr {
    type Arg = NumericExpr;
}

/// A function symbol referenced by [`CallExpr`] nodes.
///
/// Identity-comparable and nullable like expression handles.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Function(FunctionId);

impl Function {
    /// The null function.
    pub const NULL: Self = Self(FunctionId::INVALID);

    #[inline]
    pub(crate) const fn new(id: FunctionId) -> Self {
        Function(id)
    }

    /// Returns `true` if this handle refers to no function.
    #[inline]
    pub const fn is_null(self) -> bool {
        !self.0.is_valid()
    }

    /// Index of the function in its store.
    #[inline]
    pub const fn id(self) -> FunctionId {
        self.0
    }

    /// Name the function was registered under.
    ///
    /// # Panics
    /// Panics if the handle is null.
    #[track_caller]
    pub fn name(self, arena: &ExprArena) -> &str {
        if self.is_null() {
            null_deref("Function");
        }
        arena.function_name(self.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Function::NULL")
        } else {
            write!(f, "Function({})", self.0.index())
        }
    }
}

#[cfg(test)]
mod tests;
