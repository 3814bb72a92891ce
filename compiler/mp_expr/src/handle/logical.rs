//! Accessors of logical expression views.

use super::numeric::impl_iterated_accessors;
use super::{node_mismatch, ExprHandle, ExprRef, Sealed};
use crate::arena::ExprNode;
use crate::iter::ArgIter;
use crate::{
    AllDiffExpr, BinaryLogicalExpr, CountExpr, ExprArena, ExprError, ImplicationExpr,
    IteratedLogicalExpr, LogicalConstant, LogicalCountExpr, LogicalExpr, NotExpr, NumericExpr,
    RelationalExpr,
};

impl LogicalConstant {
    pub fn value(self, arena: &ExprArena) -> bool {
        match *arena.node::<Self>(self.0) {
            ExprNode::Bool(value) => value,
            ref node => node_mismatch(Self::NAME, node),
        }
    }
}

impl NotExpr {
    pub fn arg(self, arena: &ExprArena) -> LogicalExpr {
        match *arena.node::<Self>(self.0) {
            ExprNode::Unary(arg) => LogicalExpr::from_raw(arg),
            ref node => node_mismatch(Self::NAME, node),
        }
    }
}

/// `lhs`/`rhs` accessors over a `Binary` node, with the operand types of
/// each view.
macro_rules! impl_binary_accessors {
    ($name:ident, $lhs:ident, $rhs:ident) => {
        impl $name {
            pub fn lhs(self, arena: &ExprArena) -> $lhs {
                $lhs::from_raw(self.operands(arena).0)
            }

            pub fn rhs(self, arena: &ExprArena) -> $rhs {
                $rhs::from_raw(self.operands(arena).1)
            }

            fn operands(self, arena: &ExprArena) -> (ExprRef, ExprRef) {
                match *arena.node::<Self>(self.0) {
                    ExprNode::Binary(lhs, rhs) => (lhs, rhs),
                    ref node => node_mismatch(Self::NAME, node),
                }
            }
        }
    };
}

impl_binary_accessors!(BinaryLogicalExpr, LogicalExpr, LogicalExpr);
impl_binary_accessors!(RelationalExpr, NumericExpr, NumericExpr);
impl_binary_accessors!(LogicalCountExpr, NumericExpr, CountExpr);

impl ImplicationExpr {
    pub fn condition(self, arena: &ExprArena) -> LogicalExpr {
        LogicalExpr::from_raw(self.branches(arena).0)
    }

    pub fn true_expr(self, arena: &ExprArena) -> LogicalExpr {
        LogicalExpr::from_raw(self.branches(arena).1)
    }

    /// The else-branch; null when the implication has none.
    pub fn false_expr(self, arena: &ExprArena) -> LogicalExpr {
        self.branches(arena)
            .2
            .map_or(LogicalExpr::NULL, LogicalExpr::from_raw)
    }

    fn branches(self, arena: &ExprArena) -> (ExprRef, ExprRef, Option<ExprRef>) {
        match *arena.node::<Self>(self.0) {
            ExprNode::Conditional {
                condition,
                true_expr,
                false_expr,
            } => (condition, true_expr, false_expr),
            ref node => node_mismatch(Self::NAME, node),
        }
    }
}

impl_iterated_accessors!(IteratedLogicalExpr, AllDiffExpr);
