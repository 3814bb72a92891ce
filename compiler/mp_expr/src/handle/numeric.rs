//! Accessors of numeric expression views.

use super::{node_mismatch, ExprHandle, ExprRef, Sealed};
use crate::arena::ExprNode;
use crate::iter::ArgIter;
use crate::{
    BinaryExpr, CallExpr, CountExpr, ExprArena, ExprError, Function, IfExpr, LogicalExpr,
    NumberOfExpr, NumericConstant, NumericExpr, PLTerm, SumExpr, UnaryExpr, VarArgExpr, Variable,
};

impl NumericConstant {
    /// The literal value.
    pub fn value(self, arena: &ExprArena) -> f64 {
        match *arena.node::<Self>(self.0) {
            ExprNode::Number(value) => value,
            ref node => node_mismatch(Self::NAME, node),
        }
    }
}

impl Variable {
    /// Index of the decision variable.
    pub fn index(self, arena: &ExprArena) -> u32 {
        match *arena.node::<Self>(self.0) {
            ExprNode::Variable(index) => index,
            ref node => node_mismatch(Self::NAME, node),
        }
    }
}

impl UnaryExpr {
    pub fn arg(self, arena: &ExprArena) -> NumericExpr {
        match *arena.node::<Self>(self.0) {
            ExprNode::Unary(arg) => NumericExpr::from_raw(arg),
            ref node => node_mismatch(Self::NAME, node),
        }
    }
}

impl BinaryExpr {
    pub fn lhs(self, arena: &ExprArena) -> NumericExpr {
        NumericExpr::from_raw(self.operands(arena).0)
    }

    pub fn rhs(self, arena: &ExprArena) -> NumericExpr {
        NumericExpr::from_raw(self.operands(arena).1)
    }

    fn operands(self, arena: &ExprArena) -> (ExprRef, ExprRef) {
        match *arena.node::<Self>(self.0) {
            ExprNode::Binary(lhs, rhs) => (lhs, rhs),
            ref node => node_mismatch(Self::NAME, node),
        }
    }
}

impl IfExpr {
    pub fn condition(self, arena: &ExprArena) -> LogicalExpr {
        LogicalExpr::from_raw(self.branches(arena).0)
    }

    pub fn true_expr(self, arena: &ExprArena) -> NumericExpr {
        NumericExpr::from_raw(self.branches(arena).1)
    }

    /// The else-branch; null when the expression has none.
    pub fn false_expr(self, arena: &ExprArena) -> NumericExpr {
        self.branches(arena)
            .2
            .map_or(NumericExpr::NULL, NumericExpr::from_raw)
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

impl PLTerm {
    /// Number of breakpoints; always at least one.
    pub fn num_breakpoints(self, arena: &ExprArena) -> usize {
        self.breakpoints(arena).len()
    }

    /// Number of slopes; always `num_breakpoints() + 1`.
    pub fn num_slopes(self, arena: &ExprArena) -> usize {
        self.slopes(arena).len()
    }

    /// Slope at `index`, checked against `0..num_slopes()`.
    pub fn slope(self, arena: &ExprArena, index: usize) -> Result<f64, ExprError> {
        let slopes = self.slopes(arena);
        ExprError::check_index(index, slopes.len()).map(|i| slopes[i])
    }

    /// Breakpoint at `index`, checked against `0..num_breakpoints()`.
    pub fn breakpoint(self, arena: &ExprArena, index: usize) -> Result<f64, ExprError> {
        let breakpoints = self.breakpoints(arena);
        ExprError::check_index(index, breakpoints.len()).map(|i| breakpoints[i])
    }

    /// All slopes, in order.
    pub fn slopes(self, arena: &ExprArena) -> &[f64] {
        match *arena.node::<Self>(self.0) {
            ExprNode::PiecewiseLinear { slopes, .. } => arena.numbers(slopes),
            ref node => node_mismatch(Self::NAME, node),
        }
    }

    /// All breakpoints, in order.
    pub fn breakpoints(self, arena: &ExprArena) -> &[f64] {
        match *arena.node::<Self>(self.0) {
            ExprNode::PiecewiseLinear { breakpoints, .. } => arena.numbers(breakpoints),
            ref node => node_mismatch(Self::NAME, node),
        }
    }

    /// The variable the term is applied to.
    pub fn arg(self, arena: &ExprArena) -> Variable {
        match *arena.node::<Self>(self.0) {
            ExprNode::PiecewiseLinear { var, .. } => Variable::from_raw(var),
            ref node => node_mismatch(Self::NAME, node),
        }
    }

    /// Index of the variable the term is applied to.
    pub fn var_index(self, arena: &ExprArena) -> u32 {
        self.arg(arena).index(arena)
    }
}

impl CallExpr {
    /// The called function.
    pub fn function(self, arena: &ExprArena) -> Function {
        match *arena.node::<Self>(self.0) {
            ExprNode::Call { function, .. } => Function::new(function),
            ref node => node_mismatch(Self::NAME, node),
        }
    }
}

impl NumberOfExpr {
    /// The reference value whose occurrences are counted (operand 0).
    pub fn value(self, arena: &ExprArena) -> NumericExpr {
        // begin_number_of rejects a count below one
        NumericExpr::from_raw(self.arg_refs(arena)[0])
    }
}

/// Operand accessors shared by every iterated view.
macro_rules! impl_iterated_accessors {
    ($($name:ident),+ $(,)?) => {
        $(
            impl $name {
                /// Number of operands.
                pub fn num_args(self, arena: &ExprArena) -> usize {
                    self.arg_refs(arena).len()
                }

                /// Operand at `index`, checked against `0..num_args()`.
                pub fn arg(
                    self,
                    arena: &ExprArena,
                    index: usize,
                ) -> Result<<Self as crate::IteratedExpr>::Arg, ExprError> {
                    let args = self.arg_refs(arena);
                    ExprError::check_index(index, args.len()).map(|i| Sealed::from_raw(args[i]))
                }

                /// Iterator over the operands, in insertion order.
                pub fn args(self, arena: &ExprArena) -> ArgIter<'_, <Self as crate::IteratedExpr>::Arg> {
                    ArgIter::new(self.0, self.arg_refs(arena))
                }

                fn arg_refs(self, arena: &ExprArena) -> &[ExprRef] {
                    match *arena.node::<Self>(self.0) {
                        ExprNode::Iterated { args } | ExprNode::Call { args, .. } => {
                            arena.args(args)
                        }
                        ref node => node_mismatch(Self::NAME, node),
                    }
                }
            }
        )+
    };
}

pub(super) use impl_iterated_accessors;

impl_iterated_accessors!(CallExpr, VarArgExpr, SumExpr, NumberOfExpr, CountExpr);
