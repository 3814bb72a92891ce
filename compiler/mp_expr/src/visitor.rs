//! Expression traversal.
//!
//! Expressions form a DAG inside one [`ExprArena`]; a shared subexpression
//! is visited once per reference to it. The visitor may mutate its own
//! state, the arena stays immutable.
//!
//! Default implementations call the `walk_*` functions, which descend into
//! every operand. Override a `visit_*` method to intercept a category and
//! call the matching `walk_*` to keep descending.
//!
//! Trees may be arbitrarily deep. Each descent grows the stack on demand,
//! so a visitor never overflows on a long operand chain.
//!
//! # Example
//!
//! ```
//! use mp_expr::visitor::{walk_numeric, ExprVisitor};
//! use mp_expr::{ExprArena, ExprFactory, Kind, NumericExpr};
//!
//! struct Variables(Vec<u32>);
//!
//! impl ExprVisitor for Variables {
//!     fn visit_numeric(&mut self, expr: NumericExpr, arena: &ExprArena) {
//!         if let Ok(var) = mp_expr::Variable::try_from(expr) {
//!             self.0.push(var.index(arena));
//!         }
//!         walk_numeric(self, expr, arena);
//!     }
//! }
//!
//! let mut factory = ExprFactory::new();
//! let x = factory.make_variable(3);
//! let y = factory.make_variable(7);
//! let sum = factory.make_binary(Kind::Add, x, y)?;
//!
//! let mut vars = Variables(Vec::new());
//! vars.visit_expr(sum.into(), factory.arena());
//! assert_eq!(vars.0, [3, 7]);
//! # Ok::<(), mp_expr::ExprError>(())
//! ```

use crate::arena::ExprNode;
use crate::handle::{ExprRef, Sealed};
use crate::{Expr, ExprArena, Function, LogicalExpr, NumericExpr};

/// Expression visitor.
///
/// Null handles are never passed to a `visit_*` method.
pub trait ExprVisitor {
    /// Visit any expression. Dispatches on the kind's category.
    fn visit_expr(&mut self, expr: Expr, arena: &ExprArena) {
        walk_expr(self, expr, arena);
    }

    /// Visit a numeric expression.
    fn visit_numeric(&mut self, expr: NumericExpr, arena: &ExprArena) {
        walk_numeric(self, expr, arena);
    }

    /// Visit a logical expression.
    fn visit_logical(&mut self, expr: LogicalExpr, arena: &ExprArena) {
        walk_logical(self, expr, arena);
    }

    /// Visit the function of a call expression, before its arguments.
    fn visit_function(&mut self, function: Function, arena: &ExprArena) {
        let _ = (function, arena);
    }
}

/// Forward `expr` to `visit_numeric` or `visit_logical`.
pub fn walk_expr<V: ExprVisitor + ?Sized>(visitor: &mut V, expr: Expr, arena: &ExprArena) {
    let Some(raw) = Sealed::raw(expr) else {
        return;
    };
    if raw.kind.is_numeric() {
        visitor.visit_numeric(NumericExpr::from_raw(raw), arena);
    } else {
        visitor.visit_logical(LogicalExpr::from_raw(raw), arena);
    }
}

/// Visit every operand of a numeric expression.
pub fn walk_numeric<V: ExprVisitor + ?Sized>(
    visitor: &mut V,
    expr: NumericExpr,
    arena: &ExprArena,
) {
    if let Some(raw) = Sealed::raw(expr) {
        walk_operands(visitor, raw, arena);
    }
}

/// Visit every operand of a logical expression.
pub fn walk_logical<V: ExprVisitor + ?Sized>(
    visitor: &mut V,
    expr: LogicalExpr,
    arena: &ExprArena,
) {
    if let Some(raw) = Sealed::raw(expr) {
        walk_operands(visitor, raw, arena);
    }
}

/// Minimum stack space to keep available before descending (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

fn walk_operands<V: ExprVisitor + ?Sized>(visitor: &mut V, raw: ExprRef, arena: &ExprArena) {
    ensure_sufficient_stack(|| walk_operands_inner(visitor, raw, arena));
}

fn walk_operands_inner<V: ExprVisitor + ?Sized>(
    visitor: &mut V,
    raw: ExprRef,
    arena: &ExprArena,
) {
    match *arena.node::<Expr>(Some(raw)) {
        // Leaves
        ExprNode::Number(_) | ExprNode::Variable(_) | ExprNode::Bool(_) => {}

        ExprNode::Unary(arg) => visit_child(visitor, arg, arena),
        ExprNode::Binary(lhs, rhs) => {
            visit_child(visitor, lhs, arena);
            visit_child(visitor, rhs, arena);
        }
        ExprNode::Conditional {
            condition,
            true_expr,
            false_expr,
        } => {
            visit_child(visitor, condition, arena);
            visit_child(visitor, true_expr, arena);
            if let Some(false_expr) = false_expr {
                visit_child(visitor, false_expr, arena);
            }
        }
        ExprNode::PiecewiseLinear { var, .. } => visit_child(visitor, var, arena),
        ExprNode::Iterated { args } => {
            for &arg in arena.args(args) {
                visit_child(visitor, arg, arena);
            }
        }
        ExprNode::Call { function, args } => {
            visitor.visit_function(Function::new(function), arena);
            for &arg in arena.args(args) {
                visit_child(visitor, arg, arena);
            }
        }
    }
}

#[inline]
fn visit_child<V: ExprVisitor + ?Sized>(visitor: &mut V, child: ExprRef, arena: &ExprArena) {
    visitor.visit_expr(Expr::from_raw(child), arena);
}
