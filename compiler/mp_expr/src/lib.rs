//! MP Expr - Expression Trees for Mathematical Programming
//!
//! This crate builds and inspects the nonlinear and logical expressions
//! that appear in optimization models:
//! - A closed set of expression kinds ([`Kind`])
//! - Arena storage owned by one factory ([`ExprArena`])
//! - `Copy` identity handles with a typed capability hierarchy
//! - Builders for variable-arity expressions and piecewise-linear terms
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: No `Box<Expr>`, children are `ExprId(u32)`
//!   indices; operand lists live in flat side tables
//! - **Validate Up Front**: a constructor either returns a finished node or
//!   an [`ExprError`], and never leaves a partial node behind
//! - **Static Capabilities**: numeric and logical operand slots take
//!   different handle types, so mixing them is a compile error
//!
//! # Example
//!
//! ```
//! use mp_expr::{ExprFactory, Kind};
//!
//! let mut factory = ExprFactory::new();
//! let x = factory.make_variable(0);
//! let y = factory.make_variable(1);
//!
//! let mut sum = factory.begin_sum(2)?;
//! sum.add_arg(x)?;
//! sum.add_arg(y)?;
//! let sum = factory.end_sum(sum)?;
//!
//! let zero = factory.make_numeric_constant(0.0);
//! let positive = factory.make_relational(Kind::Gt, sum, zero)?;
//!
//! let arena = factory.arena();
//! assert_eq!(positive.lhs(arena), sum);
//! assert_eq!(sum.args(arena).collect::<Vec<_>>(), [x, y]);
//! # Ok::<(), mp_expr::ExprError>(())
//! ```

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
mod builder;
mod config;
mod error;
mod expr_id;
mod factory;
mod handle;
mod iter;
mod kind;
pub mod visitor;

use std::sync::Once;

pub use arena::{ExprArena, SharedArena};
pub use builder::{
    AllDiffExprBuilder, CallExprBuilder, CountExprBuilder, ExprBuilder,
    IteratedLogicalExprBuilder, NumberOfExprBuilder, PLTermBuilder, SumExprBuilder,
    VarArgExprBuilder,
};
pub use config::FactoryConfig;
pub use error::{ExprError, Operand};
pub use expr_id::{ExprId, FunctionId};
pub(crate) use expr_id::ListRange;
pub use factory::ExprFactory;
pub use handle::{
    AllDiffExpr, BinaryExpr, BinaryLogicalExpr, CallExpr, CountExpr, Expr, ExprHandle,
    Function, IfExpr, ImplicationExpr, IteratedExpr, IteratedLogicalExpr, LogicalConstant,
    LogicalCountExpr, LogicalExpr, NotExpr, NumberOfExpr, NumericConstant, NumericExpr, PLTerm,
    RelationalExpr, SumExpr, UnaryExpr, VarArgExpr, Variable,
};
pub use iter::ArgIter;
pub use kind::Kind;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for expression construction.
///
/// Call once at startup. Subsequent calls are no-ops.
///
/// Enable with `RUST_LOG=mp_expr=debug` (finished and rejected builders)
/// or `RUST_LOG=mp_expr=trace` (every allocation).
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
