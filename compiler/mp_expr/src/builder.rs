//! Builders for variable-arity expressions.
//!
//! A builder is returned by one of the factory's `begin_*` methods, filled
//! with exactly the declared number of operands, and consumed by the
//! matching `end_*` method. Builders own their operands until then, so a
//! failed or abandoned build never reaches the store.
//!
//! Builders are move-only: `end_*` takes them by value, which rules out
//! adding operands to an already finalized expression.

use std::fmt;
use std::marker::PhantomData;

use smallvec::SmallVec;

use crate::handle::{ExprRef, IteratedExpr, Sealed};
use crate::{ExprError, FunctionId, Kind, Operand};

/// Operands kept inline before a builder spills to the heap.
const INLINE_ARGS: usize = 8;

/// Upper bound on up-front reservation; larger builders grow on demand.
const MAX_RESERVE: usize = 1024;

/// Accumulates the operands of one iterated expression of type `E`.
pub struct ExprBuilder<E: IteratedExpr> {
    kind: Kind,
    function: FunctionId,
    args: SmallVec<[ExprRef; INLINE_ARGS]>,
    num_args: usize,
    _expr: PhantomData<fn() -> E>,
}

pub type CallExprBuilder = ExprBuilder<crate::CallExpr>;
pub type VarArgExprBuilder = ExprBuilder<crate::VarArgExpr>;
pub type SumExprBuilder = ExprBuilder<crate::SumExpr>;
pub type NumberOfExprBuilder = ExprBuilder<crate::NumberOfExpr>;
pub type CountExprBuilder = ExprBuilder<crate::CountExpr>;
pub type IteratedLogicalExprBuilder = ExprBuilder<crate::IteratedLogicalExpr>;
pub type AllDiffExprBuilder = ExprBuilder<crate::AllDiffExpr>;

impl<E: IteratedExpr> ExprBuilder<E> {
    pub(crate) fn new(kind: Kind, function: FunctionId, num_args: usize) -> Self {
        ExprBuilder {
            kind,
            function,
            args: SmallVec::with_capacity(num_args.min(MAX_RESERVE)),
            num_args,
            _expr: PhantomData,
        }
    }

    /// Kind of the expression being built.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Declared operand count.
    pub fn num_args(&self) -> usize {
        self.num_args
    }

    /// Operands added so far.
    pub fn num_added(&self) -> usize {
        self.args.len()
    }

    /// Append the next operand.
    ///
    /// Fails with `InvalidArgument` for a null operand and with
    /// `BuilderOverflow` once the declared count has been reached.
    pub fn add_arg(&mut self, arg: impl Into<E::Arg>) -> Result<(), ExprError> {
        let arg: E::Arg = arg.into();
        let Some(arg) = Sealed::raw(arg) else {
            return Err(ExprError::InvalidArgument(Operand::Argument));
        };
        if self.args.len() == self.num_args {
            return Err(ExprError::BuilderOverflow(Operand::Argument));
        }
        self.args.push(arg);
        Ok(())
    }

    /// Push an operand that was validated by the factory.
    pub(crate) fn push_checked(&mut self, arg: ExprRef) {
        self.args.push(arg);
    }

    /// Underflow check performed by `end_*`.
    pub(crate) fn check_complete(&self) -> Result<(), ExprError> {
        if self.args.len() < self.num_args {
            tracing::debug!(
                kind = %self.kind,
                declared = self.num_args,
                added = self.args.len(),
                "rejected incomplete iterated expression"
            );
            return Err(ExprError::BuilderUnderflow(Operand::Argument));
        }
        Ok(())
    }

    pub(crate) fn function(&self) -> FunctionId {
        self.function
    }

    pub(crate) fn operands(&self) -> &[ExprRef] {
        &self.args
    }
}

impl<E: IteratedExpr> fmt::Debug for ExprBuilder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprBuilder")
            .field("kind", &self.kind)
            .field("num_args", &self.num_args)
            .field("added", &self.args.len())
            .finish()
    }
}

/// Accumulates the slopes and breakpoints of a piecewise-linear term.
///
/// For `n` breakpoints the term has `n + 1` slopes. Slopes and breakpoints
/// may be added in any interleaving; each is capped at its own count.
#[derive(Debug)]
pub struct PLTermBuilder {
    slopes: SmallVec<[f64; INLINE_ARGS]>,
    breakpoints: SmallVec<[f64; INLINE_ARGS]>,
    num_breakpoints: usize,
}

impl PLTermBuilder {
    pub(crate) fn new(num_breakpoints: usize) -> Self {
        PLTermBuilder {
            slopes: SmallVec::with_capacity(num_breakpoints.min(MAX_RESERVE) + 1),
            breakpoints: SmallVec::with_capacity(num_breakpoints.min(MAX_RESERVE)),
            num_breakpoints,
        }
    }

    /// Declared number of breakpoints.
    pub fn num_breakpoints(&self) -> usize {
        self.num_breakpoints
    }

    /// Declared number of slopes.
    pub fn num_slopes(&self) -> usize {
        self.num_breakpoints + 1
    }

    pub fn add_slope(&mut self, slope: f64) -> Result<(), ExprError> {
        if self.slopes.len() == self.num_slopes() {
            return Err(ExprError::BuilderOverflow(Operand::Slope));
        }
        self.slopes.push(slope);
        Ok(())
    }

    pub fn add_breakpoint(&mut self, breakpoint: f64) -> Result<(), ExprError> {
        if self.breakpoints.len() == self.num_breakpoints {
            return Err(ExprError::BuilderOverflow(Operand::Breakpoint));
        }
        self.breakpoints.push(breakpoint);
        Ok(())
    }

    /// Underflow check performed by `end_pl_term`.
    pub(crate) fn check_complete(&self) -> Result<(), ExprError> {
        if self.breakpoints.len() < self.num_breakpoints {
            return Err(ExprError::BuilderUnderflow(Operand::Breakpoint));
        }
        if self.slopes.len() < self.num_slopes() {
            return Err(ExprError::BuilderUnderflow(Operand::Slope));
        }
        Ok(())
    }

    pub(crate) fn slopes(&self) -> &[f64] {
        &self.slopes
    }

    pub(crate) fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }
}
