//! Expression construction errors.
//!
//! Every precondition the factory, its builders, or an indexed accessor
//! checks is reported as an [`ExprError`]. None of them is recoverable in
//! place: they signal a bug in whatever is driving the factory.

use crate::Kind;

/// What an [`ExprError`] is complaining about.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operand {
    Argument,
    Slope,
    Breakpoint,
    Function,
}

impl Operand {
    /// Singular noun, as in "invalid argument".
    pub const fn singular(self) -> &'static str {
        match self {
            Operand::Argument => "argument",
            Operand::Slope => "slope",
            Operand::Breakpoint => "breakpoint",
            Operand::Function => "function",
        }
    }

    /// Plural noun, as in "too many arguments".
    pub const fn plural(self) -> &'static str {
        match self {
            Operand::Argument => "arguments",
            Operand::Slope => "slopes",
            Operand::Breakpoint => "breakpoints",
            Operand::Function => "functions",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExprError {
    /// A `kind` argument is outside the subset the operation supports, or a
    /// handle cast targets a view the node's kind does not satisfy.
    #[error("invalid expression kind: {kind}")]
    InvalidExpressionKind { kind: Kind },

    /// A required operand (or function) is null.
    #[error("invalid {what}", what = .0.singular())]
    InvalidArgument(Operand),

    /// A declared count is below the kind's minimum or does not fit the store.
    #[error("invalid number of {what}: {count}", what = .operand.plural())]
    InvalidArgumentCount { operand: Operand, count: usize },

    /// `add_*` on a builder that already holds its declared capacity.
    #[error("too many {what}", what = .0.plural())]
    BuilderOverflow(Operand),

    /// `end_*` on a builder that holds fewer operands than declared.
    #[error("too few {what}", what = .0.plural())]
    BuilderUnderflow(Operand),

    /// Indexed accessor called outside `0..len`.
    #[error("index out of bounds: {index} (length {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

impl ExprError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ExprError::InvalidExpressionKind { .. } => "EXPR_INVALID_KIND",
            ExprError::InvalidArgument(_) => "EXPR_INVALID_ARGUMENT",
            ExprError::InvalidArgumentCount { .. } => "EXPR_INVALID_COUNT",
            ExprError::BuilderOverflow(_) => "EXPR_BUILDER_OVERFLOW",
            ExprError::BuilderUnderflow(_) => "EXPR_BUILDER_UNDERFLOW",
            ExprError::IndexOutOfBounds { .. } => "EXPR_INDEX_OUT_OF_BOUNDS",
        }
    }

    /// Bounds check shared by every indexed accessor.
    pub(crate) fn check_index(index: usize, len: usize) -> Result<usize, ExprError> {
        if index < len {
            Ok(index)
        } else {
            Err(ExprError::IndexOutOfBounds { index, len })
        }
    }
}

#[cfg(test)]
mod tests;
