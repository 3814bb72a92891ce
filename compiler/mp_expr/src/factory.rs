//! The expression factory.
//!
//! [`ExprFactory`] is the only way to put nodes into an [`ExprArena`].
//! Leaves and fixed-arity nodes are created by a single `make_*` call;
//! variable-arity nodes go through `begin_*` / `add_*` / `end_*`.
//!
//! Every call validates its preconditions before touching the store, so a
//! failed call leaves the store exactly as it was.

use rustc_hash::FxHashMap;

use crate::arena::{ExprArena, ExprNode, SharedArena};
use crate::builder::{
    AllDiffExprBuilder, CallExprBuilder, CountExprBuilder, ExprBuilder,
    IteratedLogicalExprBuilder, NumberOfExprBuilder, PLTermBuilder, SumExprBuilder,
    VarArgExprBuilder,
};
use crate::handle::{ExprHandle, ExprRef, IteratedExpr, Sealed};
use crate::{
    AllDiffExpr, BinaryExpr, BinaryLogicalExpr, CallExpr, CountExpr, ExprError, FactoryConfig,
    Function, FunctionId, IfExpr, ImplicationExpr, IteratedLogicalExpr, Kind, LogicalConstant,
    LogicalCountExpr, LogicalExpr, NotExpr, NumberOfExpr, NumericConstant, NumericExpr, Operand,
    PLTerm, RelationalExpr, SumExpr, UnaryExpr, VarArgExpr, Variable,
};

/// Largest declared count the store can address.
const MAX_COUNT: usize = u32::MAX as usize;

/// Rejects `kind` unless it is in the subset an operation supports.
fn check_kind(kind: Kind, supported: fn(Kind) -> bool) -> Result<(), ExprError> {
    if supported(kind) {
        Ok(())
    } else {
        Err(ExprError::InvalidExpressionKind { kind })
    }
}

/// Rejects a declared count below `min` or beyond what the store can hold.
fn check_count(operand: Operand, count: usize, min: usize) -> Result<(), ExprError> {
    if count < min || count >= MAX_COUNT {
        Err(ExprError::InvalidArgumentCount { operand, count })
    } else {
        Ok(())
    }
}

/// Unwraps a required operand.
fn required<H: ExprHandle>(expr: H) -> Result<ExprRef, ExprError> {
    Sealed::raw(expr).ok_or(ExprError::InvalidArgument(Operand::Argument))
}

/// Creates expressions and owns the store they live in.
///
/// All handles produced by a factory are valid for as long as the factory
/// (or the arena it is turned into) exists.
///
/// # Example
///
/// ```
/// use mp_expr::{ExprFactory, Kind};
///
/// let mut factory = ExprFactory::new();
/// let x = factory.make_variable(0);
/// let two = factory.make_numeric_constant(2.0);
/// let product = factory.make_binary(Kind::Mul, two, x)?;
///
/// let arena = factory.arena();
/// assert_eq!(product.kind(), Kind::Mul);
/// assert_eq!(product.rhs(arena), x);
/// # Ok::<(), mp_expr::ExprError>(())
/// ```
#[derive(Debug, Default)]
pub struct ExprFactory {
    arena: ExprArena,
    /// Name index, present only when function deduplication is enabled.
    functions_by_name: Option<FxHashMap<Box<str>, FunctionId>>,
}

impl ExprFactory {
    /// Create a factory with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a factory with explicit options.
    pub fn with_config(config: &FactoryConfig) -> Self {
        ExprFactory {
            arena: ExprArena::with_capacity(config.node_capacity, config.list_capacity),
            functions_by_name: config.dedupe_functions.then(FxHashMap::default),
        }
    }

    /// The store holding every expression created so far.
    #[inline]
    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }

    /// Finish construction and keep only the store.
    pub fn into_arena(self) -> ExprArena {
        self.arena
    }

    /// Finish construction and share the store read-only.
    pub fn into_shared(self) -> SharedArena {
        SharedArena::new(self.arena)
    }

    fn push(&mut self, kind: Kind, node: ExprNode) -> ExprRef {
        let raw = self.arena.alloc(kind, node);
        tracing::trace!(kind = %kind, id = raw.id.raw(), "allocated expression");
        raw
    }

    fn alloc<H: ExprHandle>(&mut self, kind: Kind, node: ExprNode) -> H {
        Sealed::from_raw(self.push(kind, node))
    }

    // ===== Leaves =====

    pub fn make_numeric_constant(&mut self, value: f64) -> NumericConstant {
        self.alloc(Kind::Constant, ExprNode::Number(value))
    }

    /// Reference to decision variable `index`. The index is not checked
    /// against any variable count.
    pub fn make_variable(&mut self, index: u32) -> Variable {
        self.alloc(Kind::Variable, ExprNode::Variable(index))
    }

    pub fn make_logical_constant(&mut self, value: bool) -> LogicalConstant {
        self.alloc(Kind::LogicalConstant, ExprNode::Bool(value))
    }

    /// Register a function for use in call expressions.
    pub fn add_function(&mut self, name: &str) -> Function {
        if let Some(&id) = self
            .functions_by_name
            .as_ref()
            .and_then(|index| index.get(name))
        {
            return Function::new(id);
        }
        let id = self.arena.alloc_function(name);
        if let Some(index) = &mut self.functions_by_name {
            index.insert(name.into(), id);
        }
        tracing::trace!(name, id = id.index(), "registered function");
        Function::new(id)
    }

    // ===== Fixed arity =====

    pub fn make_unary(
        &mut self,
        kind: Kind,
        arg: impl Into<NumericExpr>,
    ) -> Result<UnaryExpr, ExprError> {
        check_kind(kind, Kind::is_unary)?;
        let arg = required::<NumericExpr>(arg.into())?;
        Ok(self.alloc(kind, ExprNode::Unary(arg)))
    }

    pub fn make_binary(
        &mut self,
        kind: Kind,
        lhs: impl Into<NumericExpr>,
        rhs: impl Into<NumericExpr>,
    ) -> Result<BinaryExpr, ExprError> {
        check_kind(kind, Kind::is_binary)?;
        let lhs = required::<NumericExpr>(lhs.into())?;
        let rhs = required::<NumericExpr>(rhs.into())?;
        Ok(self.alloc(kind, ExprNode::Binary(lhs, rhs)))
    }

    /// `if condition then true_expr else false_expr`.
    ///
    /// `false_expr` may be null: the expression then has no else-branch.
    pub fn make_if(
        &mut self,
        condition: impl Into<LogicalExpr>,
        true_expr: impl Into<NumericExpr>,
        false_expr: impl Into<NumericExpr>,
    ) -> Result<IfExpr, ExprError> {
        let condition = required::<LogicalExpr>(condition.into())?;
        let true_expr = required::<NumericExpr>(true_expr.into())?;
        let false_expr = <NumericExpr as Sealed>::raw(false_expr.into());
        Ok(self.alloc(
            Kind::If,
            ExprNode::Conditional {
                condition,
                true_expr,
                false_expr,
            },
        ))
    }

    pub fn make_not(&mut self, arg: impl Into<LogicalExpr>) -> Result<NotExpr, ExprError> {
        let arg = required::<LogicalExpr>(arg.into())?;
        Ok(self.alloc(Kind::Not, ExprNode::Unary(arg)))
    }

    pub fn make_binary_logical(
        &mut self,
        kind: Kind,
        lhs: impl Into<LogicalExpr>,
        rhs: impl Into<LogicalExpr>,
    ) -> Result<BinaryLogicalExpr, ExprError> {
        check_kind(kind, Kind::is_binary_logical)?;
        let lhs = required::<LogicalExpr>(lhs.into())?;
        let rhs = required::<LogicalExpr>(rhs.into())?;
        Ok(self.alloc(kind, ExprNode::Binary(lhs, rhs)))
    }

    pub fn make_relational(
        &mut self,
        kind: Kind,
        lhs: impl Into<NumericExpr>,
        rhs: impl Into<NumericExpr>,
    ) -> Result<RelationalExpr, ExprError> {
        check_kind(kind, Kind::is_relational)?;
        let lhs = required::<NumericExpr>(lhs.into())?;
        let rhs = required::<NumericExpr>(rhs.into())?;
        Ok(self.alloc(kind, ExprNode::Binary(lhs, rhs)))
    }

    /// `atleast`/`atmost`/`exactly`: compares `lhs` with the number of true
    /// operands of the count expression `rhs`.
    pub fn make_logical_count(
        &mut self,
        kind: Kind,
        lhs: impl Into<NumericExpr>,
        rhs: CountExpr,
    ) -> Result<LogicalCountExpr, ExprError> {
        check_kind(kind, Kind::is_logical_count)?;
        let lhs = required::<NumericExpr>(lhs.into())?;
        let rhs = required(rhs)?;
        Ok(self.alloc(kind, ExprNode::Binary(lhs, rhs)))
    }

    /// `condition ==> true_expr else false_expr`.
    ///
    /// `false_expr` may be null: the implication then has no else-branch.
    pub fn make_implication(
        &mut self,
        condition: impl Into<LogicalExpr>,
        true_expr: impl Into<LogicalExpr>,
        false_expr: impl Into<LogicalExpr>,
    ) -> Result<ImplicationExpr, ExprError> {
        let condition = required::<LogicalExpr>(condition.into())?;
        let true_expr = required::<LogicalExpr>(true_expr.into())?;
        let false_expr = <LogicalExpr as Sealed>::raw(false_expr.into());
        Ok(self.alloc(
            Kind::Implication,
            ExprNode::Conditional {
                condition,
                true_expr,
                false_expr,
            },
        ))
    }

    // ===== Piecewise-linear terms =====

    /// Start a piecewise-linear term with `num_breakpoints` breakpoints and
    /// `num_breakpoints + 1` slopes.
    pub fn begin_pl_term(&self, num_breakpoints: usize) -> Result<PLTermBuilder, ExprError> {
        check_count(Operand::Breakpoint, num_breakpoints, 1)?;
        Ok(PLTermBuilder::new(num_breakpoints))
    }

    /// Finish a piecewise-linear term applied to `var`.
    pub fn end_pl_term(
        &mut self,
        builder: PLTermBuilder,
        var: Variable,
    ) -> Result<PLTerm, ExprError> {
        builder.check_complete()?;
        let var = required(var)?;
        let slopes = self.arena.alloc_numbers(builder.slopes());
        let breakpoints = self.arena.alloc_numbers(builder.breakpoints());
        let raw = self.push(
            Kind::PLTerm,
            ExprNode::PiecewiseLinear {
                slopes,
                breakpoints,
                var,
            },
        );
        tracing::debug!(
            id = raw.id.raw(),
            breakpoints = builder.num_breakpoints(),
            "finished piecewise-linear term"
        );
        Ok(Sealed::from_raw(raw))
    }

    // ===== Iterated =====

    /// Start a call of `function` with `num_args` arguments.
    pub fn begin_call(
        &self,
        function: Function,
        num_args: usize,
    ) -> Result<CallExprBuilder, ExprError> {
        if function.is_null() || function.id().index() >= self.arena.num_functions() {
            return Err(ExprError::InvalidArgument(Operand::Function));
        }
        check_count(Operand::Argument, num_args, 0)?;
        Ok(ExprBuilder::new(Kind::Call, function.id(), num_args))
    }

    pub fn end_call(&mut self, builder: CallExprBuilder) -> Result<CallExpr, ExprError> {
        self.end_iterated(builder)
    }

    /// Start a `min` or `max` expression.
    pub fn begin_vararg(
        &self,
        kind: Kind,
        num_args: usize,
    ) -> Result<VarArgExprBuilder, ExprError> {
        check_kind(kind, Kind::is_vararg)?;
        Self::begin_iterated(kind, num_args, 0)
    }

    pub fn end_vararg(&mut self, builder: VarArgExprBuilder) -> Result<VarArgExpr, ExprError> {
        self.end_iterated(builder)
    }

    pub fn begin_sum(&self, num_args: usize) -> Result<SumExprBuilder, ExprError> {
        Self::begin_iterated(Kind::Sum, num_args, 0)
    }

    pub fn end_sum(&mut self, builder: SumExprBuilder) -> Result<SumExpr, ExprError> {
        self.end_iterated(builder)
    }

    /// Start a `numberof` expression.
    ///
    /// `value` is operand 0 and counts towards `num_args`, so `num_args`
    /// must be at least one and the caller adds `num_args - 1` operands.
    pub fn begin_number_of(
        &self,
        num_args: usize,
        value: impl Into<NumericExpr>,
    ) -> Result<NumberOfExprBuilder, ExprError> {
        let mut builder = Self::begin_iterated(Kind::NumberOf, num_args, 1)?;
        builder.push_checked(required::<NumericExpr>(value.into())?);
        Ok(builder)
    }

    pub fn end_number_of(
        &mut self,
        builder: NumberOfExprBuilder,
    ) -> Result<NumberOfExpr, ExprError> {
        self.end_iterated(builder)
    }

    pub fn begin_count(&self, num_args: usize) -> Result<CountExprBuilder, ExprError> {
        Self::begin_iterated(Kind::Count, num_args, 0)
    }

    pub fn end_count(&mut self, builder: CountExprBuilder) -> Result<CountExpr, ExprError> {
        self.end_iterated(builder)
    }

    /// Start an `exists` or `forall` expression.
    pub fn begin_iterated_logical(
        &self,
        kind: Kind,
        num_args: usize,
    ) -> Result<IteratedLogicalExprBuilder, ExprError> {
        check_kind(kind, Kind::is_iterated_logical)?;
        Self::begin_iterated(kind, num_args, 0)
    }

    pub fn end_iterated_logical(
        &mut self,
        builder: IteratedLogicalExprBuilder,
    ) -> Result<IteratedLogicalExpr, ExprError> {
        self.end_iterated(builder)
    }

    pub fn begin_all_diff(&self, num_args: usize) -> Result<AllDiffExprBuilder, ExprError> {
        Self::begin_iterated(Kind::AllDiff, num_args, 0)
    }

    pub fn end_all_diff(&mut self, builder: AllDiffExprBuilder) -> Result<AllDiffExpr, ExprError> {
        self.end_iterated(builder)
    }

    fn begin_iterated<E: IteratedExpr>(
        kind: Kind,
        num_args: usize,
        min_args: usize,
    ) -> Result<ExprBuilder<E>, ExprError> {
        check_count(Operand::Argument, num_args, min_args)?;
        Ok(ExprBuilder::new(kind, FunctionId::INVALID, num_args))
    }

    fn end_iterated<E: IteratedExpr>(&mut self, builder: ExprBuilder<E>) -> Result<E, ExprError> {
        builder.check_complete()?;
        let kind = builder.kind();
        let args = self.arena.alloc_args(builder.operands());
        let node = if kind == Kind::Call {
            ExprNode::Call {
                function: builder.function(),
                args,
            }
        } else {
            ExprNode::Iterated { args }
        };
        let raw = self.push(kind, node);
        tracing::debug!(
            kind = %kind,
            id = raw.id.raw(),
            num_args = builder.num_added(),
            "finished iterated expression"
        );
        Ok(Sealed::from_raw(raw))
    }
}
