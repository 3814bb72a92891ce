//! Property-based tests for the builder protocol.
//!
//! Generates declared counts and operand lists and verifies:
//! 1. Arity: exactly the declared count is accepted, one more overflows,
//!    one less underflows
//! 2. PL terms keep `num_slopes == num_breakpoints + 1` for any interleaving
//! 3. Operands read back identical and in insertion order

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::float_cmp,
    clippy::cast_precision_loss,
    reason = "Generated values are small and compared exactly"
)]

use mp_expr::{ExprError, ExprFactory, Kind, NumericExpr, Operand};
use proptest::prelude::*;

/// A numeric leaf to feed into builders.
#[derive(Clone, Debug)]
enum Leaf {
    Constant(f64),
    Variable(u32),
}

fn leaf_strategy() -> impl Strategy<Value = Leaf> {
    prop_oneof![
        (-1.0e6..1.0e6f64).prop_map(Leaf::Constant),
        (0..10_000u32).prop_map(Leaf::Variable),
    ]
}

fn make_leaf(factory: &mut ExprFactory, leaf: &Leaf) -> NumericExpr {
    match *leaf {
        Leaf::Constant(value) => factory.make_numeric_constant(value).into(),
        Leaf::Variable(index) => factory.make_variable(index).into(),
    }
}

/// A piecewise-linear step, added in generated order.
#[derive(Clone, Copy, Debug)]
enum Step {
    Slope,
    Breakpoint,
}

/// Any interleaving of `n` breakpoints and `n + 1` slopes.
fn pl_steps(max_breakpoints: usize) -> impl Strategy<Value = Vec<Step>> {
    (1..=max_breakpoints).prop_flat_map(|n| {
        let mut steps = vec![Step::Breakpoint; n];
        steps.extend(std::iter::repeat(Step::Slope).take(n + 1));
        Just(steps).prop_shuffle()
    })
}

proptest! {
    #[test]
    fn sum_round_trips_operands(leaves in prop::collection::vec(leaf_strategy(), 0..32)) {
        let mut factory = ExprFactory::new();
        let args: Vec<NumericExpr> = leaves.iter().map(|l| make_leaf(&mut factory, l)).collect();
        let mut builder = factory.begin_sum(args.len()).unwrap();
        for &arg in &args {
            builder.add_arg(arg).unwrap();
        }
        let sum = factory.end_sum(builder).unwrap();

        let arena = factory.arena();
        prop_assert_eq!(sum.kind(), Kind::Sum);
        prop_assert_eq!(sum.num_args(arena), args.len());
        prop_assert_eq!(sum.args(arena).collect::<Vec<_>>(), args.clone());
        prop_assert_eq!(sum.args(arena).rev().collect::<Vec<_>>(),
                        args.iter().rev().copied().collect::<Vec<_>>());
        for (i, &arg) in args.iter().enumerate() {
            prop_assert_eq!(sum.arg(arena, i), Ok(arg));
        }
        prop_assert_eq!(
            sum.arg(arena, args.len()),
            Err(ExprError::IndexOutOfBounds { index: args.len(), len: args.len() })
        );
    }

    #[test]
    fn builder_accepts_exactly_declared(declared in 0..24usize, extra in 1..4usize) {
        let mut factory = ExprFactory::new();
        let x = factory.make_variable(0);
        let mut builder = factory.begin_vararg(Kind::Min, declared).unwrap();
        for _ in 0..declared {
            builder.add_arg(x).unwrap();
        }
        for _ in 0..extra {
            prop_assert_eq!(
                builder.add_arg(x),
                Err(ExprError::BuilderOverflow(Operand::Argument))
            );
        }
        prop_assert_eq!(builder.num_added(), declared);
        let min = factory.end_vararg(builder).unwrap();
        prop_assert_eq!(min.num_args(factory.arena()), declared);
    }

    #[test]
    fn builder_underflow_is_rejected(declared in 1..24usize, missing in 1..24usize) {
        let missing = missing.min(declared);
        let mut factory = ExprFactory::new();
        let t = factory.make_logical_constant(true);
        let mut builder = factory.begin_count(declared).unwrap();
        for _ in 0..declared - missing {
            builder.add_arg(t).unwrap();
        }
        let before = factory.arena().len();
        prop_assert_eq!(
            factory.end_count(builder).unwrap_err(),
            ExprError::BuilderUnderflow(Operand::Argument)
        );
        prop_assert_eq!(factory.arena().len(), before);
    }

    #[test]
    fn pl_term_counts_hold(steps in pl_steps(16), var in 0..1_000u32) {
        let mut factory = ExprFactory::new();
        let num_breakpoints = steps.iter().filter(|s| matches!(s, Step::Breakpoint)).count();
        let mut builder = factory.begin_pl_term(num_breakpoints).unwrap();
        let mut slopes = Vec::new();
        let mut breakpoints = Vec::new();
        for (i, step) in steps.iter().enumerate() {
            let value = i as f64;
            match step {
                Step::Slope => {
                    builder.add_slope(value).unwrap();
                    slopes.push(value);
                }
                Step::Breakpoint => {
                    builder.add_breakpoint(value).unwrap();
                    breakpoints.push(value);
                }
            }
        }
        prop_assert_eq!(
            builder.add_slope(0.0),
            Err(ExprError::BuilderOverflow(Operand::Slope))
        );
        prop_assert_eq!(
            builder.add_breakpoint(0.0),
            Err(ExprError::BuilderOverflow(Operand::Breakpoint))
        );
        let x = factory.make_variable(var);
        let pl = factory.end_pl_term(builder, x).unwrap();

        let arena = factory.arena();
        prop_assert_eq!(pl.num_breakpoints(arena), num_breakpoints);
        prop_assert_eq!(pl.num_slopes(arena), num_breakpoints + 1);
        prop_assert_eq!(pl.slopes(arena), slopes.as_slice());
        prop_assert_eq!(pl.breakpoints(arena), breakpoints.as_slice());
        prop_assert_eq!(pl.var_index(arena), var);
        prop_assert!(pl.slope(arena, num_breakpoints + 1).is_err());
        prop_assert!(pl.breakpoint(arena, num_breakpoints).is_err());
    }

    #[test]
    fn unary_kind_subset_is_enforced(kind_index in 0..Kind::ALL.len()) {
        let kind = Kind::ALL[kind_index];
        let mut factory = ExprFactory::new();
        let x = factory.make_variable(0);
        let result = factory.make_unary(kind, x);
        if kind.is_unary() {
            prop_assert_eq!(result.unwrap().kind(), kind);
        } else {
            prop_assert_eq!(result, Err(ExprError::InvalidExpressionKind { kind }));
        }
    }

    #[test]
    fn binary_kind_subset_is_enforced(kind_index in 0..Kind::ALL.len()) {
        let kind = Kind::ALL[kind_index];
        let mut factory = ExprFactory::new();
        let x = factory.make_variable(0);
        let y = factory.make_variable(1);
        let result = factory.make_binary(kind, x, y);
        prop_assert_eq!(result.is_ok(), kind.is_binary());
        let relational = factory.make_relational(kind, x, y);
        prop_assert_eq!(relational.is_ok(), kind.is_relational());
    }
}
