#![allow(clippy::unwrap_used)]

use super::*;
use crate::ExprFactory;
use pretty_assertions::assert_eq;

#[test]
fn test_null_is_default_and_equal_to_no_node() {
    assert_eq!(Expr::default(), Expr::NULL);
    assert_eq!(NumericExpr::default(), NumericExpr::NULL);
    assert!(UnaryExpr::NULL.is_null());
    assert_eq!(UnaryExpr::NULL.id(), ExprId::INVALID);

    let mut factory = ExprFactory::new();
    let x = factory.make_variable(0);
    assert!(!x.is_null());
    assert_ne!(x, Variable::NULL);
    assert_ne!(Expr::from(x), Expr::NULL);
}

#[test]
fn test_identity_across_hierarchy() {
    let mut factory = ExprFactory::new();
    let x = factory.make_variable(0);
    let two = factory.make_numeric_constant(2.0);
    let add = factory.make_binary(Kind::Add, x, two).unwrap();

    let numeric: NumericExpr = add.into();
    let generic: Expr = add.into();
    assert_eq!(add, numeric);
    assert_eq!(numeric, add);
    assert_eq!(add, generic);
    assert_eq!(generic, Expr::from(numeric));
    assert_ne!(numeric, NumericExpr::from(x));
}

#[test]
fn test_equal_values_are_distinct_nodes() {
    let mut factory = ExprFactory::new();
    let a = factory.make_numeric_constant(1.0);
    let b = factory.make_numeric_constant(1.0);
    assert_ne!(a, b);
    assert_eq!(a.value(factory.arena()), b.value(factory.arena()));
}

#[test]
fn test_downcast_checks_kind() {
    let mut factory = ExprFactory::new();
    let x = factory.make_variable(0);
    let t = factory.make_logical_constant(true);

    let generic: Expr = x.into();
    assert_eq!(NumericExpr::try_from(generic), Ok(NumericExpr::from(x)));
    assert_eq!(Variable::try_from(generic), Ok(x));
    assert_eq!(
        LogicalExpr::try_from(generic),
        Err(ExprError::InvalidExpressionKind {
            kind: Kind::Variable
        })
    );
    assert_eq!(
        UnaryExpr::try_from(NumericExpr::from(x)),
        Err(ExprError::InvalidExpressionKind {
            kind: Kind::Variable
        })
    );
    assert_eq!(
        LogicalConstant::try_from(LogicalExpr::from(t)),
        Ok(t)
    );
}

#[test]
fn test_null_casts_to_null() {
    assert_eq!(NumericExpr::try_from(Expr::NULL), Ok(NumericExpr::NULL));
    assert_eq!(BinaryExpr::try_from(NumericExpr::NULL), Ok(BinaryExpr::NULL));
    assert_eq!(Expr::from(NotExpr::NULL), Expr::NULL);
}

#[test]
fn test_view_accepts_its_kinds() {
    for kind in Kind::ALL {
        assert!(Expr::accepts(kind));
        assert_eq!(NumericExpr::accepts(kind), kind.is_numeric());
        assert_eq!(UnaryExpr::accepts(kind), kind.is_unary());
        assert_eq!(VarArgExpr::accepts(kind), kind.is_vararg());
        assert_eq!(RelationalExpr::accepts(kind), kind.is_relational());
        assert_eq!(
            IteratedLogicalExpr::accepts(kind),
            kind.is_iterated_logical()
        );
    }
    assert!(CountExpr::accepts(Kind::Count));
    assert!(AllDiffExpr::accepts(Kind::AllDiff));
}

#[test]
fn test_kind_of_handle() {
    let mut factory = ExprFactory::new();
    let x = factory.make_variable(0);
    let sqrt = factory.make_unary(Kind::Sqrt, x).unwrap();
    assert_eq!(sqrt.kind(), Kind::Sqrt);
    assert_eq!(Expr::from(sqrt).kind(), Kind::Sqrt);
}

#[test]
#[should_panic(expected = "null NumericExpr dereferenced")]
fn test_kind_of_null_panics() {
    let _ = NumericExpr::NULL.kind();
}

#[test]
#[should_panic(expected = "null NumericConstant dereferenced")]
fn test_accessor_of_null_panics() {
    let factory = ExprFactory::new();
    let _ = NumericConstant::NULL.value(factory.arena());
}

#[test]
fn test_debug_format() {
    let mut factory = ExprFactory::new();
    let x = factory.make_variable(0);
    assert_eq!(format!("{x:?}"), "Variable(Variable, ExprId(0))");
    assert_eq!(format!("{:?}", Expr::NULL), "Expr::NULL");
    assert_eq!(format!("{:?}", Function::NULL), "Function::NULL");
}

#[test]
fn test_function_identity_and_name() {
    let mut factory = ExprFactory::new();
    let foo = factory.add_function("foo");
    let bar = factory.add_function("bar");
    assert_ne!(foo, bar);
    assert_ne!(foo, Function::NULL);
    assert!(Function::NULL.is_null());
    assert_eq!(foo.name(factory.arena()), "foo");
    assert_eq!(bar.name(factory.arena()), "bar");
    assert_eq!(format!("{bar:?}"), "Function(1)");
}

#[test]
fn test_leaf_accessors() {
    let mut factory = ExprFactory::new();
    let n = factory.make_numeric_constant(-0.5);
    let v = factory.make_variable(42);
    let b = factory.make_logical_constant(false);
    let arena = factory.arena();
    assert_eq!(n.value(arena), -0.5);
    assert_eq!(v.index(arena), 42);
    assert!(!b.value(arena));
}

#[test]
fn test_conditional_accessors() {
    let mut factory = ExprFactory::new();
    let c = factory.make_logical_constant(true);
    let t = factory.make_numeric_constant(1.0);
    let e = factory.make_numeric_constant(2.0);
    let with_else = factory.make_if(c, t, e).unwrap();
    let without_else = factory.make_if(c, t, NumericExpr::NULL).unwrap();

    let arena = factory.arena();
    assert_eq!(with_else.condition(arena), c);
    assert_eq!(with_else.true_expr(arena), t);
    assert_eq!(with_else.false_expr(arena), e);
    assert!(without_else.false_expr(arena).is_null());
}

#[test]
fn test_logical_count_rhs_is_count() {
    let mut factory = ExprFactory::new();
    let t = factory.make_logical_constant(true);
    let mut count = factory.begin_count(1).unwrap();
    count.add_arg(t).unwrap();
    let count = factory.end_count(count).unwrap();
    let one = factory.make_numeric_constant(1.0);
    let at_least = factory
        .make_logical_count(Kind::AtLeast, one, count)
        .unwrap();

    let arena = factory.arena();
    assert_eq!(at_least.lhs(arena), one);
    let rhs: CountExpr = at_least.rhs(arena);
    assert_eq!(rhs, count);
    assert_eq!(rhs.num_args(arena), 1);
}

#[test]
fn test_size() {
    assert_eq!(std::mem::size_of::<Expr>(), 8);
    assert_eq!(std::mem::size_of::<Function>(), 4);
}
