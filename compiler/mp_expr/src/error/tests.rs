use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_messages_match_categories() {
    assert_eq!(
        ExprError::InvalidExpressionKind { kind: Kind::Add }.to_string(),
        "invalid expression kind: +"
    );
    assert_eq!(
        ExprError::InvalidArgument(Operand::Argument).to_string(),
        "invalid argument"
    );
    assert_eq!(
        ExprError::InvalidArgument(Operand::Function).to_string(),
        "invalid function"
    );
    assert_eq!(
        ExprError::InvalidArgumentCount {
            operand: Operand::Breakpoint,
            count: 0
        }
        .to_string(),
        "invalid number of breakpoints: 0"
    );
    assert_eq!(
        ExprError::BuilderOverflow(Operand::Slope).to_string(),
        "too many slopes"
    );
    assert_eq!(
        ExprError::BuilderUnderflow(Operand::Argument).to_string(),
        "too few arguments"
    );
    assert_eq!(
        ExprError::IndexOutOfBounds { index: 3, len: 3 }.to_string(),
        "index out of bounds: 3 (length 3)"
    );
}

#[test]
fn test_error_code_is_stable() {
    assert_eq!(
        ExprError::InvalidArgument(Operand::Argument).code(),
        "EXPR_INVALID_ARGUMENT"
    );
    assert_eq!(
        ExprError::BuilderOverflow(Operand::Breakpoint).code(),
        "EXPR_BUILDER_OVERFLOW"
    );
    assert_eq!(
        ExprError::IndexOutOfBounds { index: 0, len: 0 }.code(),
        "EXPR_INDEX_OUT_OF_BOUNDS"
    );
}

#[test]
fn test_check_index() {
    assert_eq!(ExprError::check_index(0, 1), Ok(0));
    assert_eq!(
        ExprError::check_index(1, 1),
        Err(ExprError::IndexOutOfBounds { index: 1, len: 1 })
    );
    assert_eq!(
        ExprError::check_index(usize::MAX, 2),
        Err(ExprError::IndexOutOfBounds {
            index: usize::MAX,
            len: 2
        })
    );
}
