use thiserror::Error;

/// Every way a single evaluation can fail. None of these are recovered
/// internally; the first one encountered ends the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalErr {
    #[error("Mismatched brackets")]
    MismatchedBrackets,

    #[error("Undefined variable: {0}")]
    UndefinedVariable(char),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Operator is missing an operand")]
    StackUnderflow,

    #[error("Exponent must be an exact number, not an uncertain quantity")]
    UnsupportedOperand,

    #[error("Expression left {0} operands unconsumed")]
    UnconsumedOperands(usize),

    #[error("Empty expression")]
    EmptyExpression,
}
