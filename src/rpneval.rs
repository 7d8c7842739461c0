use crate::error::EvalErr;
use crate::parser::RPNExpr;
use crate::quantity::{Operand, Quantity};
use crate::tokenizer::{Op, Token};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Variable bindings for an evaluation: each single-character name maps to
/// a measured `(value, absolute uncertainty)` pair.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext(pub HashMap<char, (f64, f64)>);

impl ErrorContext {
    pub fn new() -> ErrorContext {
        ErrorContext(HashMap::new())
    }

    pub fn setvar(&mut self, var: char, value: f64, absolute: f64) {
        self.0.insert(var, (value, absolute));
    }

    pub fn getvar(&self, var: char) -> Option<Quantity> {
        lookup(&self.0, var)
    }

    pub fn eval(&self, rpn: &RPNExpr) -> Result<Quantity, EvalErr> {
        eval_with(&self.0, rpn)
    }
}

fn lookup(bindings: &HashMap<char, (f64, f64)>, var: char) -> Option<Quantity> {
    bindings
        .get(&var)
        .map(|&(value, absolute)| Quantity::from_value_and_absolute(value, absolute))
}

/// Evaluates `rpn` against borrowed bindings without building a context.
pub fn eval_with(
    bindings: &HashMap<char, (f64, f64)>,
    rpn: &RPNExpr,
) -> Result<Quantity, EvalErr> {
    let mut operands = Vec::new();

    for token in rpn.0.iter() {
        match *token {
            Token::Number(num) => operands.push(Operand::Exact(num)),
            Token::Variable(var) => match lookup(bindings, var) {
                Some(q) => operands.push(Operand::Uncertain(q)),
                None => return Err(EvalErr::UndefinedVariable(var)),
            },
            Token::Operator(op) => {
                let r = operands.pop().ok_or(EvalErr::StackUnderflow)?;
                let l = operands.pop().ok_or(EvalErr::StackUnderflow)?;
                let result = apply(op, l, r)?;
                trace!("{:?} {} {:?} = {:?}", l, op.symbol(), r, result);
                operands.push(result);
            }
        }
    }
    let result = operands.pop().ok_or(EvalErr::EmptyExpression)?;
    if !operands.is_empty() {
        return Err(EvalErr::UnconsumedOperands(operands.len() + 1));
    }
    let result = result.into_quantity();
    debug!("{} = {}", rpn, result);
    Ok(result)
}

fn apply(op: Op, l: Operand, r: Operand) -> Result<Operand, EvalErr> {
    match op {
        Op::Add => Ok(l + r),
        Op::Sub => Ok(l - r),
        Op::Mul => Ok(l * r),
        Op::Div => l.checked_div(r),
        Op::Pow => l.pow(r),
        // a bracket surviving into postfix was never matched
        Op::LParen | Op::RParen => Err(EvalErr::MismatchedBrackets),
    }
}

impl From<HashMap<char, (f64, f64)>> for ErrorContext {
    fn from(bindings: HashMap<char, (f64, f64)>) -> Self {
        ErrorContext(bindings)
    }
}
