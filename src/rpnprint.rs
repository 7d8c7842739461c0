use crate::error::EvalErr;
use crate::parser::{precedence, RPNExpr};
use crate::quantity::Quantity;
use crate::tokenizer::{Op, Token};
use std::fmt;

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Token::Operator(op) => write!(f, "{}", op),
            Token::Variable(name) => write!(f, "{}", name),
            Token::Number(num) => write!(f, "{}", num),
        }
    }
}

impl fmt::Display for RPNExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let postfix = self
            .0
            .iter()
            .map(|token| token.to_string())
            .collect::<Vec<String>>()
            .join(" ");
        write!(f, "{}", postfix)
    }
}

// operands bind tighter than any operator
const LEAF: usize = usize::MAX;

impl RPNExpr {
    /// Renders the postfix expression back into infix with the fewest
    /// parentheses that keep its meaning under left associativity.
    pub fn to_infix(&self) -> Result<String, EvalErr> {
        let mut printed: Vec<(String, usize)> = Vec::new();
        for token in self.0.iter() {
            match *token {
                Token::Number(_) | Token::Variable(_) => printed.push((token.to_string(), LEAF)),
                Token::Operator(Op::LParen) | Token::Operator(Op::RParen) => {
                    return Err(EvalErr::MismatchedBrackets)
                }
                Token::Operator(op) => {
                    let (rhs, rprec) = printed.pop().ok_or(EvalErr::StackUnderflow)?;
                    let (lhs, lprec) = printed.pop().ok_or(EvalErr::StackUnderflow)?;
                    let prec = precedence(op);
                    let lh = if lprec < prec {
                        format!("({})", lhs)
                    } else {
                        lhs
                    };
                    // an equal-precedence right operand was grouped explicitly
                    let rh = if rprec <= prec {
                        format!("({})", rhs)
                    } else {
                        rhs
                    };
                    printed.push((format!("{} {} {}", lh, op, rh), prec));
                }
            }
        }
        let (infix, _) = printed.pop().ok_or(EvalErr::EmptyExpression)?;
        if !printed.is_empty() {
            return Err(EvalErr::UnconsumedOperands(printed.len() + 1));
        }
        Ok(infix)
    }
}

fn round4(x: f64) -> f64 {
    (x * 1.0e4).round() / 1.0e4
}

// value ±absolute (relative%)
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:?} ±{:?} ({:?}%)",
            round4(self.value()),
            round4(self.absolute()),
            round4(self.relative() * 100.0)
        )
    }
}
