//! Evaluate arithmetic expressions over measured values, propagating each
//! variable's uncertainty through the result.
//!
//! ```
//! use std::collections::HashMap;
//!
//! let mut bindings = HashMap::new();
//! bindings.insert('x', (1.0, 0.1));
//! bindings.insert('y', (2.0, 0.2));
//! let q = errprop::evaluate("x+y", &bindings).unwrap();
//! assert!((q.value() - 3.0).abs() < 1e-12);
//! assert!((q.absolute() - 0.05f64.sqrt()).abs() < 1e-12);
//! ```
mod error;
mod parser;
mod quantity;
mod rpneval;
mod rpnprint;
mod scanner;
mod tokenizer;

pub use crate::error::EvalErr;
pub use crate::parser::{precedence, RPNExpr, ShuntingParser};
pub use crate::quantity::{Operand, Quantity};
pub use crate::rpneval::{eval_with, ErrorContext};
pub use crate::tokenizer::{tokenize, Op, Token, Tokenizer};

use std::collections::HashMap;

/// Tokenize, convert to postfix and evaluate `expression` in one go.
pub fn evaluate(
    expression: &str,
    bindings: &HashMap<char, (f64, f64)>,
) -> Result<Quantity, EvalErr> {
    let rpn = ShuntingParser::parse_str(expression)?;
    eval_with(bindings, &rpn)
}
