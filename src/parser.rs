use crate::error::EvalErr;
use crate::tokenizer::{Op, Token, Tokenizer};
use std::cmp::Ordering;
use tracing::{debug, trace};

pub fn precedence(op: Op) -> usize {
    // Every operator is left associative, '^' included, so 2^3^2 is (2^3)^2.
    // Brackets sit above everything but are never compared during reduction.
    match op {
        Op::Add | Op::Sub => 0,
        Op::Mul | Op::Div => 1,
        Op::Pow => 2,
        Op::LParen | Op::RParen => 3,
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct RPNExpr(pub Vec<Token>);

pub struct ShuntingParser;

impl ShuntingParser {
    pub fn parse_str(expr: &str) -> Result<RPNExpr, EvalErr> {
        Self::parse(&mut Tokenizer::new(expr.chars()))
    }

    pub fn parse(lex: &mut impl Iterator<Item = Token>) -> Result<RPNExpr, EvalErr> {
        let mut out = Vec::new();
        let mut stack = Vec::<Op>::new();

        for token in lex {
            match token {
                Token::Number(_) | Token::Variable(_) => out.push(token),
                Token::Operator(Op::LParen) => stack.push(Op::LParen),
                Token::Operator(Op::RParen) => loop {
                    match stack.pop() {
                        Some(Op::LParen) => break, // matched, never emitted
                        Some(op) => out.push(Token::Operator(op)),
                        None => return Err(EvalErr::MismatchedBrackets),
                    }
                },
                Token::Operator(op) => {
                    while let Some(&top) = stack.last() {
                        if top == Op::LParen {
                            break;
                        }
                        match precedence(top).cmp(&precedence(op)) {
                            Ordering::Less => break,
                            Ordering::Equal | Ordering::Greater => {
                                trace!("reduce {:?} before {:?}", top, op);
                                out.push(Token::Operator(top));
                                stack.pop();
                            }
                        }
                    }
                    stack.push(op);
                }
            }
        }
        while let Some(top) = stack.pop() {
            match top {
                Op::LParen => return Err(EvalErr::MismatchedBrackets),
                op => out.push(Token::Operator(op)),
            }
        }
        let rpn = RPNExpr(out);
        debug!("postfix: {}", rpn);
        Ok(rpn)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::EvalErr;
    use crate::parser::{precedence, RPNExpr, ShuntingParser};
    use crate::tokenizer::{tokenize, Op, Token};

    fn op(c: char) -> Token {
        Token::Operator(Op::from_char(c).unwrap())
    }

    #[test]
    fn test_parse1() {
        let rpn = ShuntingParser::parse_str("(x^2+y^2)/(2*y)").unwrap();
        let expect = vec![
            Token::Variable('x'),
            Token::Number(2.0),
            op('^'),
            Token::Variable('y'),
            Token::Number(2.0),
            op('^'),
            op('+'),
            Token::Number(2.0),
            Token::Variable('y'),
            op('*'),
            op('/'),
        ];
        assert_eq!(rpn, RPNExpr(expect));
    }

    #[test]
    fn test_parse2() {
        let rpn = ShuntingParser::parse_str("3+4*2/(1-5)^2").unwrap();
        let expect = vec![
            Token::Number(3.0),
            Token::Number(4.0),
            Token::Number(2.0),
            op('*'),
            Token::Number(1.0),
            Token::Number(5.0),
            op('-'),
            Token::Number(2.0),
            op('^'),
            op('/'),
            op('+'),
        ];
        assert_eq!(rpn, RPNExpr(expect));
    }

    #[test]
    fn power_is_left_associative() {
        let rpn = ShuntingParser::parse_str("2^3^2").unwrap();
        let expect = vec![
            Token::Number(2.0),
            Token::Number(3.0),
            op('^'),
            Token::Number(2.0),
            op('^'),
        ];
        assert_eq!(rpn, RPNExpr(expect));
    }

    #[test]
    fn parse_from_tokens() {
        let tokens = tokenize("a-b-c");
        let rpn = ShuntingParser::parse(&mut tokens.into_iter()).unwrap();
        let expect = vec![
            Token::Variable('a'),
            Token::Variable('b'),
            op('-'),
            Token::Variable('c'),
            op('-'),
        ];
        assert_eq!(rpn, RPNExpr(expect));
    }

    #[test]
    fn bad_parse() {
        let rpn = ShuntingParser::parse_str("(1+2");
        assert_eq!(rpn, Err(EvalErr::MismatchedBrackets));

        let rpn = ShuntingParser::parse_str("1+2)");
        assert_eq!(rpn, Err(EvalErr::MismatchedBrackets));

        let rpn = ShuntingParser::parse_str(")(");
        assert_eq!(rpn, Err(EvalErr::MismatchedBrackets));
    }

    #[test]
    fn leading_minus_still_parses() {
        let rpn = ShuntingParser::parse_str("-x").unwrap();
        assert_eq!(rpn, RPNExpr(vec![Token::Variable('x'), op('-')]));
    }

    #[test]
    fn precedence_table() {
        assert_eq!(precedence(Op::Add), precedence(Op::Sub));
        assert_eq!(precedence(Op::Mul), precedence(Op::Div));
        assert!(precedence(Op::Add) < precedence(Op::Mul));
        assert!(precedence(Op::Mul) < precedence(Op::Pow));
        assert_eq!(precedence(Op::LParen), 3);
    }
}
