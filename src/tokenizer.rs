use crate::scanner::Scanner;
use tracing::trace;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    LParen,
    RParen,
}

impl Op {
    pub fn from_char(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Add),
            '-' => Some(Op::Sub),
            '*' => Some(Op::Mul),
            '/' => Some(Op::Div),
            '^' => Some(Op::Pow),
            '(' => Some(Op::LParen),
            ')' => Some(Op::RParen),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
            Op::Pow => '^',
            Op::LParen => '(',
            Op::RParen => ')',
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Token {
    Operator(Op),
    Variable(char),
    Number(f64),
}

type Stripped<I> = std::iter::Filter<I, fn(&char) -> bool>;

fn not_whitespace(c: &char) -> bool {
    !c.is_whitespace()
}

/// Splits an expression into operators, single-letter variables and
/// unsigned integer literals. Whitespace is dropped before scanning so
/// `1 2` reads as the literal `12`.
pub struct Tokenizer<I: Iterator<Item = char>> {
    src: Scanner<Stripped<I>>,
}

impl<I: Iterator<Item = char>> Tokenizer<I> {
    pub fn new(source: I) -> Self {
        let stripped = source.filter(not_whitespace as fn(&char) -> bool);
        Tokenizer {
            src: Scanner::new(stripped),
        }
    }

    fn get_token(&mut self) -> Option<Token> {
        if let Some(digits) = self.src.scan_digits() {
            // [0-9]+ always parses; a literal too long for f64 overflows to inf
            let num = digits.parse::<f64>().unwrap_or(f64::INFINITY);
            Some(Token::Number(num))
        } else if let Some(op) = self.src.scan_operator() {
            Op::from_char(op).map(Token::Operator)
        } else {
            self.src.scan_variable().map(Token::Variable)
        }
    }
}

impl<I: Iterator<Item = char>> Iterator for Tokenizer<I> {
    type Item = Token;
    fn next(&mut self) -> Option<Self::Item> {
        let token = self.get_token();
        if let Some(ref t) = token {
            trace!("token {:?}", t);
        }
        token
    }
}

pub fn tokenize(text: &str) -> Vec<Token> {
    Tokenizer::new(text.chars()).collect()
}
