// src/token.rs

use std::fmt;

/// A unary operator: a display symbol and the pure function it applies.
#[derive(Debug, Clone, Copy)]
pub struct UnaryOp {
    pub symbol: &'static str,
    pub func: fn(f64) -> f64,
}

/// A binary operator. `precedence` decides parenthesization when printing.
#[derive(Debug, Clone, Copy)]
pub struct BinaryOp {
    pub symbol: &'static str,
    pub func: fn(f64, f64) -> f64,
    pub precedence: u8,
}

// Operators are interned by symbol, so two operator values with the same
// symbol are the same operator.
impl PartialEq for UnaryOp {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl PartialEq for BinaryOp {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol && self.precedence == other.precedence
    }
}

/// One entry of the expression stack.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Operand(f64),
    Variable(String),
    UnaryOperator(UnaryOp),
    BinaryOperator(BinaryOp),
}

impl Token {
    /// Precedence seen by an enclosing operator. Only binary operators can
    /// lose a precedence comparison; everything else binds maximally.
    pub fn precedence(&self) -> u8 {
        match self {
            Token::BinaryOperator(op) => op.precedence,
            _ => u8::MAX,
        }
    }

    /// The canonical display string, which is also the persisted form.
    pub fn symbol(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operand(value) => write!(f, "{}", value),
            Token::Variable(name) => write!(f, "{}", name),
            Token::UnaryOperator(op) => write!(f, "{}", op.symbol),
            Token::BinaryOperator(op) => write!(f, "{}", op.symbol),
        }
    }
}
