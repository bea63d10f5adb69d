// src/engine.rs

use std::collections::HashMap;
use std::fmt;

use log::{debug, trace, warn};

use crate::operators::{constants, learn_operators};
use crate::token::{BinaryOp, Token};

/// Placeholder printed where an operator is missing an operand.
const MISSING_OPERAND: &str = "?";

/// The reverse-Polish expression engine.
///
/// Tokens are appended in postfix order and consumed from the tail when
/// evaluating or describing, so several independent clauses can sit on the
/// stack at once (`2+3,√(4)`). Neither `evaluate` nor `description` mutates
/// the stack.
pub struct Engine {
    stack: Vec<Token>,
    known_ops: HashMap<String, Token>,
    variables: HashMap<String, f64>,
    constants: HashMap<String, f64>,
}

impl Engine {
    pub fn new() -> Self {
        Engine {
            stack: Vec::new(),
            known_ops: learn_operators(),
            variables: HashMap::new(),
            constants: constants(),
        }
    }

    // --- Stack construction ---

    pub fn push_operand(&mut self, value: f64) {
        debug!("push operand {}", value);
        self.stack.push(Token::Operand(value));
    }

    /// Pushes a variable reference. The symbol is resolved only when evaluating.
    pub fn push_variable(&mut self, symbol: &str) {
        debug!("push variable {}", symbol);
        self.stack.push(Token::Variable(symbol.to_string()));
    }

    /// Appends the operator named `symbol`. Returns false, leaving the stack
    /// untouched, when no such operator is known.
    pub fn perform_operation(&mut self, symbol: &str) -> bool {
        match self.known_ops.get(symbol) {
            Some(op) => {
                debug!("push operator {}", symbol);
                self.stack.push(op.clone());
                true
            }
            None => {
                warn!("unknown operator '{}'", symbol);
                false
            }
        }
    }

    pub fn undo(&mut self) {
        if let Some(token) = self.stack.pop() {
            debug!("undo {}", token);
        }
    }

    pub fn reset(&mut self) {
        debug!("reset ({} tokens dropped)", self.stack.len());
        self.stack.clear();
    }

    // --- Variables ---

    pub fn set_variable(&mut self, symbol: &str, value: f64) {
        debug!("set {} = {}", symbol, value);
        self.variables.insert(symbol.to_string(), value);
    }

    /// Constants shadow variables of the same name.
    pub fn get_variable(&self, symbol: &str) -> Option<f64> {
        self.constants
            .get(symbol)
            .or_else(|| self.variables.get(symbol))
            .copied()
    }

    pub fn clear_variables(&mut self) {
        self.variables.clear();
    }

    // --- Inspection ---

    pub fn tokens(&self) -> &[Token] {
        &self.stack
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn knows_operation(&self, symbol: &str) -> bool {
        self.known_ops.contains_key(symbol)
    }

    /// Every operator symbol this engine understands, sorted.
    pub fn operator_symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.known_ops.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    // --- Evaluation ---

    /// Value of the most recently pushed clause, or `None` when it is
    /// incomplete or refers to an unset variable.
    pub fn evaluate(&self) -> Option<f64> {
        let (result, _) = self.evaluate_tail(&self.stack);
        trace!("evaluate over {} tokens -> {:?}", self.stack.len(), result);
        result
    }

    /// Consumes one sub-expression from the end of `tokens`, returning its
    /// value and the tokens left in front of it. Operators waiting for their
    /// operands are kept on an explicit work stack, so depth is bounded only
    /// by memory.
    fn evaluate_tail<'a>(&self, tokens: &'a [Token]) -> (Option<f64>, &'a [Token]) {
        let mut pending: Vec<PendingValue> = Vec::new();
        let mut rest = tokens;
        loop {
            // Descend until a leaf (or an empty remainder) yields a value.
            let mut value = match rest.split_last() {
                None => None,
                Some((token, before)) => {
                    rest = before;
                    match token {
                        Token::Operand(value) => Some(*value),
                        Token::Variable(symbol) => self.get_variable(symbol),
                        Token::UnaryOperator(op) => {
                            pending.push(PendingValue::Unary(op.func));
                            continue;
                        }
                        Token::BinaryOperator(op) => {
                            pending.push(PendingValue::Right(op.func));
                            continue;
                        }
                    }
                }
            };

            // Climb back up, applying every operator whose operands are in.
            loop {
                match pending.pop() {
                    None => return (value, rest),
                    Some(PendingValue::Unary(func)) => value = value.map(func),
                    Some(PendingValue::Right(func)) => {
                        pending.push(PendingValue::Left(func, value));
                        break;
                    }
                    Some(PendingValue::Left(func, right)) => {
                        value = match (value, right) {
                            (Some(left), Some(right)) => Some(func(left, right)),
                            _ => None,
                        };
                    }
                }
            }
        }
    }

    // --- Description ---

    /// Infix rendering of the whole stack, one comma-separated clause per
    /// independent sub-expression, oldest first.
    pub fn description(&self) -> String {
        let mut clauses = Vec::new();
        let mut remaining: &[Token] = &self.stack;
        while !remaining.is_empty() {
            let (clause, rest) = describe_tail(remaining, 0);
            clauses.push(clause);
            remaining = rest;
        }
        clauses.reverse();
        clauses.join(",")
    }

    // --- Serialization view ---

    /// The stack as display strings, in stack order.
    pub fn program(&self) -> Vec<String> {
        self.stack.iter().map(Token::symbol).collect()
    }

    /// Clears the stack and replays `program`. Each entry is tried as an
    /// operator symbol, then as a numeral, and otherwise becomes a variable.
    /// A variable spelled like an operator therefore comes back as that operator.
    pub fn set_program<S: AsRef<str>>(&mut self, program: &[S]) {
        self.stack.clear();
        for entry in program {
            let entry = entry.as_ref();
            if self.knows_operation(entry) {
                self.perform_operation(entry);
            } else if let Ok(value) = entry.parse::<f64>() {
                self.push_operand(value);
            } else {
                self.push_variable(entry);
            }
        }
    }
}

// Operators still collecting operands while evaluating.
enum PendingValue {
    Unary(fn(f64) -> f64),
    Right(fn(f64, f64) -> f64),
    Left(fn(f64, f64) -> f64, Option<f64>),
}

// Operators still collecting operand text while describing. Binary frames
// carry the precedence of the context they will be placed in.
enum PendingText {
    Unary(&'static str),
    Right(BinaryOp, u8),
    Left(BinaryOp, u8, String),
}

/// Describes one sub-expression from the end of `tokens`. `context` is the
/// precedence of the operator this text becomes an operand of.
fn describe_tail(tokens: &[Token], context: u8) -> (String, &[Token]) {
    let mut pending: Vec<PendingText> = Vec::new();
    let mut rest = tokens;
    let mut context = context;
    loop {
        let mut text = match rest.split_last() {
            None => MISSING_OPERAND.to_string(),
            Some((token, before)) => {
                rest = before;
                match token {
                    Token::Operand(_) | Token::Variable(_) => token.symbol(),
                    Token::UnaryOperator(op) => {
                        pending.push(PendingText::Unary(op.symbol));
                        context = 0;
                        continue;
                    }
                    Token::BinaryOperator(op) => {
                        pending.push(PendingText::Right(*op, context));
                        context = op.precedence;
                        continue;
                    }
                }
            }
        };

        loop {
            match pending.pop() {
                None => return (text, rest),
                Some(PendingText::Unary(symbol)) => text = format!("{}({})", symbol, text),
                Some(PendingText::Right(op, outer)) => {
                    pending.push(PendingText::Left(op, outer, text));
                    context = op.precedence;
                    break;
                }
                Some(PendingText::Left(op, outer, right)) => {
                    let joined = format!("{}{}{}", text, op.symbol, right);
                    text = if outer > op.precedence {
                        format!("({})", joined)
                    } else {
                        joined
                    };
                }
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_operands_are_described_as_placeholders() {
        let mut engine = Engine::new();
        engine.perform_operation("+");
        assert_eq!(engine.description(), "?+?");

        engine.reset();
        engine.push_operand(3.0);
        engine.perform_operation("−");
        assert_eq!(engine.description(), "?−3");
        assert_eq!(engine.evaluate(), None);
    }

    #[test]
    fn test_unary_operand_is_never_parenthesized_twice() {
        let mut engine = Engine::new();
        engine.push_operand(1.0);
        engine.push_operand(2.0);
        engine.perform_operation("+");
        engine.perform_operation("√");
        assert_eq!(engine.description(), "√(1+2)");
    }

    #[test]
    fn test_evaluate_leaves_stack_untouched() {
        let mut engine = Engine::new();
        engine.push_operand(2.0);
        engine.perform_operation("±");
        let before = engine.tokens().to_vec();
        assert_eq!(engine.evaluate(), Some(-2.0));
        assert_eq!(engine.tokens(), &before[..]);
    }

    #[test]
    fn test_clauses_keep_push_order() {
        let mut engine = Engine::new();
        for value in 1..=4 {
            engine.push_operand(value as f64);
        }
        engine.perform_operation("+");
        assert_eq!(engine.description(), "1,2,3+4");
    }

    #[test]
    fn test_deep_stack_evaluates_without_recursion() {
        let mut engine = Engine::new();
        engine.push_operand(1.0);
        for _ in 0..200_000 {
            engine.perform_operation("±");
        }
        assert_eq!(engine.evaluate(), Some(1.0));
        engine.perform_operation("±");
        assert_eq!(engine.evaluate(), Some(-1.0));
    }

    #[test]
    fn test_deep_stack_describes_without_recursion() {
        let mut engine = Engine::new();
        engine.push_operand(1.0);
        for _ in 0..20_000 {
            engine.push_operand(2.0);
            engine.perform_operation("+");
        }
        let description = engine.description();
        assert!(description.starts_with("1+2+2"));
        assert_eq!(description.matches('+').count(), 20_000);
        assert!(!description.contains('('));
        assert_eq!(engine.evaluate(), Some(20_001.0));
    }

    #[test]
    fn test_nested_binary_context() {
        let mut engine = Engine::new();
        engine.set_program(&["1", "2", "+", "3", "4", "+", "×", "5", "−", "√"]);
        assert_eq!(engine.description(), "√((1+2)×(3+4)−5)");
        assert_eq!(engine.evaluate(), Some(4.0));
    }

    #[test]
    fn test_operator_symbols_sorted() {
        let engine = Engine::new();
        let symbols = engine.operator_symbols();
        assert_eq!(symbols.len(), 8);
        let mut sorted = symbols.clone();
        sorted.sort_unstable();
        assert_eq!(symbols, sorted);
    }
}
