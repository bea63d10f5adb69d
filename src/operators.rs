// src/operators.rs

use std::collections::HashMap;

use paste::paste;

use crate::math;
use crate::token::{BinaryOp, Token, UnaryOp};

// --- Macro Template System ---

macro_rules! define_operators {
    (
        // Unary operators: (name, symbol, function)
        unary: [$(($u_name:ident, $u_symbol:literal, $u_func:path)),*],
        // Binary operators: (name, symbol, function, precedence)
        binary: [$(($b_name:ident, $b_symbol:literal, $b_func:path, $b_prec:expr)),*]
    ) => {
        paste! {
            // 1. One named definition per UNARY operator.
            $(
                pub const [<$u_name:upper>]: UnaryOp = UnaryOp { symbol: $u_symbol, func: $u_func };
            )*

            // 2. One named definition per BINARY operator.
            $(
                pub const [<$b_name:upper>]: BinaryOp = BinaryOp {
                    symbol: $b_symbol,
                    func: $b_func,
                    precedence: $b_prec,
                };
            )*

            // 3. The read-only symbol table every engine learns its operators from.
            pub static OPERATOR_MAP: phf::Map<&'static str, Token> = phf::phf_map! {
                $( $u_symbol => Token::UnaryOperator([<$u_name:upper>]), )*
                $( $b_symbol => Token::BinaryOperator([<$b_name:upper>]), )*
            };
        }
    };
}

// --- The Registry Definition ---

define_operators! {
    unary: [
        // name,    symbol, function
        (sine,      "sin", math::rpn_sin),
        (cosine,    "cos", math::rpn_cos),
        (sqrt,      "√",   math::rpn_sqrt),
        (negate,    "±",   math::rpn_negate)
    ],
    binary: [
        // name,    symbol, function, precedence
        (multiply,  "×", math::rpn_mul, 2),
        (divide,    "÷", math::rpn_div, 2),
        (add,       "+", math::rpn_add, 1),
        (subtract,  "−", math::rpn_sub, 1)
    ]
}

/// Builds an engine's own operator registry, keyed by display symbol.
pub fn learn_operators() -> HashMap<String, Token> {
    OPERATOR_MAP
        .entries()
        .map(|(symbol, op)| (symbol.to_string(), op.clone()))
        .collect()
}

/// Builds an engine's constant table.
pub fn constants() -> HashMap<String, f64> {
    HashMap::from([("π".to_string(), math::PI)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_contents() {
        let ops = learn_operators();
        assert_eq!(ops.len(), 8);
        assert_eq!(ops["×"], Token::BinaryOperator(MULTIPLY));
        assert_eq!(ops["√"], Token::UnaryOperator(SQRT));
        assert!(!ops.contains_key("-"));
    }

    #[test]
    fn test_precedences() {
        assert_eq!(MULTIPLY.precedence, 2);
        assert_eq!(DIVIDE.precedence, 2);
        assert_eq!(ADD.precedence, 1);
        assert_eq!(SUBTRACT.precedence, 1);
    }

    #[test]
    fn test_negate_is_plus_minus() {
        assert_eq!(NEGATE.symbol, "±");
        assert_eq!((NEGATE.func)(3.5), -3.5);
    }

    #[test]
    fn test_constants() {
        assert_eq!(constants().get("π"), Some(&std::f64::consts::PI));
    }
}
