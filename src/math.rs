// src/math.rs

// This module houses the stateless, pure functions behind the calculator's
// operators. Domain errors are left to IEEE-754: they come back as NaN or inf.

// Mathematical constants
pub const PI: f64 = std::f64::consts::PI;

// Unary
pub fn rpn_sin(x: f64) -> f64 { x.sin() }
pub fn rpn_cos(x: f64) -> f64 { x.cos() }
pub fn rpn_sqrt(x: f64) -> f64 { x.sqrt() }
pub fn rpn_negate(x: f64) -> f64 { -x }

// Binary
pub fn rpn_add(a: f64, b: f64) -> f64 { a + b }
pub fn rpn_sub(a: f64, b: f64) -> f64 { a - b }
pub fn rpn_mul(a: f64, b: f64) -> f64 { a * b }
pub fn rpn_div(a: f64, b: f64) -> f64 { a / b }
