// src/lib.rs

// --- Module Declarations ---
pub mod engine;
pub mod error;
pub mod math;
pub mod operators;
pub mod store;
pub mod token;

// --- Public API Re-exports ---
// The engine, its token type and the program store are all a caller needs.
pub use engine::Engine;
pub use error::StoreError;
pub use store::ProgramStore;
pub use token::{BinaryOp, Token, UnaryOp};
