//! Tree-walking evaluator for Lox programs.
//!
//! The host parses source into an [`ast::Program`] and hands it to an
//! [`Interpreter`]; this crate executes it against a chain of lexical scopes.

pub mod ast;
pub mod config;
pub mod interpreter;
pub mod reporter;
mod stack;

pub use config::{init_logging, Config, StackConfig};
pub use interpreter::{stock_interpreter, Interpreter, RuntimeError, RuntimeErrorKind, Value};
