//! Stack growth for the recursive evaluator.
//!
//! Deeply nested expressions and deep user recursion would otherwise overflow
//! the native stack, so every recursive step checks the remaining space first.

use crate::config::StackConfig;

/// Run `f`, first growing the stack by `config.growth` bytes if less than
/// `config.red_zone` bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(config: StackConfig, f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(config.red_zone, config.growth, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(_config: StackConfig, f: impl FnOnce() -> R) -> R {
    f()
}
