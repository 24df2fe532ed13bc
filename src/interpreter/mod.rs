mod builtin;
mod callable;
mod environment;
mod output;
mod runtime;
mod value;

#[cfg(test)]
mod test_support;

pub use builtin::populate_builtin;
pub use callable::{Func, LoxFunc, NativeFn, RustFunc};
pub use environment::Environment;
pub use output::{Output, SharedBuffer};
pub use runtime::{ErrorCategory, Interpreter, RuntimeError, RuntimeErrorKind, UnwindCause};
pub use value::Value;

use crate::config::Config;

impl Interpreter {
    pub fn from_config(config: &Config) -> Interpreter {
        let global_env = Environment::new_global();
        populate_builtin(&global_env);
        Interpreter::new_with_global(global_env).with_stack(config.stack)
    }
}

pub fn stock_interpreter() -> Interpreter {
    Interpreter::from_config(&Config::default())
}
