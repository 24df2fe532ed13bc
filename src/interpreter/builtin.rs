use std::rc::Rc;
use std::time::SystemTime;

use super::callable::RustFunc;
use super::environment::Environment;
use super::runtime::{Interpreter, RuntimeErrorKind};
use super::value::Value;

fn clock(_interpreter: &mut Interpreter, _args: Vec<Value>) -> Result<Value, RuntimeErrorKind> {
    let duration = SystemTime::UNIX_EPOCH
        .elapsed()
        .map_err(|e| RuntimeErrorKind::Native(format!("clock: {}", e)))?;
    Ok(Value::Number(duration.as_secs_f64()))
}

const BUILTINS: &[RustFunc] = &[RustFunc {
    name: "clock",
    arity: 0,
    call: clock,
}];

pub fn populate_builtin(global_env: &Environment) {
    for builtin in BUILTINS {
        global_env.define(builtin.name, Value::Callable(Rc::new(builtin.clone())));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::interpreter::callable::Func;

    #[test]
    fn clock_is_installed() {
        let env = Environment::new_global();
        populate_builtin(&env);
        let clock = env.get("clock").unwrap().to_callable().unwrap();
        assert_eq!("clock", clock.name());
        assert_eq!(0, clock.arity());
        assert!(clock.is_native());
    }

    #[test]
    fn clock_returns_seconds() {
        let mut interpreter = crate::interpreter::stock_interpreter();
        match clock(&mut interpreter, vec![]) {
            Ok(Value::Number(secs)) => assert!(secs > 1_000_000_000f64),
            other => panic!("unexpected clock result {:?}", other),
        }
    }
}
