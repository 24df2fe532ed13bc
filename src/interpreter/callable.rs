use std::rc::Rc;

use tracing::trace;

use super::environment::Environment;
use super::runtime::{Interpreter, RuntimeError, RuntimeErrorKind, UnwindCause};
use super::value::Value;
use crate::ast::{FunDecl, Pos};

pub trait Func {
    fn name(&self) -> &str;
    fn arity(&self) -> usize;

    fn is_native(&self) -> bool {
        false
    }

    /// Invoke with arguments whose count the caller has already checked against `arity`.
    /// `call_site` locates errors the callee raises without a position of its own.
    fn call(
        &self,
        interpreter: &mut Interpreter,
        args: Vec<Value>,
        call_site: Pos,
    ) -> Result<Value, RuntimeError>;
}

pub type NativeFn = fn(&mut Interpreter, Vec<Value>) -> Result<Value, RuntimeErrorKind>;

#[derive(Debug, Clone)]
pub struct RustFunc {
    pub name: &'static str,
    pub arity: usize,
    pub call: NativeFn,
}

impl Func for RustFunc {
    fn name(&self) -> &str {
        self.name
    }

    fn arity(&self) -> usize {
        self.arity
    }

    fn is_native(&self) -> bool {
        true
    }

    fn call(
        &self,
        interpreter: &mut Interpreter,
        args: Vec<Value>,
        call_site: Pos,
    ) -> Result<Value, RuntimeError> {
        trace!(name = self.name, "calling native function");
        (self.call)(interpreter, args).map_err(|kind| RuntimeError::new(kind, call_site))
    }
}

#[derive(Clone)]
pub struct LoxFunc {
    pub decl: Rc<FunDecl>,
    pub closure: Environment,
}

impl LoxFunc {
    pub fn new(decl: Rc<FunDecl>, closure: Environment) -> LoxFunc {
        LoxFunc { decl, closure }
    }
}

impl Func for LoxFunc {
    fn name(&self) -> &str {
        &self.decl.name
    }

    fn arity(&self) -> usize {
        self.decl.parameters.len()
    }

    // The new frame hangs off the closure rather than the caller's scope, which is what keeps
    // scoping lexical
    #[tracing::instrument(level = "trace", skip_all, fields(name = %self.decl.name, arity = args.len()))]
    fn call(
        &self,
        interpreter: &mut Interpreter,
        args: Vec<Value>,
        _call_site: Pos,
    ) -> Result<Value, RuntimeError> {
        let env = self.closure.open_scope();
        for (parameter, value) in self.decl.parameters.iter().zip(args) {
            env.define(parameter, value);
        }
        match interpreter.execute_block(&self.decl.body, env) {
            Ok(()) => Ok(Value::Nil),
            Err(UnwindCause::Return(value)) => Ok(value),
            Err(UnwindCause::Error(error)) => Err(error),
        }
    }
}
