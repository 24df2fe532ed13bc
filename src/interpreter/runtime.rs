use std::{
    mem,
    ops::{Add, Div, Mul, Neg, Sub},
    rc::Rc,
};

use thiserror::Error;
use tracing::{debug, trace};

use super::callable::{Func, LoxFunc};
use super::environment::Environment;
use super::output::Output;
use super::value::Value;
use crate::ast::{BinaryOp, Expr, ExprInner, LogicalOp, Pos, Program, Stmt, StmtInner, UnaryOp};
use crate::config::StackConfig;
use crate::reporter::Reporter;
use crate::stack::ensure_sufficient_stack;

#[derive(Clone, Error, Debug, PartialEq)]
#[error("{kind}\n[line {}]", .pos.line)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub pos: Pos,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, pos: Pos) -> RuntimeError {
        RuntimeError { kind, pos }
    }

    pub fn line(&self) -> usize {
        self.pos.line
    }
}

#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    #[error("Operand must be a number.")]
    OperandNotNumber,
    #[error("Operands must be numbers.")]
    OperandsNotNumbers,
    #[error("Operands must be two numbers or two strings.")]
    InvalidAddOperands,
    #[error("Can only call functions and classes.")]
    NotCallable,
    #[error("Undefined variable '{0}'.")]
    UndefinedVariable(String),
    #[error("Expected {expected} arguments but got {got}.")]
    ArityMismatch { expected: usize, got: usize },
    #[error("{0}")]
    Native(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    TypeError,
    UndefinedVariable,
    ArityError,
    Native,
}

impl RuntimeErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RuntimeErrorKind::OperandNotNumber
            | RuntimeErrorKind::OperandsNotNumbers
            | RuntimeErrorKind::InvalidAddOperands
            | RuntimeErrorKind::NotCallable => ErrorCategory::TypeError,
            RuntimeErrorKind::UndefinedVariable(_) => ErrorCategory::UndefinedVariable,
            RuntimeErrorKind::ArityMismatch { .. } => ErrorCategory::ArityError,
            RuntimeErrorKind::Native(_) => ErrorCategory::Native,
        }
    }
}

/// Why statement execution stopped early.
#[derive(Debug)]
pub enum UnwindCause {
    Error(RuntimeError),
    // Only ever caught at a function call boundary
    Return(Value),
}

impl From<RuntimeError> for UnwindCause {
    fn from(error: RuntimeError) -> Self {
        UnwindCause::Error(error)
    }
}

// Starting here are convenience implementations to make the interpret loop easier
impl Add for Value {
    type Output = Result<Value, RuntimeErrorKind>;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
            (Value::String(l), Value::String(r)) => {
                let mut new = String::with_capacity(l.len() + r.len());
                new.push_str(&l);
                new.push_str(&r);
                Ok(Value::String(Rc::from(new)))
            }
            _ => Err(RuntimeErrorKind::InvalidAddOperands),
        }
    }
}

impl Sub for Value {
    type Output = Result<Value, RuntimeErrorKind>;

    fn sub(self, rhs: Self) -> Self::Output {
        let (l, r) = number_operands(&self, &rhs)?;
        Ok(Value::Number(l - r))
    }
}

impl Mul for Value {
    type Output = Result<Value, RuntimeErrorKind>;

    fn mul(self, rhs: Self) -> Self::Output {
        let (l, r) = number_operands(&self, &rhs)?;
        Ok(Value::Number(l * r))
    }
}

impl Div for Value {
    type Output = Result<Value, RuntimeErrorKind>;

    // Division by zero is IEEE: infinity or NaN, never an error
    fn div(self, rhs: Self) -> Self::Output {
        let (l, r) = number_operands(&self, &rhs)?;
        Ok(Value::Number(l / r))
    }
}

impl Neg for Value {
    type Output = Result<Value, RuntimeErrorKind>;

    fn neg(self) -> Self::Output {
        match self {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(RuntimeErrorKind::OperandNotNumber),
        }
    }
}

fn number_operands(lhs: &Value, rhs: &Value) -> Result<(f64, f64), RuntimeErrorKind> {
    match (lhs, rhs) {
        (Value::Number(l), Value::Number(r)) => Ok((*l, *r)),
        _ => Err(RuntimeErrorKind::OperandsNotNumbers),
    }
}

fn compare(lhs: &Value, rhs: &Value, test: fn(&f64, &f64) -> bool) -> Result<Value, RuntimeErrorKind> {
    let (l, r) = number_operands(lhs, rhs)?;
    Ok(Value::Bool(test(&l, &r)))
}

fn binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, RuntimeErrorKind> {
    match op {
        // Equality never type errors, mismatched variants are simply unequal
        BinaryOp::Equal => Ok(Value::Bool(lhs == rhs)),
        BinaryOp::NotEqual => Ok(Value::Bool(lhs != rhs)),
        BinaryOp::LessThan => compare(&lhs, &rhs, f64::lt),
        BinaryOp::LessThanEqual => compare(&lhs, &rhs, f64::le),
        BinaryOp::GreaterThan => compare(&lhs, &rhs, f64::gt),
        BinaryOp::GreaterThanEqual => compare(&lhs, &rhs, f64::ge),
        BinaryOp::Add => lhs + rhs,
        BinaryOp::Subtract => lhs - rhs,
        BinaryOp::Multiply => lhs * rhs,
        BinaryOp::Divide => lhs / rhs,
    }
}

pub struct Interpreter {
    globals: Environment,
    // The scope statements currently execute in, swapped out around blocks and calls
    environment: Environment,
    output: Output,
    stack: StackConfig,
}

impl Interpreter {
    pub fn new_with_global(globals: Environment) -> Interpreter {
        Interpreter {
            environment: globals.clone(),
            globals,
            output: Output::default(),
            stack: StackConfig::default(),
        }
    }

    pub fn with_output(mut self, output: Output) -> Interpreter {
        self.output = output;
        self
    }

    pub fn with_stack(mut self, stack: StackConfig) -> Interpreter {
        self.stack = stack;
        self
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    pub fn current_env(&self) -> &Environment {
        &self.environment
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    /// Run every statement, stopping at the first runtime error.
    pub fn interpret(&mut self, program: &Program) -> Result<(), RuntimeError> {
        debug!(statements = program.0.len(), "interpreting program");
        for stmt in &program.0 {
            match self.execute(stmt) {
                Ok(()) => {}
                Err(UnwindCause::Error(error)) => {
                    debug!(line = error.line(), kind = %error.kind, "runtime error aborted program");
                    return Err(error);
                }
                // A return outside of any function just ends the program
                Err(UnwindCause::Return(_)) => break,
            }
        }
        Ok(())
    }

    /// Like [`Interpreter::interpret`], but hands the error to `reporter`.
    /// Returns whether the whole program ran.
    pub fn interpret_reporting(&mut self, program: &Program, reporter: &mut dyn Reporter) -> bool {
        match self.interpret(program) {
            Ok(()) => true,
            Err(error) => {
                reporter.report(error.pos, &error.kind.to_string());
                false
            }
        }
    }

    /// REPL mode: evaluate one expression and echo its value.
    pub fn interpret_expression(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        debug!(%expr, "interpreting expression");
        let value = self.eval(expr)?;
        self.output.println(&value.to_string());
        Ok(value)
    }

    pub fn execute(&mut self, stmt: &Stmt) -> Result<(), UnwindCause> {
        let stack = self.stack;
        ensure_sufficient_stack(stack, || self.execute_stmt(stmt))
    }

    /// Execute `stmts` with `env` as the active scope, restoring the previous scope on every exit.
    pub fn execute_block(&mut self, stmts: &[Stmt], env: Environment) -> Result<(), UnwindCause> {
        let previous = mem::replace(&mut self.environment, env);
        let result = stmts.iter().try_for_each(|stmt| self.execute(stmt));
        self.environment = previous;
        result
    }

    fn execute_stmt(&mut self, stmt: &Stmt) -> Result<(), UnwindCause> {
        match &stmt.inner {
            StmtInner::Expr(expr) => {
                self.eval(expr)?;
                Ok(())
            }
            StmtInner::Print(expr) => {
                let value = self.eval(expr)?;
                self.output.println(&value.to_string());
                Ok(())
            }
            StmtInner::VarDecl { name, init } => {
                let value = match init {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Nil,
                };
                trace!(name = %name, "define variable");
                self.environment.define(name, value);
                Ok(())
            }
            StmtInner::Block(stmts) => {
                let env = self.environment.open_scope();
                self.execute_block(stmts, env)
            }
            StmtInner::If {
                expr,
                then,
                or_else,
            } => {
                if self.eval(expr)?.is_truthy() {
                    self.execute(then)
                } else if let Some(or_else) = or_else {
                    self.execute(or_else)
                } else {
                    Ok(())
                }
            }
            StmtInner::While { expr, body } => {
                while self.eval(expr)?.is_truthy() {
                    self.execute(body)?;
                }
                Ok(())
            }
            StmtInner::FunDecl(decl) => {
                trace!(name = %decl.name, arity = decl.parameters.len(), "define function");
                let func = LoxFunc::new(Rc::clone(decl), self.environment.clone());
                // Defined in the captured frame itself, so the body can see its own name
                self.environment
                    .define(&decl.name, Value::Callable(Rc::new(func)));
                Ok(())
            }
            StmtInner::Return(expr) => {
                let value = match expr {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Nil,
                };
                Err(UnwindCause::Return(value))
            }
        }
    }

    pub fn eval(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        let stack = self.stack;
        ensure_sufficient_stack(stack, || self.eval_expr(expr))
    }

    fn eval_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        let at = |kind: RuntimeErrorKind| RuntimeError::new(kind, expr.pos);
        match &expr.inner {
            ExprInner::Literal(literal) => Ok(Value::from(literal)),
            ExprInner::Group(inner) => self.eval(inner),
            ExprInner::Unary { op, expr: operand } => {
                let value = self.eval(operand)?;
                match op {
                    UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
                    UnaryOp::Negative => (-value).map_err(at),
                }
            }
            ExprInner::Binary { left, op, right } => {
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                binary(*op, lhs, rhs).map_err(at)
            }
            // The operand itself is the result, not its truthiness i.e. nil or "a" evaluates to "a"
            ExprInner::Logical { left, op, right } => {
                let left_val = self.eval(left)?;
                let short_circuits = match op {
                    LogicalOp::And => !left_val.is_truthy(),
                    LogicalOp::Or => left_val.is_truthy(),
                };
                if short_circuits {
                    Ok(left_val)
                } else {
                    self.eval(right)
                }
            }
            ExprInner::Variable { name } => self.environment.get(name).map_err(at),
            ExprInner::Assignment { target, expr: value_expr } => {
                let value = self.eval(value_expr)?;
                self.environment.assign(target, value.clone()).map_err(at)?;
                Ok(value)
            }
            ExprInner::Call { callee, arguments } => {
                let callee = self.eval(callee)?;
                let args = arguments
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                let callable = callee
                    .to_callable()
                    .ok_or_else(|| at(RuntimeErrorKind::NotCallable))?;
                if args.len() != callable.arity() {
                    return Err(at(RuntimeErrorKind::ArityMismatch {
                        expected: callable.arity(),
                        got: args.len(),
                    }));
                }
                trace!(name = callable.name(), "call");
                callable.call(self, args, expr.pos)
            }
        }
    }
}
