//! Terse AST builders for evaluator tests.

use std::rc::Rc;

use ordered_float::OrderedFloat;

use super::output::{Output, SharedBuffer};
use super::runtime::{Interpreter, RuntimeError};
use super::stock_interpreter;
use crate::ast::{
    BinaryOp, Expr, ExprInner, FunDecl, Literal, LogicalOp, Pos, Program, Stmt, StmtInner, UnaryOp,
};

fn expr(inner: ExprInner) -> Expr {
    Expr::new(Pos::line(1), inner)
}

fn stmt(inner: StmtInner) -> Stmt {
    Stmt::new(Pos::line(1), inner)
}

/// Move `expr` to `line`, as if its token had been scanned there.
pub fn at(line: usize, mut expr: Expr) -> Expr {
    expr.pos = Pos::line(line);
    expr
}

pub fn num(n: f64) -> Expr {
    expr(ExprInner::Literal(Literal::Number(OrderedFloat(n))))
}

pub fn string(s: &str) -> Expr {
    expr(ExprInner::Literal(Literal::String(s.to_string())))
}

pub fn boolean(b: bool) -> Expr {
    expr(ExprInner::Literal(Literal::Boolean(b)))
}

pub fn nil() -> Expr {
    expr(ExprInner::Literal(Literal::Nil))
}

pub fn var(name: &str) -> Expr {
    expr(ExprInner::Variable {
        name: name.to_string(),
    })
}

pub fn group(inner: Expr) -> Expr {
    expr(ExprInner::Group(Box::new(inner)))
}

pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
    expr(ExprInner::Unary {
        op,
        expr: Box::new(operand),
    })
}

pub fn bin(left: Expr, op: BinaryOp, right: Expr) -> Expr {
    expr(ExprInner::Binary {
        left: Box::new(left),
        op,
        right: Box::new(right),
    })
}

pub fn logical(left: Expr, op: LogicalOp, right: Expr) -> Expr {
    expr(ExprInner::Logical {
        left: Box::new(left),
        op,
        right: Box::new(right),
    })
}

pub fn assign(target: &str, value: Expr) -> Expr {
    expr(ExprInner::Assignment {
        target: target.to_string(),
        expr: Box::new(value),
    })
}

pub fn call(callee: Expr, arguments: Vec<Expr>) -> Expr {
    expr(ExprInner::Call {
        callee: Box::new(callee),
        arguments,
    })
}

pub fn expr_stmt(e: Expr) -> Stmt {
    stmt(StmtInner::Expr(e))
}

pub fn print(e: Expr) -> Stmt {
    stmt(StmtInner::Print(e))
}

pub fn var_decl(name: &str, init: Option<Expr>) -> Stmt {
    stmt(StmtInner::VarDecl {
        name: name.to_string(),
        init,
    })
}

pub fn block(stmts: Vec<Stmt>) -> Stmt {
    stmt(StmtInner::Block(stmts))
}

pub fn if_(cond: Expr, then: Stmt, or_else: Option<Stmt>) -> Stmt {
    stmt(StmtInner::If {
        expr: cond,
        then: Box::new(then),
        or_else: or_else.map(Box::new),
    })
}

pub fn while_(cond: Expr, body: Stmt) -> Stmt {
    stmt(StmtInner::While {
        expr: cond,
        body: Box::new(body),
    })
}

pub fn fun(name: &str, parameters: &[&str], body: Vec<Stmt>) -> Stmt {
    stmt(StmtInner::FunDecl(Rc::new(FunDecl {
        name: name.to_string(),
        parameters: parameters.iter().map(|p| p.to_string()).collect(),
        body,
    })))
}

pub fn ret(value: Option<Expr>) -> Stmt {
    stmt(StmtInner::Return(value))
}

pub fn program(stmts: Vec<Stmt>) -> Program {
    Program(stmts)
}

pub fn buffered_interpreter() -> (Interpreter, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let interpreter = stock_interpreter().with_output(Output::Buffer(buffer.clone()));
    (interpreter, buffer)
}

/// Run `stmts` in a fresh interpreter, returning the outcome and everything printed.
pub fn run(stmts: Vec<Stmt>) -> (Result<(), RuntimeError>, String) {
    let (mut interpreter, buffer) = buffered_interpreter();
    let result = interpreter.interpret(&program(stmts));
    (result, buffer.contents())
}
