use std::fmt::{self, Display, Formatter};
use std::rc::Rc;

use ordered_float::OrderedFloat;

/// Source position of the token a node was built from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset_in_line: usize,
    pub line: usize,
}

impl Pos {
    pub fn line(line: usize) -> Pos {
        Pos {
            line,
            offset_in_line: 0,
        }
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.offset_in_line)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program(pub Vec<Stmt>);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunDecl {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stmt {
    // Its possible defining this pos across all statements is wasteful of space
    pub pos: Pos,
    pub inner: StmtInner,
}

impl Stmt {
    pub fn new(pos: Pos, inner: StmtInner) -> Stmt {
        Stmt { pos, inner }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StmtInner {
    Expr(Expr),
    Print(Expr),
    VarDecl {
        name: String,
        init: Option<Expr>,
    },
    Block(Vec<Stmt>),
    If {
        expr: Expr,
        then: Box<Stmt>,
        or_else: Option<Box<Stmt>>,
    },
    While {
        expr: Expr,
        body: Box<Stmt>,
    },
    // Shared so that every closure created from the declaration points at the same body
    FunDecl(Rc<FunDecl>),
    Return(Option<Expr>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    // Its possible defining this pos across all expr types is wasteful of space
    pub pos: Pos,
    pub inner: ExprInner,
}

impl Expr {
    pub fn new(pos: Pos, inner: ExprInner) -> Expr {
        Expr { pos, inner }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprInner {
    Literal(Literal),
    Group(Box<Expr>),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    Logical {
        left: Box<Expr>,
        op: LogicalOp,
        right: Box<Expr>,
    },
    Variable {
        name: String,
    },
    Assignment {
        target: String,
        expr: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.inner {
            ExprInner::Literal(lit) => write!(f, "{}", lit),
            ExprInner::Group(expr) => write!(f, "(group {})", expr),
            ExprInner::Unary { op, expr } => write!(f, "({} {})", op, expr),
            ExprInner::Binary { left, op, right } => write!(f, "({} {} {})", op, left, right),
            ExprInner::Logical { left, op, right } => write!(f, "({} {} {})", op, left, right),
            ExprInner::Variable { name } => write!(f, "(ident {})", name),
            ExprInner::Assignment { target, expr } => write!(f, "(= {} {})", target, expr),
            ExprInner::Call { callee, arguments } => {
                write!(f, "(call {}", callee)?;
                for arg in arguments {
                    write!(f, " {}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.inner {
            StmtInner::Expr(expr) => write!(f, "(; {})", expr),
            StmtInner::Print(expr) => write!(f, "(print {})", expr),
            StmtInner::VarDecl { name, init: None } => write!(f, "(var {})", name),
            StmtInner::VarDecl {
                name,
                init: Some(init),
            } => write!(f, "(var {} {})", name, init),
            StmtInner::Block(stmts) => {
                f.write_str("(block")?;
                for stmt in stmts {
                    write!(f, " {}", stmt)?;
                }
                f.write_str(")")
            }
            StmtInner::If {
                expr,
                then,
                or_else: None,
            } => write!(f, "(if {} {})", expr, then),
            StmtInner::If {
                expr,
                then,
                or_else: Some(or_else),
            } => write!(f, "(if-else {} {} {})", expr, then, or_else),
            StmtInner::While { expr, body } => write!(f, "(while {} {})", expr, body),
            StmtInner::FunDecl(decl) => {
                write!(f, "(fun {} ({})", decl.name, decl.parameters.join(" "))?;
                for stmt in &decl.body {
                    write!(f, " {}", stmt)?;
                }
                f.write_str(")")
            }
            StmtInner::Return(None) => f.write_str("(return)"),
            StmtInner::Return(Some(expr)) => write!(f, "(return {})", expr),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Equal,
    NotEqual,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOp::Equal => f.write_str("=="),
            BinaryOp::NotEqual => f.write_str("!="),
            BinaryOp::LessThan => f.write_str("<"),
            BinaryOp::LessThanEqual => f.write_str("<="),
            BinaryOp::GreaterThan => f.write_str(">"),
            BinaryOp::GreaterThanEqual => f.write_str(">="),
            BinaryOp::Add => f.write_str("+"),
            BinaryOp::Subtract => f.write_str("-"),
            BinaryOp::Multiply => f.write_str("*"),
            BinaryOp::Divide => f.write_str("/"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Negative,
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Not => f.write_str("!"),
            UnaryOp::Negative => f.write_str("-"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl Display for LogicalOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => f.write_str("and"),
            LogicalOp::Or => f.write_str("or"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Number(OrderedFloat<f64>),
    String(String),
    Boolean(bool),
    Nil,
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(OrderedFloat(dbl)) => write!(f, "{}", dbl),
            Literal::String(s) => write!(f, "\"{}\"", s),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Nil => f.write_str("nil"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn num(n: f64) -> Box<Expr> {
        Box::new(Expr::new(
            Pos::line(1),
            ExprInner::Literal(Literal::Number(OrderedFloat(n))),
        ))
    }

    #[test]
    fn test_pretty_print() {
        // (* (- 123) (group 45.67))
        let expr = Expr::new(
            Pos::line(1),
            ExprInner::Binary {
                left: Box::new(Expr::new(
                    Pos::line(1),
                    ExprInner::Unary {
                        op: UnaryOp::Negative,
                        expr: num(123f64),
                    },
                )),
                op: BinaryOp::Multiply,
                right: Box::new(Expr::new(Pos::line(1), ExprInner::Group(num(45.67f64)))),
            },
        );

        assert_eq!("(* (- 123) (group 45.67))", expr.to_string());
    }

    #[test]
    fn test_pretty_print_call() {
        let expr = Expr::new(
            Pos::line(3),
            ExprInner::Call {
                callee: Box::new(Expr::new(
                    Pos::line(3),
                    ExprInner::Variable {
                        name: "add".to_string(),
                    },
                )),
                arguments: vec![*num(1f64), *num(2f64)],
            },
        );
        assert_eq!("(call (ident add) 1 2)", expr.to_string());
    }

    #[test]
    fn test_pretty_print_fun_decl() {
        let decl = FunDecl {
            name: "id".to_string(),
            parameters: vec!["a".to_string()],
            body: vec![Stmt::new(
                Pos::line(2),
                StmtInner::Return(Some(Expr::new(
                    Pos::line(2),
                    ExprInner::Variable {
                        name: "a".to_string(),
                    },
                ))),
            )],
        };
        let stmt = Stmt::new(Pos::line(1), StmtInner::FunDecl(Rc::new(decl)));
        assert_eq!("(fun id (a) (return (ident a)))", stmt.to_string());
    }

    #[test]
    fn test_pos_display() {
        let pos = Pos {
            line: 4,
            offset_in_line: 7,
        };
        assert_eq!("4:7", pos.to_string());
    }
}
