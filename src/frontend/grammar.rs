use super::operator::{InfixOperator, LogicalOperator, PrefixOperator};
use crate::runtime::ClassPtr;

#[derive(Debug, PartialEq, Clone)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Stmt {
    Expression(Expr),
    Print(Vec<Expr>),
    IfElse(Expr, Vec<Stmt>, Option<Vec<Stmt>>),
    Return(Option<Expr>),
    /// Binds the class, already built by the parser, in the current scope.
    ClassDecl(ClassPtr),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    NumberLiteral(i32),
    StringLiteral(String),
    BooleanLiteral(bool),
    NoneLiteral,
    Variable(String),
    Assign(String, Box<Expr>),
    Infix(InfixOperator, Box<Expr>, Box<Expr>),
    Prefix(PrefixOperator, Box<Expr>),
    Logical(LogicalOperator, Box<Expr>, Box<Expr>),
    Get(Box<Expr>, String),
    Set(Box<Expr>, String, Box<Expr>),
    Call(Box<Expr>, Vec<Expr>),
    /// Instantiation of a class the parser resolved by name.
    NewInstance(ClassPtr, Vec<Expr>),
}
