use super::object::Object;
use crate::frontend::{InfixOperator, PrefixOperator};

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum RuntimeError {
    /// Not a user-visible error: carries a `return` value up to the
    /// enclosing method call.
    Return(Object),
    UndefinedVariable(String),
    MissingField(String, String),
    NoSuchMethod(String, String),
    NotComparable(&'static str),
    NotCallable(Object),
    NotAnInstance(Object),
    IllegalBinaryOp(InfixOperator, Object, Object),
    IllegalUnaryOp(PrefixOperator, Object),
    DivideByZero,
    Io(io::Error),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RuntimeError::Return(_) => {
                write!(f, "return outside of a method")
            }
            RuntimeError::UndefinedVariable(name) => {
                write!(f, "Undefined variable '{}'", name)
            }
            RuntimeError::MissingField(class, field) => {
                write!(f, "Instance of {} has no field '{}'", class, field)
            }
            RuntimeError::NoSuchMethod(class, method) => {
                write!(f, "There is no method {} in the class {}", method, class)
            }
            RuntimeError::NotComparable(kind) => {
                write!(f, "Cannot compare objects for {}", kind)
            }
            RuntimeError::NotCallable(obj) => {
                write!(f, "{} is not callable", obj)
            }
            RuntimeError::NotAnInstance(obj) => {
                write!(f, "{} is not a class instance", obj)
            }
            RuntimeError::IllegalBinaryOp(op, lhs, rhs) => {
                write!(f, "Cannot apply '{}' to {} and {}", op.symbol(), lhs, rhs)
            }
            RuntimeError::IllegalUnaryOp(op, value) => {
                write!(f, "Cannot apply '{}' to {}", op.symbol(), value)
            }
            RuntimeError::DivideByZero => {
                write!(f, "Division by zero")
            }
            RuntimeError::Io(e) => {
                write!(f, "Output error: {}", e)
            }
        }
    }
}

impl From<io::Error> for RuntimeError {
    fn from(e: io::Error) -> Self {
        RuntimeError::Io(e)
    }
}
