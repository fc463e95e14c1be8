mod constants;
mod cursor;
mod errors;
mod grammar;
mod lexer;
mod operator;
mod parser;
mod token;

pub use errors::{LexerError, LexerResult, ParserError, ParserResult};
pub use grammar::{Expr, Program, Stmt};
pub use lexer::Lexer;
pub use operator::{InfixOperator, LogicalOperator, PrefixOperator};
pub use parser::{parse_program, Parser};
pub use token::Token;

pub use constants::{ADD_METHOD, EQ_METHOD, INIT_METHOD, LT_METHOD, SELF_STR, STR_METHOD};
