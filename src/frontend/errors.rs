use super::token::Token;

use std::fmt;

#[derive(Debug)]
pub enum LexerError {
    UnterminatedString(usize),
    BadNumber(usize, String),
    BadIndent(usize, usize),
    TabInIndent(usize),
}

#[derive(Debug)]
pub enum ParserError {
    Lexer(LexerError),
    ExpectedToken(Token, Token),
    ExpectedExpression(Token),
    ExpectedIdentifier(Token),
    ExpectedLValue,
    ExpectedSelfParam(String),
    UndefinedClass(String),
}

pub type LexerResult<T> = Result<T, LexerError>;
pub type ParserResult<T> = Result<T, ParserError>;

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LexerError::UnterminatedString(line) => {
                write!(f, "Unterminated string literal on line {}.", line)
            }
            LexerError::BadNumber(line, text) => {
                write!(f, "Unparsable number `{}` on line {}.", text, line)
            }
            LexerError::BadIndent(line, spaces) => {
                write!(
                    f,
                    "Indentation of {} spaces on line {} jumps more than one level.",
                    spaces, line
                )
            }
            LexerError::TabInIndent(line) => {
                write!(f, "Tab in leading whitespace on line {}.", line)
            }
        }
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParserError::Lexer(e) => write!(f, "{}", e),
            ParserError::ExpectedToken(expected, got) => {
                write!(f, "Expected {}, but instead got {}.", expected, got)
            }
            ParserError::ExpectedExpression(got) => {
                write!(f, "Expected expression, but instead got {}.", got)
            }
            ParserError::ExpectedIdentifier(got) => {
                write!(f, "Expected identifier, but instead got {}.", got)
            }
            ParserError::ExpectedLValue => {
                write!(f, "Expected variable or field on the left of `=`.")
            }
            ParserError::ExpectedSelfParam(method) => {
                write!(f, "First parameter of method `{}` must be `self`.", method)
            }
            ParserError::UndefinedClass(name) => {
                write!(f, "Unknown class `{}`.", name)
            }
        }
    }
}

impl From<LexerError> for ParserError {
    fn from(e: LexerError) -> Self {
        ParserError::Lexer(e)
    }
}
