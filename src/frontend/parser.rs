use super::constants::SELF_STR;
use super::errors::{ParserError, ParserResult};
use super::grammar::{Expr, Program, Stmt};
use super::lexer::Lexer;
use super::operator::{InfixOperator, LogicalOperator, Precedence, PrefixOperator};
use super::token::Token;
use crate::runtime::{ClassPtr, Method};

use std::collections::HashMap;

/// Parses a whole program from the lexer's token stream.
pub fn parse_program(lexer: Lexer) -> ParserResult<Program> {
    Parser::new(lexer).parse()
}

pub struct Parser<'src> {
    lexer: Lexer<'src>,
    /// Classes declared so far, by name. Instantiations are resolved against
    /// this table while parsing, so method bodies can build instances of
    /// classes the surrounding program declares, including their own.
    classes: HashMap<String, ClassPtr>,
}

impl<'src> Parser<'src> {
    pub fn new(lexer: Lexer<'src>) -> Self {
        Parser {
            lexer,
            classes: HashMap::new(),
        }
    }

    /// Returns current token.
    fn peek_token(&self) -> &Token {
        self.lexer.current_token()
    }

    /// Advances the stream. The lexer keeps yielding Eof past the end, so
    /// this never runs off the stream.
    fn bump(&mut self) -> ParserResult<()> {
        self.lexer.next_token()?;
        Ok(())
    }

    /// Returns current token and advances the stream.
    fn take_token(&mut self) -> ParserResult<Token> {
        let token = self.peek_token().clone();
        self.bump()?;
        Ok(token)
    }

    /// Checks whether or not the current token matches the given token.
    fn check(&self, t: &Token) -> bool {
        self.peek_token() == t
    }

    /// Checks whether or not the current token matches the given token.
    /// If true consume it and return true, else return false.
    fn check_consume(&mut self, t: &Token) -> ParserResult<bool> {
        if self.check(t) {
            self.bump()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Checks whether or not the current token matches the given token.
    /// If true consume it, else return Error.
    fn consume(&mut self, t: Token) -> ParserResult<()> {
        let token = self.take_token()?;

        if token == t {
            Ok(())
        } else {
            Err(ParserError::ExpectedToken(t, token))
        }
    }

    /// Parses the program as a sequence of statements up to Eof.
    pub fn parse(mut self) -> ParserResult<Program> {
        let mut stmts = vec![];

        while !self.check(&Token::Eof) {
            // A comment-only first line leaves a bare Newline behind.
            if self.check_consume(&Token::Newline)? {
                continue;
            }
            stmts.push(self.parse_statement()?);
        }

        Ok(Program { stmts })
    }

    fn parse_statement(&mut self) -> ParserResult<Stmt> {
        match self.peek_token() {
            Token::Class => self.parse_class_decl(),
            Token::If => self.parse_if_else(),
            Token::Print => self.parse_print(),
            Token::Return => self.parse_return(),
            _ => {
                let expr = self.parse_expression()?;
                self.consume(Token::Newline)?;
                Ok(Stmt::Expression(expr))
            }
        }
    }

    fn parse_print(&mut self) -> ParserResult<Stmt> {
        self.consume(Token::Print)?;

        let mut args = vec![];
        if self.check_consume(&Token::Newline)? {
            return Ok(Stmt::Print(args));
        }

        args.push(self.parse_expression()?);
        while self.check_consume(&Token::Char(','))? {
            args.push(self.parse_expression()?);
        }
        self.consume(Token::Newline)?;

        Ok(Stmt::Print(args))
    }

    fn parse_return(&mut self) -> ParserResult<Stmt> {
        self.consume(Token::Return)?;

        let expr = if self.check(&Token::Newline) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume(Token::Newline)?;

        Ok(Stmt::Return(expr))
    }

    fn parse_if_else(&mut self) -> ParserResult<Stmt> {
        self.consume(Token::If)?;
        let condition = self.parse_expression()?;
        let if_suite = self.parse_suite()?;

        let else_suite = if self.check_consume(&Token::Else)? {
            Some(self.parse_suite()?)
        } else {
            None
        };

        Ok(Stmt::IfElse(condition, if_suite, else_suite))
    }

    /// Parses `: NEWLINE INDENT statement+ DEDENT`.
    fn parse_suite(&mut self) -> ParserResult<Vec<Stmt>> {
        self.consume(Token::Char(':'))?;
        self.consume(Token::Newline)?;
        self.consume(Token::Indent)?;

        let mut stmts = vec![];
        while !self.check_consume(&Token::Dedent)? {
            if self.check_consume(&Token::Newline)? {
                continue;
            }
            stmts.push(self.parse_statement()?);
        }

        Ok(stmts)
    }

    /// Parses a class declaration. The class is registered under its name
    /// before the method bodies are parsed, so the bodies can refer to it.
    fn parse_class_decl(&mut self) -> ParserResult<Stmt> {
        self.consume(Token::Class)?;
        let name = self.parse_identifier()?;

        let parent = if self.check_consume(&Token::Char('('))? {
            let parent_name = self.parse_identifier()?;
            self.consume(Token::Char(')'))?;
            match self.classes.get(&parent_name) {
                Some(parent) => Some(parent.clone()),
                None => return Err(ParserError::UndefinedClass(parent_name)),
            }
        } else {
            None
        };

        let class = ClassPtr::new(name.clone(), vec![], parent);
        self.classes.insert(name, class.clone());

        self.consume(Token::Char(':'))?;
        self.consume(Token::Newline)?;
        self.consume(Token::Indent)?;

        let mut methods = vec![];
        while !self.check_consume(&Token::Dedent)? {
            if self.check_consume(&Token::Newline)? {
                continue;
            }
            methods.push(self.parse_method()?);
        }
        class.define_methods(methods);

        Ok(Stmt::ClassDecl(class))
    }

    /// Parses `def name(self, a, b):` and its body. The leading `self` is
    /// required and stripped from the formal parameter list.
    fn parse_method(&mut self) -> ParserResult<Method> {
        self.consume(Token::Def)?;
        let name = self.parse_identifier()?;

        self.consume(Token::Char('('))?;
        let receiver = self.parse_identifier()?;
        if receiver != SELF_STR {
            return Err(ParserError::ExpectedSelfParam(name));
        }

        let mut params = vec![];
        while !self.check_consume(&Token::Char(')'))? {
            self.consume(Token::Char(','))?;
            params.push(self.parse_identifier()?);
        }

        let body = self.parse_suite()?;

        Ok(Method { name, params, body })
    }

    fn parse_identifier(&mut self) -> ParserResult<String> {
        let token = self.take_token()?;
        match token {
            Token::Id(name) => Ok(name),
            other => Err(ParserError::ExpectedIdentifier(other)),
        }
    }

    fn parse_call_args(&mut self) -> ParserResult<Vec<Expr>> {
        self.consume(Token::Char('('))?;
        let mut args = vec![];

        if self.check_consume(&Token::Char(')'))? {
            return Ok(args);
        }

        args.push(self.parse_expression()?);
        while !self.check_consume(&Token::Char(')'))? {
            self.consume(Token::Char(','))?;
            args.push(self.parse_expression()?);
        }

        Ok(args)
    }

    pub fn parse_expression(&mut self) -> ParserResult<Expr> {
        self.run_pratt_parse_algo(Precedence::Lowest)
    }

    fn run_pratt_parse_algo(&mut self, min_precedence: Precedence) -> ParserResult<Expr> {
        let token = self.take_token()?;

        // Start by parsing literals or prefixes.
        let mut lhs = match token {
            // Literals
            Token::Number(n) => Expr::NumberLiteral(n),
            Token::String(s) => Expr::StringLiteral(s),
            Token::True => Expr::BooleanLiteral(true),
            Token::False => Expr::BooleanLiteral(false),
            Token::None => Expr::NoneLiteral,
            Token::Id(name) => Expr::Variable(name),
            // Parentheses
            Token::Char('(') => {
                let expr = self.parse_expression()?;
                self.consume(Token::Char(')'))?;
                expr
            }

            // Prefix operator
            t => match PrefixOperator::from_token(&t) {
                Some(op) => {
                    let expr = self.run_pratt_parse_algo(op.precedence())?;
                    Expr::Prefix(op, Box::new(expr))
                }
                None => return Err(ParserError::ExpectedExpression(t)),
            },
        };

        // Recursively handle any infixes with same or higher precedence.
        loop {
            let token = self.peek_token().clone();

            // Standard infix
            if let Some(op) = InfixOperator::from_token(&token) {
                if op.precedence() <= min_precedence {
                    break;
                }
                self.bump()?;
                let rhs = self.run_pratt_parse_algo(op.precedence())?;
                lhs = Expr::Infix(op, Box::new(lhs), Box::new(rhs));
                continue;
            }

            // Logical
            if let Some(op) = LogicalOperator::from_token(&token) {
                if op.precedence() <= min_precedence {
                    break;
                }
                self.bump()?;
                let rhs = self.run_pratt_parse_algo(op.precedence())?;
                lhs = Expr::Logical(op, Box::new(lhs), Box::new(rhs));
                continue;
            }

            // Assignment
            if let Token::Char('=') = token {
                if Precedence::Assignment < min_precedence {
                    break;
                }
                self.bump()?;
                let rhs = self.run_pratt_parse_algo(Precedence::Assignment)?;
                let rhs_box = Box::new(rhs);

                lhs = match lhs {
                    Expr::Variable(name) => Expr::Assign(name, rhs_box),
                    Expr::Get(obj, field) => Expr::Set(obj, field, rhs_box),
                    _ => return Err(ParserError::ExpectedLValue),
                };
                continue;
            }

            // Attribute access
            if let Token::Char('.') = token {
                if Precedence::Property < min_precedence {
                    break;
                }
                self.bump()?;
                let field = self.parse_identifier()?;
                lhs = Expr::Get(Box::new(lhs), field);
                continue;
            }

            // Call: a declared class name makes an instance, anything else
            // is a method call or a runtime error.
            if let Token::Char('(') = token {
                if Precedence::Call < min_precedence {
                    break;
                }
                let args = self.parse_call_args()?;
                lhs = match lhs {
                    Expr::Variable(name) if self.classes.contains_key(&name) => {
                        Expr::NewInstance(self.classes[&name].clone(), args)
                    }
                    other => Expr::Call(Box::new(other), args),
                };
                continue;
            }

            break;
        }

        Ok(lhs)
    }
}
