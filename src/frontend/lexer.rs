use super::cursor::Cursor;
use super::errors::{LexerError, LexerResult};
use super::token::Token;

/// Spaces per block level.
const INDENT_STEP: usize = 2;

/// Pull-based tokenizer for indentation-structured source.
///
/// Leading whitespace is turned into virtual `Indent`/`Dedent` tokens,
/// comments and blank lines collapse into at most one `Newline`, and the
/// stream always ends with a balanced run of `Dedent`s followed by `Eof`.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    current: Token,
    /// Leading spaces of the current block level.
    indent_spaces: usize,
    /// Dedents still owed from a multi-level outdent.
    pending_dedents: usize,
    /// True while positioned at the start of a logical line.
    at_line_start: bool,
    /// Set when the last consumed indentation matched the current level,
    /// which distinguishes a same-level line from a dedent.
    same_level: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer and produces the first token immediately.
    pub fn new(source: &'src str) -> LexerResult<Self> {
        let mut lexer = Lexer {
            cursor: Cursor::new(source),
            current: Token::Dedent,
            indent_spaces: 0,
            pending_dedents: 0,
            at_line_start: false,
            same_level: false,
        };
        lexer.cursor.take_while(|ch| ch == '\n');
        lexer.advance()?;
        Ok(lexer)
    }

    /// Returns the most recently produced token.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Advances the stream and returns the new current token.
    pub fn next_token(&mut self) -> LexerResult<Token> {
        self.advance()?;
        Ok(self.current.clone())
    }

    fn advance(&mut self) -> LexerResult<()> {
        loop {
            if self.current == Token::Eof {
                return Ok(());
            }

            let ch = match self.cursor.peek() {
                Some(ch) => ch,
                None => {
                    self.current = if self.indent_spaces > 0 {
                        self.indent_spaces -= INDENT_STEP;
                        Token::Dedent
                    } else if self.current != Token::Newline && self.current != Token::Dedent {
                        Token::Newline
                    } else {
                        Token::Eof
                    };
                    return Ok(());
                }
            };

            if self.pending_dedents > 0 {
                self.pending_dedents -= 1;
                self.indent_spaces -= INDENT_STEP;
                self.current = Token::Dedent;
                return Ok(());
            }

            if ch == '#' {
                // The newline itself stays put so the next pass sees the
                // line boundary and any dedent the following line owes.
                self.cursor.take_while(|ch| ch != '\n');
                self.current = Token::Newline;
                // A comment-only line produces no token of its own.
                if self.at_line_start {
                    continue;
                }
                return Ok(());
            }

            // Collapse runs of blank lines.
            if ch == '\n' && self.current == Token::Newline {
                self.cursor.take();
                self.at_line_start = true;
                continue;
            }

            if self.at_line_start && ch == '\t' {
                return Err(LexerError::TabInIndent(self.cursor.line()));
            }

            // A line that starts below the current block level owes dedents
            // before its first token may be produced.
            if self.at_line_start && self.indent_spaces > 0 && ch != ' ' && !self.same_level {
                self.indent_spaces -= INDENT_STEP;
                self.current = Token::Dedent;
                return Ok(());
            }
            self.same_level = false;

            if ch == '\n' {
                self.cursor.take();
                self.current = Token::Newline;
                self.at_line_start = true;
                return Ok(());
            }

            if ch == ' ' {
                if self.current != Token::Newline {
                    // Inline whitespace.
                    self.cursor.take();
                    continue;
                }
                if self.scan_indent()? {
                    continue;
                }
                self.at_line_start = false;
                return Ok(());
            }

            self.cursor.take();
            self.current = match ch {
                '\'' | '"' => self.scan_string(ch)?,
                _ if ch.is_ascii_digit() => self.scan_number(ch)?,
                _ if ch.is_ascii_alphabetic() || ch == '_' => self.scan_identifier_or_kw(ch),
                _ => self.scan_operator(ch),
            };
            self.at_line_start = false;
            return Ok(());
        }
    }

    /// Measures leading whitespace against the current block level. Returns
    /// true when no token was produced and scanning should restart.
    fn scan_indent(&mut self) -> LexerResult<bool> {
        let spaces = self.cursor.take_while(|ch| ch == ' ');

        if spaces == self.indent_spaces {
            self.same_level = true;
            return Ok(true);
        }
        if spaces == self.indent_spaces + INDENT_STEP {
            self.indent_spaces += INDENT_STEP;
            self.current = Token::Indent;
            return Ok(false);
        }
        if spaces > self.indent_spaces {
            return Err(LexerError::BadIndent(self.cursor.line(), spaces));
        }

        // One dedent now, the rest owed from the pending counter.
        let mut difference = self.indent_spaces - spaces;
        self.current = Token::Dedent;
        self.indent_spaces -= INDENT_STEP;
        while difference > INDENT_STEP {
            difference -= INDENT_STEP;
            self.pending_dedents += 1;
        }
        Ok(false)
    }

    fn scan_string(&mut self, quote: char) -> LexerResult<Token> {
        let mut value = String::new();
        loop {
            let ch = match self.cursor.take() {
                Some(ch) => ch,
                None => return Err(LexerError::UnterminatedString(self.cursor.line())),
            };
            if ch == quote {
                break;
            }
            if ch == '\\' {
                let escaped = match self.cursor.take() {
                    Some(ch) => ch,
                    None => return Err(LexerError::UnterminatedString(self.cursor.line())),
                };
                value.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    // Any other escaped character stands for itself.
                    other => other,
                });
            } else {
                value.push(ch);
            }
        }
        Ok(Token::String(value))
    }

    fn scan_number(&mut self, first: char) -> LexerResult<Token> {
        let mut digits = String::from(first);
        while let Some(ch) = self.cursor.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            digits.push(ch);
            self.cursor.take();
        }
        match digits.parse::<i32>() {
            Ok(value) => Ok(Token::Number(value)),
            Err(_) => Err(LexerError::BadNumber(self.cursor.line(), digits)),
        }
    }

    fn scan_identifier_or_kw(&mut self, first: char) -> Token {
        let mut word = String::from(first);
        while let Some(ch) = self.cursor.peek() {
            if !ch.is_ascii_alphanumeric() && ch != '_' {
                break;
            }
            word.push(ch);
            self.cursor.take();
        }
        match word.as_str() {
            "class" => Token::Class,
            "return" => Token::Return,
            "if" => Token::If,
            "else" => Token::Else,
            "def" => Token::Def,
            "print" => Token::Print,
            "and" => Token::And,
            "or" => Token::Or,
            "not" => Token::Not,
            "None" => Token::None,
            "True" => Token::True,
            "False" => Token::False,
            _ => Token::Id(word),
        }
    }

    fn scan_operator(&mut self, ch: char) -> Token {
        match ch {
            '=' if self.cursor.take_if('=') => Token::Eq,
            '!' if self.cursor.take_if('=') => Token::NotEq,
            '<' if self.cursor.take_if('=') => Token::LessOrEq,
            '>' if self.cursor.take_if('=') => Token::GreaterOrEq,
            _ => Token::Char(ch),
        }
    }
}
