use super::token::Token;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Precedence {
    // Lowest precedence
    Lowest,
    Assignment,
    LogicalOr,
    LogicalAnd,
    LogicalNot,
    Equality,
    Comparison,
    Addition,
    Multiplication,
    Unary,
    Property,
    Call, // Highest precedence
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LogicalOperator {
    And,
    Or,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PrefixOperator {
    Negate,
    LogicalNot,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InfixOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    EqualTo,
    NotEqualTo,
    GreaterThan,
    GreaterEq,
    LessThan,
    LessEq,
}

impl LogicalOperator {
    pub fn from_token(token: &Token) -> Option<LogicalOperator> {
        let op = match token {
            Token::And => LogicalOperator::And,
            Token::Or => LogicalOperator::Or,
            _ => return None,
        };

        Some(op)
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            LogicalOperator::And => Precedence::LogicalAnd,
            LogicalOperator::Or => Precedence::LogicalOr,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            LogicalOperator::And => "and",
            LogicalOperator::Or => "or",
        }
    }
}

impl PrefixOperator {
    pub fn from_token(token: &Token) -> Option<PrefixOperator> {
        let op = match token {
            Token::Char('-') => PrefixOperator::Negate,
            Token::Not => PrefixOperator::LogicalNot,
            _ => return None,
        };

        Some(op)
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            PrefixOperator::Negate => Precedence::Unary,
            PrefixOperator::LogicalNot => Precedence::LogicalNot,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            PrefixOperator::Negate => "-",
            PrefixOperator::LogicalNot => "not",
        }
    }
}

impl InfixOperator {
    pub fn from_token(token: &Token) -> Option<InfixOperator> {
        let op = match token {
            Token::Char('+') => InfixOperator::Add,
            Token::Char('-') => InfixOperator::Subtract,
            Token::Char('*') => InfixOperator::Multiply,
            Token::Char('/') => InfixOperator::Divide,
            Token::Eq => InfixOperator::EqualTo,
            Token::NotEq => InfixOperator::NotEqualTo,
            Token::Char('>') => InfixOperator::GreaterThan,
            Token::GreaterOrEq => InfixOperator::GreaterEq,
            Token::Char('<') => InfixOperator::LessThan,
            Token::LessOrEq => InfixOperator::LessEq,
            _ => return None,
        };
        Some(op)
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            InfixOperator::Add | InfixOperator::Subtract => Precedence::Addition,
            InfixOperator::Multiply | InfixOperator::Divide => Precedence::Multiplication,
            InfixOperator::EqualTo | InfixOperator::NotEqualTo => Precedence::Equality,
            InfixOperator::GreaterEq
            | InfixOperator::LessEq
            | InfixOperator::GreaterThan
            | InfixOperator::LessThan => Precedence::Comparison,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            InfixOperator::Add => "+",
            InfixOperator::Subtract => "-",
            InfixOperator::Multiply => "*",
            InfixOperator::Divide => "/",
            InfixOperator::EqualTo => "==",
            InfixOperator::NotEqualTo => "!=",
            InfixOperator::GreaterThan => ">",
            InfixOperator::GreaterEq => ">=",
            InfixOperator::LessThan => "<",
            InfixOperator::LessEq => "<=",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::more_asserts::*;

    #[test]
    fn test_precedence() {
        assert_lt!(Precedence::Lowest, Precedence::Unary);
        assert_gt!(Precedence::Multiplication, Precedence::Addition);
        assert_gt!(Precedence::Comparison, Precedence::Equality);
        assert_lt!(Precedence::LogicalNot, Precedence::Equality);
        assert_gt!(Precedence::LogicalNot, Precedence::LogicalAnd);
        assert_gt!(Precedence::Call, Precedence::Property);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            InfixOperator::from_token(&Token::Char('+')),
            Some(InfixOperator::Add)
        );

        assert_eq!(
            InfixOperator::from_token(&Token::Eq),
            Some(InfixOperator::EqualTo)
        );

        assert_eq!(
            PrefixOperator::from_token(&Token::Char('-')),
            Some(PrefixOperator::Negate)
        );

        assert_eq!(
            LogicalOperator::from_token(&Token::Or),
            Some(LogicalOperator::Or)
        );

        assert_eq!(InfixOperator::from_token(&Token::Not), None);
        assert_eq!(PrefixOperator::from_token(&Token::Char('*')), None);
    }
}
