use thiserror::Error;

use crate::{
    ast::{ArrayType, BinOp, Expr, LogicalOp, Token, TokenKind},
    lexer::Lexer,
};

/// Structural failure while parsing. Parsing stops at the first one; no
/// partial tree is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Parse error: expected ')' to close '(' at token {position}, found {found}")]
    UnclosedParen { position: usize, found: String },

    #[error("Parse error: expected ')' after arguments to {function}() at token {position}, found {found}")]
    UnclosedCall {
        function: String,
        position: usize,
        found: String,
    },

    #[error("Parse error: expected ']' after elements of {name}[...] at token {position}, found {found}")]
    UnclosedBracket {
        name: String,
        position: usize,
        found: String,
    },

    #[error("Parse error: unexpected {found} at token {position}")]
    UnexpectedToken { position: usize, found: String },

    #[error("Parse error: unterminated string starting with {lexeme} at token {position}")]
    UnterminatedString { position: usize, lexeme: String },

    #[error("Parse error: invalid number literal '{lexeme}' at token {position}")]
    InvalidNumber { position: usize, lexeme: String },

    #[error("Parse error: unexpected {found} after complete expression at token {position}")]
    TrailingInput { position: usize, found: String },

    #[error("Parse error: expression nested more than {limit} levels deep at token {position}")]
    NestingTooDeep { position: usize, limit: usize },

    #[error("Parse error: unexpected end of input")]
    UnexpectedEof,
}

/// Deepest grouping the parser accepts. Parentheses, call arguments, array
/// elements and the right side of `**` each count one level.
pub const MAX_PARSE_DEPTH: usize = 128;

/// Recursive-descent parser with one level per precedence tier.
///
/// The lexer is drained up front; the parser walks the finished token
/// sequence once, without backtracking.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Parser {
            tokens: lexer.tokenize(),
            current: 0,
            depth: 0,
        }
    }

    /// Convenience constructor from source text.
    pub fn from_source(source: &str) -> Self {
        Parser::new(Lexer::new(source))
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    fn peek(&self) -> &Token {
        // `tokenize` always ends the sequence with Eof, and `advance` never
        // moves past it.
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !token.is_eof() {
            self.current += 1;
        }
        token
    }

    /// Consume the current token if it is one of `kinds`.
    fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.contains(&self.peek().kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    fn found(&self) -> String {
        self.peek().to_string()
    }

    /// Error for a token that cannot start an operand.
    fn unexpected(&self) -> ParseError {
        let token = self.peek();
        match token.kind {
            TokenKind::Eof => ParseError::UnexpectedEof,
            TokenKind::Illegal if token.lexeme.starts_with(['"', '\'', '`']) => ParseError::UnterminatedString {
                position: self.current,
                lexeme: token.lexeme.clone(),
            },
            _ => ParseError::UnexpectedToken {
                position: self.current,
                found: token.to_string(),
            },
        }
    }

    /// Run `parse` one grouping level deeper.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_PARSE_DEPTH {
            return Err(ParseError::NestingTooDeep {
                position: self.current,
                limit: MAX_PARSE_DEPTH,
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Parse a complete expression; every token must be consumed.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        if !self.check(TokenKind::Eof) {
            return Err(ParseError::TrailingInput {
                position: self.current,
                found: self.found(),
            });
        }
        Ok(expr)
    }

    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;

        while self.match_any(&[TokenKind::OrOr]).is_some() {
            let right = self.parse_and()?;
            left = Expr::logical(LogicalOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_equality()?;

        while self.match_any(&[TokenKind::AndAnd]).is_some() {
            let right = self.parse_equality()?;
            left = Expr::logical(LogicalOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_relational()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::EqEq => BinOp::Equal,
                TokenKind::NotEq => BinOp::NotEqual,
                _ => break,
            };
            self.advance();
            let right = self.parse_relational()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_shift()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Lt => BinOp::LessThan,
                TokenKind::LtEq => BinOp::LessEqual,
                TokenKind::Gt => BinOp::GreaterThan,
                TokenKind::GtEq => BinOp::GreaterEqual,
                _ => break,
            };
            self.advance();
            let right = self.parse_shift()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_shift(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Shl => BinOp::ShiftLeft,
                TokenKind::Shr => BinOp::ShiftRight,
                _ => break,
            };
            self.advance();
            let right = self.parse_additive()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Subtract,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_power()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinOp::Multiply,
                TokenKind::Slash => BinOp::Divide,
                TokenKind::SlashSlash => BinOp::DivideInt,
                TokenKind::Percent => BinOp::Modulo,
                _ => break,
            };
            self.advance();
            let right = self.nested(Self::parse_power)?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    /// Exponent level. Right-recursive, so `2 ** 3 ** 2` is `2 ** (3 ** 2)`.
    ///
    /// A function-name token is accepted in operator position as well and
    /// becomes [`BinOp::Apply`]; the operand after it is whatever primary
    /// follows, which for `f(x)` is the parenthesized `(x)`.
    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_primary()?;

        while let Some(token) = self.match_any(&[TokenKind::Power, TokenKind::Function]) {
            let op = match token.kind {
                TokenKind::Function => BinOp::Apply(token.lexeme),
                _ => BinOp::Power,
            };
            let right = self.parse_power()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let position = self.current;
        match self.peek().kind {
            TokenKind::Integer => {
                let token = self.advance();
                token
                    .lexeme
                    .parse::<i64>()
                    .map(Expr::Integer)
                    .map_err(|_| ParseError::InvalidNumber {
                        position,
                        lexeme: token.lexeme,
                    })
            }
            TokenKind::Float => {
                let token = self.advance();
                token
                    .lexeme
                    .parse::<f64>()
                    .map(Expr::Float)
                    .map_err(|_| ParseError::InvalidNumber {
                        position,
                        lexeme: token.lexeme,
                    })
            }
            TokenKind::String => Ok(Expr::String(self.advance().lexeme)),
            TokenKind::Boolean => Ok(Expr::Boolean(self.advance().lexeme == "true")),
            TokenKind::Variable => Ok(Expr::Variable(self.advance().lexeme)),
            TokenKind::LParen => {
                self.advance();
                let expr = self.nested(Self::parse_expression)?;
                if self.match_any(&[TokenKind::RParen]).is_none() {
                    return Err(ParseError::UnclosedParen {
                        position: self.current,
                        found: self.found(),
                    });
                }
                Ok(expr)
            }
            TokenKind::Function => {
                let name = self.advance().lexeme;
                self.parse_call(name)
            }
            TokenKind::Array => {
                let name = self.advance().lexeme;
                self.parse_array(name)
            }
            _ => Err(self.unexpected()),
        }
    }

    /// Comma-separated expressions up to (not including) `close`.
    fn parse_list(&mut self, close: TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        if self.check(close) {
            return Ok(items);
        }
        loop {
            items.push(self.parse_expression()?);
            if self.match_any(&[TokenKind::Comma]).is_none() {
                return Ok(items);
            }
        }
    }

    fn parse_call(&mut self, name: String) -> Result<Expr, ParseError> {
        // The lexer only emits a function name when '(' follows directly.
        if self.match_any(&[TokenKind::LParen]).is_none() {
            return Err(self.unexpected());
        }

        let args = self.nested(|p| p.parse_list(TokenKind::RParen))?;

        if self.match_any(&[TokenKind::RParen]).is_none() {
            return Err(ParseError::UnclosedCall {
                function: name,
                position: self.current,
                found: self.found(),
            });
        }
        Ok(Expr::FunctionCall { name, args })
    }

    fn parse_array(&mut self, name: String) -> Result<Expr, ParseError> {
        if self.match_any(&[TokenKind::LBracket]).is_none() {
            return Err(self.unexpected());
        }

        let elements = self.nested(|p| p.parse_list(TokenKind::RBracket))?;

        if self.match_any(&[TokenKind::RBracket]).is_none() {
            return Err(ParseError::UnclosedBracket {
                name,
                position: self.current,
                found: self.found(),
            });
        }
        Ok(Expr::Array {
            element_type: ArrayType::from_prefix(&name),
            elements,
        })
    }
}

/// Lex and parse `source` in one step.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    Parser::from_source(source).parse()
}
