use crate::ast::{Token, TokenKind};

/// Single-pass scanner with one character of lookahead.
///
/// The lexer never fails: characters it cannot classify come out as
/// [`TokenKind::Illegal`] tokens and the parser decides what to do with them.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    /// Kind of the most recently produced token, used to tell a negative
    /// literal from a subtraction.
    last_kind: Option<TokenKind>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            last_kind: None,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn slice(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if matches!(ch, ' ' | '\t' | '\r' | '\n') {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Consume one character and produce a token for it.
    fn single(&mut self, kind: TokenKind, ch: char) -> Token {
        self.advance();
        Token::new(kind, ch.to_string())
    }

    /// Consume `ch` and, if the next character is `second`, that one too.
    fn one_or_two(&mut self, ch: char, second: char, double: TokenKind, single: TokenKind) -> Token {
        if self.peek_char(1) == Some(second) {
            self.advance();
            self.advance();
            Token::new(double, format!("{ch}{second}"))
        } else {
            self.single(single, ch)
        }
    }

    fn read_identifier(&mut self) -> Token {
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' {
                self.advance();
            } else {
                break;
            }
        }
        let ident = self.slice(start);

        if ident == "true" || ident == "false" {
            return Token::new(TokenKind::Boolean, ident);
        }

        // The delimiter is left for the next call.
        match self.current_char() {
            Some('(') => Token::new(TokenKind::Function, ident),
            Some('[') => Token::new(TokenKind::Array, ident),
            _ => Token::new(TokenKind::Variable, ident),
        }
    }

    fn read_number(&mut self, negative: bool) -> Token {
        let start = self.position;
        if negative {
            self.advance(); // Consume '-'
        }

        let mut is_float = false;
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !is_float {
                is_float = true;
                self.advance();
            } else {
                break;
            }
        }

        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Integer
        };
        Token::new(kind, self.slice(start))
    }

    /// Read a delimited span verbatim. An unterminated span becomes an
    /// illegal token holding everything from the opening delimiter on.
    fn read_string(&mut self, quote: char) -> Token {
        let start = self.position;
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            if ch == quote {
                let content: String = self.input[start + 1..self.position].iter().collect();
                self.advance();
                return Token::new(TokenKind::String, content);
            }
            self.advance();
        }

        Token::new(TokenKind::Illegal, self.slice(start))
    }

    fn starts_negative_number(&self) -> bool {
        let after_operand = self.last_kind.is_some_and(TokenKind::ends_operand);
        !after_operand && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let token = match self.current_char() {
            None => Token::eof(),
            Some(ch @ '(') => self.single(TokenKind::LParen, ch),
            Some(ch @ ')') => self.single(TokenKind::RParen, ch),
            Some(ch @ '[') => self.single(TokenKind::LBracket, ch),
            Some(ch @ ']') => self.single(TokenKind::RBracket, ch),
            Some(ch @ ',') => self.single(TokenKind::Comma, ch),
            Some(ch @ '+') => self.single(TokenKind::Plus, ch),
            Some(ch @ '%') => self.single(TokenKind::Percent, ch),
            Some(ch @ '^') => self.single(TokenKind::Power, ch),
            Some(ch @ '-') => {
                if self.starts_negative_number() {
                    self.read_number(true)
                } else {
                    self.single(TokenKind::Minus, ch)
                }
            }
            Some(ch @ '*') => self.one_or_two(ch, '*', TokenKind::Power, TokenKind::Star),
            Some(ch @ '/') => self.one_or_two(ch, '/', TokenKind::SlashSlash, TokenKind::Slash),
            Some(ch @ '<') => match self.peek_char(1) {
                Some('<') => self.one_or_two(ch, '<', TokenKind::Shl, TokenKind::Lt),
                _ => self.one_or_two(ch, '=', TokenKind::LtEq, TokenKind::Lt),
            },
            Some(ch @ '>') => match self.peek_char(1) {
                Some('>') => self.one_or_two(ch, '>', TokenKind::Shr, TokenKind::Gt),
                _ => self.one_or_two(ch, '=', TokenKind::GtEq, TokenKind::Gt),
            },
            Some(ch @ '=') => self.one_or_two(ch, '=', TokenKind::EqEq, TokenKind::Illegal),
            Some(ch @ '!') => self.one_or_two(ch, '=', TokenKind::NotEq, TokenKind::Illegal),
            Some(ch @ '&') => self.one_or_two(ch, '&', TokenKind::AndAnd, TokenKind::Illegal),
            Some(ch @ '|') => self.one_or_two(ch, '|', TokenKind::OrOr, TokenKind::Illegal),
            Some(ch @ ('"' | '\'' | '`')) => self.read_string(ch),
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.read_identifier(),
            Some(ch) if ch.is_ascii_digit() => self.read_number(false),
            Some(ch) => self.single(TokenKind::Illegal, ch),
        };

        self.last_kind = Some(token.kind);
        token
    }

    /// Drain the lexer. The returned sequence always ends with exactly one
    /// end-of-input token.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }
}

#[test]
fn test_two_char_operators() {
    let mut lexer = Lexer::new("** // << >> && || == != <= >=");
    let kinds = [
        TokenKind::Power,
        TokenKind::SlashSlash,
        TokenKind::Shl,
        TokenKind::Shr,
        TokenKind::AndAnd,
        TokenKind::OrOr,
        TokenKind::EqEq,
        TokenKind::NotEq,
        TokenKind::LtEq,
        TokenKind::GtEq,
    ];
    for kind in kinds {
        assert_eq!(lexer.next_token().kind, kind);
    }
    assert!(lexer.next_token().is_eof());
}

#[test]
fn test_call_leaves_paren() {
    let mut lexer = Lexer::new("sqrt(4)");
    assert_eq!(lexer.next_token(), Token::new(TokenKind::Function, "sqrt"));
    assert_eq!(lexer.next_token(), Token::new(TokenKind::LParen, "("));
    assert_eq!(lexer.next_token(), Token::new(TokenKind::Integer, "4"));
    assert_eq!(lexer.next_token(), Token::new(TokenKind::RParen, ")"));
}
