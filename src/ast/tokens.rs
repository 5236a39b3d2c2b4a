use std::fmt;

/// Classification of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input. The lexer keeps returning this once the source is drained.
    Eof,

    /// A character (or unterminated span) the lexer could not classify.
    ///
    /// The lexer never aborts; the parser reports these.
    ///
    /// # Examples
    /// ```text
    /// =
    /// &
    /// #
    /// ```
    Illegal,

    // Literals
    /// Integer literal, optionally negative
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -10
    /// ```
    Integer,

    /// Float literal (exactly one `.`)
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// -0.5
    /// 1.
    /// ```
    Float,

    /// String literal enclosed in `"`, `'` or backticks. No escape processing.
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// 'world'
    /// `raw text`
    /// ```
    String,

    /// `true` or `false`
    Boolean,

    // Identifiers
    /// Variable reference, possibly a dotted path
    ///
    /// # Examples
    /// ```text
    /// price
    /// user.address.city
    /// ```
    Variable,

    /// Identifier immediately followed by `(`. The `(` is its own token.
    ///
    /// # Examples
    /// ```text
    /// sqrt(16)
    /// map(xs, "_x * 2")
    /// ```
    Function,

    /// Identifier immediately followed by `[`. The identifier names the
    /// element type of the array literal.
    ///
    /// # Examples
    /// ```text
    /// int[1, 2, 3]
    /// any[1, "two"]
    /// ```
    Array,

    // Delimiters
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,

    // Arithmetic
    /// Addition or string concatenation (`+`)
    Plus,
    /// Subtraction (`-`)
    Minus,
    /// Multiplication (`*`)
    Star,
    /// Division (`/`)
    Slash,
    /// Integer division (`//`)
    SlashSlash,
    /// Remainder (`%`)
    Percent,
    /// Exponentiation. `**` and `^` both lex to this kind, so the
    /// spelling is normalized to `**` from here on.
    Power,

    // Comparison
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,

    // Shift
    /// `<<`
    Shl,
    /// `>>`
    Shr,

    // Logical
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
}

impl TokenKind {
    /// Whether a token of this kind can end an operand.
    ///
    /// The lexer uses this to decide whether a `-` directly before a digit
    /// starts a negative literal or is the subtraction operator.
    pub fn ends_operand(self) -> bool {
        matches!(
            self,
            TokenKind::Integer
                | TokenKind::Float
                | TokenKind::String
                | TokenKind::Boolean
                | TokenKind::Variable
                | TokenKind::RParen
                | TokenKind::RBracket
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Eof => "end of input",
            TokenKind::Illegal => "illegal token",
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::String => "string",
            TokenKind::Boolean => "boolean",
            TokenKind::Variable => "variable",
            TokenKind::Function => "function name",
            TokenKind::Array => "array name",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::SlashSlash => "'//'",
            TokenKind::Percent => "'%'",
            TokenKind::Power => "'**'",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::LtEq => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::GtEq => "'>='",
            TokenKind::Shl => "'<<'",
            TokenKind::Shr => "'>>'",
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
        };
        f.write_str(name)
    }
}

/// A classified lexical unit: its kind plus the literal source text.
///
/// For strings the lexeme is the content between the delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
        }
    }

    pub fn eof() -> Self {
        Token::new(TokenKind::Eof, "")
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::String => write!(f, "string \"{}\"", self.lexeme),
            _ => write!(f, "{} `{}`", self.kind, self.lexeme),
        }
    }
}
