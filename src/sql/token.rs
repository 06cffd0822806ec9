use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Error,
    EOF,

    Identifier,
    Keyword,
    Symbol,
    Comment,

    // Literals
    StringLiteral, NumericLiteral, BooleanLiteral, Null,

    // Keywords and punctuation the parser dispatches on
    Select, From, Comma, Semicolon,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Error => "error",
            TokenKind::EOF => "end of input",
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Symbol => "symbol",
            TokenKind::Comment => "comment",
            TokenKind::StringLiteral => "string literal",
            TokenKind::NumericLiteral => "numeric literal",
            TokenKind::BooleanLiteral => "boolean literal",
            TokenKind::Null => "NULL",
            TokenKind::Select => "SELECT",
            TokenKind::From => "FROM",
            TokenKind::Comma => "comma",
            TokenKind::Semicolon => "semicolon",
        };
        f.write_str(name)
    }
}

/// A classified slice of the source text.
///
/// `literal` is always the verbatim text that was matched, so string
/// literals keep their quotes and keywords keep their original casing.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Token {
            kind,
            literal: literal.into(),
        }
    }

    pub fn eof() -> Self {
        Token::new(TokenKind::EOF, "")
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::NumericLiteral
                | TokenKind::StringLiteral
                | TokenKind::BooleanLiteral
                | TokenKind::Null
        )
    }

    /// The literal with its surrounding single quotes removed. Doubled
    /// quotes inside are left alone; see [`Token::unescaped`].
    pub fn raw_value(&self) -> &str {
        if self.kind == TokenKind::StringLiteral {
            if let Some(inner) = self
                .literal
                .strip_prefix('\'')
                .and_then(|rest| rest.strip_suffix('\''))
            {
                return inner;
            }
        }
        &self.literal
    }

    /// The string value a literal denotes: quotes stripped, `''` collapsed to `'`.
    pub fn unescaped(&self) -> String {
        self.raw_value().replace("''", "'")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.literal)
    }
}
