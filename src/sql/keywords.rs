use std::{collections::HashMap, sync::LazyLock};

use super::token::TokenKind;

static KEYWORDS: LazyLock<HashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    HashMap::from([
        ("SELECT", TokenKind::Select),
        ("FROM", TokenKind::From),
        ("NULL", TokenKind::Null),
        ("TRUE", TokenKind::BooleanLiteral),
        ("FALSE", TokenKind::BooleanLiteral),
        // Reserved; no grammar rule uses them yet.
        ("WHERE", TokenKind::Keyword),
        ("AND", TokenKind::Keyword),
        ("OR", TokenKind::Keyword),
        ("NOT", TokenKind::Keyword),
        ("AS", TokenKind::Keyword),
        ("INSERT", TokenKind::Keyword),
        ("INTO", TokenKind::Keyword),
        ("VALUES", TokenKind::Keyword),
        ("UPDATE", TokenKind::Keyword),
        ("SET", TokenKind::Keyword),
        ("DELETE", TokenKind::Keyword),
        ("CREATE", TokenKind::Keyword),
        ("TABLE", TokenKind::Keyword),
    ])
});

/// Symbols keyed by their text. `;` and `,` get their own kinds.
static SYMBOLS: LazyLock<HashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    HashMap::from([
        (";", TokenKind::Semicolon),
        (",", TokenKind::Comma),
        ("(", TokenKind::Symbol),
        (")", TokenKind::Symbol),
        ("=", TokenKind::Symbol),
        ("*", TokenKind::Symbol),
        ("+", TokenKind::Symbol),
        ("-", TokenKind::Symbol),
        ("/", TokenKind::Symbol),
    ])
});

pub const MAX_SYMBOL_LEN: usize = 1;

pub fn get(text: &str) -> Option<TokenKind> {
    let keyword = text.to_uppercase();
    KEYWORDS.get(keyword.as_str()).copied()
}

pub fn symbol(text: &str) -> Option<TokenKind> {
    SYMBOLS.get(text).copied()
}

pub fn is_symbol_start(c: char) -> bool {
    SYMBOLS.keys().any(|s| s.starts_with(c))
}
