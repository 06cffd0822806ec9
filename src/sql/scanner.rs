use log::{debug, trace};

use super::{
    keywords,
    token::{Token, TokenKind},
};

/// Scanner states. Each state consumes some input and names the state to
/// run next; `None` stops the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    Comment,
    Identifier,
    Numeric,
    Whitespace,
    String,
    Symbol,
}

pub struct Scanner<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    // byte offsets into `source`
    start: usize,
    current: usize,
    // byte width of the last char returned by `advance`, for `backup`
    width: usize,
}

/// Scans `source` into its complete token sequence.
pub fn lex(source: &str) -> Vec<Token> {
    Scanner::new(source).scan_tokens()
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            source,
            tokens: Vec::new(),
            start: 0,
            current: 0,
            width: 0,
        }
    }

    /// Runs the state machine to completion.
    ///
    /// The last token is `EOF`, unless the input held an unterminated string
    /// or a character outside the grammar: then the last token is an `Error`
    /// and nothing follows it.
    pub fn scan_tokens(mut self) -> Vec<Token> {
        let mut state = Some(State::Text);
        while let Some(current) = state {
            state = match current {
                State::Text => self.lex_text(),
                State::Comment => self.lex_comment(),
                State::Identifier => self.lex_identifier(),
                State::Numeric => self.lex_numeric(),
                State::Whitespace => self.lex_whitespace(),
                State::String => self.lex_string(),
                State::Symbol => self.lex_symbol(),
            };
        }
        debug!(
            "scanned {} tokens from {} bytes",
            self.tokens.len(),
            self.source.len()
        );
        self.tokens
    }

    fn lex_text(&mut self) -> Option<State> {
        let Some(c) = self.peek() else {
            self.emit(TokenKind::EOF);
            return None;
        };
        let next = match c {
            '-' if self.peek_second() == Some('-') => State::Comment,
            '\'' => State::String,
            c if is_letter(c) => State::Identifier,
            c if c.is_ascii_digit() => State::Numeric,
            c if c.is_whitespace() => State::Whitespace,
            c if keywords::is_symbol_start(c) => State::Symbol,
            _ => {
                self.advance();
                self.error("unrecognized character");
                return None;
            }
        };
        Some(next)
    }

    fn lex_comment(&mut self) -> Option<State> {
        self.accept_while(|c| c != '\n' && c != '\r');
        self.emit(TokenKind::Comment);
        Some(State::Text)
    }

    fn lex_identifier(&mut self) -> Option<State> {
        self.accept_while(|c| is_letter(c) || c.is_alphanumeric());
        let text = &self.source[self.start..self.current];
        let kind = keywords::get(text).unwrap_or(TokenKind::Identifier);
        self.emit(kind);
        Some(State::Text)
    }

    fn lex_numeric(&mut self) -> Option<State> {
        let mut seen_decimal = false;
        while let Some(c) = self.advance() {
            match c {
                '0'..='9' => {}
                '.' if !seen_decimal => seen_decimal = true,
                _ => {
                    self.backup();
                    break;
                }
            }
        }
        self.emit(TokenKind::NumericLiteral);
        Some(State::Text)
    }

    fn lex_whitespace(&mut self) -> Option<State> {
        self.accept_while(char::is_whitespace);
        self.ignore();
        Some(State::Text)
    }

    fn lex_string(&mut self) -> Option<State> {
        // opening quote
        self.advance();
        loop {
            match self.advance() {
                None => {
                    self.error("unterminated string literal");
                    return None;
                }
                Some('\'') => {
                    // '' is an escaped quote, anything else closes the literal
                    if self.peek() == Some('\'') {
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some(_) => {}
            }
        }
        self.emit(TokenKind::StringLiteral);
        Some(State::Text)
    }

    /// Longest match against the symbol table.
    fn lex_symbol(&mut self) -> Option<State> {
        let rest = &self.source[self.current..];
        let matched = (1..=keywords::MAX_SYMBOL_LEN).rev().find_map(|len| {
            let end = rest.char_indices().nth(len).map_or(rest.len(), |(i, _)| i);
            let candidate = &rest[..end];
            if candidate.chars().count() != len {
                return None;
            }
            keywords::symbol(candidate).map(|kind| (len, kind))
        });

        match matched {
            Some((len, kind)) => {
                for _ in 0..len {
                    self.advance();
                }
                self.emit(kind);
                Some(State::Text)
            }
            None => {
                self.advance();
                self.error("unrecognized symbol");
                None
            }
        }
    }

    fn emit(&mut self, kind: TokenKind) {
        let token = Token::new(kind, &self.source[self.start..self.current]);
        trace!("emit {token}");
        self.tokens.push(token);
        self.start = self.current;
    }

    fn error(&mut self, reason: &str) {
        debug!("lexical error at byte {}: {reason}", self.start);
        self.emit(TokenKind::Error);
    }

    fn ignore(&mut self) {
        self.start = self.current;
    }

    fn accept_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.advance() {
            if !pred(c) {
                self.backup();
                break;
            }
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.source[self.current..].chars().next();
        self.width = c.map_or(0, char::len_utf8);
        self.current += self.width;
        c
    }

    /// Steps back over the last char returned by `advance`. Only one step
    /// of backtrack is kept.
    fn backup(&mut self) {
        self.current -= self.width;
        self.width = 0;
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.source[self.current..].chars().nth(1)
    }
}

fn is_letter(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind, literal: &str) -> Token {
        Token::new(kind, literal)
    }

    #[test]
    fn keywords_keep_source_casing() {
        for word in ["select", "SELECT", "SeLeCt"] {
            assert_eq!(
                lex(word),
                vec![tok(TokenKind::Select, word), Token::eof()]
            );
        }
        for word in ["from", "FROM", "fRoM"] {
            assert_eq!(lex(word), vec![tok(TokenKind::From, word), Token::eof()]);
        }
        assert_eq!(
            lex("Insert"),
            vec![tok(TokenKind::Keyword, "Insert"), Token::eof()]
        );
    }

    #[test]
    fn simple_select() {
        assert_eq!(
            lex("select * from tablename;"),
            vec![
                tok(TokenKind::Select, "select"),
                tok(TokenKind::Symbol, "*"),
                tok(TokenKind::From, "from"),
                tok(TokenKind::Identifier, "tablename"),
                tok(TokenKind::Semicolon, ";"),
                Token::eof(),
            ]
        );
    }

    #[test]
    fn multiple_columns() {
        assert_eq!(
            lex("select id, title from table1;"),
            vec![
                tok(TokenKind::Select, "select"),
                tok(TokenKind::Identifier, "id"),
                tok(TokenKind::Comma, ","),
                tok(TokenKind::Identifier, "title"),
                tok(TokenKind::From, "from"),
                tok(TokenKind::Identifier, "table1"),
                tok(TokenKind::Semicolon, ";"),
                Token::eof(),
            ]
        );
    }

    #[test]
    fn null_and_booleans() {
        assert_eq!(lex("null"), vec![tok(TokenKind::Null, "null"), Token::eof()]);
        assert_eq!(
            lex("true FALSE"),
            vec![
                tok(TokenKind::BooleanLiteral, "true"),
                tok(TokenKind::BooleanLiteral, "FALSE"),
                Token::eof(),
            ]
        );
    }

    #[test]
    fn identifiers_with_underscores_and_digits() {
        assert_eq!(
            lex("_tmp col_2 émile"),
            vec![
                tok(TokenKind::Identifier, "_tmp"),
                tok(TokenKind::Identifier, "col_2"),
                tok(TokenKind::Identifier, "émile"),
                Token::eof(),
            ]
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(
            lex("123"),
            vec![tok(TokenKind::NumericLiteral, "123"), Token::eof()]
        );
        let big = "1230000000000000000000000000000000000000000";
        assert_eq!(
            lex(big),
            vec![tok(TokenKind::NumericLiteral, big), Token::eof()]
        );
        assert_eq!(
            lex("1.23"),
            vec![tok(TokenKind::NumericLiteral, "1.23"), Token::eof()]
        );
    }

    #[test]
    fn second_decimal_point_ends_the_number() {
        // '.' is not a symbol, so the scan stops there
        assert_eq!(
            lex("1.2.3"),
            vec![
                tok(TokenKind::NumericLiteral, "1.2"),
                tok(TokenKind::Error, "."),
            ]
        );
    }

    #[test]
    fn number_followed_by_identifier() {
        assert_eq!(
            lex("1abc"),
            vec![
                tok(TokenKind::NumericLiteral, "1"),
                tok(TokenKind::Identifier, "abc"),
                Token::eof(),
            ]
        );
    }

    #[test]
    fn multiple_statements() {
        assert_eq!(
            lex("select 1; select 2;"),
            vec![
                tok(TokenKind::Select, "select"),
                tok(TokenKind::NumericLiteral, "1"),
                tok(TokenKind::Semicolon, ";"),
                tok(TokenKind::Select, "select"),
                tok(TokenKind::NumericLiteral, "2"),
                tok(TokenKind::Semicolon, ";"),
                Token::eof(),
            ]
        );
    }

    #[test]
    fn strings() {
        assert_eq!(
            lex("'text'"),
            vec![tok(TokenKind::StringLiteral, "'text'"), Token::eof()]
        );
        assert_eq!(
            lex("'O''Reilly'"),
            vec![tok(TokenKind::StringLiteral, "'O''Reilly'"), Token::eof()]
        );
        assert_eq!(
            lex("''"),
            vec![tok(TokenKind::StringLiteral, "''"), Token::eof()]
        );
        assert_eq!(
            lex("'a' 'b'"),
            vec![
                tok(TokenKind::StringLiteral, "'a'"),
                tok(TokenKind::StringLiteral, "'b'"),
                Token::eof(),
            ]
        );
    }

    #[test]
    fn string_keeps_whitespace_and_symbols() {
        assert_eq!(
            lex("'a -- b; c'"),
            vec![tok(TokenKind::StringLiteral, "'a -- b; c'"), Token::eof()]
        );
    }

    #[test]
    fn unterminated_string() {
        assert_eq!(
            lex("'this string has no end"),
            vec![tok(TokenKind::Error, "'this string has no end")]
        );
        assert_eq!(
            lex("select 'O''"),
            vec![
                tok(TokenKind::Select, "select"),
                tok(TokenKind::Error, "'O''"),
            ]
        );
    }

    #[test]
    fn unrecognized_character_stops_the_scan() {
        assert_eq!(
            lex("select # invalid syntax;"),
            vec![tok(TokenKind::Select, "select"), tok(TokenKind::Error, "#")]
        );
    }

    #[test]
    fn comments() {
        assert_eq!(
            lex("-- leading\nselect 1 -- trailing"),
            vec![
                tok(TokenKind::Comment, "-- leading"),
                tok(TokenKind::Select, "select"),
                tok(TokenKind::NumericLiteral, "1"),
                tok(TokenKind::Comment, "-- trailing"),
                Token::eof(),
            ]
        );
    }

    #[test]
    fn single_minus_is_a_symbol() {
        assert_eq!(
            lex("1 - 2"),
            vec![
                tok(TokenKind::NumericLiteral, "1"),
                tok(TokenKind::Symbol, "-"),
                tok(TokenKind::NumericLiteral, "2"),
                Token::eof(),
            ]
        );
    }

    #[test]
    fn symbols() {
        let kinds: Vec<_> = lex("(=+/)").into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Symbol,
                TokenKind::Symbol,
                TokenKind::Symbol,
                TokenKind::Symbol,
                TokenKind::Symbol,
                TokenKind::EOF,
            ]
        );
    }

    #[test]
    fn whitespace_is_discarded() {
        assert_eq!(lex(" \t\r\n\u{3000}"), vec![Token::eof()]);
        assert_eq!(lex(""), vec![Token::eof()]);
    }

    #[test]
    fn tokens_relex_to_themselves() {
        let source = "select id, 'it''s', 1.5, TRUE, null from t1; -- done\nselect -'x";
        for token in lex(source) {
            let again = lex(&token.literal);
            match token.kind {
                TokenKind::Error => assert_eq!(again, vec![token.clone()]),
                TokenKind::EOF => assert_eq!(again, vec![Token::eof()]),
                _ => assert_eq!(again, vec![token.clone(), Token::eof()]),
            }
        }
    }
}
