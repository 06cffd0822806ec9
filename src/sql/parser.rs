use std::num::ParseFloatError;

use log::debug;
use thiserror::Error;

use super::{
    ast::{Expr, Literal, SelectStmt, Stmt},
    token::{Token, TokenKind},
};

/// Syntax errors. `position` is the index of the offending token in the
/// sequence handed to [`Parser::new`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("unsupported statement type: {kind}, literal: {literal:?}, at position {position}")]
    UnsupportedStatement {
        kind: TokenKind,
        literal: String,
        position: usize,
    },
    #[error("no expressions found in select statement at position {position}")]
    NoExpressions { position: usize },
    #[error("unexpected token {literal:?} at position {position}")]
    UnexpectedToken { literal: String, position: usize },
    #[error("expected table name, found {literal:?} at position {position}")]
    ExpectedTableName { literal: String, position: usize },
    #[error("unexpected {literal:?} at position {position}, expected ';' or end of input")]
    TrailingTokens { literal: String, position: usize },
    #[error("invalid numeric literal {literal:?} at position {position}")]
    InvalidNumber {
        literal: String,
        position: usize,
        #[source]
        source: ParseFloatError,
    },
    #[error("invalid boolean literal {literal:?} at position {position}")]
    InvalidBoolean { literal: String, position: usize },
    #[error("lexical error at position {position}: {literal:?}")]
    Lexical { literal: String, position: usize },
}

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        // A scan that stopped on an error token has no EOF; the parser
        // reports the error token before it could reach the end.
        if tokens.last().map_or(true, |t| t.kind != TokenKind::EOF) {
            tokens.push(Token::eof());
        }
        let mut parser = Parser { tokens, current: 0 };
        parser.skip_comments();
        parser
    }

    /// Parses every statement up to EOF. Semicolons separate statements and
    /// are optional after the last one.
    pub fn parse(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = Vec::new();
        while !self.is_at_end() {
            let stmt = self.parse_stmt().inspect_err(|e| debug!("parse failed: {e}"))?;
            debug!("parsed statement {}: {stmt}", stmts.len());
            stmts.push(stmt);
            self.matches(&[TokenKind::Semicolon]);
        }
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.peek().kind {
            TokenKind::Select => Ok(Stmt::Select(self.select_stmt()?)),
            TokenKind::Error => Err(self.lexical_error()),
            kind => Err(ParseError::UnsupportedStatement {
                kind,
                literal: self.peek().literal.clone(),
                position: self.current,
            }),
        }
    }

    fn select_stmt(&mut self) -> Result<SelectStmt, ParseError> {
        // SELECT
        self.advance();
        let expressions = self.select_list()?;

        let table = if self.matches(&[TokenKind::From]) {
            Some(self.table_name()?)
        } else {
            None
        };

        self.end_of_statement()?;
        Ok(SelectStmt {
            expressions,
            table,
            where_clause: None,
        })
    }

    fn select_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        if self.check(&[TokenKind::From, TokenKind::Semicolon, TokenKind::EOF]) {
            return Err(ParseError::NoExpressions {
                position: self.current,
            });
        }
        let mut expressions = Vec::new();
        loop {
            expressions.push(self.expression()?);
            if !self.matches(&[TokenKind::Comma]) {
                break;
            }
        }
        Ok(expressions)
    }

    fn table_name(&mut self) -> Result<String, ParseError> {
        let token = self.peek();
        let name = match token.kind {
            TokenKind::Identifier => token.literal.clone(),
            TokenKind::Error => return Err(self.lexical_error()),
            _ => {
                return Err(ParseError::ExpectedTableName {
                    literal: token.literal.clone(),
                    position: self.current,
                })
            }
        };
        self.advance();
        Ok(name)
    }

    // WHERE is not parsed yet, so anything left before the terminator is an
    // error rather than being skipped.
    fn end_of_statement(&self) -> Result<(), ParseError> {
        let token = self.peek();
        match token.kind {
            TokenKind::Semicolon | TokenKind::EOF => Ok(()),
            TokenKind::Error => Err(self.lexical_error()),
            _ => Err(ParseError::TrailingTokens {
                literal: token.literal.clone(),
                position: self.current,
            }),
        }
    }

    fn expression(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek();
        let position = self.current;
        let expr = match token.kind {
            TokenKind::Identifier => Expr::Column(token.literal.clone()),
            TokenKind::NumericLiteral => {
                let number =
                    token
                        .literal
                        .parse::<f64>()
                        .map_err(|source| ParseError::InvalidNumber {
                            literal: token.literal.clone(),
                            position,
                            source,
                        })?;
                Expr::Literal(Literal::Number(number))
            }
            TokenKind::StringLiteral => Expr::Literal(Literal::String(token.unescaped())),
            TokenKind::BooleanLiteral => {
                let value =
                    parse_bool(&token.literal).ok_or_else(|| ParseError::InvalidBoolean {
                        literal: token.literal.clone(),
                        position,
                    })?;
                Expr::Literal(Literal::Boolean(value))
            }
            TokenKind::Null => Expr::Literal(Literal::Null),
            TokenKind::Error => return Err(self.lexical_error()),
            _ => {
                return Err(ParseError::UnexpectedToken {
                    literal: token.literal.clone(),
                    position,
                })
            }
        };
        self.advance();
        Ok(expr)
    }

    fn lexical_error(&self) -> ParseError {
        ParseError::Lexical {
            literal: self.peek().literal.clone(),
            position: self.current,
        }
    }

    fn matches(&mut self, kinds: &[TokenKind]) -> bool {
        if self.check(kinds) {
            self.advance();
            return true;
        }
        false
    }

    fn check(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.peek().kind)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
            self.skip_comments();
        }
    }

    // Comments never sit last: `new` guarantees a trailing EOF.
    fn skip_comments(&mut self) {
        while self.tokens[self.current].kind == TokenKind::Comment {
            self.current += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::EOF
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
