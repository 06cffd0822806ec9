pub mod ast;
pub mod keywords;
pub mod parser;
pub mod scanner;
pub mod token;

use ast::Stmt;
use parser::{ParseError, Parser};

/// Scans and parses `source` in one step.
///
/// A lexical error ends the token stream early; the parser reports it as
/// [`ParseError::Lexical`] when it reaches the error token.
pub fn parse_sql(source: &str) -> Result<Vec<Stmt>, ParseError> {
    let tokens = scanner::lex(source);
    Parser::new(tokens).parse()
}
