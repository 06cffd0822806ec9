//! Front end for a small SQL SELECT dialect: a state-machine scanner that
//! turns text into [`Token`]s and a recursive-descent [`Parser`] that builds
//! [`Stmt`] trees from them.

pub mod sql;

pub use sql::ast::{ComparisonOp, Condition, Expr, Literal, SelectStmt, Stmt};
pub use sql::parse_sql;
pub use sql::parser::{ParseError, Parser};
pub use sql::scanner::{lex, Scanner};
pub use sql::token::{Token, TokenKind};
