use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Select(SelectStmt),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectStmt {
    /// Never empty.
    pub expressions: Vec<Expr>,
    pub table: Option<String>,
    /// Reserved for a WHERE clause; the parser does not fill it yet.
    pub where_clause: Option<Condition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub operator: ComparisonOp,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An unresolved column reference.
    Column(String),
    Literal(Literal),
    Binary(Box<Expr>, ComparisonOp, Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl ComparisonOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOp::Equal => "=",
            ComparisonOp::NotEqual => "<>",
            ComparisonOp::LessThan => "<",
            ComparisonOp::LessThanOrEqual => "<=",
            ComparisonOp::GreaterThan => ">",
            ComparisonOp::GreaterThanOrEqual => ">=",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Boolean(true) => f.write_str("TRUE"),
            Literal::Boolean(false) => f.write_str("FALSE"),
            Literal::Null => f.write_str("NULL"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Column(name) => f.write_str(name),
            Expr::Literal(literal) => write!(f, "{literal}"),
            Expr::Binary(left, op, right) => write!(f, "{left} {op} {right}"),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.operator, self.value)
    }
}

impl fmt::Display for SelectStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        for (i, expr) in self.expressions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{expr}")?;
        }
        if let Some(table) = &self.table {
            write!(f, " FROM {table}")?;
        }
        if let Some(condition) = &self.where_clause {
            write!(f, " WHERE {condition}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Select(select) => write!(f, "{select}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_render_as_sql() {
        assert_eq!(Literal::String("O'Reilly".into()).to_string(), "'O''Reilly'");
        assert_eq!(Literal::Number(1.0).to_string(), "1");
        assert_eq!(Literal::Number(1.25).to_string(), "1.25");
        assert_eq!(Literal::Boolean(true).to_string(), "TRUE");
        assert_eq!(Literal::Null.to_string(), "NULL");
    }

    #[test]
    fn select_renders_as_sql() {
        let stmt = Stmt::Select(SelectStmt {
            expressions: vec![
                Expr::Column("id".into()),
                Expr::Literal(Literal::String("x".into())),
            ],
            table: Some("t".into()),
            where_clause: None,
        });
        assert_eq!(stmt.to_string(), "SELECT id, 'x' FROM t");

        let no_table = SelectStmt {
            expressions: vec![Expr::Literal(Literal::Null)],
            table: None,
            where_clause: None,
        };
        assert_eq!(no_table.to_string(), "SELECT NULL");
    }

    #[test]
    fn binary_and_condition_render_operators() {
        let expr = Expr::Binary(
            Box::new(Expr::Column("a".into())),
            ComparisonOp::GreaterThanOrEqual,
            Box::new(Expr::Literal(Literal::Number(3.0))),
        );
        assert_eq!(expr.to_string(), "a >= 3");

        let condition = Condition {
            column: "a".into(),
            operator: ComparisonOp::NotEqual,
            value: Expr::Literal(Literal::Null),
        };
        assert_eq!(condition.to_string(), "a <> NULL");
    }
}
