//! Defines the AST for SQL expressions.

use model::core::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A column or table identifier, e.g., `users` or `users.id`.
    Identifier(Ident),

    /// A literal value, such as a string, number, boolean, or NULL.
    Value(Value),

    /// A configured SQL fragment emitted as-is, e.g. `users.email` or
    /// `LOWER(users.name)`. Never built from request input.
    Raw(String),

    /// `<expr> IS NULL`
    IsNull(Box<Expr>),

    /// `CASE WHEN <condition> THEN <then> ELSE <otherwise> END`
    Case {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub qualifier: Option<String>, // e.g., the 'users' in 'users.id'
    pub name: String,              // e.g., the 'id' in 'users.id'
}

impl Expr {
    /// Whether the expression renders as a single operand that needs no
    /// parentheses next to an operator.
    pub fn is_atomic(&self) -> bool {
        match self {
            Expr::Identifier(_) | Expr::Value(_) => true,
            Expr::Raw(sql) => {
                !sql.is_empty()
                    && sql.chars().all(|c| {
                        c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '"' | '`' | '[' | ']')
                    })
            }
            Expr::IsNull(_) | Expr::Case { .. } => false,
        }
    }

    pub fn is_null(self) -> Expr {
        Expr::IsNull(Box::new(self))
    }

    /// Builds the ranking key `CASE WHEN <self> IS NULL THEN a ELSE b END`
    /// used to order NULLs on backends without `NULLS FIRST/LAST`.
    pub fn null_rank(self, null_rank: i64, value_rank: i64) -> Expr {
        Expr::Case {
            condition: Box::new(self.is_null()),
            then: Box::new(Expr::Raw(null_rank.to_string())),
            otherwise: Box::new(Expr::Raw(value_rank.to_string())),
        }
    }
}
