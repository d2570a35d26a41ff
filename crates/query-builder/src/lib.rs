use crate::ast::expr::Expr;

pub mod ast;
pub mod build;
pub mod dialect;
pub mod macros;
pub mod render;

/// A trusted SQL fragment, emitted verbatim.
pub fn raw(sql: &str) -> Expr {
    Expr::Raw(sql.to_string())
}
