//! Defines the Abstract Syntax Tree (AST) for a SELECT query.

use crate::{
    ast::{
        common::{NullOrdering, OrderDir, TableRef},
        expr::Expr,
    },
    dialect::Dialect,
    render::{Render, Renderer},
};
use model::core::value::Value;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Select {
    /// The list of columns or expressions to be returned.
    /// e.g., `id`, `name`. Empty renders as `*`.
    pub columns: Vec<Expr>,

    /// The primary table for the query.
    /// e.g., `FROM users`
    pub from: Option<FromClause>,

    /// The ORDER BY clause. Terms are kept in the order they were added.
    pub order_by: Vec<OrderByExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FromClause {
    pub table: TableRef,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub expr: Expr,
    pub direction: Option<OrderDir>,
    /// Rendered as a native `NULLS FIRST/LAST` suffix.
    pub nulls: Option<NullOrdering>,
}

impl Select {
    /// Renders the query for `dialect`, returning the SQL text and its
    /// bind parameters in placeholder order.
    pub fn to_sql(&self, dialect: &dyn Dialect) -> (String, Vec<Value>) {
        let mut renderer = Renderer::new(dialect);
        self.render(&mut renderer);
        renderer.finish()
    }
}
