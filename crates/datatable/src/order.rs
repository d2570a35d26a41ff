//! Turns validated directives into `ORDER BY` terms.

use crate::{column::ColumnRegistry, directive::OrderDirective};
use query_builder::{
    ast::{
        common::{NullOrdering, OrderDir},
        expr::Expr,
    },
    build::select::{FromState, SelectBuilder},
    dialect::{Dialect, NullsSyntax},
};
use tracing::debug;

/// A directive with its SQL expression and NULL placement decided.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOrder {
    pub expr: Expr,
    pub direction: OrderDir,
    pub nulls_last: bool,
}

/// Looks up each directive's source and applies the nulls-last precedence:
/// the column's own setting, otherwise `nulls_last_default`.
pub fn resolve(
    directives: &[OrderDirective],
    registry: &ColumnRegistry,
    nulls_last_default: bool,
) -> Vec<ResolvedOrder> {
    directives
        .iter()
        .filter_map(|directive| {
            let column = registry
                .column_at(directive.column_index)
                .filter(|column| column.orderable)?;
            Some(ResolvedOrder {
                expr: column.source.to_expr(),
                direction: directive.direction,
                nulls_last: column.sorts_nulls_last(nulls_last_default),
            })
        })
        .collect()
}

/// A pending list of sort terms for one dialect.
pub struct OrderClause<'a> {
    terms: Vec<ResolvedOrder>,
    dialect: &'a dyn Dialect,
}

impl<'a> OrderClause<'a> {
    pub fn build(terms: Vec<ResolvedOrder>, dialect: &'a dyn Dialect) -> Self {
        Self { terms, dialect }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[ResolvedOrder] {
        &self.terms
    }

    /// Appends the terms after any ordering `query` already has, primary
    /// key first.
    pub fn apply(self, query: SelectBuilder<FromState>) -> SelectBuilder<FromState> {
        let dialect = self.dialect;
        self.terms
            .into_iter()
            .fold(query, |query, term| apply_term(query, term, dialect))
    }
}

fn apply_term(
    query: SelectBuilder<FromState>,
    term: ResolvedOrder,
    dialect: &dyn Dialect,
) -> SelectBuilder<FromState> {
    let ResolvedOrder {
        expr,
        direction,
        nulls_last,
    } = term;

    if !nulls_last {
        return query.order_by(expr, Some(direction));
    }

    match dialect.nulls_syntax(direction) {
        NullsSyntax::Native => query.order_by_nulls(expr, direction, NullOrdering::Last),
        NullsSyntax::Emulated => query
            .order_by(expr.clone().null_rank(1, 0), None)
            .order_by(expr, Some(direction)),
        NullsSyntax::Unsupported => {
            debug!(
                dialect = %dialect.name(),
                "nulls last is not supported, ordering by direction only"
            );
            query.order_by(expr, Some(direction))
        }
    }
}
