//! Provides a type-safe, fluent builder for constructing `Select` ASTs.

// --- Typestate Marker Structs ---
// These zero-sized structs represent the state of the builder.
// They ensure that methods are called in the correct SQL order at compile time.

use crate::{
    ast::{
        common::{NullOrdering, OrderDir, TableRef},
        expr::Expr,
        select::{FromClause, OrderByExpr, Select},
    },
    dialect::Dialect,
};
use model::core::value::Value;

/// The initial state of the builder before any clauses have been added.
#[derive(Debug, Default, Clone)]
pub struct InitialState;

/// The state after the `SELECT` clause has been added.
#[derive(Debug, Default, Clone)]
pub struct SelectState;

/// The state after the `FROM` clause has been added.
#[derive(Debug, Default, Clone)]
pub struct FromState;

// --- The Main Builder ---

#[derive(Debug, Clone)]
pub struct SelectBuilder<State> {
    ast: Select,
    #[allow(dead_code)]
    state: State,
}

impl Default for SelectBuilder<InitialState> {
    fn default() -> Self {
        Self::new()
    }
}

/// Implementation for the initial state of the builder.
impl SelectBuilder<InitialState> {
    pub fn new() -> Self {
        Self {
            ast: Select::default(),
            state: InitialState,
        }
    }

    /// Adds a `SELECT` clause with a list of columns.
    /// This is the entry point for building a select query.
    pub fn select(mut self, columns: Vec<Expr>) -> SelectBuilder<SelectState> {
        self.ast.columns = columns;
        SelectBuilder {
            ast: self.ast,
            state: SelectState,
        }
    }
}

/// Implementation for the state after `SELECT` has been called.
/// The only valid next step is to specify a `FROM` table.
impl SelectBuilder<SelectState> {
    /// Adds a `FROM` clause specifying the primary table.
    pub fn from(mut self, table: TableRef, alias: Option<&str>) -> SelectBuilder<FromState> {
        self.ast.from = Some(FromClause {
            table,
            alias: alias.map(String::from),
        });
        SelectBuilder {
            ast: self.ast,
            state: FromState,
        }
    }
}

/// Implementation for the state after `FROM` has been called.
/// From here, `ORDER BY` terms can be appended.
impl SelectBuilder<FromState> {
    /// Appends a term to the `ORDER BY` clause. Existing terms stay in front.
    pub fn order_by(mut self, expr: Expr, direction: Option<OrderDir>) -> Self {
        self.ast.order_by.push(OrderByExpr {
            expr,
            direction,
            nulls: None,
        });
        self
    }

    /// Appends a term with a native `NULLS FIRST/LAST` suffix.
    pub fn order_by_nulls(mut self, expr: Expr, direction: OrderDir, nulls: NullOrdering) -> Self {
        self.ast.order_by.push(OrderByExpr {
            expr,
            direction: Some(direction),
            nulls: Some(nulls),
        });
        self
    }

    /// The `ORDER BY` terms added so far.
    pub fn order_terms(&self) -> &[OrderByExpr] {
        &self.ast.order_by
    }

    /// Renders the query built so far without consuming the builder.
    pub fn to_sql(&self, dialect: &dyn Dialect) -> (String, Vec<Value>) {
        self.ast.to_sql(dialect)
    }

    /// Finalizes and returns the constructed `Select` AST.
    pub fn build(self) -> Select {
        self.ast
    }
}
