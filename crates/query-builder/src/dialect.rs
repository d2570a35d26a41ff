//! Defines the `Dialect` trait for database-specific SQL syntax.

use crate::ast::common::OrderDir;
use model::core::dialect::SqlDialect;

/// How a backend can express NULL placement within a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsSyntax {
    /// `<expr> ASC NULLS LAST` is understood natively.
    Native,
    /// Needs a `CASE WHEN <expr> IS NULL ...` ranking key in front.
    Emulated,
    /// NULL placement cannot be requested; sort by direction only.
    Unsupported,
}

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect.
    ///
    /// - PostgreSQL uses double quotes: `"my_column"`
    /// - MySQL uses backticks: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// Returns the placeholder for a parameterized query.
    ///
    /// - PostgreSQL uses `$1`, `$2`, etc.
    /// - MySQL uses `?`
    fn get_placeholder(&self, index: usize) -> String;

    /// Reports how NULL placement can be expressed for a sort key in
    /// `direction`.
    fn nulls_syntax(&self, direction: OrderDir) -> NullsSyntax;

    /// Returns the backend this dialect renders for.
    fn kind(&self) -> SqlDialect;

    /// Returns the name of the dialect (e.g., "PostgreSQL", "MySQL").
    fn name(&self) -> String;
}

/// Returns the dialect implementation for a detected backend.
pub fn for_kind(kind: SqlDialect) -> Box<dyn Dialect> {
    match kind {
        SqlDialect::Postgres => Box::new(Postgres),
        SqlDialect::MySql => Box::new(MySql),
        SqlDialect::Sqlite => Box::new(Sqlite),
        SqlDialect::SqlServer => Box::new(SqlServer),
        SqlDialect::Generic => Box::new(Generic),
    }
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{}""#, ident.replace('"', r#""""#))
    }

    fn get_placeholder(&self, index: usize) -> String {
        // PostgreSQL uses $1, $2, etc.
        format!("${}", index + 1)
    }

    fn nulls_syntax(&self, _direction: OrderDir) -> NullsSyntax {
        NullsSyntax::Native
    }

    fn kind(&self) -> SqlDialect {
        SqlDialect::Postgres
    }

    fn name(&self) -> String {
        "PostgreSQL".into()
    }
}

#[derive(Debug, Clone)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    fn get_placeholder(&self, _index: usize) -> String {
        // MySQL uses ?
        "?".into()
    }

    fn nulls_syntax(&self, _direction: OrderDir) -> NullsSyntax {
        // No NULLS FIRST/LAST in MySQL or MariaDB.
        NullsSyntax::Emulated
    }

    fn kind(&self) -> SqlDialect {
        SqlDialect::MySql
    }

    fn name(&self) -> String {
        "MySQL".into()
    }
}

#[derive(Debug, Clone)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{}""#, ident.replace('"', r#""""#))
    }

    fn get_placeholder(&self, _index: usize) -> String {
        "?".into()
    }

    fn nulls_syntax(&self, _direction: OrderDir) -> NullsSyntax {
        // Available since SQLite 3.30.
        NullsSyntax::Native
    }

    fn kind(&self) -> SqlDialect {
        SqlDialect::Sqlite
    }

    fn name(&self) -> String {
        "SQLite".into()
    }
}

#[derive(Debug, Clone)]
pub struct SqlServer;

impl Dialect for SqlServer {
    fn quote_identifier(&self, ident: &str) -> String {
        format!("[{}]", ident.replace(']', "]]"))
    }

    fn get_placeholder(&self, index: usize) -> String {
        format!("@p{}", index + 1)
    }

    fn nulls_syntax(&self, _direction: OrderDir) -> NullsSyntax {
        NullsSyntax::Emulated
    }

    fn kind(&self) -> SqlDialect {
        SqlDialect::SqlServer
    }

    fn name(&self) -> String {
        "SQL Server".into()
    }
}

#[derive(Debug, Clone)]
pub struct Generic;

impl Dialect for Generic {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{}""#, ident.replace('"', r#""""#))
    }

    fn get_placeholder(&self, _index: usize) -> String {
        "?".into()
    }

    fn nulls_syntax(&self, _direction: OrderDir) -> NullsSyntax {
        NullsSyntax::Unsupported
    }

    fn kind(&self) -> SqlDialect {
        SqlDialect::Generic
    }

    fn name(&self) -> String {
        "Generic SQL".into()
    }
}
