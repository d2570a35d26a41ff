//! Column registry: what each request column index is allowed to sort by.

use crate::error::DatatableError;
use query_builder::ast::expr::Expr;
use std::{collections::BTreeMap, fmt, str::FromStr};

/// Where a column's values come from in SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSource {
    /// `table.column` or a bare `column`. Both parts are plain identifiers.
    Field {
        table: Option<String>,
        column: String,
    },
    /// A configured SQL fragment such as `LOWER(users.email)`.
    Raw(String),
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

impl ColumnSource {
    pub fn raw(sql: impl Into<String>) -> Self {
        ColumnSource::Raw(sql.into())
    }

    pub fn to_expr(&self) -> Expr {
        Expr::Raw(self.to_string())
    }
}

impl FromStr for ColumnSource {
    type Err = DatatableError;

    /// Parses `users.email` or `email`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (table, column) = match s.split_once('.') {
            Some((table, column)) => (Some(table), column),
            None => (None, s),
        };

        if !is_identifier(column) || table.is_some_and(|t| !is_identifier(t)) {
            return Err(DatatableError::InvalidIdentifier(s.to_string()));
        }

        Ok(ColumnSource::Field {
            table: table.map(String::from),
            column: column.to_string(),
        })
    }
}

impl fmt::Display for ColumnSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSource::Field {
                table: Some(table),
                column,
            } => write!(f, "{table}.{column}"),
            ColumnSource::Field {
                table: None,
                column,
            } => f.write_str(column),
            ColumnSource::Raw(sql) => f.write_str(sql),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub index: usize,
    pub source: ColumnSource,
    pub orderable: bool,
    /// Overrides the table-wide nulls-last default when set.
    pub nulls_last: Option<bool>,
}

impl ColumnDefinition {
    pub fn new(index: usize, source: ColumnSource) -> Self {
        Self {
            index,
            source,
            orderable: true,
            nulls_last: None,
        }
    }

    /// Shorthand for a `table.column` source.
    pub fn field(index: usize, source: &str) -> Result<Self, DatatableError> {
        Ok(Self::new(index, source.parse()?))
    }

    pub fn orderable(mut self, orderable: bool) -> Self {
        self.orderable = orderable;
        self
    }

    pub fn nulls_last(mut self, nulls_last: bool) -> Self {
        self.nulls_last = Some(nulls_last);
        self
    }

    /// The column's own setting wins over the table default.
    pub fn sorts_nulls_last(&self, table_default: bool) -> bool {
        self.nulls_last.unwrap_or(table_default)
    }
}

/// Columns of one table keyed by their request index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRegistry {
    columns: BTreeMap<usize, ColumnDefinition>,
}

impl ColumnRegistry {
    pub fn new(columns: Vec<ColumnDefinition>) -> Result<Self, DatatableError> {
        let mut registry = BTreeMap::new();
        for column in columns {
            let index = column.index;
            if registry.insert(index, column).is_some() {
                return Err(DatatableError::DuplicateColumn(index));
            }
        }
        Ok(Self { columns: registry })
    }

    pub fn column_at(&self, index: usize) -> Option<&ColumnDefinition> {
        self.columns.get(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.values()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
