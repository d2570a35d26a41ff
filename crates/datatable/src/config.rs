//! TOML table definitions.
//!
//! ```toml
//! table = "users"
//! dialect = "postgres"
//! # or detect it from a connection url
//! # database_url = "mysql2://app@localhost/app"
//! nulls_last = false
//!
//! [[columns]]
//! source = "users.username"
//!
//! [[columns]]
//! source = "users.email"
//! nulls_last = true
//!
//! [[columns]]
//! sql = "LOWER(users.first_name)"
//! orderable = false
//!
//! [[default_order]]
//! source = "users.username"
//! dir = "asc"
//! ```

use crate::{
    column::{ColumnDefinition, ColumnRegistry, ColumnSource},
    datatable::Datatable,
    default_sort::DefaultSort,
    error::DatatableError,
};
use model::core::dialect::SqlDialect;
use query_builder::ast::common::OrderDir;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    /// Request index. Defaults to the position in `columns`.
    pub index: Option<usize>,
    /// `table.column` or `column`.
    pub source: Option<String>,
    /// Raw SQL fragment, used instead of `source`.
    pub sql: Option<String>,
    #[serde(default = "default_true")]
    pub orderable: bool,
    pub nulls_last: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultOrderConfig {
    pub source: Option<String>,
    pub sql: Option<String>,
    #[serde(default)]
    pub dir: OrderDir,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    /// Table selected from when a query is built from scratch.
    pub table: Option<String>,
    #[serde(default)]
    pub dialect: SqlDialect,
    /// When set, its scheme picks the dialect instead of `dialect`.
    pub database_url: Option<String>,
    #[serde(default)]
    pub nulls_last: bool,
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
    #[serde(default)]
    pub default_order: Vec<DefaultOrderConfig>,
}

fn column_source(
    index: usize,
    source: Option<&str>,
    sql: Option<&str>,
) -> Result<ColumnSource, DatatableError> {
    match (source, sql) {
        (Some(source), None) => source.parse(),
        (None, Some(sql)) if !sql.trim().is_empty() => Ok(ColumnSource::raw(sql.trim())),
        (None, Some(_)) => Err(DatatableError::InvalidColumn {
            index,
            reason: "`sql` is empty".to_string(),
        }),
        (Some(_), Some(_)) => Err(DatatableError::InvalidColumn {
            index,
            reason: "set either `source` or `sql`, not both".to_string(),
        }),
        (None, None) => Err(DatatableError::InvalidColumn {
            index,
            reason: "missing `source` or `sql`".to_string(),
        }),
    }
}

impl TableConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, DatatableError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatatableError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DatatableError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        info!(
            path = %path.display(),
            columns = config.columns.len(),
            dialect = %config.dialect,
            "loaded table config"
        );
        Ok(config)
    }

    pub fn resolved_dialect(&self) -> Result<SqlDialect, DatatableError> {
        match &self.database_url {
            Some(url) => Ok(SqlDialect::from_url(url)?),
            None => Ok(self.dialect),
        }
    }

    pub fn registry(&self) -> Result<ColumnRegistry, DatatableError> {
        let columns = self
            .columns
            .iter()
            .enumerate()
            .map(|(position, column)| {
                let index = column.index.unwrap_or(position);
                let source = column_source(index, column.source.as_deref(), column.sql.as_deref())?;
                Ok(ColumnDefinition {
                    index,
                    source,
                    orderable: column.orderable,
                    nulls_last: column.nulls_last,
                })
            })
            .collect::<Result<Vec<_>, DatatableError>>()?;

        ColumnRegistry::new(columns)
    }

    pub fn default_sort(&self) -> Result<DefaultSort, DatatableError> {
        self.default_order
            .iter()
            .enumerate()
            .try_fold(DefaultSort::new(), |sort, (position, term)| {
                let source = column_source(position, term.source.as_deref(), term.sql.as_deref())?;
                Ok(sort.then(source, term.dir))
            })
    }

    pub fn into_datatable(self) -> Result<Datatable, DatatableError> {
        Ok(Datatable::new(self.registry()?, self.resolved_dialect()?)
            .with_default_sort(self.default_sort()?)
            .with_nulls_last(self.nulls_last))
    }
}
