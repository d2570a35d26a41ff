//! Identifies the database backend a query is rendered for.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DialectError {
    #[error("unknown database adapter: {0}")]
    UnknownAdapter(String),

    #[error("cannot detect database adapter from url: {0}")]
    UnknownUrl(String),
}

/// The closed set of supported backends. Picked once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SqlDialect {
    #[default]
    Postgres,
    MySql,
    Sqlite,
    SqlServer,
    /// Any backend we only know the ANSI subset of.
    Generic,
}

impl SqlDialect {
    pub const ALL: [SqlDialect; 5] = [
        SqlDialect::Postgres,
        SqlDialect::MySql,
        SqlDialect::Sqlite,
        SqlDialect::SqlServer,
        SqlDialect::Generic,
    ];

    /// Maps an adapter name as it appears in connection configuration
    /// (`pg`, `mysql2`, `sqlite3`, ...) to a dialect.
    pub fn from_adapter_name(name: &str) -> Result<Self, DialectError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "pg" | "postgres" | "postgresql" | "postgis" => Ok(SqlDialect::Postgres),
            "mysql" | "mysql2" | "trilogy" | "mariadb" => Ok(SqlDialect::MySql),
            "sqlite" | "sqlite3" => Ok(SqlDialect::Sqlite),
            "sqlserver" | "mssql" => Ok(SqlDialect::SqlServer),
            "generic" | "ansi" => Ok(SqlDialect::Generic),
            _ => Err(DialectError::UnknownAdapter(name.to_string())),
        }
    }

    /// Detects the dialect from the scheme of a connection URL,
    /// e.g. `postgres://user@localhost/db` or `sqlite::memory:`.
    pub fn from_url(url: &str) -> Result<Self, DialectError> {
        let scheme = url
            .split_once("://")
            .or_else(|| url.split_once(':'))
            .map(|(scheme, _)| scheme)
            .ok_or_else(|| DialectError::UnknownUrl(url.to_string()))?;

        Self::from_adapter_name(scheme).map_err(|_| DialectError::UnknownUrl(url.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SqlDialect::Postgres => "postgres",
            SqlDialect::MySql => "mysql",
            SqlDialect::Sqlite => "sqlite",
            SqlDialect::SqlServer => "sqlserver",
            SqlDialect::Generic => "generic",
        }
    }
}

impl FromStr for SqlDialect {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_adapter_name(s)
    }
}

impl TryFrom<String> for SqlDialect {
    type Error = DialectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_adapter_name(&value)
    }
}

impl From<SqlDialect> for String {
    fn from(value: SqlDialect) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_aliases() {
        assert_eq!(SqlDialect::from_adapter_name("pg"), Ok(SqlDialect::Postgres));
        assert_eq!(SqlDialect::from_adapter_name("PostgreSQL"), Ok(SqlDialect::Postgres));
        assert_eq!(SqlDialect::from_adapter_name("mysql2"), Ok(SqlDialect::MySql));
        assert_eq!(SqlDialect::from_adapter_name("trilogy"), Ok(SqlDialect::MySql));
        assert_eq!(SqlDialect::from_adapter_name(" sqlite3 "), Ok(SqlDialect::Sqlite));
        assert_eq!(SqlDialect::from_adapter_name("mssql"), Ok(SqlDialect::SqlServer));
        assert_eq!(
            SqlDialect::from_adapter_name("oracle"),
            Err(DialectError::UnknownAdapter("oracle".to_string()))
        );
    }

    #[test]
    fn test_from_url() {
        assert_eq!(
            SqlDialect::from_url("postgres://user:pw@localhost:5432/app"),
            Ok(SqlDialect::Postgres)
        );
        assert_eq!(
            SqlDialect::from_url("mysql://root@localhost/app"),
            Ok(SqlDialect::MySql)
        );
        assert_eq!(SqlDialect::from_url("sqlite::memory:"), Ok(SqlDialect::Sqlite));
        assert!(SqlDialect::from_url("localhost").is_err());
        assert!(SqlDialect::from_url("redis://localhost").is_err());
    }

    #[test]
    fn test_round_trips_through_its_name() {
        for dialect in SqlDialect::ALL {
            assert_eq!(dialect.as_str().parse::<SqlDialect>(), Ok(dialect));
        }
    }

    #[test]
    fn test_deserializes_from_string() {
        let dialect: SqlDialect = serde_json::from_str(r#""mysql2""#).unwrap();
        assert_eq!(dialect, SqlDialect::MySql);

        let err = serde_json::from_str::<SqlDialect>(r#""db2""#).unwrap_err();
        assert!(err.to_string().contains("unknown database adapter"));
    }
}
