use crate::column::{ColumnDefinition, ColumnRegistry, ColumnSource};
use query_builder::{
    build::select::{FromState, SelectBuilder},
    dialect::Dialect,
    ident, table_ref,
};
use rusqlite::Connection;

fn users_columns() -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::field(0, "users.username").unwrap(),
        ColumnDefinition::field(1, "users.email").unwrap(),
        ColumnDefinition::new(
            2,
            ColumnSource::raw("users.first_name || ' ' || users.last_name"),
        )
        .orderable(false),
        ColumnDefinition::field(3, "users.last_name")
            .unwrap()
            .nulls_last(false),
    ]
}

/// 0 username, 1 email, 2 full name (not orderable), 3 last name
/// (never nulls-last). Index 4 is unknown.
pub fn users_registry() -> ColumnRegistry {
    ColumnRegistry::new(users_columns()).unwrap()
}

/// Same columns, but `users.email` always sorts NULLs last.
pub fn users_registry_email_nulls_last() -> ColumnRegistry {
    let columns = users_columns()
        .into_iter()
        .map(|column| match column.index {
            1 => column.nulls_last(true),
            _ => column,
        })
        .collect();
    ColumnRegistry::new(columns).unwrap()
}

pub fn users_query() -> SelectBuilder<FromState> {
    SelectBuilder::new()
        .select(vec![ident!("users", "email")])
        .from(table_ref!("users"), None)
}

/// The `ORDER BY ...` tail of the rendered query, or `""` without one.
pub fn order_by_clause(query: &SelectBuilder<FromState>, dialect: &dyn Dialect) -> String {
    let (sql, _) = query.to_sql(dialect);
    sql.find("ORDER BY")
        .map(|pos| sql[pos..].to_string())
        .unwrap_or_default()
}

/// An in-memory `users` table seeded with johndoe and msmith.
pub struct SqliteUsers {
    conn: Connection,
}

impl SqliteUsers {
    pub fn new() -> Self {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE users (
                id INTEGER PRIMARY KEY,
                username TEXT,
                email TEXT,
                first_name TEXT,
                last_name TEXT
            );",
        )
        .unwrap();
        let db = Self { conn };
        db.insert("johndoe", Some("johndoe@example.com"));
        db.insert("msmith", Some("mary.smith@example.com"));
        db
    }

    pub fn insert(&self, username: &str, email: Option<&str>) {
        self.conn
            .execute(
                "INSERT INTO users (username, email) VALUES (?1, ?2)",
                rusqlite::params![username, email],
            )
            .unwrap();
    }

    /// Runs `query` and returns the first column, `<null>` for NULL.
    pub fn emails(&self, query: &SelectBuilder<FromState>, dialect: &dyn Dialect) -> Vec<String> {
        let (sql, params) = query.to_sql(dialect);
        assert!(params.is_empty(), "sort queries carry no bind parameters");

        let mut stmt = self.conn.prepare(&sql).unwrap();
        let emails: Vec<String> = stmt
            .query_map([], |row| row.get::<_, Option<String>>(0))
            .unwrap()
            .map(|email| email.unwrap().unwrap_or_else(|| "<null>".to_string()))
            .collect();
        emails
    }
}
