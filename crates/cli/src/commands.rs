use clap::Subcommand;
use model::core::dialect::SqlDialect;

#[derive(Subcommand)]
pub enum Commands {
    /// Render the SELECT a data table request would run
    Render {
        #[arg(long, help = "Table config file path (TOML)")]
        config: String,

        #[arg(
            long,
            help = "JSON file with the request `order` params, `-` for stdin",
            conflicts_with = "order"
        )]
        params: Option<String>,

        #[arg(
            long,
            help = "Inline JSON `order` params, e.g. '{\"0\":{\"column\":\"1\",\"dir\":\"desc\"}}'"
        )]
        order: Option<String>,

        #[arg(long, help = "Table to select from, overrides the config")]
        table: Option<String>,

        #[arg(
            long,
            help = "Database adapter name, overrides the config (pg, mysql2, sqlite3, ...)",
            conflicts_with = "database_url"
        )]
        dialect: Option<SqlDialect>,

        #[arg(long, help = "Connection URL whose scheme picks the dialect, overrides the config")]
        database_url: Option<String>,

        #[arg(long, help = "Sort NULLs last unless a column says otherwise")]
        nulls_last: bool,

        #[arg(long, help = "Skip the table's default ordering")]
        no_default_sort: bool,

        #[arg(long, help = "Print the SQL and its params as JSON")]
        json: bool,
    },
    /// List supported dialects and how each orders NULLs
    Dialects,
}
