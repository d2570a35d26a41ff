use datatable::DatatableError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to load the table config: {0}")]
    Config(#[from] DatatableError),

    #[error("Failed to read the order params: {0}")]
    ParamsRead(#[from] std::io::Error),

    #[error("Failed to parse the order params as JSON: {0}")]
    ParamsParse(serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Table config has no `table` and no --table was given")]
    MissingTable,
}
