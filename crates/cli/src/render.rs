use crate::{error::CliError, output::RenderedQuery};
use datatable::{OrderParams, TableConfig};
use model::core::dialect::SqlDialect;
use query_builder::{build::select::SelectBuilder, table_ref};
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct RenderOptions {
    pub table: Option<String>,
    pub dialect: Option<SqlDialect>,
    pub database_url: Option<String>,
    pub nulls_last: bool,
    pub default_sort: bool,
}

/// Reads order params from a file (`-` is stdin) or an inline JSON string.
/// Neither given means no ordering was requested.
pub fn read_params(path: Option<&str>, inline: Option<&str>) -> Result<OrderParams, CliError> {
    let json = match (path, inline) {
        (Some("-"), _) => std::io::read_to_string(std::io::stdin())?,
        (Some(path), _) => std::fs::read_to_string(path)?,
        (None, Some(inline)) => inline.to_string(),
        (None, None) => return Ok(OrderParams::new()),
    };
    serde_json::from_str(&json).map_err(CliError::ParamsParse)
}

pub fn render_request(
    config_path: &str,
    params: &OrderParams,
    options: &RenderOptions,
) -> Result<RenderedQuery, CliError> {
    let config = TableConfig::load(config_path)?;
    render_config(config, params, options)
}

pub fn render_config(
    mut config: TableConfig,
    params: &OrderParams,
    options: &RenderOptions,
) -> Result<RenderedQuery, CliError> {
    if let Some(dialect) = options.dialect {
        config.dialect = dialect;
        config.database_url = None;
    }
    if let Some(url) = &options.database_url {
        config.database_url = Some(url.clone());
    }
    if options.nulls_last {
        config.nulls_last = true;
    }

    let table_name = options
        .table
        .clone()
        .or_else(|| config.table.clone())
        .ok_or(CliError::MissingTable)?;
    let datatable = config.into_datatable()?;

    let query = SelectBuilder::new()
        .select(Vec::new())
        .from(table_ref!(table_name), None);
    let mut query = datatable.sort_records(query, params);
    if options.default_sort {
        query = datatable.default_sort_records(query);
    } else {
        debug!("default sort skipped");
    }

    let (sql, params) = query.to_sql(datatable.dialect());
    info!(
        dialect = %datatable.dialect().name(),
        terms = query.order_terms().len(),
        "rendered query"
    );
    Ok(RenderedQuery { sql, params })
}
