use crate::error::CliError;
use model::core::value::Value;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RenderedQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

fn generate_json(query: &RenderedQuery) -> Result<String, CliError> {
    serde_json::to_string_pretty(query).map_err(CliError::JsonSerialize)
}

pub fn print_query(query: &RenderedQuery, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", generate_json(query)?);
        return Ok(());
    }

    println!("{};", query.sql);
    for (i, param) in query.params.iter().enumerate() {
        println!("-- ${}: {param}", i + 1);
    }
    Ok(())
}
