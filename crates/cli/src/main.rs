use crate::{
    commands::Commands,
    error::CliError,
    output::print_query,
    render::{RenderOptions, render_request},
};
use clap::Parser;
use model::core::dialect::SqlDialect;
use query_builder::{
    ast::common::OrderDir,
    dialect::{self, NullsSyntax},
};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;
mod render;

#[derive(Parser)]
#[command(
    name = "datatable-sql",
    version = "0.1.0",
    about = "Render data table sort requests as SQL"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            config,
            params,
            order,
            table,
            dialect,
            database_url,
            nulls_last,
            no_default_sort,
            json,
        } => {
            let options = RenderOptions {
                table,
                dialect,
                database_url,
                nulls_last,
                default_sort: !no_default_sort,
            };
            let params = render::read_params(params.as_deref(), order.as_deref())?;
            let query = render_request(&config, &params, &options)?;
            print_query(&query, json)?;
        }
        Commands::Dialects => {
            for kind in SqlDialect::ALL {
                let dialect = dialect::for_kind(kind);
                let nulls = match dialect.nulls_syntax(OrderDir::Asc) {
                    NullsSyntax::Native => "native NULLS LAST",
                    NullsSyntax::Emulated => "emulated with CASE WHEN ... IS NULL",
                    NullsSyntax::Unsupported => "not supported",
                };
                println!("{:<10} {:<12} {nulls}", kind.as_str(), dialect.name());
            }
        }
    }

    Ok(())
}
