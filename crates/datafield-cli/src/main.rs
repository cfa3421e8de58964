//! Data field preview tool.
//!
//! Renders the edit and search controls of field definitions, shows the SQL
//! filter a search request turns into, and runs searches against a SQLite
//! content database.

mod commands;
mod config;

use clap::Parser;
use tracing::info;

use crate::commands::Runtime;
use crate::config::{CliConfig, Command};

/// Initializes tracing. `RUST_LOG` takes precedence over `level`.
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("datafield={level},datafield_cli={level}")));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(config: &CliConfig) -> anyhow::Result<String> {
    let runtime = Runtime::new(config)?;

    match &config.command {
        Command::AddForm {
            fields,
            record,
            values,
        } => {
            let fields = runtime.load_fields(&fields.fields)?;
            runtime.add_form(&fields, *record, values)
        }
        Command::SearchForm { fields, values } => {
            let fields = runtime.load_fields(&fields.fields)?;
            Ok(runtime.search_form(&fields, values))
        }
        Command::ParseSearch { fields, search } => {
            let fields = runtime.load_fields(&fields.fields)?;
            runtime.parse_search(&fields, search)
        }
        Command::Filter { fields, search } => {
            let fields = runtime.load_fields(&fields.fields)?;
            runtime.filter(&fields, search)
        }
        Command::Config { fields } => {
            let fields = runtime.load_fields(&fields.fields)?;
            runtime.config(&fields)
        }
        Command::Update {
            fields,
            field_id,
            record,
            value,
        } => {
            let fields = runtime.load_fields(&fields.fields)?;
            runtime.update(&fields, *field_id, *record, value)
        }
        Command::Browse { fields, record } => {
            let fields = runtime.load_fields(&fields.fields)?;
            runtime.browse(&fields, *record)
        }
        Command::Search { fields, search } => {
            let fields = runtime.load_fields(&fields.fields)?;
            runtime.search(&fields, search)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        version = datafield::VERSION,
        dialect = %config.dialect,
        database = %config.database,
        "Starting datafield"
    );

    let output = run(&config)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
