//! Command line configuration.
//!
//! Every global option can also be set through the environment.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DATAFIELD_LOG_LEVEL` | warn | Log level |
//! | `DATAFIELD_WWWROOT` | http://localhost | Site root for links |
//! | `DATAFIELD_PIX_BASE` | `{wwwroot}/pix` | Icon base URL |
//! | `DATAFIELD_SQL_DIALECT` | sqlite | Dialect of generated filters |
//! | `DATAFIELD_DATABASE` | :memory: | SQLite content database |
//! | `DATAFIELD_MAX_CONNECTIONS` | 4 | SQLite pool size |
//! | `DATAFIELD_SESSKEY` | (empty) | Session key put into links |
//! | `DATAFIELD_FIELDS` | - | Field definitions file (JSON) |

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use datafield::DataFieldConfig;
use datafield::sql::SqlDialect;
use datafield::storage::SqliteStoreConfig;

/// Name of the in-memory database.
pub const MEMORY_DATABASE: &str = ":memory:";

/// Data field preview tool.
#[derive(Debug, Clone, Parser)]
#[command(name = "datafield")]
#[command(about = "Render data activity fields and run their search filters")]
pub struct CliConfig {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "DATAFIELD_LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: String,

    /// Site root URL.
    #[arg(long, env = "DATAFIELD_WWWROOT", default_value = "http://localhost", global = true)]
    pub wwwroot: String,

    /// Icon base URL.
    #[arg(long, env = "DATAFIELD_PIX_BASE", global = true)]
    pub pix_base: Option<String>,

    /// SQL dialect of generated filters (sqlite, postgres).
    #[arg(long, env = "DATAFIELD_SQL_DIALECT", default_value = "sqlite", global = true)]
    pub dialect: SqlDialect,

    /// SQLite content database path, or `:memory:`.
    #[arg(long, env = "DATAFIELD_DATABASE", default_value = MEMORY_DATABASE, global = true)]
    pub database: String,

    /// Maximum number of pooled SQLite connections.
    #[arg(long, env = "DATAFIELD_MAX_CONNECTIONS", default_value = "4", global = true)]
    pub max_connections: u32,

    /// Session key put into generated links.
    #[arg(long, env = "DATAFIELD_SESSKEY", default_value = "", global = true)]
    pub sesskey: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Field definitions to work on.
#[derive(Debug, Clone, Args)]
pub struct FieldsArgs {
    /// JSON file holding one field definition or an array of them.
    #[arg(short, long, env = "DATAFIELD_FIELDS")]
    pub fields: PathBuf,
}

/// Search request options.
#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Request query string, e.g. `f_1=rust&f_2=borrow`.
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Saved search default, `f_<id>=value`. May be repeated.
    #[arg(long = "default", value_parser = parse_key_val)]
    pub defaults: Vec<(String, String)>,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Render the add/edit controls of every field.
    AddForm {
        #[command(flatten)]
        fields: FieldsArgs,

        /// Record whose stored values pre-fill the form.
        #[arg(short, long)]
        record: Option<i64>,

        /// Submitted value, `field_<id>=value`. May be repeated.
        #[arg(long = "value", value_parser = parse_key_val)]
        values: Vec<(String, String)>,
    },

    /// Render the search controls of every field.
    SearchForm {
        #[command(flatten)]
        fields: FieldsArgs,

        /// Current search value, `f_<id>=value`. May be repeated.
        #[arg(long = "value", value_parser = parse_key_val)]
        values: Vec<(String, String)>,
    },

    /// Show the search term each field reads from a request.
    ParseSearch {
        #[command(flatten)]
        fields: FieldsArgs,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Print the SQL filter of a search request.
    Filter {
        #[command(flatten)]
        fields: FieldsArgs,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Print the configuration each field exposes to external consumers.
    Config {
        #[command(flatten)]
        fields: FieldsArgs,
    },

    /// Store a value for one field of a record.
    Update {
        #[command(flatten)]
        fields: FieldsArgs,

        /// Field to update.
        #[arg(long)]
        field_id: i64,

        /// Record to update.
        #[arg(short, long)]
        record: i64,

        /// New value.
        value: String,
    },

    /// Render the stored values of a record.
    Browse {
        #[command(flatten)]
        fields: FieldsArgs,

        /// Record to show.
        #[arg(short, long)]
        record: i64,
    },

    /// Run a search request against the content database.
    Search {
        #[command(flatten)]
        fields: FieldsArgs,

        #[command(flatten)]
        search: SearchArgs,
    },
}

/// Parses a `key=value` pair.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=value: no `=` found in `{}`", s))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=value: empty key in `{}`", s));
    }
    Ok((key.to_string(), value.to_string()))
}

impl CliConfig {
    /// Library configuration for these options.
    pub fn library_config(&self) -> DataFieldConfig {
        DataFieldConfig {
            wwwroot: self.wwwroot.clone(),
            pix_base: self.pix_base.clone().unwrap_or_default(),
            sql_dialect: self.dialect,
            sqlite: SqliteStoreConfig {
                max_connections: self.max_connections,
                ..Default::default()
            },
        }
    }

    /// Returns true if the content database lives in memory.
    pub fn is_memory_database(&self) -> bool {
        self.database == MEMORY_DATABASE
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = match self.library_config().validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors,
        };

        if self.database.is_empty() {
            errors.push("Database path cannot be empty".to_string());
        }

        let writes = matches!(self.command, Command::Update { .. });
        if writes && self.is_memory_database() {
            errors.push("Updating content requires a database file (--database)".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
