//! Library configuration.
//!
//! [`DataFieldConfig`] gathers the settings the shipped collaborators need:
//! the site root for links, the icon base URL, the SQL dialect of generated
//! filters and the SQLite pool settings. Every key is optional when
//! deserializing.
//!
//! # Example
//!
//! ```rust
//! use datafield::config::DataFieldConfig;
//! use datafield::sql::SqlDialect;
//!
//! let config: DataFieldConfig =
//!     serde_json::from_str(r#"{"wwwroot": "https://lms.example.org", "sql_dialect": "postgres"}"#)
//!         .unwrap();
//! assert_eq!(config.sql_dialect, SqlDialect::Postgres);
//! assert_eq!(config.pix_base(), "https://lms.example.org/pix");
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::link::WwwRootUrlBuilder;
use crate::render::HtmlOutput;
use crate::sql::{SqlBuildContext, SqlDialect};

#[cfg(feature = "sqlite")]
use crate::storage::SqliteStoreConfig;

/// Configuration of the field services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFieldConfig {
    /// Site root URL; field pages are resolved against it.
    #[serde(default = "default_wwwroot")]
    pub wwwroot: String,

    /// Base URL of icons. Derived from `wwwroot` when empty.
    #[serde(default)]
    pub pix_base: String,

    /// Dialect of generated search filters.
    #[serde(default)]
    pub sql_dialect: SqlDialect,

    /// SQLite content store settings.
    #[cfg(feature = "sqlite")]
    #[serde(default)]
    pub sqlite: SqliteStoreConfig,
}

fn default_wwwroot() -> String {
    "http://localhost".to_string()
}

impl Default for DataFieldConfig {
    fn default() -> Self {
        Self {
            wwwroot: default_wwwroot(),
            pix_base: String::new(),
            sql_dialect: SqlDialect::default(),
            #[cfg(feature = "sqlite")]
            sqlite: SqliteStoreConfig::default(),
        }
    }
}

impl DataFieldConfig {
    /// Icon base URL, falling back to `{wwwroot}/pix`.
    pub fn pix_base(&self) -> String {
        if self.pix_base.is_empty() {
            format!("{}/pix", self.wwwroot.trim_end_matches('/'))
        } else {
            self.pix_base.clone()
        }
    }

    /// Output renderer for the configured icon base.
    pub fn output(&self) -> HtmlOutput {
        HtmlOutput::new(self.pix_base())
    }

    /// URL builder for the configured site root.
    pub fn url_builder(&self) -> Result<WwwRootUrlBuilder, url::ParseError> {
        WwwRootUrlBuilder::new(&self.wwwroot)
    }

    /// A fresh SQL build context in the configured dialect.
    pub fn sql_context(&self) -> SqlBuildContext {
        SqlBuildContext::new(self.sql_dialect)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Err(e) = url::Url::parse(&self.wwwroot) {
            errors.push(format!("Invalid wwwroot '{}': {}", self.wwwroot, e));
        }

        if !self.pix_base.is_empty() && url::Url::parse(&self.pix_base).is_err() {
            errors.push(format!("Invalid pix base '{}'", self.pix_base));
        }

        #[cfg(feature = "sqlite")]
        {
            if self.sqlite.max_connections == 0 {
                errors.push("SQLite max connections cannot be 0".to_string());
            }
            if self.sqlite.connection_timeout_ms == 0 {
                errors.push("SQLite connection timeout cannot be 0".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
