//! Store backend selection

use crate::postgrest::{self, PostgrestStore};
use crate::sqlite::SqliteStore;
use crate::{SharedStore, StoreError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Which store to open, usually the `[store]` table of a TOML file
///
/// ```toml
/// [store]
/// backend = "postgrest"
/// url = "https://xyz.supabase.co"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Local SQLite database
    Sqlite {
        /// Database file, or `:memory:`
        #[serde(default = "default_sqlite_path")]
        path: PathBuf,
    },

    /// Supabase / PostgREST endpoint
    Postgrest {
        /// Project URL
        url: String,
        /// Project key; takes precedence over `api_key_env`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        api_key: Option<String>,
        /// Environment variable read when `api_key` is not set
        #[serde(default = "default_api_key_env")]
        api_key_env: String,
        /// Table name
        #[serde(default = "default_table")]
        table: String,
    },
}

fn default_sqlite_path() -> PathBuf {
    PathBuf::from("expenses.db")
}

fn default_api_key_env() -> String {
    postgrest::API_KEY_ENV.to_string()
}

fn default_table() -> String {
    postgrest::DEFAULT_TABLE.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Sqlite {
            path: default_sqlite_path(),
        }
    }
}

impl StoreConfig {
    /// Open the configured backend
    pub fn open(&self) -> Result<SharedStore, StoreError> {
        match self {
            StoreConfig::Sqlite { path } => {
                info!("Opening SQLite store at {}", path.display());
                Ok(Arc::new(SqliteStore::new(path)?))
            }
            StoreConfig::Postgrest {
                url,
                api_key,
                api_key_env,
                table,
            } => {
                let key = api_key
                    .clone()
                    .or_else(|| std::env::var(api_key_env).ok())
                    .filter(|k| !k.trim().is_empty())
                    .ok_or_else(|| {
                        StoreError::Config(format!("{} environment variable is required", api_key_env))
                    })?;
                info!("Using PostgREST store at {} (table {})", url, table);
                Ok(Arc::new(PostgrestStore::new(url, key).with_table(table)))
            }
        }
    }
}
