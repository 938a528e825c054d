//! Engine configuration
//!
//! # Environment variables
//!
//! Every field can be overridden through an environment variable:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | ATELIER_DATA_DIR | . | Directory holding the database file and logs |
//! | ATELIER_DB_FILE | atelier.redb | Database file name inside the data dir |
//! | ATELIER_LOG_LEVEL | info | Log level for the tracing subscriber |
//! | ATELIER_LOG_DIR | (unset) | When set, logs roll daily into this dir |

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the database file and logs
    pub data_dir: String,
    /// Database file name inside `data_dir`
    pub db_file: String,
    /// Log level: trace | debug | info | warn | error
    pub log_level: String,
    /// Optional directory for daily-rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("ATELIER_DATA_DIR").unwrap_or_else(|_| ".".into()),
            db_file: std::env::var("ATELIER_DB_FILE").unwrap_or_else(|_| "atelier.redb".into()),
            log_level: std::env::var("ATELIER_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("ATELIER_LOG_DIR").ok(),
        }
    }

    /// Full path of the database file
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.db_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: ".".into(),
            db_file: "atelier.redb".into(),
            log_level: "info".into(),
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_path_joins_dir_and_file() {
        let config = Config {
            data_dir: "/var/lib/atelier".into(),
            ..Config::default()
        };
        assert_eq!(
            config.db_path(),
            PathBuf::from("/var/lib/atelier/atelier.redb")
        );
    }
}
