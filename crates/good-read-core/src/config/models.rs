use crate::config::defaults;
use crate::extraction::Extractor;
use crate::segmenter::LimitError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Flattened service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub books_dir: PathBuf,
    pub chunk_limit: i64,
    pub probe_limit: Option<i64>,
    pub probe_enabled: bool,
    pub log_level: LogLevel,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            host: defaults::default_host(),
            port: defaults::default_port(),
            books_dir: defaults::default_books_dir(),
            chunk_limit: defaults::default_chunk_limit(),
            probe_limit: defaults::default_probe_limit(),
            probe_enabled: defaults::default_probe_enabled(),
            log_level: defaults::default_log_level(),
        }
    }
}

impl ServiceConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check that every configured limit is a positive integer.
    pub fn validate(&self) -> Result<(), LimitError> {
        Extractor::from_config(self).map(|_| ())
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
