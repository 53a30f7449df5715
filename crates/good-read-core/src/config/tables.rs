use super::defaults;
use super::models::{LogLevel, ServiceConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    library: LibraryConfig,
    #[serde(default)]
    extraction: ExtractionConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl From<ConfigTables> for ServiceConfig {
    fn from(tables: ConfigTables) -> Self {
        ServiceConfig {
            host: tables.server.host,
            port: tables.server.port,
            books_dir: tables.library.books_dir,
            chunk_limit: tables.extraction.chunk_limit,
            probe_limit: tables.extraction.probe_limit,
            probe_enabled: tables.extraction.probe_enabled,
            log_level: tables.logging.log_level,
        }
    }
}

impl From<&ServiceConfig> for ConfigTables {
    fn from(config: &ServiceConfig) -> Self {
        ConfigTables {
            server: ServerConfig {
                host: config.host.clone(),
                port: config.port,
            },
            library: LibraryConfig {
                books_dir: config.books_dir.clone(),
            },
            extraction: ExtractionConfig {
                chunk_limit: config.chunk_limit,
                probe_limit: config.probe_limit,
                probe_enabled: config.probe_enabled,
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct ServerConfig {
    #[serde(default = "defaults::default_host")]
    host: String,
    #[serde(default = "defaults::default_port")]
    port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: defaults::default_host(),
            port: defaults::default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct LibraryConfig {
    #[serde(default = "defaults::default_books_dir")]
    books_dir: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        LibraryConfig {
            books_dir: defaults::default_books_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct ExtractionConfig {
    #[serde(default = "defaults::default_chunk_limit")]
    chunk_limit: i64,
    #[serde(
        default = "defaults::default_probe_limit",
        skip_serializing_if = "Option::is_none"
    )]
    probe_limit: Option<i64>,
    #[serde(default = "defaults::default_probe_enabled")]
    probe_enabled: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            chunk_limit: defaults::default_chunk_limit(),
            probe_limit: defaults::default_probe_limit(),
            probe_enabled: defaults::default_probe_enabled(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}
