//! Service configuration.
//!
//! Settings live in `conf/config.toml`, grouped into `[server]`, `[library]`,
//! `[extraction]` and `[logging]` tables. Missing entries fall back to
//! defaults; a missing file means all defaults. Limits are validated when the
//! file is loaded so a bad value stops the service before it binds.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::{ConfigError, DEFAULT_CONFIG_PATH, load_config, parse_config, serialize_config};
pub use models::{LogLevel, ServiceConfig};
