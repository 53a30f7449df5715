use std::path::PathBuf;

pub(crate) fn default_host() -> String {
    "127.0.0.1".to_string()
}

pub(crate) fn default_port() -> u16 {
    8000
}

pub(crate) fn default_books_dir() -> PathBuf {
    PathBuf::from("src/books")
}

pub(crate) fn default_chunk_limit() -> i64 {
    5000
}

pub(crate) fn default_probe_limit() -> Option<i64> {
    Some(1000)
}

pub(crate) fn default_probe_enabled() -> bool {
    true
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Info
}
