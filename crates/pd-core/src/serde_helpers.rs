//! Shared serde default functions for configuration fields.

pub(crate) fn default_data_dir() -> String {
    "data".to_string()
}

pub(crate) fn default_db_path() -> String {
    crate::config::MEMORY_DB_PATH.to_string()
}
