use std::path::PathBuf;

/// Get data root directory from environment variable or use default
pub fn get_data_root() -> PathBuf {
    std::env::var("IDX_DATA_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}
