//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::CoreError;

/// Extract the on-disk file path from a `sqlite:` database URL.
///
/// Returns `None` for in-memory databases.
pub fn sqlite_file_path(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" || path.starts_with("file::memory:") {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Ensure the directory holding the SQLite file exists before connecting.
pub async fn ensure_env(database_url: &str) -> Result<(), CoreError> {
    let Some(file) = sqlite_file_path(database_url) else {
        debug!("in-memory database; nothing to prepare");
        return Ok(());
    };
    let dir = match file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if tokio::fs::metadata(dir).await.is_err() {
        warn!(dir = %dir.display(), "database directory not found; creating it");
    }
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| CoreError::Env(format!("cannot create {}: {e}", dir.display())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_file_urls() {
        assert_eq!(sqlite_file_path("sqlite://cars.db?mode=rwc"), Some(PathBuf::from("cars.db")));
        assert_eq!(sqlite_file_path("sqlite:data/cars.db"), Some(PathBuf::from("data/cars.db")));
    }

    #[test]
    fn memory_urls_have_no_file() {
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("sqlite://:memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/cars"), None);
    }

    #[tokio::test]
    async fn ensure_env_creates_parent_dir() {
        let dir = std::env::temp_dir().join(format!("cars-env-{}", std::process::id()));
        let url = format!("sqlite://{}/cars.db?mode=rwc", dir.display());
        ensure_env(&url).await.expect("ensure env");
        assert!(dir.is_dir());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
