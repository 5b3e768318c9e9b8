//! File system paths for Repoship.

use crate::{ConfigError, ConfigResult};
use std::path::PathBuf;

/// Token filename under the base directory.
const TOKEN_FILE_NAME: &str = "token.json";

/// Manages file system paths for the uploader.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directory for runtime files (~/.repoship)
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance rooted at `~/.repoship`.
    pub fn new() -> ConfigResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| ConfigError::Path("Could not determine home directory".to_string()))?;

        Ok(Self {
            base_dir: home.join(".repoship"),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.repoship).
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the persisted token file path (~/.repoship/token.json).
    pub fn token_file(&self) -> PathBuf {
        self.base_dir.join(TOKEN_FILE_NAME)
    }

    /// Get the logs directory (~/.repoship/logs).
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Ensure all required directories exist.
    pub fn ensure_dirs(&self) -> ConfigResult<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn paths_with_base_dir() {
        let base = PathBuf::from("/tmp/test-repoship");
        let paths = Paths::with_base_dir(base.clone());

        assert_eq!(paths.base_dir(), &base);
        assert_eq!(paths.token_file(), base.join("token.json"));
        assert_eq!(paths.logs_dir(), base.join("logs"));
    }

    #[test]
    fn paths_default_is_under_home() {
        let paths = Paths::new().unwrap();
        let home = dirs::home_dir().unwrap();

        assert_eq!(paths.base_dir(), &home.join(".repoship"));
    }

    #[test]
    fn ensure_dirs_creates_directories() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("repoship");
        let paths = Paths::with_base_dir(base.clone());

        assert!(!base.exists());
        paths.ensure_dirs().unwrap();

        assert!(base.is_dir());
        assert!(paths.logs_dir().is_dir());
    }

    #[test]
    fn ensure_dirs_idempotent() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());

        paths.ensure_dirs().unwrap();
        paths.ensure_dirs().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.logs_dir().exists());
    }
}
