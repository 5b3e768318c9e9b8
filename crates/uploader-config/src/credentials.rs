//! Persistence for the single API token.
//!
//! The token lives in a small JSON file under the base directory. The upload
//! core never reads this file; the presentation layer loads the token and
//! passes it along as a plain parameter.

use crate::{ConfigResult, Paths};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Serialize, Deserialize)]
struct TokenFile {
    token: String,
}

/// Load/save/clear the persisted API token.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    token_path: PathBuf,
}

impl CredentialStore {
    pub fn new(paths: &Paths) -> Self {
        Self {
            token_path: paths.token_file(),
        }
    }

    /// Bind the store to an explicit file path.
    pub fn at_path(token_path: PathBuf) -> Self {
        Self { token_path }
    }

    /// Read the stored token. A missing file is `Ok(None)`.
    pub fn load(&self) -> ConfigResult<Option<String>> {
        let raw = match fs::read_to_string(&self.token_path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let parsed: TokenFile = serde_json::from_str(&raw)?;
        if parsed.token.is_empty() {
            return Ok(None);
        }

        Ok(Some(parsed.token))
    }

    /// Persist the token, creating parent directories as needed.
    pub fn save(&self, token: &str) -> ConfigResult<()> {
        if let Some(parent) = self.token_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let payload = serde_json::to_string(&TokenFile {
            token: token.to_string(),
        })?;
        fs::write(&self.token_path, payload)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.token_path, fs::Permissions::from_mode(0o600))?;
        }

        debug!(path = %self.token_path.display(), "saved token");
        Ok(())
    }

    /// Remove the stored token. A missing file is not an error.
    pub fn clear(&self) -> ConfigResult<()> {
        match fs::remove_file(&self.token_path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &std::path::Path) -> CredentialStore {
        CredentialStore::at_path(dir.join("token.json"))
    }

    #[test]
    fn load_missing_file_is_none() {
        let dir = tempdir().expect("tempdir");
        let store = store_in(dir.path());

        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().expect("tempdir");
        let store = store_in(dir.path());

        store.save("ghp_example").expect("save");
        assert_eq!(store.load().expect("load").as_deref(), Some("ghp_example"));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().expect("tempdir");
        let store = CredentialStore::at_path(dir.path().join("nested/config/token.json"));

        store.save("ghp_example").expect("save");
        assert!(store.load().expect("load").is_some());
    }

    #[test]
    fn clear_removes_token_and_tolerates_missing_file() {
        let dir = tempdir().expect("tempdir");
        let store = store_in(dir.path());

        store.save("ghp_example").expect("save");
        store.clear().expect("clear");
        assert!(store.load().expect("load").is_none());

        // Clearing again must not fail.
        store.clear().expect("clear again");
    }

    #[test]
    fn load_rejects_invalid_json() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("token.json");
        std::fs::write(&path, "not json").expect("write");

        let store = CredentialStore::at_path(path);
        assert!(store.load().is_err());
    }

    #[cfg(unix)]
    #[test]
    fn save_restricts_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().expect("tempdir");
        let store = store_in(dir.path());
        store.save("ghp_example").expect("save");

        let mode = std::fs::metadata(dir.path().join("token.json"))
            .expect("metadata")
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(mode, 0o600);
    }
}
