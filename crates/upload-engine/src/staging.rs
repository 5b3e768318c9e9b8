//! Copying source paths into the upload workspace.

use crate::UploadError;
use std::fs;
use std::path::{Path, PathBuf};

/// Stage every source path into the workspace root.
///
/// A plain file lands at the root under its own name; a directory is merged
/// recursively under its basename. Later sources win on name collisions, and
/// entries already in the workspace (tracked files from the fetched history)
/// are left alone unless a staged name shadows them. A source that vanished
/// since validation fails the step; nothing is skipped silently.
pub fn stage_sources(workspace_root: &Path, sources: &[PathBuf]) -> Result<(), UploadError> {
    for source in sources {
        let metadata = fs::metadata(source).map_err(|err| UploadError::Staging {
            message: format!("cannot read source path {}: {err}", source.display()),
        })?;

        let file_name = source
            .file_name()
            .ok_or_else(|| UploadError::Staging {
                message: format!("source path has no file name: {}", source.display()),
            })?
            .to_os_string();
        let destination = workspace_root.join(&file_name);

        if metadata.is_dir() {
            copy_dir_recursive(source, &destination)?;
        } else {
            fs::copy(source, &destination).map_err(|err| UploadError::Staging {
                message: format!("failed to copy {}: {err}", source.display()),
            })?;
        }
    }

    Ok(())
}

fn copy_dir_recursive(source: &Path, destination: &Path) -> Result<(), UploadError> {
    let staging_err = |context: &Path, err: std::io::Error| UploadError::Staging {
        message: format!("failed to copy {}: {err}", context.display()),
    };

    fs::create_dir_all(destination).map_err(|err| staging_err(destination, err))?;

    let entries = fs::read_dir(source).map_err(|err| staging_err(source, err))?;
    for entry in entries {
        let entry = entry.map_err(|err| staging_err(source, err))?;
        let file_type = entry.file_type().map_err(|err| staging_err(source, err))?;
        let name = entry.file_name();

        // A staged working tree must never replace the workspace's own
        // version-control state.
        if name == ".git" && file_type.is_dir() {
            continue;
        }

        let target = destination.join(&name);
        if file_type.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|err| staging_err(&entry.path(), err))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, content).expect("write file");
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).expect("read file")
    }

    #[test]
    fn stages_single_file_into_root() {
        let sources = tempdir().expect("tempdir");
        let workspace = tempdir().expect("tempdir");
        let file = sources.path().join("notes.txt");
        write(&file, "hello");

        stage_sources(workspace.path(), &[file]).expect("stage");
        assert_eq!(read(&workspace.path().join("notes.txt")), "hello");
    }

    #[test]
    fn stages_directory_under_its_basename() {
        let sources = tempdir().expect("tempdir");
        let workspace = tempdir().expect("tempdir");
        let project = sources.path().join("project");
        write(&project.join("src/main.rs"), "fn main() {}");
        write(&project.join("README.md"), "# project");

        stage_sources(workspace.path(), &[project]).expect("stage");
        assert_eq!(
            read(&workspace.path().join("project/src/main.rs")),
            "fn main() {}"
        );
        assert_eq!(read(&workspace.path().join("project/README.md")), "# project");
    }

    #[test]
    fn later_source_wins_on_collision() {
        let sources = tempdir().expect("tempdir");
        let workspace = tempdir().expect("tempdir");
        let first = sources.path().join("a/data");
        let second = sources.path().join("b/data");
        write(&first.join("shared.txt"), "from a");
        write(&second.join("shared.txt"), "from b");

        stage_sources(workspace.path(), &[first, second]).expect("stage");
        assert_eq!(read(&workspace.path().join("data/shared.txt")), "from b");
    }

    #[test]
    fn merge_preserves_existing_untouched_entries() {
        let sources = tempdir().expect("tempdir");
        let workspace = tempdir().expect("tempdir");

        // Pre-existing tracked file in the workspace, outside the staged names.
        write(&workspace.path().join("data/keep.txt"), "history");

        let incoming = sources.path().join("data");
        write(&incoming.join("new.txt"), "incoming");

        stage_sources(workspace.path(), &[incoming]).expect("stage");
        assert_eq!(read(&workspace.path().join("data/keep.txt")), "history");
        assert_eq!(read(&workspace.path().join("data/new.txt")), "incoming");
    }

    #[test]
    fn missing_source_fails_the_step() {
        let workspace = tempdir().expect("tempdir");
        let missing = workspace.path().join("vanished.txt");

        let err = stage_sources(workspace.path(), &[missing]).expect_err("must fail");
        assert!(matches!(err, UploadError::Staging { .. }));
    }

    #[test]
    fn nested_git_directory_is_not_staged() {
        let sources = tempdir().expect("tempdir");
        let workspace = tempdir().expect("tempdir");
        let project = sources.path().join("project");
        write(&project.join(".git/HEAD"), "ref: refs/heads/main");
        write(&project.join("src/lib.rs"), "pub fn lib() {}");

        stage_sources(workspace.path(), &[project]).expect("stage");
        assert!(workspace.path().join("project/src/lib.rs").exists());
        assert!(!workspace.path().join("project/.git").exists());
    }
}
