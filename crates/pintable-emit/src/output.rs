//! Atomic output file replacement.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{EmitError, Result};

/// Replace `path` with `contents` in one step.
///
/// The text goes to a temporary file next to the destination, which is then
/// renamed over it, so readers see either the old table or the new one and a
/// failed run leaves no partial file behind. Missing parent directories are
/// created.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let access = |source: std::io::Error| EmitError::FileAccess {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(access)?;

    let mut staged = tempfile::NamedTempFile::new_in(&dir).map_err(access)?;
    staged.write_all(contents.as_bytes()).map_err(access)?;
    staged.as_file().sync_all().map_err(access)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o644);
        staged.as_file().set_permissions(perms).map_err(access)?;
    }

    staged.persist(path).map_err(|err| access(err.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pins.c");
        write_atomic(&path, "// table\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "// table\n");
    }

    #[test]
    fn truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pins.c");
        std::fs::write(&path, "a much longer stale table body\n").unwrap();
        write_atomic(&path, "new\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build").join("genhdr").join("pins.c");
        write_atomic(&path, "x").unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn directory_destination_is_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_atomic(dir.path(), "x").unwrap_err();
        assert!(matches!(err, EmitError::FileAccess { .. }));
    }
}
