//! Filesystem side of generation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::diagnostic::{GeneratorError, Result};
use crate::ir::Identifier;

/// Directory for a namespace: one path component per segment.
pub fn namespace_dir(root: &Path, namespace: &Identifier) -> PathBuf {
    namespace
        .segments()
        .into_iter()
        .fold(root.to_path_buf(), |dir, segment| dir.join(segment))
}

/// Creates `dir` and any missing parents. Existing directories are fine.
pub fn ensure_directory(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| GeneratorError::io(dir, e.to_string()))
}

/// Writes `header` followed by `body` to `path`.
///
/// The content goes to a temporary file next to `path` first and is renamed
/// into place, so a reader sees either the previous file or the complete new
/// one. On failure the temporary file is removed when it is dropped.
pub fn write_file(path: &Path, header: &str, body: &str) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| GeneratorError::io(path, "path has no parent directory"))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| GeneratorError::io(dir, e.to_string()))?;
    tmp.write_all(header.as_bytes())
        .and_then(|_| tmp.write_all(body.as_bytes()))
        .and_then(|_| tmp.flush())
        .map_err(|e| GeneratorError::io(tmp.path(), e.to_string()))?;

    // NamedTempFile creates 0600 files; generated sources should be readable
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o644))
            .map_err(|e| GeneratorError::io(tmp.path(), e.to_string()))?;
    }

    tmp.persist(path).map_err(|e| GeneratorError::io(path, e.error.to_string()))?;

    debug!(path = %path.display(), bytes = header.len() + body.len(), "wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_namespace_dir() {
        let root = Path::new("out");
        assert_eq!(
            namespace_dir(root, &Identifier::parse("com.example.api")),
            Path::new("out/com/example/api")
        );
        assert_eq!(namespace_dir(root, &Identifier::simple("thrift")), Path::new("out/thrift"));
    }

    #[test]
    fn test_ensure_directory_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a").join("b");
        ensure_directory(&dir).unwrap();
        ensure_directory(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_write_file_replaces_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Foo.scala");

        write_file(&path, "// header\n", "old").unwrap();
        write_file(&path, "// header\n", "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "// header\nnew");
        let entries = fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(entries, 1, "temporary file left behind");
    }

    #[test]
    fn test_write_file_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("Foo.scala");
        let err = write_file(&path, "", "body").unwrap_err();
        assert!(matches!(err, GeneratorError::Io { .. }));
    }
}
