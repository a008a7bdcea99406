//! Filesystem helpers for naming stored and extracted entries.

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// The name an entry is stored under: the final component of `path`.
pub fn stored_name(path: &Path) -> Result<String> {
    let name = path.file_name().ok_or_else(|| {
        Error::InvalidArgument(format!("`{}` has no file name", path.display()))
    })?;

    name.to_str().map(str::to_string).ok_or_else(|| {
        Error::InvalidArgument(format!("`{}` is not valid UTF-8", path.display()))
    })
}

/// Finds a path in `dir` for an entry called `name` that does not exist yet.
///
/// Tries `name` first, then inserts `_1`, `_2`, ... before the extension until a free
/// path is found. Names that would escape `dir` are rejected.
pub fn available_path(dir: &Path, name: &str) -> Result<PathBuf> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => {}
        _ => {
            return Err(Error::InvalidArgument(format!(
                "`{}` is not a plain file name",
                name
            )))
        }
    }

    let candidate = dir.join(name);
    if !candidate.exists() {
        return Ok(candidate);
    }

    let path = Path::new(name);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(name);
    let extension = path.extension().and_then(|s| s.to_str());

    (1u64..)
        .map(|i| match extension {
            Some(ext) => dir.join(format!("{}_{}.{}", stem, i, ext)),
            None => dir.join(format!("{}_{}", stem, i)),
        })
        .find(|candidate| !candidate.exists())
        .ok_or_else(|| Error::InvalidArgument(format!("no free name for `{}`", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_name_strips_directories() {
        assert_eq!(
            stored_name(Path::new("some/dir/file.bin")).unwrap(),
            "file.bin"
        );
        assert!(stored_name(Path::new("/")).is_err());
    }

    #[test]
    fn available_path_suffixes_before_extension() {
        let dir = tempfile::tempdir().unwrap();

        let first = available_path(dir.path(), "report.txt").unwrap();
        assert_eq!(first, dir.path().join("report.txt"));
        std::fs::write(&first, b"").unwrap();

        let second = available_path(dir.path(), "report.txt").unwrap();
        assert_eq!(second, dir.path().join("report_1.txt"));
        std::fs::write(&second, b"").unwrap();

        assert_eq!(
            available_path(dir.path(), "report.txt").unwrap(),
            dir.path().join("report_2.txt")
        );
    }

    #[test]
    fn available_path_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".profile"), b"").unwrap();
        assert_eq!(
            available_path(dir.path(), ".profile").unwrap(),
            dir.path().join(".profile_1")
        );
    }

    #[test]
    fn available_path_rejects_escapes() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["../evil", "a/b", "/etc/passwd", "..", ""] {
            assert!(
                matches!(
                    available_path(dir.path(), name),
                    Err(Error::InvalidArgument(_))
                ),
                "{:?}",
                name
            );
        }
    }
}
