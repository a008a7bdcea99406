use std::path::{Path, PathBuf};

use rlebox_format::{AppendStats, ArchiveWriter, UnitSize};

use crate::error::{Error, Result};
use crate::util::{format_duration, format_ratio};

/// Unit sizes accepted on the command line. The format itself allows up to 255.
pub const MIN_UNIT_SIZE: u8 = 1;
pub const MAX_UNIT_SIZE: u8 = 16;

pub fn check_unit_size(value: u8) -> Result<UnitSize> {
    if !(MIN_UNIT_SIZE..=MAX_UNIT_SIZE).contains(&value) {
        return Err(Error::InvalidUnitSize {
            value,
            min: MIN_UNIT_SIZE,
            max: MAX_UNIT_SIZE,
        });
    }

    UnitSize::new(value).map_err(|_| Error::InvalidUnitSize {
        value,
        min: MIN_UNIT_SIZE,
        max: MAX_UNIT_SIZE,
    })
}

pub fn run(archive: PathBuf, files: Vec<PathBuf>, unit_size: u8, verbose: bool) -> Result<()> {
    let unit_size = check_unit_size(unit_size)?;

    if files.contains(&archive) {
        return Err(Error::SelfArchive { path: archive });
    }

    let mut writer = ArchiveWriter::open(&archive).map_err(|source| Error::OpenArchive {
        path: archive.clone(),
        source,
    })?;
    let archive_path = archive.canonicalize().ok();

    for path in files {
        if path.is_dir() {
            for entry in jwalk::WalkDir::new(&path).sort(true).skip_hidden(false) {
                let entry = entry.map_err(|source| Error::WalkDir {
                    path: path.clone(),
                    source,
                })?;
                let file_path = entry.path();
                if !file_path.is_file() {
                    continue;
                }
                if is_same_file(&file_path, archive_path.as_deref()) {
                    tracing::warn!(path = %file_path.display(), "skipping the archive itself");
                    continue;
                }
                add(&mut writer, &file_path, unit_size, verbose)?;
            }
        } else {
            if is_same_file(&path, archive_path.as_deref()) {
                return Err(Error::SelfArchive { path });
            }
            add(&mut writer, &path, unit_size, verbose)?;
        }
    }

    Ok(())
}

fn add(writer: &mut ArchiveWriter, path: &Path, unit_size: UnitSize, verbose: bool) -> Result<()> {
    let stats = writer
        .append_file(path, unit_size)
        .map_err(|source| Error::AddFile {
            path: path.to_path_buf(),
            source,
        })?;
    report(path, &stats, verbose);
    Ok(())
}

fn report(path: &Path, stats: &AppendStats, verbose: bool) {
    println!(
        "{}  {}  unit {}  ratio {}",
        path.display(),
        format_duration(stats.elapsed),
        stats.header.unit_size,
        format_ratio(stats.ratio()),
    );

    if verbose {
        println!(
            "    {} -> {} bytes at offset {:#x}",
            stats.header.original_size, stats.header.encoded_size, stats.offset
        );
    }
}

fn is_same_file(path: &Path, archive: Option<&Path>) -> bool {
    match (archive, path.canonicalize()) {
        (Some(archive), Ok(path)) => archive == path,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_size_policy() {
        assert!(matches!(
            check_unit_size(0),
            Err(Error::InvalidUnitSize { value: 0, .. })
        ));
        assert_eq!(check_unit_size(1).unwrap().get(), 1);
        assert_eq!(check_unit_size(16).unwrap().get(), 16);
        assert!(check_unit_size(17).is_err());
        assert!(check_unit_size(255).is_err());
    }

    #[test]
    fn compress_walks_directories() {
        let dir = tempfile::tempdir().unwrap();
        let tree = dir.path().join("tree");
        std::fs::create_dir_all(tree.join("nested")).unwrap();
        std::fs::write(tree.join("a.txt"), b"aaaa").unwrap();
        std::fs::write(tree.join("nested").join("b.txt"), b"bbbbbb").unwrap();
        std::fs::write(tree.join(".hidden"), b"h").unwrap();

        let archive = dir.path().join("out.rle");
        run(archive.clone(), vec![tree], 2, false).unwrap();

        let mut names = rlebox_format::ArchiveReader::open(&archive)
            .unwrap()
            .list_all()
            .unwrap()
            .into_iter()
            .map(|h| h.name)
            .collect::<Vec<_>>();
        names.sort();
        assert_eq!(names, vec![".hidden", "a.txt", "b.txt"]);
    }

    #[test]
    fn compress_refuses_archive_itself() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("self.rle");
        std::fs::write(&archive, b"").unwrap();

        let err = run(archive.clone(), vec![archive.clone()], 1, false).unwrap_err();
        assert!(matches!(err, Error::SelfArchive { .. }));
    }

    #[test]
    fn compress_stops_at_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.txt");
        std::fs::write(&good, b"fine").unwrap();
        let missing = dir.path().join("missing.txt");
        let archive = dir.path().join("out.rle");

        let err = run(
            archive.clone(),
            vec![good.clone(), missing, good],
            1,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, Error::AddFile { .. }));

        let headers = rlebox_format::ArchiveReader::open(&archive)
            .unwrap()
            .list_all()
            .unwrap();
        assert_eq!(headers.len(), 1);
    }
}
