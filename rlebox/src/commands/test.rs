use std::path::PathBuf;

use rlebox_format::ArchiveReader;

use crate::error::{Error, Result};

pub fn run(archive: PathBuf, verbose: bool) -> Result<()> {
    let mut reader = ArchiveReader::open(&archive).map_err(|source| Error::OpenArchive {
        path: archive.clone(),
        source,
    })?;

    let count = reader.verify_all().map_err(|source| Error::Verify {
        path: archive.clone(),
        source,
    })?;

    if verbose {
        println!("{} is valid ({} entries).", archive.display(), count);
    } else {
        println!("{} is valid.", archive.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlebox_format::{ArchiveWriter, UnitSize};

    #[test]
    fn reports_corruption_once() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("broken.rle");
        {
            let mut writer = ArchiveWriter::open(&archive).unwrap();
            for name in ["one", "two", "three"] {
                writer
                    .append(name, 6, &mut &b"xxxyyy"[..], UnitSize::ONE)
                    .unwrap();
            }
        }
        let bytes = std::fs::read(&archive).unwrap();
        std::fs::write(&archive, &bytes[..bytes.len() - 1]).unwrap();

        match run(archive, false).unwrap_err() {
            Error::Verify { source, .. } => assert!(source.is_corrupted()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn missing_archive_cannot_be_opened() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(dir.path().join("nope.rle"), false).unwrap_err();
        assert!(matches!(err, Error::OpenArchive { .. }));
    }
}
