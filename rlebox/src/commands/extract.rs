use std::path::PathBuf;

use rlebox_format::ArchiveReader;

use crate::error::{Error, Result};
use crate::util::format_duration;

pub fn run(archive: PathBuf, output: PathBuf, verbose: bool) -> Result<()> {
    let mut reader = ArchiveReader::open(&archive).map_err(|source| Error::OpenArchive {
        path: archive.clone(),
        source,
    })?;

    let extracted = reader
        .extract_all_with_progress(&output, |stats| {
            println!(
                "{} -> {}  {}",
                stats.header.name,
                stats.path.display(),
                format_duration(stats.elapsed),
            );
        })
        .map_err(|source| Error::Extract {
            path: archive.clone(),
            source,
        })?;

    if verbose {
        println!(
            "Extracted {} files to {}",
            extracted.len(),
            output.display()
        );
    }

    Ok(())
}
