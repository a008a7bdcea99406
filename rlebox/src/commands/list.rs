use std::path::PathBuf;

use rlebox_format::ArchiveReader;

use crate::error::{Error, Result};
use crate::util::{format_ratio, format_size};

pub fn run(archive: PathBuf, verbose: bool) -> Result<()> {
    let mut reader = ArchiveReader::open(&archive).map_err(|source| Error::OpenArchive {
        path: archive.clone(),
        source,
    })?;

    let headers = reader.list_all().map_err(|source| Error::List {
        path: archive.clone(),
        source,
    })?;

    println!("Unit  Encoded       Original      Ratio     Name");
    println!("----  ------------  ------------  --------  --------");
    for header in headers.iter() {
        println!(
            "{:>4}  {:>12}  {:>12}  {:>8}  {}",
            header.unit_size,
            format_size(header.encoded_size),
            format_size(header.original_size),
            format_ratio(header.ratio()),
            header.name,
        );
    }

    if verbose {
        let encoded: u64 = headers.iter().map(|h| h.encoded_size).sum();
        let original: u64 = headers.iter().map(|h| h.original_size).sum();
        println!(
            "\n{} entries, {} encoded, {} original",
            headers.len(),
            format_size(encoded),
            format_size(original)
        );
    }

    Ok(())
}
