use std::fs::File;
use std::io::{prelude::*, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::ExtractStats;
use crate::{fs::available_path, rle, EntryHeader, Error, Field, Result};

/// Sequentially scans an archive from start to end.
///
/// Entries have no index, so every operation walks the archive entry by entry. The scan
/// ends cleanly when the read position lands exactly on the end of the file; anything
/// cut short on the way is reported as [`Error::Corrupted`] and stops the scan.
#[derive(Debug)]
pub struct ArchiveReader {
    pub(crate) file: BufReader<File>,
    pub(crate) path: PathBuf,
    pub(crate) len: u64,
}

impl ArchiveReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<ArchiveReader> {
        let file = File::open(path.as_ref())?;
        let len = file.metadata()?.len();

        Ok(ArchiveReader {
            file: BufReader::new(file),
            path: path.as_ref().to_path_buf(),
            len,
        })
    }

    #[inline(always)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Length of the archive in bytes when it was opened.
    #[inline(always)]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reads the header at the current position, or `None` at the end of the archive.
    pub fn next_header(&mut self) -> Result<Option<EntryHeader>> {
        if self.file.stream_position()? == self.len {
            return Ok(None);
        }
        EntryHeader::deserialize(&mut self.file).map(Some)
    }

    /// Moves past the payload of `header` without decoding it.
    pub fn skip_payload(&mut self, header: &EntryHeader) -> Result<()> {
        let offset = i64::try_from(header.encoded_size).map_err(|_| Error::Corrupted {
            field: Field::EncodedSize,
        })?;
        self.file.seek_relative(offset)?;
        Ok(())
    }

    /// Decodes the payload of `header` into `writer`.
    pub fn decode_payload<W: Write>(&mut self, header: &EntryHeader, writer: &mut W) -> Result<()> {
        rle::decode(
            &mut self.file,
            writer,
            header.unit_size,
            header.encoded_size,
            header.original_size,
        )
    }

    /// Lists every entry, skipping over payloads.
    pub fn list_all(&mut self) -> Result<Vec<EntryHeader>> {
        let mut headers = vec![];
        self.scan(|reader, header| {
            reader.skip_payload(&header)?;
            headers.push(header);
            Ok(())
        })?;
        Ok(headers)
    }

    /// Decodes every payload and throws the output away, returning the number of entries
    /// checked.
    pub fn verify_all(&mut self) -> Result<usize> {
        let mut count = 0;
        self.scan(|reader, header| {
            reader.decode_payload(&header, &mut std::io::sink())?;
            count += 1;
            Ok(())
        })?;
        tracing::info!(path = %self.path.display(), entries = count, "verified archive");
        Ok(count)
    }

    /// Extracts every entry into `dir`, which is created if needed. Entries whose name is
    /// already taken in `dir` get a numbered suffix instead of overwriting anything.
    pub fn extract_all<P: AsRef<Path>>(&mut self, dir: P) -> Result<Vec<ExtractStats>> {
        self.extract_all_with_progress(dir, |_| {})
    }

    /// Like [`extract_all`][Self::extract_all], calling `progress` after each entry.
    pub fn extract_all_with_progress<P, F>(
        &mut self,
        dir: P,
        mut progress: F,
    ) -> Result<Vec<ExtractStats>>
    where
        P: AsRef<Path>,
        F: FnMut(&ExtractStats),
    {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let mut extracted = vec![];
        self.scan(|reader, header| {
            let started = Instant::now();
            let path = available_path(dir, &header.name)?;

            let mut out = BufWriter::new(File::create(&path)?);
            reader.decode_payload(&header, &mut out)?;
            out.flush()?;

            let stats = ExtractStats {
                header,
                path,
                elapsed: started.elapsed(),
            };
            tracing::info!(
                name = %stats.header.name,
                path = %stats.path.display(),
                "extracted entry"
            );
            progress(&stats);
            extracted.push(stats);
            Ok(())
        })?;

        Ok(extracted)
    }

    /// Walks the archive from the start, handing each header to `visit`, which must consume
    /// that entry's payload.
    fn scan<F>(&mut self, mut visit: F) -> Result<()>
    where
        F: FnMut(&mut Self, EntryHeader) -> Result<()>,
    {
        self.file.rewind()?;
        while let Some(header) = self.next_header()? {
            visit(self, header)?;
        }
        Ok(())
    }
}
