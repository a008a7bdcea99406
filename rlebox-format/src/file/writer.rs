use std::fs::{File, OpenOptions};
use std::io::{prelude::*, BufReader, BufWriter, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::Instant;

use byteorder::{BigEndian, WriteBytesExt};

use super::AppendStats;
use crate::{fs::stored_name, rle, EntryHeader, Result, UnitSize};

/// Appends entries to the end of an archive.
///
/// Each entry is written in two phases: the header goes out with a zero `encoded_size`,
/// the payload is streamed straight after it, and the size field is then overwritten with
/// the real payload length. If writing fails part way, whatever was written stays in the
/// archive; there is no rollback.
#[derive(Debug)]
pub struct ArchiveWriter {
    pub(crate) file: BufWriter<File>,
    pub(crate) path: PathBuf,
}

impl ArchiveWriter {
    /// Opens an archive for appending, creating an empty one if it does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<ArchiveWriter> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path.as_ref())?;

        Ok(ArchiveWriter {
            file: BufWriter::new(file),
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends the file at `path`, stored under its base name.
    pub fn append_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        unit_size: UnitSize,
    ) -> Result<AppendStats> {
        let path = path.as_ref();
        let name = stored_name(path)?;
        let file = File::open(path)?;
        let original_size = file.metadata()?.len();
        let mut reader = BufReader::new(file);

        self.append(name, original_size, &mut reader, unit_size)
    }

    /// Appends one entry read from `reader`. `original_size` is recorded as given, and must
    /// match the number of bytes `reader` yields for the entry to decode correctly.
    pub fn append<S: Into<String>, R: Read>(
        &mut self,
        name: S,
        original_size: u64,
        reader: &mut R,
        unit_size: UnitSize,
    ) -> Result<AppendStats> {
        let started = Instant::now();
        let mut header = EntryHeader::new(name, original_size, unit_size)?;
        let (bytes, size_field) = header.serialize()?;

        let offset = self.file.seek(SeekFrom::End(0))?;
        self.file.write_all(&bytes)?;

        header.encoded_size = rle::encode(reader, &mut self.file, unit_size)?;
        self.backpatch(offset + size_field, header.encoded_size)?;
        self.file.flush()?;

        let stats = AppendStats {
            header,
            offset,
            elapsed: started.elapsed(),
        };

        tracing::info!(
            name = %stats.header.name,
            offset = format_args!("{:#x}", offset),
            original_size,
            encoded_size = stats.header.encoded_size,
            unit_size = unit_size.get(),
            "appended entry"
        );

        Ok(stats)
    }

    /// Overwrites the `encoded_size` field at `pos`, then returns to the end of the archive.
    fn backpatch(&mut self, pos: u64, encoded_size: u64) -> Result<()> {
        self.file.seek(SeekFrom::Start(pos))?;
        self.file.write_u64::<BigEndian>(encoded_size)?;
        self.file.seek(SeekFrom::End(0))?;
        Ok(())
    }
}
