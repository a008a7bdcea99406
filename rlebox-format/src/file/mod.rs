use std::path::PathBuf;
use std::time::Duration;

use crate::EntryHeader;

pub mod reader;
pub mod writer;

pub use self::reader::ArchiveReader;
pub use self::writer::ArchiveWriter;

/// Outcome of appending one entry.
#[derive(Debug, Clone)]
pub struct AppendStats {
    /// The header as written, with the backpatched `encoded_size`.
    pub header: EntryHeader,
    /// Where in the archive the entry's header starts.
    pub offset: u64,
    pub elapsed: Duration,
}

impl AppendStats {
    /// `encoded_size / original_size`, or `None` for empty files.
    #[inline(always)]
    pub fn ratio(&self) -> Option<f64> {
        self.header.ratio()
    }
}

/// Outcome of extracting one entry.
#[derive(Debug, Clone)]
pub struct ExtractStats {
    pub header: EntryHeader,
    /// Where the entry was written, after collision avoidance.
    pub path: PathBuf,
    pub elapsed: Duration,
}
