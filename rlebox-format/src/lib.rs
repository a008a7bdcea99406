//! Herein lies the brains of the `rlebox` archive format.
//!
//! An archive is a plain concatenation of entries, each one an [EntryHeader][EntryHeader]
//! followed by a run-length encoded payload. There is no global header, index or trailer;
//! the end of the archive is the end of the file.
//!
//! Use [ArchiveWriter][ArchiveWriter] to append files, and [ArchiveReader][ArchiveReader]
//! to list, verify or extract them.

mod de;
mod error;
pub mod file;
pub mod fs;
mod header;
pub mod rle;
mod ser;
mod unit;

pub use error::{Error, Field, Result};
pub use file::{AppendStats, ArchiveReader, ArchiveWriter, ExtractStats};
pub use header::EntryHeader;
pub use unit::UnitSize;
