use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// A structural field of the archive, used to report where corruption was found.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Field {
    NameLength,
    Name,
    OriginalSize,
    UnitSize,
    EncodedSize,
    RunCount,
    RunUnit,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::NameLength => "name length",
            Field::Name => "name",
            Field::OriginalSize => "original size",
            Field::UnitSize => "unit size",
            Field::EncodedSize => "encoded size",
            Field::RunCount => "run count",
            Field::RunUnit => "run unit",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Archive is corrupted (invalid or truncated {field} field).")]
    Corrupted { field: Field },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    pub fn is_corrupted(&self) -> bool {
        matches!(self, Error::Corrupted { .. })
    }

    /// Maps a failed `read_exact` of `field` to the matching error: a short read is corruption,
    /// anything else is passed through as an I/O failure.
    pub(crate) fn from_read(error: std::io::Error, field: Field) -> Error {
        match error.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::Corrupted { field },
            _ => Error::Io(error),
        }
    }
}
