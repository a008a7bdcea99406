use std::error::Error as StdError;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unit size must be between {min} and {max}, got {value}")]
    InvalidUnitSize { value: u8, min: u8, max: u8 },

    #[error("Cowardly refusing to add archive `{}` to itself", .path.display())]
    SelfArchive { path: PathBuf },

    #[error("Cannot open archive `{}`", .path.display())]
    OpenArchive {
        path: PathBuf,
        #[source]
        source: rlebox_format::Error,
    },

    #[error("Failed to compress `{}`. Aborting", .path.display())]
    AddFile {
        path: PathBuf,
        #[source]
        source: rlebox_format::Error,
    },

    #[error("Cannot walk directory `{}`", .path.display())]
    WalkDir {
        path: PathBuf,
        #[source]
        source: jwalk::Error,
    },

    #[error("Cannot extract archive `{}`", .path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: rlebox_format::Error,
    },

    #[error("`{}` is not valid", .path.display())]
    Verify {
        path: PathBuf,
        #[source]
        source: rlebox_format::Error,
    },

    #[error("Cannot list archive `{}`", .path.display())]
    List {
        path: PathBuf,
        #[source]
        source: rlebox_format::Error,
    },
}

impl Error {
    /// Renders the error with its chain of causes, one per line.
    pub fn report(&self) -> String {
        let mut out = self.to_string();
        let mut source = StdError::source(self);
        while let Some(cause) = source {
            out.push_str(&format!("\n  caused by: {}", cause));
            source = cause.source();
        }
        out
    }
}
