use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the generator. None of them are recovered locally,
/// the binary logs them and exits non-zero.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or conflicting command-line directives.
    #[error("argument error: {0}")]
    Argument(String),
    /// The catalog is incomplete or inconsistent.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A TOML document could not be parsed.
    #[error("could not parse {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: toml::de::Error,
    },
    /// A file could not be read, created or written.
    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
