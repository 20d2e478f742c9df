use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::period::Period;

/// Prefix used when a failure is surfaced to the user.
pub const ERROR_PREFIX: &str = "✘ error ... ";

#[derive(Debug)]
pub enum MemoError {
    /// Malformed JSON in a memo or index stream.
    Decode(serde_json::Error),
    Encode(serde_json::Error),
    /// No index entry under this hash.
    NotFound(String),
    FileNotFound(PathBuf),
    Io {
        path: PathBuf,
        source: io::Error,
    },
    /// Timestamp does not match `DD.MM.YYYY hh:mm:ss`.
    Format {
        value: String,
        source: Option<chrono::ParseError>,
    },
    UnknownPeriod(String),
    /// The period is valid but has no filter behind it yet.
    PeriodNotImplemented(Period),
    Config {
        path: PathBuf,
        message: String,
    },
}

impl MemoError {
    /// Wrap an I/O error, promoting `NotFound` to [`MemoError::FileNotFound`].
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            MemoError::FileNotFound(path)
        } else {
            MemoError::Io { path, source }
        }
    }
}

impl fmt::Display for MemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoError::Decode(e) => write!(f, "decode failed: {e}"),
            MemoError::Encode(e) => write!(f, "encode failed: {e}"),
            MemoError::NotFound(hash) => write!(f, "index entry for key {hash} does not exist"),
            MemoError::FileNotFound(path) => write!(f, "no such file: {}", path.display()),
            MemoError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            MemoError::Format {
                value,
                source: Some(source),
            } => write!(f, "invalid timestamp {value:?}: {source}"),
            MemoError::Format { value, source: None } => {
                write!(f, "invalid timestamp {value:?}: want DD.MM.YYYY hh:mm:ss")
            }
            MemoError::UnknownPeriod(p) => write!(f, "unknown period {p}"),
            MemoError::PeriodNotImplemented(p) => {
                write!(f, "period {:?} is not implemented yet", p.as_str())
            }
            MemoError::Config { path, message } => {
                write!(f, "invalid config {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for MemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MemoError::Decode(e) | MemoError::Encode(e) => Some(e),
            MemoError::Io { source, .. } => Some(source),
            MemoError::Format {
                source: Some(source),
                ..
            } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MemoError>;

/// An error with a human-facing prefix, as handed to the front end.
#[derive(Debug)]
pub struct MaskedError {
    pub prefix: String,
    pub source: MemoError,
}

impl MaskedError {
    pub fn new(source: MemoError) -> Self {
        Self {
            prefix: ERROR_PREFIX.to_string(),
            source,
        }
    }
}

impl From<MemoError> for MaskedError {
    fn from(e: MemoError) -> Self {
        MaskedError::new(e)
    }
}

impl fmt::Display for MaskedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.source)
    }
}

impl std::error::Error for MaskedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
