use std::fmt;

/// Result type for synctrace-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the engine layer
///
/// Entry-level parse problems never surface here; they are collected as
/// issue strings inside the analysis result. Only terminal conditions
/// (wrong input family, unreadable source) abort an invocation.
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// Input does not look like this log family at all
    UnrecognizedFormat(String),

    /// Right shape, but the process column never names the agent
    WrongProduct(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::UnrecognizedFormat(msg) => write!(f, "Unrecognized format: {}", msg),
            Error::WrongProduct(msg) => write!(f, "Wrong product: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::UnrecognizedFormat(_) | Error::WrongProduct(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
