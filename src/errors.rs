use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Required argument missing or unparseable
    #[error("{0}")]
    Usage(String),
    /// Coordinate token that is not a `lon,lat[,alt]` pair of finite numbers
    #[error("Malformed coordinate '{token}' at byte {offset}: {reason}")]
    MalformedCoordinate {
        token: String,
        offset: usize,
        reason: String,
    },
    /// A record was started but one of its required tokens never appears
    #[error("Missing '{tag}' after byte {offset}")]
    MissingTag { tag: &'static str, offset: usize },
    /// Name wrapper with nothing but whitespace inside
    #[error("Empty timezone name at byte {offset}")]
    EmptyName { offset: usize },
    /// Coordinate block without a single point
    #[error("Empty coordinate block at byte {offset}")]
    EmptyRing { offset: usize },
    /// Config file could not be parsed or holds invalid values
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    /// IO operation failed
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// JSON encoding failed
    #[error("Failed to write JSON to {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by the content of the input document.
    pub fn is_malformed_data(&self) -> bool {
        matches!(
            self,
            AppError::MalformedCoordinate { .. }
                | AppError::MissingTag { .. }
                | AppError::EmptyName { .. }
                | AppError::EmptyRing { .. }
        )
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Usage(_) => 2,
            _ => 1,
        }
    }
}

impl From<clap::Error> for AppError {
    fn from(err: clap::Error) -> Self {
        AppError::Usage(err.to_string().trim_end().to_string())
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
