use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CookieError {
    // File Errors
    #[error("Line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
    #[error("Unable to read cookies from {}: {source}", path.display())]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Unable to write cookies to {}: {source}", path.display())]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // Backend Errors
    #[error("Cookie backend used before prepare()")]
    BackendNotPrepared,
    #[error("Cookie backend error: {message}")]
    Backend { message: String },
}

impl CookieError {
    pub fn malformed_line(line: usize, reason: impl Into<String>) -> Self {
        CookieError::MalformedLine {
            line,
            reason: reason.into(),
        }
    }

    pub fn load_failed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CookieError::LoadFailed {
            path: path.into(),
            source,
        }
    }

    pub fn save_failed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CookieError::SaveFailed {
            path: path.into(),
            source,
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        CookieError::Backend {
            message: message.into(),
        }
    }

    /// True for failures caused by the filesystem rather than by content or storage.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            CookieError::LoadFailed { .. } | CookieError::SaveFailed { .. }
        )
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for CookieError {
    fn from(err: rusqlite::Error) -> Self {
        CookieError::Backend {
            message: err.to_string(),
        }
    }
}
