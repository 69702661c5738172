/// Failures of the history normalizer and document splicing.
///
/// These are terminal for the call that raised them: no partial results are
/// returned and malformed entries are never skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    /// A key could not be read as an epoch integer or a formatted datetime.
    #[error("malformed timestamp key '{key}'")]
    MalformedTimestamp { key: String },
    /// Negative look-back window.
    #[error("invalid interval: {days} days (must be >= 0)")]
    InvalidInterval { days: i64 },
    /// A splice/resolve path does not exist in the document.
    #[error("path not found in document: '{path}'")]
    PathNotFound { path: String },
}

impl HistoryError {
    pub(crate) fn malformed(key: &str) -> Self {
        Self::MalformedTimestamp {
            key: key.to_string(),
        }
    }

    pub(crate) fn path_not_found(path: &[&str]) -> Self {
        Self::PathNotFound {
            path: path.join("."),
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<HistoryError> for AppError {
    fn from(err: HistoryError) -> Self {
        AppError::new(3, format!("Unexpected upstream payload: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
