use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Filesystem operation that failed, rendered the way the syscall is named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    CreateDir,
    WriteFile,
}

impl fmt::Display for FsOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsOp::CreateDir => f.write_str("mkdir"),
            FsOp::WriteFile => f.write_str("write"),
        }
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Status Code: {code}. Status message: {message} ({url})")]
    HttpStatus {
        code: u16,
        message: String,
        url: String,
    },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{op} '{}': {source}", path.display())]
    Filesystem {
        op: FsOp,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    Client(reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Report error: {0}")]
    Report(#[from] serde_json::Error),
}

impl LoadError {
    pub fn filesystem(op: FsOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Filesystem {
            op,
            path: path.into(),
            source,
        }
    }

    /// Status code carried by the error, if it came from an HTTP response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LoadError::HttpStatus { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn http_status_message_format() {
        let err = LoadError::HttpStatus {
            code: 500,
            message: "Internal Server Error".to_string(),
            url: "https://ru.hexlet.io/assets/application.css".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Status Code: 500. Status message: Internal Server Error (https://ru.hexlet.io/assets/application.css)"
        );
        assert_eq!(err.status_code(), Some(500));
    }

    #[test]
    fn filesystem_message_names_op_and_path() {
        let err = LoadError::filesystem(
            FsOp::CreateDir,
            "/tmp/out/ru-hexlet-io-courses_files",
            io::Error::from(io::ErrorKind::AlreadyExists),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("mkdir '/tmp/out/ru-hexlet-io-courses_files'"), "{msg}");
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn invalid_url_message() {
        let err = LoadError::InvalidUrl("wrong-url".to_string());
        assert_eq!(err.to_string(), "Invalid URL: wrong-url");
    }
}
