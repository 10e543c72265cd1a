use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocScanError {
    #[error("IO operation failed on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Directory traversal failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Permission denied: {path}")]
    Permission { path: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Cannot encode {path} as {encoding}")]
    Encode { path: String, encoding: String },
}

impl LocScanError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        let path = path.as_ref().display().to_string();
        if source.kind() == io::ErrorKind::PermissionDenied {
            LocScanError::Permission { path }
        } else {
            LocScanError::Io { path, source }
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        LocScanError::Config {
            message: message.into(),
        }
    }

    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            LocScanError::Config { .. } => 2,
            LocScanError::InvalidPath { .. } => 3,
            LocScanError::Permission { .. } => 4,
            _ => 1,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for LocScanError {
    fn user_message(&self) -> String {
        match self {
            LocScanError::Io { path, source } => {
                format!("Could not access {}: {}", path, source)
            }
            LocScanError::Walk(err) => match err.path() {
                Some(path) => format!("Could not read directory {}: {}", path.display(), err),
                None => format!("Directory traversal failed: {}", err),
            },
            LocScanError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            LocScanError::Permission { path } => {
                format!("Permission denied accessing: {}", path)
            }
            LocScanError::InvalidPath { path } => {
                format!("Invalid path: {}", path)
            }
            LocScanError::Encode { path, encoding } => {
                format!(
                    "Extracted text for {} contains characters that cannot be written as {}",
                    path, encoding
                )
            }
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            LocScanError::Config { .. } => Some(
                "Check the --encoding label (e.g. utf-8, windows-1252, gbk) and the --identifiers list (e.g. L,AL,C).".to_string()
            ),
            LocScanError::Permission { .. } => Some(
                "Ensure you have read access to the source tree and write access to the target directory.".to_string()
            ),
            LocScanError::InvalidPath { .. } => Some(
                "Pass an existing directory with --source, or run the tool from inside the addon folder.".to_string()
            ),
            LocScanError::Encode { .. } => Some(
                "Use an encoding that can represent every extracted string, such as utf-8.".to_string()
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LocScanError>;
