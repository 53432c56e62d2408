use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// A required column is missing or a value cannot be parsed. Aborts the load.
    #[error("data format error{}: {message}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    DataFormat { line: Option<u64>, message: String },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("unable to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DashboardError {
    pub fn data_format(line: Option<u64>, message: impl Into<String>) -> Self {
        Self::DataFormat {
            line,
            message: message.into(),
        }
    }

    /// Whether the error was caused by the caller's parameters rather than the data.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidParameter(_))
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
