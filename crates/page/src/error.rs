use std::path::PathBuf;

use crate::host::HostError;

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("config error: {message}")]
    Config { message: String },

    #[error("invalid selector {selector:?} for {field}: {source}")]
    Selector {
        field: &'static str,
        selector: String,
        source: css::SelectorError,
    },

    #[error("invalid search pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("clipboard copy failed: {0}")]
    Clipboard(String),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PageError>;

impl PageError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
