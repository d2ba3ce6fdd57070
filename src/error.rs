use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("{file} is not valid UTF-8: {source}")]
    Decoding {
        file: String,
        #[source]
        source: FromUtf8Error,
    },

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write sheet '{sheet}': {source}")]
    Workbook {
        sheet: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("Failed to serialize workbook: {0}")]
    Save(#[source] rust_xlsxwriter::XlsxError),

    #[error("Invalid header pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Header pattern '{pattern}' needs two capture groups (speaker, timestamp)")]
    HeaderGroups { pattern: String },
}

impl ConvertError {
    /// Name of the source file for per-file failures
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Self::Decoding { file, .. } => Some(file),
            _ => None,
        }
    }
}
