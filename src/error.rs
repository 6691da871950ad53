//! Error types shared by the pipeline phases.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("unknown text encoding: {0}")]
    Encoding(String),

    #[error("invalid settings in {}: {message}", path.display())]
    Settings { path: PathBuf, message: String },

    #[error("no report files were produced (check that subject code, grade-level and class formats agree)")]
    NoReports,

    #[error("mail to {recipient} failed: {message}")]
    Mail { recipient: String, message: String },
}

impl ReportError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
