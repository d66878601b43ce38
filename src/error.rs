use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a report run.
///
/// Bad cells are not errors: they become missing values at load time.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("required column '{0}' not found in header")]
    MissingColumn(String),

    #[error("line {line}: {found} fields, header has {expected}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("image encoding: {0}")]
    Image(#[from] image::ImageError),
}

impl ReportError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
