use std::io;
use std::path::PathBuf;

use itertools::Itertools;
use thiserror::Error;

/// every failure aborts the whole batch, files processed before it stay rewritten
#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("Failed to read file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unbalanced markers in {}:\n{}", .path.display(), .problems.iter().join("\n"))]
    UnbalancedMarkers {
        path: PathBuf,
        /// located problems, formatted as `file:line:column: message`
        problems: Vec<String>,
    },
}

impl PreprocessError {
    /// path of the file that caused the batch to stop
    pub fn path(&self) -> &PathBuf {
        match self {
            PreprocessError::Read { path, .. } => path,
            PreprocessError::Write { path, .. } => path,
            PreprocessError::UnbalancedMarkers { path, .. } => path,
        }
    }
}
