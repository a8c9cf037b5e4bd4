use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that cost a whole input file. None of them stop a run.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot open {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot walk {}: {}", .path.display(), .message)]
    Walk { path: PathBuf, message: String },
}

impl LoadError {
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::Open { path, .. }
            | LoadError::Read { path, .. }
            | LoadError::Walk { path, .. } => path,
        }
    }
}

/// Diagnostic for an input file that was left out of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

impl From<&LoadError> for SkippedFile {
    fn from(error: &LoadError) -> Self {
        Self {
            path: error.path().clone(),
            reason: error.to_string(),
        }
    }
}
