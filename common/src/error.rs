use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TabulateError {
    /// A line that did not split into the four expected fields
    #[error("line {line}: expected 4 fields (workload, database, load, run), found {tokens}: {content:?}")]
    MalformedRecord {
        line: usize,
        content: String,
        tokens: usize,
    },
    #[error("{}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("rendering table")]
    Render(#[from] csv::Error),
    #[error("reading settings {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },
}

impl TabulateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
