//! CLI commands.

mod run;
mod tokens;

pub use run::run_file;
pub use tokens::tokens_file;

use thiserror::Error;

/// Driver-level failure before the pipeline starts.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cannot read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read a source file into memory.
fn read_file(path: &str) -> Result<String, DriverError> {
    std::fs::read_to_string(path).map_err(|source| DriverError::ReadFile {
        path: path.to_string(),
        source,
    })
}
