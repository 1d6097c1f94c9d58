//! The `run` command: lex, parse, and evaluate a Rill source file.

use rill_eval::stdout_handler;

use super::read_file;
use crate::pipeline::run_source;
use crate::reporting;

/// Run a Rill source file, reporting any error with its source
/// location. Returns the process exit code.
pub fn run_file(path: &str) -> i32 {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };
    tracing::debug!(path, bytes = source.len(), "running file");

    match run_source(&source, stdout_handler()) {
        Ok(()) => 0,
        Err(failure) => {
            reporting::report(&source, path, &failure);
            1
        }
    }
}
