//! Rill driver library.
//!
//! Backs the `rill` binary: the source-to-result [`pipeline`], the CLI
//! [`commands`], and error [`reporting`] with line/column locations.

pub mod commands;
pub mod pipeline;
pub mod reporting;

pub use pipeline::{run_source, RunFailure};
