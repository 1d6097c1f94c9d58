//! The `tokens` command: dump the token stream of a source file.
//!
//! Debugging aid for inspecting what the lexer produced.

use rill_ir::StringInterner;
use rill_parse::tokenize;

use super::read_file;
use crate::pipeline::RunFailure;
use crate::reporting;

/// Print one token per line with its span. Returns the process exit
/// code.
pub fn tokens_file(path: &str) -> i32 {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };

    let interner = StringInterner::new();
    match tokenize(&source, &interner) {
        Ok(tokens) => {
            for token in tokens {
                let (line, col) = reporting::line_col(&source, token.span.start);
                println!("{line}:{col}\t{:?}", token.kind);
            }
            0
        }
        Err(err) => {
            reporting::report(
                &source,
                path,
                &RunFailure {
                    message: err.to_string(),
                    span: Some(err.span),
                },
            );
            1
        }
    }
}
