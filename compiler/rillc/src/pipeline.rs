//! Source-to-result pipeline shared by commands and tests.

use rill_eval::{InterpreterBuilder, SharedPrintHandler};
use rill_ir::{Span, StringInterner};
use rill_parse::{parse, tokenize};

/// A failed run, normalized across pipeline stages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunFailure {
    pub message: String,
    /// Source location, when the failing stage knew one.
    pub span: Option<Span>,
}

/// Lex, parse, and evaluate `source`, printing through `print`.
///
/// Stops at the first error of any stage. All three error shapes
/// (lex, parse, eval) are reduced to [`RunFailure`] for reporting.
pub fn run_source(source: &str, print: SharedPrintHandler) -> Result<(), RunFailure> {
    let interner = StringInterner::new();

    let tokens = tokenize(source, &interner).map_err(|err| RunFailure {
        message: err.to_string(),
        span: Some(err.span),
    })?;

    let ast = parse(&tokens).map_err(|err| RunFailure {
        message: err.to_string(),
        span: Some(err.span),
    })?;

    let mut interpreter = InterpreterBuilder::new(&interner, &ast)
        .print_handler(print)
        .build();
    interpreter.run().map_err(|err| RunFailure {
        message: err.to_string(),
        span: err.span,
    })
}
