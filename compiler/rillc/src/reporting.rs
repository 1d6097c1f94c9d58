//! Human-readable error reporting with source locations.

use crate::pipeline::RunFailure;

/// 1-based line and column for a byte offset into `source`.
///
/// Offsets past the end of the source resolve to the last position,
/// which is where end-of-input errors point.
pub fn line_col(source: &str, offset: u32) -> (u32, u32) {
    let offset = (offset as usize).min(source.len());
    let mut line = 1u32;
    let mut col = 1u32;
    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// Render a failure as an error message with an arrow line when a
/// source location is known.
pub fn render(source: &str, path: &str, failure: &RunFailure) -> String {
    match failure.span {
        Some(span) => {
            let (line, col) = line_col(source, span.start);
            format!("error: {}\n  --> {path}:{line}:{col}", failure.message)
        }
        None => format!("error: {}", failure.message),
    }
}

/// Report a failure to stderr.
pub fn report(source: &str, path: &str, failure: &RunFailure) {
    eprintln!("{}", render(source, path, failure));
}
