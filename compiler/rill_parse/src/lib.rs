//! Rill Parse - lexer and recursive descent parser.
//!
//! Turns source text into the flat [`rill_ir::Ast`] arena in two steps:
//! [`tokenize`] (logos-based, interning identifiers) and [`parse`].

mod error;
mod lexer;
mod parser;

pub use error::{ParseError, ParseErrorKind};
pub use lexer::{tokenize, LexError};
pub use parser::parse;
