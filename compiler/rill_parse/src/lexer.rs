//! Lexer for Rill using logos with string interning.
//!
//! Tokenization happens in two steps: a logos-derived [`RawToken`] scan,
//! then conversion to [`Token`] with identifier interning and literal
//! parsing. Spans are carried through unchanged.

use logos::Logos;
use rill_ir::{Span, StringInterner, Token, TokenKind};

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")] // Skip whitespace
#[logos(skip r"//[^\n]*")] // Skip line comments
enum RawToken {
    #[token("and")]
    And,
    #[token("else")]
    Else,
    #[token("false")]
    False,
    #[token("function")]
    Function,
    #[token("if")]
    If,
    #[token("nil")]
    Nil,
    #[token("or")]
    Or,
    #[token("print")]
    Print,
    #[token("return")]
    Return,
    #[token("true")]
    True,
    #[token("var")]
    Var,
    #[token("while")]
    While,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,

    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token("!=")]
    BangEq,
    #[token("!")]
    Bang,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    // String literal; no escape sequences, no embedded newlines.
    #[regex(r#""[^"\n\r]*""#)]
    Str,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Lexical error with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    /// The offending source slice.
    pub lexeme: String,
    pub span: Span,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unexpected character `{}`", self.lexeme)
    }
}

impl std::error::Error for LexError {}

/// Tokenize source text, interning identifiers and string literals.
///
/// Returns the token stream terminated by an `Eof` token, or the first
/// lexical error.
pub fn tokenize(source: &str, interner: &StringInterner) -> Result<Vec<Token>, LexError> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(raw) = lexer.next() {
        let span = Span::from_range(lexer.span());
        let raw = match raw {
            Ok(raw) => raw,
            Err(()) => {
                return Err(LexError {
                    lexeme: lexer.slice().to_string(),
                    span,
                });
            }
        };
        let kind = match raw {
            RawToken::And => TokenKind::And,
            RawToken::Else => TokenKind::Else,
            RawToken::False => TokenKind::False,
            RawToken::Function => TokenKind::Function,
            RawToken::If => TokenKind::If,
            RawToken::Nil => TokenKind::Nil,
            RawToken::Or => TokenKind::Or,
            RawToken::Print => TokenKind::Print,
            RawToken::Return => TokenKind::Return,
            RawToken::True => TokenKind::True,
            RawToken::Var => TokenKind::Var,
            RawToken::While => TokenKind::While,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::Eq => TokenKind::Eq,
            RawToken::BangEq => TokenKind::BangEq,
            RawToken::Bang => TokenKind::Bang,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::Gt => TokenKind::Gt,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Number => {
                // The regex only admits valid f64 syntax.
                let value = lexer.slice().parse::<f64>().unwrap_or(f64::NAN);
                TokenKind::Number(value)
            }
            RawToken::Str => {
                let slice = lexer.slice();
                // Strip the surrounding quotes.
                TokenKind::Str(interner.intern(&slice[1..slice.len() - 1]))
            }
            RawToken::Ident => TokenKind::Ident(interner.intern(lexer.slice())),
        };
        tokens.push(Token::new(kind, span));
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    tokens.push(Token::new(TokenKind::Eof, Span::new(end, end)));
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let interner = StringInterner::new();
        tokenize(source, &interner)
            .expect("lex failure")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn keywords_and_punctuation() {
        let interner = StringInterner::new();
        let tokens = tokenize("function f() { return; }", &interner).unwrap();
        let f = interner.intern("f");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Function,
                TokenKind::Ident(f),
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::Return,
                TokenKind::Semicolon,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn number_literals() {
        assert_eq!(
            kinds("10 2.5"),
            vec![
                TokenKind::Number(10.0),
                TokenKind::Number(2.5),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn string_literal_strips_quotes() {
        let interner = StringInterner::new();
        let tokens = tokenize(r#""hello""#, &interner).unwrap();
        let TokenKind::Str(name) = tokens[0].kind else {
            panic!("expected string token");
        };
        assert_eq!(interner.resolve(name), "hello");
    }

    #[test]
    fn two_char_operators_win_over_one() {
        assert_eq!(
            kinds("<= == != >="),
            vec![
                TokenKind::LtEq,
                TokenKind::EqEq,
                TokenKind::BangEq,
                TokenKind::GtEq,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn comments_and_whitespace_are_skipped() {
        assert_eq!(
            kinds("1 // comment\n2"),
            vec![
                TokenKind::Number(1.0),
                TokenKind::Number(2.0),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn identifiers_intern_to_same_name() {
        let interner = StringInterner::new();
        let tokens = tokenize("a a b", &interner).unwrap();
        assert_eq!(tokens[0].kind, tokens[1].kind);
        assert_ne!(tokens[0].kind, tokens[2].kind);
    }

    #[test]
    fn unexpected_character_is_an_error() {
        let interner = StringInterner::new();
        let err = tokenize("var x = @;", &interner).unwrap_err();
        assert_eq!(err.lexeme, "@");
        assert_eq!(err.span, Span::new(8, 9));
    }

    #[test]
    fn spans_point_at_source() {
        let interner = StringInterner::new();
        let tokens = tokenize("var x", &interner).unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 3));
        assert_eq!(tokens[1].span, Span::new(4, 5));
    }
}
