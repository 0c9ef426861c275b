//! Lexer implementation using logos

mod token;

pub use token::Token;

use crate::ast::Span;
use crate::error::{CheeseError, Result};
use logos::Logos;

/// Keyword pair that delimits string literals
const STRING_DELIM: &str = "Swiss";

/// Tokenize source code.
///
/// String literals are paired up first: the text between the Nth and
/// N+1th `Swiss` becomes one [`Token::Str`], and logos lexes the code
/// fragments in between. Pairing before logos runs keeps a delimiter
/// glued to its content (`SwissHello, WorldSwiss`) from being matched
/// as an identifier.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(rel) = source[pos..].find(STRING_DELIM) {
        let open = pos + rel;
        lex_fragment(&source[pos..open], pos, &mut tokens)?;

        let content_start = open + STRING_DELIM.len();
        let Some(rel_close) = source[content_start..].find(STRING_DELIM) else {
            return Err(CheeseError::lexer(
                "unterminated Swiss string",
                Span::new(open, source.len()),
            ));
        };
        let close = content_start + rel_close;
        tokens.push((
            Token::Str(source[content_start..close].to_string()),
            Span::new(open, close + STRING_DELIM.len()),
        ));
        pos = close + STRING_DELIM.len();
    }

    lex_fragment(&source[pos..], pos, &mut tokens)?;
    Ok(tokens)
}

/// Run logos over one string-free fragment, offsetting spans by `base`
fn lex_fragment(fragment: &str, base: usize, out: &mut Vec<(Token, Span)>) -> Result<()> {
    let mut lexer = Token::lexer(fragment);

    while let Some(result) = lexer.next() {
        let span = Span::new(base + lexer.span().start, base + lexer.span().end);
        match result {
            Ok(token) => out.push((token, span)),
            Err(_) => {
                return Err(CheeseError::lexer(
                    format!("unexpected character: {:?}", lexer.slice()),
                    span,
                ));
            }
        }
    }

    Ok(())
}
