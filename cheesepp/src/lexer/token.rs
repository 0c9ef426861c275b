//! Token definitions

use logos::Logos;

/// Cheese++ token.
///
/// Word operators (`plus`, `greater`, ...) are extra spellings of the
/// symbolic operators and lex to the same variant, so the parser never
/// sees the difference. `Swiss` is reserved as the string delimiter and
/// may not appear inside identifiers.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Program brackets
    #[token("Cheese")]
    Cheese,
    #[token("NoCheese")]
    NoCheese,

    // Statement keywords
    #[token("Glyn")]
    Glyn,
    #[token("Wensleydale")]
    Wensleydale,
    #[token("Stilton")]
    Stilton,
    #[token("Blue")]
    Blue,
    #[token("White")]
    White,
    #[token("Cheddar")]
    Cheddar,
    #[token("Coleraine")]
    Coleraine,
    #[token("Belgian")]
    Belgian,

    // Statement terminator: `;` and `Brie` are interchangeable
    #[token(";")]
    #[token("Brie")]
    Semi,

    // Operators
    #[token("+")]
    #[token("plus")]
    Plus,
    #[token("-")]
    #[token("minus")]
    Minus,
    #[token("*")]
    #[token("times")]
    Star,
    #[token("/")]
    #[token("divided")]
    Slash,
    #[token("==")]
    #[token("equals")]
    EqEq,
    #[token("!=")]
    #[token("not_equals")]
    NotEq,
    #[token(">")]
    #[token("greater")]
    Gt,
    #[token("<")]
    #[token("less")]
    Lt,
    #[token(">=")]
    #[token("greater_equals")]
    GtEq,
    #[token("<=")]
    #[token("less_equals")]
    LtEq,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,

    /// String literal delimited by a `Swiss` pair. The callback consumes
    /// through the closing delimiter; [`super::tokenize`] additionally
    /// pairs delimiters up front so an opener glued to word characters
    /// (`SwissHelloSwiss`) cannot be swallowed by the identifier rule.
    #[token("Swiss", lex_string)]
    Str(String),

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),
}

/// Consume string content up to and including the closing `Swiss`.
/// `None` (unterminated) surfaces as a lexer error.
fn lex_string(lex: &mut logos::Lexer<Token>) -> Option<String> {
    let rest = lex.remainder();
    let close = rest.find("Swiss")?;
    let content = rest[..close].to_string();
    lex.bump(close + "Swiss".len());
    Some(content)
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Cheese => f.write_str("Cheese"),
            Token::NoCheese => f.write_str("NoCheese"),
            Token::Glyn => f.write_str("Glyn"),
            Token::Wensleydale => f.write_str("Wensleydale"),
            Token::Stilton => f.write_str("Stilton"),
            Token::Blue => f.write_str("Blue"),
            Token::White => f.write_str("White"),
            Token::Cheddar => f.write_str("Cheddar"),
            Token::Coleraine => f.write_str("Coleraine"),
            Token::Belgian => f.write_str("Belgian"),
            Token::Semi => f.write_str(";"),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::EqEq => f.write_str("=="),
            Token::NotEq => f.write_str("!="),
            Token::Gt => f.write_str(">"),
            Token::Lt => f.write_str("<"),
            Token::GtEq => f.write_str(">="),
            Token::LtEq => f.write_str("<="),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
            Token::Eq => f.write_str("="),
            Token::Str(_) => f.write_str("string literal"),
            Token::Number(n) => write!(f, "{n}"),
            Token::Ident(name) => f.write_str(name),
        }
    }
}
