use logos::Logos;

use crate::core::Span;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip(r"[ \t\r\n\f]+"))]
#[logos(skip(r"//[^\r\n]*", allow_greedy = true))]
pub enum TokenKind {
    #[token("define_function", ignore(case))]
    DefineFunction,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    SlashComment,
    #[regex(r"\(\*([^*]|\*+[^*)])*\*+\)")]
    ParenComment,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,

    #[regex(r"'[^']*'")]
    String,

    #[regex(r"[0-9]+")]
    Number,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    /// Any other single character: operators, `#`, `$`, stray quotes.
    #[regex(r"[^ \t\r\n\f]", priority = 0)]
    Other,
}

impl TokenKind {
    pub fn is_comment(self) -> bool {
        matches!(self, Self::SlashComment | Self::ParenComment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn text(self, source: &str) -> &str {
        &source[self.span.as_range()]
    }
}

/// Tokenize NetLinx source. Lexing never fails: characters outside the
/// recognised set become `Other` tokens so the extractor can step over them.
pub fn lex(input: &str) -> Vec<Token> {
    let mut lexer = TokenKind::lexer(input);
    let mut tokens = Vec::new();

    while let Some(next) = lexer.next() {
        let span = Span::from(lexer.span());
        let kind = next.unwrap_or(TokenKind::Other);
        tokens.push(Token { kind, span });
    }

    tokens
}
