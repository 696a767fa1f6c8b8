use super::lexer::{lex, Token, TokenKind};
use crate::core::{ArrayWidth, ParsedParameter};
use thiserror::Error;

/// A parameter entry that does not have the `[qualifier...] type name[width]` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parameter {position}: {message}")]
pub struct ParamError {
    /// 1-based position of the offending entry.
    pub position: usize,
    pub message: String,
}

/// Parse the text between a definition's parentheses into ordered parameters.
///
/// Position in the returned vector is the argument index used for marshaling.
pub fn parse_params(raw: &str) -> Result<Vec<ParsedParameter>, ParamError> {
    let tokens: Vec<Token> = lex(raw)
        .into_iter()
        .filter(|t| !t.kind.is_comment())
        .collect();

    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    tokens
        .split(|t| t.kind == TokenKind::Comma)
        .enumerate()
        .map(|(i, entry)| parse_entry(raw, entry, i + 1))
        .collect()
}

fn parse_entry(raw: &str, entry: &[Token], position: usize) -> Result<ParsedParameter, ParamError> {
    let error = |message: &str| ParamError {
        position,
        message: message.to_string(),
    };

    let words = entry
        .iter()
        .take_while(|t| t.kind == TokenKind::Ident)
        .count();
    if words < 2 {
        return Err(error("expected a type followed by a name"));
    }

    let width = match &entry[words..] {
        [] => None,
        [open, .., close]
            if open.kind == TokenKind::LBracket && close.kind == TokenKind::RBracket =>
        {
            Some(ArrayWidth::from_text(&raw[open.span.end..close.span.start]))
        }
        _ => return Err(error("unexpected tokens after parameter name")),
    };

    let text = |t: &Token| t.text(raw).to_string();
    Ok(ParsedParameter {
        qualifiers: entry[..words - 2].iter().map(text).collect(),
        ty: text(&entry[words - 2]),
        name: text(&entry[words - 1]),
        width,
    })
}
