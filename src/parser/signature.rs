//! Structural extraction of `DEFINE_FUNCTION` definitions.
//!
//! The extractor walks the token stream left to right. For every keyword it
//! reads the optional return type, the name, the parameter list and the
//! brace-balanced body, then resumes after the closing brace. Parameter text
//! and body text are captured verbatim and not interpreted here.

use super::lexer::{lex, Token, TokenKind};
use crate::core::{ArrayWidth, Diagnostic, FileScan, LineIndex, ParsedSignature, Severity, Span};
use std::path::Path;
use tracing::{debug, warn};

/// Why a definition could not be read, and whether scanning can continue.
#[derive(Debug)]
struct Failure {
    at: usize,
    message: String,
    /// Scanning stops for the rest of the file.
    fatal: bool,
}

impl Failure {
    fn recoverable(at: usize, message: impl Into<String>) -> Self {
        Self {
            at,
            message: message.into(),
            fatal: false,
        }
    }

    fn fatal(at: usize, message: impl Into<String>) -> Self {
        Self {
            at,
            message: message.into(),
            fatal: true,
        }
    }
}

pub struct SignatureExtractor<'a> {
    path: &'a Path,
    source: &'a str,
    tokens: Vec<Token>,
    index: LineIndex,
}

impl<'a> SignatureExtractor<'a> {
    pub fn new(path: &'a Path, source: &'a str) -> Self {
        Self {
            path,
            source,
            tokens: lex(source),
            index: LineIndex::new(source),
        }
    }

    /// Extract every definition in textual order.
    pub fn extract(self) -> FileScan {
        let mut signatures = Vec::new();
        let mut diagnostics = Vec::new();
        let mut pos = 0;

        while let Some(keyword) = self.find_keyword(pos) {
            match self.definition(keyword) {
                Ok((signature, next)) => {
                    debug!(
                        file = %self.path.display(),
                        function = %signature.name,
                        line = signature.location.line,
                        "Found function definition"
                    );
                    signatures.push(signature);
                    pos = next;
                }
                Err(failure) => {
                    let diagnostic = self.diagnostic(&failure);
                    warn!("{diagnostic}");
                    diagnostics.push(diagnostic);
                    if failure.fatal {
                        break;
                    }
                    pos = keyword + 1;
                }
            }
        }

        FileScan {
            path: self.path.to_path_buf(),
            signatures,
            diagnostics,
        }
    }

    fn find_keyword(&self, from: usize) -> Option<usize> {
        (from..self.tokens.len()).find(|&i| self.tokens[i].kind == TokenKind::DefineFunction)
    }

    /// Index of the next non-comment token at or after `from`.
    fn significant(&self, from: usize) -> Option<usize> {
        (from..self.tokens.len()).find(|&i| !self.tokens[i].kind.is_comment())
    }

    fn kind_at(&self, i: Option<usize>) -> Option<TokenKind> {
        i.map(|i| self.tokens[i].kind)
    }

    fn text(&self, i: usize) -> &'a str {
        self.tokens[i].text(self.source)
    }

    fn definition(&self, keyword: usize) -> Result<(ParsedSignature, usize), Failure> {
        let first = self
            .significant(keyword + 1)
            .filter(|&i| self.tokens[i].kind == TokenKind::Ident)
            .ok_or_else(|| Failure::recoverable(keyword, "expected function name after DEFINE_FUNCTION"))?;

        let after_first = self.significant(first + 1);
        let (return_type, return_width, name) = match self.kind_at(after_first) {
            Some(TokenKind::LParen) => (None, None, first),
            Some(TokenKind::Ident) => {
                let name = after_first.unwrap_or(first);
                (Some(first), None, name)
            }
            Some(TokenKind::LBracket) => {
                let (width, close) = self.width(after_first.unwrap_or(first))?;
                let name = self
                    .significant(close + 1)
                    .filter(|&i| self.tokens[i].kind == TokenKind::Ident)
                    .ok_or_else(|| Failure::recoverable(close, "expected function name after return type"))?;
                (Some(first), Some(width), name)
            }
            _ => {
                return Err(Failure::recoverable(
                    first,
                    format!("expected parameter list after '{}'", self.text(first)),
                ))
            }
        };

        let open_paren = self
            .significant(name + 1)
            .filter(|&i| self.tokens[i].kind == TokenKind::LParen)
            .ok_or_else(|| {
                Failure::recoverable(name, format!("expected '(' after '{}'", self.text(name)))
            })?;
        let close_paren = self
            .matching(open_paren, TokenKind::LParen, TokenKind::RParen)
            .ok_or_else(|| Failure::fatal(open_paren, "unterminated parameter list"))?;

        let open_brace = self
            .significant(close_paren + 1)
            .filter(|&i| self.tokens[i].kind == TokenKind::LBrace)
            .ok_or_else(|| {
                Failure::recoverable(close_paren, "expected '{' to open function body")
            })?;
        let close_brace = self
            .matching(open_brace, TokenKind::LBrace, TokenKind::RBrace)
            .ok_or_else(|| Failure::fatal(open_brace, "unterminated function body"))?;

        let doc_comment = keyword
            .checked_sub(1)
            .filter(|&i| self.tokens[i].kind.is_comment())
            .map(|i| self.text(i).to_string());

        let keyword_span = self.tokens[keyword].span;
        let start = match doc_comment {
            Some(_) => self.tokens[keyword - 1].span.start,
            None => keyword_span.start,
        };
        let end = self.tokens[close_brace].span.end;

        let raw_params = self.source
            [self.tokens[open_paren].span.end..self.tokens[close_paren].span.start]
            .trim()
            .to_string();
        let body = self.source
            [self.tokens[open_brace].span.end..self.tokens[close_brace].span.start]
            .to_string();

        let signature = ParsedSignature {
            doc_comment,
            return_type: return_type.map(|i| self.text(i).to_string()),
            return_width,
            name: self.text(name).to_string(),
            raw_params,
            body,
            source_file: self.path.to_path_buf(),
            span: Span::new(start, end),
            location: self.index.locate(self.source, keyword_span.start),
        };

        Ok((signature, close_brace + 1))
    }

    /// Read the width between brackets starting at `open`: `[]`, `[32]`,
    /// `[MAX_LEN]` or any other constant expression, kept as written.
    fn width(&self, open: usize) -> Result<(ArrayWidth, usize), Failure> {
        let close = self
            .matching(open, TokenKind::LBracket, TokenKind::RBracket)
            .ok_or_else(|| Failure::recoverable(open, "unterminated array width"))?;
        let text = &self.source[self.tokens[open].span.end..self.tokens[close].span.start];
        Ok((ArrayWidth::from_text(text), close))
    }

    /// Find the token closing the group opened at `open`, counting nesting.
    /// Comments and strings are single tokens, so delimiters inside them
    /// never affect the depth.
    fn matching(&self, open: usize, opener: TokenKind, closer: TokenKind) -> Option<usize> {
        let mut depth = 0usize;
        for i in open..self.tokens.len() {
            let kind = self.tokens[i].kind;
            if kind == opener {
                depth += 1;
            } else if kind == closer {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
        }
        None
    }

    fn diagnostic(&self, failure: &Failure) -> Diagnostic {
        let offset = self
            .tokens
            .get(failure.at)
            .map_or(self.source.len(), |t| t.span.start);
        Diagnostic {
            severity: if failure.fatal {
                Severity::Error
            } else {
                Severity::Warning
            },
            file: self.path.to_path_buf(),
            location: self.index.locate(self.source, offset),
            message: failure.message.clone(),
        }
    }
}

/// Extract every `DEFINE_FUNCTION` in `source`, in textual order.
pub fn extract_signatures(path: &Path, source: &str) -> FileScan {
    SignatureExtractor::new(path, source).extract()
}
