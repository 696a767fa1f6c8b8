use super::span::{Location, Span};
use std::path::PathBuf;

/// One `DEFINE_FUNCTION` discovered in a source file.
///
/// Created by the extractor and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSignature {
    /// Block comment directly preceding the keyword, verbatim.
    pub doc_comment: Option<String>,
    /// Return type token as written; `None` for void functions.
    pub return_type: Option<String>,
    /// Declared width on the return type, e.g. `CHAR[32]`.
    pub return_width: Option<ArrayWidth>,
    pub name: String,
    /// Text between the parameter parentheses, trimmed but otherwise verbatim.
    pub raw_params: String,
    /// Text between the body braces, verbatim.
    pub body: String,
    pub source_file: PathBuf,
    pub span: Span,
    pub location: Location,
}

impl ParsedSignature {
    /// Name as used for uniqueness checks and dispatch comparison.
    pub fn normalized_name(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Width between the brackets of an array type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayWidth {
    /// `name[]`
    Unsized,
    /// Width text as written: a literal such as `32` or a constant such as
    /// `MAX_LEN`.
    Sized(String),
}

impl ArrayWidth {
    pub fn from_text(text: &str) -> Self {
        match text.trim() {
            "" => Self::Unsized,
            width => Self::Sized(width.to_string()),
        }
    }
}

impl std::fmt::Display for ArrayWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsized => write!(f, "[]"),
            Self::Sized(width) => write!(f, "[{width}]"),
        }
    }
}

/// One entry of a parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedParameter {
    /// Leading modifiers such as `CONSTANT`.
    pub qualifiers: Vec<String>,
    pub ty: String,
    pub name: String,
    /// Declared array width, if the parameter is an array.
    pub width: Option<ArrayWidth>,
}

impl ParsedParameter {
    pub fn is_array(&self) -> bool {
        self.width.is_some()
    }
}

/// Severity of a non-fatal finding reported while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A located message about a definition the extractor could not read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub file: PathBuf,
    pub location: Location,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(
            f,
            "{}:{}: {level}: {}",
            self.file.display(),
            self.location,
            self.message
        )
    }
}

/// Everything extracted from one source file, in textual order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileScan {
    pub path: PathBuf,
    pub signatures: Vec<ParsedSignature>,
    pub diagnostics: Vec<Diagnostic>,
}
