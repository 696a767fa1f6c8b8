pub mod errors;
pub mod span;
pub mod types;

pub use errors::{Error, Result};
pub use span::{LineIndex, Location, Span};
pub use types::{ArrayWidth, Diagnostic, FileScan, ParsedParameter, ParsedSignature, Severity};
