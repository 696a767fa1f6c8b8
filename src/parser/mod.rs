//! NetLinx source parsing: tokenizer, definition extractor, parameter lists.

pub mod lexer;
pub mod params;
pub mod signature;

pub use params::{parse_params, ParamError};
pub use signature::{extract_signatures, SignatureExtractor};
