// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod listing;
pub mod observability;
pub mod parser;
pub mod rpc;
pub mod workspace;

// Re-export commonly used types
pub use crate::core::{
    ArrayWidth, Diagnostic, Error, FileScan, Location, ParsedParameter, ParsedSignature, Result,
    Severity, Span,
};

pub use crate::config::{load_config, RpcConfig};

pub use crate::parser::{extract_signatures, parse_params};

pub use crate::rpc::{
    assemble, Audit, DispatchBackend, DispatchTable, GeneratedModule, GenerationSession,
    NetLinxBackend, SymbolRegistry,
};

pub use crate::workspace::{find_workspace, workspace_sources, SourceFile, SourceSet, Workspace};

pub use crate::listing::render_listing;
