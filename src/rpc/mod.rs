//! RPC dispatcher generation.
//!
//! Signatures flow through [`validate`] (one [`SymbolRegistry`] per run) into
//! a [`DispatchTable`], which a [`DispatchBackend`] renders and [`assemble`]
//! frames into the final module.

pub mod assemble;
pub mod backend;
pub mod registry;
pub mod session;
pub mod table;
pub mod types;
pub mod validate;

pub use assemble::assemble;
pub use backend::{Audit, DispatchBackend, NetLinxBackend};
pub use registry::SymbolRegistry;
pub use session::{GeneratedModule, GenerationSession};
pub use table::{DispatchEntry, DispatchTable, FileSection, Fragment};
pub use types::{lookup, TypeKind, TypeSupport, TYPE_TABLE};
pub use validate::{validate, ResolvedParameter, ResolvedSignature, SkipReason, ValidationOutcome};
