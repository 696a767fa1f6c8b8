//! Observability infrastructure for crash reports and debugging.
//!
//! Install the panic hook at startup, then mark phases and files while
//! generating:
//!
//! ```ignore
//! use netlinx_rpc::observability::{install_panic_hook, set_current_file, set_phase, GenerationPhase};
//!
//! install_panic_hook();
//! let _phase = set_phase(GenerationPhase::Scanning);
//! for file in files {
//!     let _file = set_current_file(&file);
//!     scan(&file)?;
//! }
//! ```

pub mod context;
pub mod panic_hook;

pub use context::{
    get_current_context, reset_context, set_current_file, set_phase, set_progress, ContextGuard,
    GenerationContext, GenerationPhase,
};
pub use panic_hook::install_panic_hook;
