//! Thread-local context tracking for crash reports.
//!
//! Generation is single-threaded, so the phase, the current file and the
//! progress counters all live in one thread-local slot. Guards restore the
//! previous context on drop.

use std::cell::RefCell;
use std::path::PathBuf;

thread_local! {
    static CURRENT_CONTEXT: RefCell<GenerationContext> = const { RefCell::new(GenerationContext::new()) };
}

/// Snapshot of what the generator was doing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationContext {
    pub phase: Option<GenerationPhase>,
    pub current_file: Option<PathBuf>,
    pub files_scanned: usize,
    pub files_total: usize,
}

impl GenerationContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            current_file: None,
            files_scanned: 0,
            files_total: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    /// Locating the workspace and selecting files
    Discovery,
    /// Reading and extracting signatures
    Scanning,
    /// Validating and rendering the dispatcher
    Emission,
    /// Writing the generated file
    Writing,
}

impl std::fmt::Display for GenerationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Discovery => write!(f, "discovery"),
            Self::Scanning => write!(f, "scanning"),
            Self::Emission => write!(f, "emission"),
            Self::Writing => write!(f, "writing"),
        }
    }
}

/// RAII guard restoring the previous phase and file on drop.
pub struct ContextGuard {
    previous_phase: Option<GenerationPhase>,
    previous_file: Option<PathBuf>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            let mut ctx = ctx.borrow_mut();
            ctx.phase = self.previous_phase;
            ctx.current_file = self.previous_file.take();
        });
    }
}

fn guard(update: impl FnOnce(&mut GenerationContext)) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let mut ctx = ctx.borrow_mut();
        let guard = ContextGuard {
            previous_phase: ctx.phase,
            previous_file: ctx.current_file.clone(),
        };
        update(&mut ctx);
        guard
    })
}

/// Set the current phase until the guard drops.
#[must_use]
pub fn set_phase(phase: GenerationPhase) -> ContextGuard {
    guard(|ctx| ctx.phase = Some(phase))
}

/// Set the file being scanned until the guard drops.
#[must_use]
pub fn set_current_file(path: impl Into<PathBuf>) -> ContextGuard {
    let path = path.into();
    guard(|ctx| ctx.current_file = Some(path))
}

pub fn set_progress(scanned: usize, total: usize) {
    CURRENT_CONTEXT.with(|ctx| {
        let mut ctx = ctx.borrow_mut();
        ctx.files_scanned = scanned;
        ctx.files_total = total;
    });
}

#[must_use]
pub fn get_current_context() -> GenerationContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Reset the current thread's context to empty.
pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = GenerationContext::new();
    });
}
