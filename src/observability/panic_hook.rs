//! Custom panic hook for structured crash reports.
//!
//! A crash report names the generation phase and the file being scanned, so
//! a parser bug can be reproduced from the offending source.

use super::context::{get_current_context, GenerationContext};
use std::panic::PanicHookInfo;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const RULE: &str = "================================================================================";

/// Install the custom panic hook. Call once, early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    let context = get_current_context();
    eprintln!();
    eprintln!("{RULE}");
    eprintln!("netlinx-rpc {VERSION} crashed ({})", std::env::consts::OS);
    eprintln!("{RULE}");
    eprintln!("{}", render_details(info));
    eprintln!("{}", render_context(&context));

    if std::env::var("RUST_BACKTRACE").is_ok() {
        eprintln!("{}", std::backtrace::Backtrace::capture());
    } else {
        eprintln!("Run with RUST_BACKTRACE=1 for a stack trace");
    }
    eprintln!("{RULE}");
}

fn render_details(info: &PanicHookInfo<'_>) -> String {
    let message = extract_panic_message(info);
    match info.location() {
        Some(location) => format!(
            "PANIC: {message}\nLocation: {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        ),
        None => format!("PANIC: {message}"),
    }
}

fn render_context(context: &GenerationContext) -> String {
    let mut lines = Vec::new();
    match context.phase {
        Some(phase) => lines.push(format!("Phase: {phase}")),
        None => lines.push("Phase: (not set - crash occurred before generation started)".into()),
    }
    if let Some(file) = &context.current_file {
        lines.push(format!("File: {}", file.display()));
    }
    if context.files_total > 0 {
        lines.push(format!(
            "Progress: {} / {} files",
            context.files_scanned, context.files_total
        ));
    }
    lines.join("\n")
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
