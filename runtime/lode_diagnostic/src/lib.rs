//! Diagnostics for the lode runtime.
//!
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Notes (context: paths probed, shadowed candidates, spans)
//!
//! Code ranges: `E01xx` lexing/parsing, `E11xx` resolution, `E21xx`
//! evaluation. Shadowing reports reuse the resolution range at warning
//! severity.

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
