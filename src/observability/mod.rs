//! Observability for builtin tool calls
//!
//! Structured logging only; builtins emit debug traces and never log
//! user-facing errors themselves.

pub mod logging;

pub use logging::{init_default_logging, init_logging, parse_level, LogFormat};

// Span macros for structured logging
pub use logging::tool_span;
