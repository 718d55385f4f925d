//! Builtin tool implementations
//!
//! Each builtin is a unit struct implementing [`BuiltinFunc`](crate::tools::BuiltinFunc),
//! with its argument decoding kept next to the I/O it drives.

pub mod abort;
pub mod file_operations;
pub mod http_request;

pub use abort::SysAbort;
pub use file_operations::{SysRead, SysWrite};
pub use http_request::{SysHttpGet, SysHttpPost};
