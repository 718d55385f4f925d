//! sysbuiltins - native builtin tools for a tool-invocation runtime
//!
//! A fixed registry of builtins (`sys.read`, `sys.write`, `sys.http.get`,
//! `sys.http.post`, `sys.abort`). Each builtin takes a cancellation token, a
//! `KEY=VALUE` environment list and a JSON argument string, and returns a
//! string result.
//!
//! ```no_run
//! use sysbuiltins::tools::lookup;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let tool = lookup("sys.write").expect("sys.write is registered");
//! assert_eq!(tool.instructions, "#!sys.write");
//!
//! let ctx = CancellationToken::new();
//! tool.call(&ctx, &[], r#"{"filename":"/tmp/t.txt","content":"hello"}"#)
//!     .await?;
//!
//! let read = lookup("sys.read").expect("sys.read is registered");
//! let content = read.call(&ctx, &[], r#"{"filename":"/tmp/t.txt"}"#).await?;
//! assert_eq!(content, "hello");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod observability;
pub mod runner;
pub mod tools;

pub use config::{ConfigError, RuntimeConfig};
pub use error::{invoke, RuntimeError, RuntimeResult};
pub use tools::{list_tools, lookup, BuiltinFunc, Tool, ToolError, BUILTIN_MARKER};
