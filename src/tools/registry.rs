//! Process-wide registry of builtin tools
//!
//! The table is built once on first access and never mutated. Stored entries
//! carry only description, schema and handler; name, id and instructions are
//! derived from the key whenever a descriptor is handed out.

use crate::tools::builtin::{SysAbort, SysHttpGet, SysHttpPost, SysRead, SysWrite};
use crate::tools::{object_schema, BuiltinFunc, Tool};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Instructions prefix marking a tool as natively implemented.
pub const BUILTIN_MARKER: &str = "#!";

struct Entry {
    description: &'static str,
    arguments: Value,
    handler: Arc<dyn BuiltinFunc>,
}

static TOOLS: Lazy<BTreeMap<&'static str, Entry>> = Lazy::new(|| {
    let mut tools = BTreeMap::new();

    tools.insert(
        "sys.read",
        Entry {
            description: "Reads the contents of a file",
            arguments: object_schema(
                &[("filename", "The name of the file to read")],
                &["filename"],
            ),
            handler: Arc::new(SysRead),
        },
    );
    tools.insert(
        "sys.write",
        Entry {
            description: "Write the contents to a file",
            arguments: object_schema(
                &[
                    ("filename", "The name of the file to write to"),
                    ("content", "The content to write"),
                ],
                &["filename", "content"],
            ),
            handler: Arc::new(SysWrite),
        },
    );
    tools.insert(
        "sys.http.get",
        Entry {
            description: "Download the contents of a http or https URL",
            arguments: object_schema(&[("url", "The URL to download")], &["url"]),
            handler: Arc::new(SysHttpGet),
        },
    );
    tools.insert(
        "sys.abort",
        Entry {
            description: "Aborts execution",
            arguments: object_schema(
                &[(
                    "message",
                    "The description of the error or unexpected result that caused abort to be called",
                )],
                &["message"],
            ),
            handler: Arc::new(SysAbort),
        },
    );
    tools.insert(
        "sys.http.post",
        Entry {
            description: "Write contents to a http or https URL using the POST method",
            arguments: object_schema(
                &[
                    ("url", "The URL to POST to"),
                    ("content", "The content to POST"),
                    (
                        "contentType",
                        "The \"content type\" of the content such as application/json or text/plain",
                    ),
                ],
                &["url", "content"],
            ),
            handler: Arc::new(SysHttpPost),
        },
    );

    tools
});

fn describe(name: &str, entry: &Entry) -> Tool {
    Tool {
        name: name.to_string(),
        id: name.to_string(),
        instructions: format!("{BUILTIN_MARKER}{name}"),
        description: entry.description.to_string(),
        arguments: entry.arguments.clone(),
        handler: Arc::clone(&entry.handler),
    }
}

/// Resolve a builtin by exact name.
pub fn lookup(name: &str) -> Option<Tool> {
    TOOLS.get(name).map(|entry| describe(name, entry))
}

/// All builtins, ordered by name.
pub fn list_tools() -> Vec<Tool> {
    TOOLS
        .iter()
        .map(|(name, entry)| describe(name, entry))
        .collect()
}

/// Registered builtin names, in ascending order.
pub fn tool_names() -> Vec<&'static str> {
    TOOLS.keys().copied().collect()
}
