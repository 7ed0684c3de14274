//! Purpose: Define the public Rust API boundary for n8n-export.
//! Exports: Pipeline types and operations needed by the CLI and integration tests.
//! Role: Additive-only surface over `core`.
//! Invariants: The binary imports pipeline items from here, not from `core` paths.

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::envelope::Document;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::export::{EXPORT_DIR_NAME, Export, Exporter, render_workflow};
pub use crate::core::safe_name::{DEFAULT_NAME, SafeName, workflow_name};
