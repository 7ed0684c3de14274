//! Purpose: Library crate behind the `n8n-export` CLI and its tests.
//! Exports: `api` (stable surface) and `core` (envelope, naming, writer, errors).
//! Role: Holds the whole stdin-to-file pipeline so the binary stays a thin shell.
//! Invariants: The export directory is always an explicit input, never discovered here.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
pub mod core;
mod json;
