//! Purpose: Resolve the install root and export directory for the running binary.
//! Exports: `install_root_for`, `default_install_root`.
//! Role: Keep the one piece of process introspection in a single place at startup.
//! Notes: `Exporter::for_install_root` appends the `n8n-exports` directory name.
//! Invariants: The binary lives one level below the install root (`<root>/bin/n8n-export`).
//! Invariants: The export directory is never created here.

use std::path::{Path, PathBuf};

use n8n_export::api::{Error, ErrorKind};

pub(crate) fn install_root_for(exe: &Path) -> Option<PathBuf> {
    exe.parent()?.parent().map(Path::to_path_buf)
}

pub(crate) fn default_install_root() -> Result<PathBuf, Error> {
    let exe = std::env::current_exe().map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to locate the running executable")
            .with_source(err)
    })?;
    let exe = exe.canonicalize().unwrap_or(exe);
    install_root_for(&exe).ok_or_else(|| {
        Error::new(ErrorKind::Internal)
            .with_message("executable has no install root")
            .with_path(&exe)
            .with_hint("Run n8n-export from a directory below the project root, e.g. <root>/bin.")
    })
}
