// Export pipeline: decode stdin bytes, unwrap the envelope, name the file, write it.
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::core::envelope::Document;
use crate::core::error::{Error, ErrorKind, io_error_kind};
use crate::core::safe_name::{SafeName, workflow_name};
use crate::json::parse;

pub const EXPORT_DIR_NAME: &str = "n8n-exports";

/// Result of one completed export.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Export {
    pub path: PathBuf,
    pub file_name: String,
    pub name: String,
    pub enveloped: bool,
}

impl Export {
    pub fn confirmation(&self) -> String {
        format!("Saved: {} ({})", self.file_name, self.name)
    }
}

/// Writes workflows into a single, pre-existing export directory.
#[derive(Clone, Debug)]
pub struct Exporter {
    export_dir: PathBuf,
}

impl Exporter {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    pub fn for_install_root(root: &Path) -> Self {
        Self::new(root.join(EXPORT_DIR_NAME))
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn output_path(&self, safe_name: &SafeName) -> PathBuf {
        self.export_dir.join(safe_name.file_name())
    }

    pub fn export_bytes(&self, input: &[u8]) -> Result<Export, Error> {
        debug!(bytes = input.len(), "decoding workflow document");
        let value: Value = parse::from_slice(input).map_err(|err| {
            let hint = parse::hint_for_error(&err, "stdin");
            Error::new(ErrorKind::Parse)
                .with_message("input is not valid json")
                .with_hint(hint)
                .with_source(err)
        })?;
        self.export_document(Document::from_value(value))
    }

    pub fn export_document(&self, document: Document) -> Result<Export, Error> {
        let enveloped = document.is_enveloped();
        debug!(enveloped, "resolved workflow document");
        let workflow = document.into_workflow();

        let name = workflow_name(&workflow)?.to_string();
        let safe_name = SafeName::from_name(&name);
        let path = self.output_path(&safe_name);

        // Render before touching the filesystem so a failure cannot truncate an existing export.
        let text = render_workflow(&workflow)?;
        debug!(path = %path.display(), "writing workflow");
        write_file(&path, &text)?;
        info!(path = %path.display(), name = %name, "saved workflow");

        Ok(Export {
            path,
            file_name: safe_name.file_name(),
            name,
            enveloped,
        })
    }
}

/// Pretty JSON with 2-space indentation, keys in document order, no trailing newline.
pub fn render_workflow(workflow: &Value) -> Result<String, Error> {
    serde_json::to_string_pretty(workflow).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to serialize workflow")
            .with_source(err)
    })
}

fn write_file(path: &Path, text: &str) -> Result<(), Error> {
    let write_error = |err: std::io::Error, message: &str| {
        Error::new(io_error_kind(&err))
            .with_message(message.to_string())
            .with_path(path)
            .with_source(err)
    };

    let mut file =
        File::create(path).map_err(|err| write_error(err, "failed to open export file"))?;
    file.write_all(text.as_bytes())
        .map_err(|err| write_error(err, "failed to write export file"))?;
    file.flush()
        .map_err(|err| write_error(err, "failed to write export file"))
}
