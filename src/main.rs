//! Purpose: `n8n-export` CLI entry point.
//! Role: Binary crate root; reads stdin, runs one export, prints one confirmation line.
//! Invariants: Stdout carries only `Saved: <file> (<name>)` on success.
//! Invariants: Errors go to stderr as text on a terminal, JSON otherwise.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: No flags change behavior; only `--help` and `--version` are accepted.
use std::io::{self, IsTerminal, Read};

use clap::{Parser, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod export_paths;

use export_paths::default_install_root;
use n8n_export::api::{Error, ErrorKind, Exporter, to_exit_code};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

#[derive(Parser)]
#[command(
    name = "n8n-export",
    version,
    about = "Save an n8n workflow JSON document from stdin into n8n-exports/",
    long_about = None,
    after_help = r#"INPUT
  One JSON document on stdin, either a bare workflow or an API envelope:
    {"success": true, "data": {"name": "...", "nodes": [...]}}

OUTPUT
  <install root>/n8n-exports/<name>.json, where ':' is dropped and ' ' and '/'
  become '-'. The directory must already exist. Existing files are replaced.

EXAMPLES
  $ curl -s "$N8N_API/workflows/42" | n8n-export
  Saved: Lead-Intake.json (Lead Intake)

LOGGING
  Set RUST_LOG=debug for pipeline diagnostics on stderr."#
)]
struct Cli {}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, Error> {
    if let Err(err) = Cli::try_parse_from(std::env::args_os()) {
        return match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                Ok(RunOutcome::with_code(0))
            }
            _ => Err(Error::new(ErrorKind::Usage)
                .with_message(clap_error_summary(&err))
                .with_hint("n8n-export takes no arguments; pipe workflow JSON to stdin.")),
        };
    }

    init_tracing();

    let exporter = Exporter::for_install_root(&default_install_root()?);
    debug!(export_dir = %exporter.export_dir().display(), "resolved export directory");

    let input = read_stdin()?;
    let export = exporter
        .export_bytes(&input)
        .map_err(add_io_hint)
        .map_err(add_internal_hint)?;

    println!("{}", export.confirmation());
    Ok(RunOutcome::ok())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn read_stdin() -> Result<Vec<u8>, Error> {
    let mut input = Vec::new();
    io::stdin().lock().read_to_end(&mut input).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to read stdin")
            .with_source(err)
    })?;
    debug!(bytes = input.len(), "read stdin");
    Ok(input)
}

fn add_io_hint(err: Error) -> Error {
    if err.hint().is_some() {
        return err;
    }
    match err.kind() {
        ErrorKind::NotFound => err.with_hint(
            "Export directory is missing. Create n8n-exports/ in the install root first.",
        ),
        ErrorKind::Permission => {
            err.with_hint("Permission denied. Check write access to the n8n-exports directory.")
        }
        ErrorKind::Io => err.with_hint(
            "I/O error. Check the workflow name length, filesystem, and disk space.",
        ),
        _ => err,
    }
}

fn add_internal_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Internal || err.hint().is_some() {
        return err;
    }
    err.with_hint(
        "Unexpected internal failure. Retry with RUST_LOG=debug and share the input shape if it persists.",
    )
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("{}", error_text(err));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::Permission => "permission denied".to_string(),
        ErrorKind::Parse => "invalid json".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    std::iter::successors(err.source(), |&cause| cause.source())
        .map(ToString::to_string)
        .collect()
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("error: {}", error_message(err))];
    if let Some(hint) = err.hint() {
        lines.push(format!("hint: {hint}"));
    }
    if let Some(path) = err.path() {
        lines.push(format!("path: {}", path.display()));
    }
    if let Some(cause) = error_causes(err).first() {
        lines.push(format!("caused by: {cause}"));
    }
    lines.join("\n")
}

// First non-empty line of clap's rendering, without its `error:` label.
fn clap_error_summary(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.strip_prefix("error:").unwrap_or(line).trim().to_string())
        .unwrap_or_else(|| "invalid arguments".to_string())
}

#[cfg(test)]
mod tests {
    use super::{Cli, add_internal_hint, add_io_hint, error_json, error_text};
    use clap::Parser;
    use n8n_export::api::{Error, ErrorKind};
    use std::io;

    #[test]
    fn cli_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["n8n-export"]).is_ok());
        assert!(Cli::try_parse_from(["n8n-export", "flow.json"]).is_err());
        assert!(Cli::try_parse_from(["n8n-export", "--out", "x"]).is_err());
    }

    #[test]
    fn error_json_carries_kind_hint_path_and_causes() {
        let err = add_io_hint(
            Error::new(ErrorKind::NotFound)
                .with_message("failed to open export file")
                .with_path("/srv/n8n-exports/Flow.json")
                .with_source(io::Error::new(io::ErrorKind::NotFound, "no such file")),
        );
        let value = error_json(&err);
        let inner = value.get("error").and_then(|v| v.as_object()).expect("error");

        assert_eq!(inner["kind"], "NotFound");
        assert_eq!(inner["message"], "failed to open export file");
        assert!(inner["hint"].as_str().unwrap().contains("n8n-exports"));
        assert_eq!(inner["path"], "/srv/n8n-exports/Flow.json");
        assert_eq!(inner["causes"][0], "no such file");
    }

    #[test]
    fn existing_hints_are_kept() {
        let err = add_io_hint(Error::new(ErrorKind::Io).with_hint("custom"));
        assert_eq!(err.hint(), Some("custom"));

        let err = add_internal_hint(Error::new(ErrorKind::Parse));
        assert!(err.hint().is_none());

        let err = add_internal_hint(Error::new(ErrorKind::Internal));
        assert!(err.hint().unwrap().contains("RUST_LOG"));
    }

    #[test]
    fn error_text_falls_back_to_kind_message() {
        let text = error_text(&Error::new(ErrorKind::Parse).with_hint("pipe json"));
        assert_eq!(text, "error: invalid json\nhint: pipe json");
    }
}
