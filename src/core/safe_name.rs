// Workflow name lookup and filename derivation.
use std::fmt;

use serde_json::Value;

use crate::core::error::{Error, ErrorKind};

pub const NAME_KEY: &str = "name";
pub const DEFAULT_NAME: &str = "Unknown";
pub const FILE_EXTENSION: &str = "json";

/// Returns the workflow's declared name, or `Unknown` when there is none.
///
/// Non-object workflows have no name. A `name` that is present but not a
/// string is rejected rather than guessed at.
pub fn workflow_name(workflow: &Value) -> Result<&str, Error> {
    match workflow.get(NAME_KEY) {
        None => Ok(DEFAULT_NAME),
        Some(Value::String(name)) => Ok(name.as_str()),
        Some(other) => Err(Error::new(ErrorKind::Usage)
            .with_message(format!(
                "workflow name is not a string (found {})",
                value_type(other)
            ))
            .with_hint("Set the workflow \"name\" field to a string, or omit it.")),
    }
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Filename stem derived from a workflow name.
///
/// Only `:`, ` ` and `/` are rewritten; everything else, including `\` and
/// leading dots, is kept as-is and length is not capped.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SafeName(String);

impl SafeName {
    pub fn from_name(name: &str) -> Self {
        Self(name.replace(':', "").replace(' ', "-").replace('/', "-"))
    }

    pub fn file_name(&self) -> String {
        format!("{self}.{FILE_EXTENSION}")
    }
}

impl fmt::Display for SafeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
