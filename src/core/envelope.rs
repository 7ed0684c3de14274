// Input shape discrimination: `{"success": .., "data": {..}}` envelopes vs bare workflows.
use serde_json::{Map, Value};

pub const SUCCESS_KEY: &str = "success";
pub const DATA_KEY: &str = "data";

/// A parsed stdin document, split on the presence of a `success` key.
///
/// Anything that is not an object carrying `success` is `Direct`, including
/// arrays and scalars; those pass through to the writer unchanged.
#[derive(Clone, Debug, PartialEq)]
pub enum Document {
    Enveloped { data: Value },
    Direct(Value),
}

impl Document {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) if map.contains_key(SUCCESS_KEY) => {
                let data = map
                    .remove(DATA_KEY)
                    .unwrap_or_else(|| Value::Object(Map::new()));
                Document::Enveloped { data }
            }
            other => Document::Direct(other),
        }
    }

    pub fn is_enveloped(&self) -> bool {
        matches!(self, Document::Enveloped { .. })
    }

    pub fn into_workflow(self) -> Value {
        match self {
            Document::Enveloped { data } => data,
            Document::Direct(value) => value,
        }
    }
}
