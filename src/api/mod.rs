use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of the single `POST` the client sends.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ChatRequest {
    pub query: String,
}

/// Body of a successful reply.
///
/// `answer` is kept as a raw JSON value so that a present-but-wrong-typed
/// field degrades to the placeholder instead of failing the whole decode.
#[derive(Deserialize, Debug, Default)]
pub struct ChatResponse {
    #[serde(default)]
    pub answer: Option<Value>,
}

/// Body the server may attach to a non-2xx reply.
#[derive(Deserialize, Debug, Default)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<Value>,
}

impl ChatResponse {
    pub fn answer_text(&self) -> Option<&str> {
        non_empty_str(self.answer.as_ref())
    }
}

impl ErrorResponse {
    pub fn error_text(&self) -> Option<&str> {
        non_empty_str(self.error.as_ref())
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}
