use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Uniform response shape handed to every caller.
///
/// Bodies that already carry a boolean `success` are passed through with
/// their other top-level fields kept in `extra`; anything else is wrapped
/// as `{ success: true, data: body }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    /// HTTP status the body arrived with; not part of the wire body.
    #[serde(skip, default = "default_status")]
    pub status: u16,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_status() -> u16 {
    200
}

impl ApiEnvelope {
    pub fn from_response(status: u16, body: Option<Value>) -> Self {
        Self {
            status,
            ..Self::normalize(body)
        }
    }

    pub fn normalize(body: Option<Value>) -> Self {
        match body {
            Some(Value::Object(map)) if map.get("success").is_some_and(Value::is_boolean) => {
                Self::pass_through(map)
            }
            Some(Value::Null) | None => Self::wrap(None),
            Some(body) => Self::wrap(Some(body)),
        }
    }

    fn wrap(data: Option<Value>) -> Self {
        Self {
            status: default_status(),
            success: true,
            message: None,
            data,
            extra: Map::new(),
        }
    }

    fn pass_through(mut map: Map<String, Value>) -> Self {
        let success = map
            .remove("success")
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        let message = match map.remove("message") {
            Some(Value::String(message)) => Some(message),
            Some(other) => {
                map.insert("message".to_owned(), other);
                None
            }
            None => None,
        };
        let data = map.remove("data").filter(|v| !v.is_null());
        Self {
            status: default_status(),
            success,
            message,
            data,
            extra: map,
        }
    }

    /// The part of the envelope typed callers decode: `data` when present,
    /// otherwise the remaining top-level fields.
    pub fn payload(&self) -> Value {
        match &self.data {
            Some(data) => data.clone(),
            None => Value::Object(self.extra.clone()),
        }
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload())
    }

    /// Server-provided message, looked up on the envelope first and then
    /// inside the wrapped body.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().or_else(|| {
            self.data
                .as_ref()
                .and_then(|data| data.get("message"))
                .and_then(Value::as_str)
        })
    }

    pub fn message_or(&self, default: &str) -> String {
        self.message().unwrap_or(default).to_owned()
    }
}

/// Result of a mutating call: the backend's message or a fixed default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub fn from_envelope(envelope: &ApiEnvelope, default: &str) -> Self {
        ApiMessage {
            message: envelope.message_or(default),
        }
    }
}
