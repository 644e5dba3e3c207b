//! Backend response envelopes.
//!
//! The backend answers every call with a loosely typed wrapper
//! (`success`/`codigo`, `message`/`glosa`, `data`). [`RawEnvelope`] accepts
//! any of those shapes; [`RawEnvelope::narrow`] turns it into an [`Outcome`]
//! before anything reaches the engine.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::CoreError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub codigo: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub glosa: Option<Value>,
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success { data: T, message: Option<String> },
    Failure { message: Option<String> },
}

impl RawEnvelope {
    /// `success` decides when present; otherwise a `codigo`/`code` of 1 or 200.
    pub fn is_success(&self) -> bool {
        if let Some(success) = self.success {
            return success;
        }
        self.codigo
            .as_ref()
            .or(self.code.as_ref())
            .is_some_and(is_success_code)
    }

    /// The server's message, falling back to `glosa`. Blank strings count as absent.
    pub fn message(&self) -> Option<String> {
        self.message
            .as_ref()
            .and_then(text_of)
            .or_else(|| self.glosa.as_ref().and_then(text_of))
    }

    /// Narrow into an outcome carrying a typed `data` payload.
    pub fn narrow<T: DeserializeOwned>(self) -> Result<Outcome<T>, CoreError> {
        let message = self.message();
        if !self.is_success() {
            return Ok(Outcome::Failure { message });
        }
        let data = self
            .data
            .ok_or_else(|| CoreError::MissingField("data".to_string()))?;
        Ok(Outcome::Success {
            data: serde_json::from_value(data)?,
            message,
        })
    }

    /// Narrow an acknowledgement whose `data`, if any, is not needed.
    pub fn narrow_ack(self) -> Outcome<()> {
        let message = self.message();
        if self.is_success() {
            Outcome::Success { data: (), message }
        } else {
            Outcome::Failure { message }
        }
    }
}

fn is_success_code(code: &Value) -> bool {
    match code {
        Value::Number(n) => matches!(n.as_i64(), Some(1) | Some(200)),
        Value::String(s) => matches!(s.trim(), "1" | "200"),
        _ => false,
    }
}

fn text_of(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}
