//! Error types for the typewriter

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum TypewriterError {
    #[error("no window")]
    NoWindow,

    #[error("no document")]
    NoDocument,

    #[error("missing element: {0}")]
    MissingElement(&'static str),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[cfg(feature = "serde_json")]
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl From<JsValue> for TypewriterError {
    fn from(value: JsValue) -> Self {
        TypewriterError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<TypewriterError> for JsValue {
    fn from(err: TypewriterError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TypewriterError>;
