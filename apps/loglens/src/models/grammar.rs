//! Grammar analysis response.

use super::{json_kind, null_as_default};
use crate::error::MalformedResult;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// Phase in which a grammar finding was raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GrammarErrorKind {
    Lexico,
    Sintactico,
    Semantico,
    Other(String),
}

impl GrammarErrorKind {
    pub fn as_str(&self) -> &str {
        match self {
            GrammarErrorKind::Lexico => "Léxico (Ortografía)",
            GrammarErrorKind::Sintactico => "Sintáctico (Estructura)",
            GrammarErrorKind::Semantico => "Semántico (Significado)",
            GrammarErrorKind::Other(s) => s,
        }
    }
}

impl Default for GrammarErrorKind {
    fn default() -> Self {
        GrammarErrorKind::Other(String::new())
    }
}

impl From<String> for GrammarErrorKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Léxico (Ortografía)" => GrammarErrorKind::Lexico,
            "Sintáctico (Estructura)" => GrammarErrorKind::Sintactico,
            "Semántico (Significado)" => GrammarErrorKind::Semantico,
            _ => GrammarErrorKind::Other(s),
        }
    }
}

impl From<GrammarErrorKind> for String {
    fn from(k: GrammarErrorKind) -> Self {
        match k {
            GrammarErrorKind::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarError {
    #[serde(default)]
    pub line: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub error_type: GrammarErrorKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fragment: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Response of `POST /api/analyze-grammar`. Empty means the text is clean.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrammarResult {
    pub errors: Vec<GrammarError>,
}

impl GrammarResult {
    /// Only a JSON array is accepted at the top level.
    pub fn from_json(value: Json) -> Result<Self, MalformedResult> {
        match value {
            Json::Array(_) => serde_json::from_value(value)
                .map_err(|e| MalformedResult(format!("grammar analysis: {}", e))),
            other => Err(MalformedResult(format!(
                "grammar analysis: expected an array, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
