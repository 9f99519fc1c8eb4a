//! Result records received from the analysis service.
//!
//! Every list field tolerates being absent or `null` and decodes to an
//! empty `Vec`, so consumers can iterate without guarding. Top-level shape
//! is checked by `from_json` on each result type.

pub mod grammar;
pub mod log;

pub use grammar::{GrammarError, GrammarErrorKind, GrammarResult};
pub use log::{
    AnalysisResult, AnalysisSummary, LexicalLineResult, SemanticAlert, Severity,
    StructuralFinding, SyntacticLineResult, SyntacticStatus, Token, TokenType,
};

use serde::{Deserialize, Deserializer};
use serde_json::Value as Json;

/// Decode `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

/// Short JSON kind name for error messages.
pub(crate) fn json_kind(v: &Json) -> &'static str {
    match v {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
