//! Log analysis response: lexical, syntactic, semantic and structural phases.

use super::{json_kind, null_as_default};
use crate::error::MalformedResult;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// Token category assigned by the service lexer.
///
/// Labels outside the known set are kept verbatim in `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TokenType {
    Keyword,
    Process,
    User,
    Hostname,
    Ip,
    Timestamp,
    Pid,
    Separator,
    Unknown,
    Unrecognized(String),
}

impl TokenType {
    pub fn as_str(&self) -> &str {
        match self {
            TokenType::Keyword => "KEYWORD",
            TokenType::Process => "PROCESS",
            TokenType::User => "USER",
            TokenType::Hostname => "HOSTNAME",
            TokenType::Ip => "IP",
            TokenType::Timestamp => "TIMESTAMP",
            TokenType::Pid => "PID",
            TokenType::Separator => "SEPARATOR",
            TokenType::Unknown => "UNKNOWN",
            TokenType::Unrecognized(s) => s,
        }
    }
}

impl Default for TokenType {
    fn default() -> Self {
        TokenType::Unrecognized(String::new())
    }
}

impl From<String> for TokenType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "KEYWORD" => TokenType::Keyword,
            "PROCESS" => TokenType::Process,
            "USER" => TokenType::User,
            "HOSTNAME" => TokenType::Hostname,
            "IP" => TokenType::Ip,
            "TIMESTAMP" => TokenType::Timestamp,
            "PID" => TokenType::Pid,
            "SEPARATOR" => TokenType::Separator,
            "UNKNOWN" => TokenType::Unknown,
            _ => TokenType::Unrecognized(s),
        }
    }
}

impl From<TokenType> for String {
    fn from(t: TokenType) -> Self {
        match t {
            TokenType::Unrecognized(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Token {
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: TokenType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexicalLineResult {
    #[serde(default)]
    pub line_number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tokens: Vec<Token>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_line: Option<String>,
}

/// Two-valued line verdict. Anything but `ÉXITO` counts as failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SyntacticStatus {
    Exito,
    Fallo,
    Other(String),
}

impl SyntacticStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, SyntacticStatus::Exito)
    }

    pub fn as_str(&self) -> &str {
        match self {
            SyntacticStatus::Exito => "ÉXITO",
            SyntacticStatus::Fallo => "FALLO",
            SyntacticStatus::Other(s) => s,
        }
    }
}

impl Default for SyntacticStatus {
    fn default() -> Self {
        SyntacticStatus::Other(String::new())
    }
}

impl From<String> for SyntacticStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "ÉXITO" => SyntacticStatus::Exito,
            "FALLO" => SyntacticStatus::Fallo,
            _ => SyntacticStatus::Other(s),
        }
    }
}

impl From<SyntacticStatus> for String {
    fn from(s: SyntacticStatus) -> Self {
        match s {
            SyntacticStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntacticLineResult {
    #[serde(default)]
    pub line_number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: SyntacticStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reason: String,
}

/// Alert urgency label. Unknown labels are preserved, not rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Alta,
    Media,
    Baja,
    Other(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Alta => "ALTA",
            Severity::Media => "MEDIA",
            Severity::Baja => "BAJA",
            Severity::Other(s) => s,
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Other(String::new())
    }
}

impl From<String> for Severity {
    fn from(s: String) -> Self {
        match s.as_str() {
            "ALTA" => Severity::Alta,
            "MEDIA" => Severity::Media,
            "BAJA" => Severity::Baja,
            _ => Severity::Other(s),
        }
    }
}

impl From<Severity> for String {
    fn from(s: Severity) -> Self {
        match s {
            Severity::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticAlert {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub severity: Severity,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralFinding {
    #[serde(default)]
    pub line_number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    #[serde(default)]
    pub lines_processed: u64,
    #[serde(default)]
    pub alerts_found: u64,
}

/// Complete response of `POST /api/analyze-logs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<AnalysisSummary>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lexical_analysis: Vec<LexicalLineResult>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub syntactic_analysis: Vec<SyntacticLineResult>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub semantic_analysis: Vec<SemanticAlert>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub structural_analysis: Vec<StructuralFinding>,
}

impl AnalysisResult {
    /// Coerce an arbitrary JSON value into a result.
    ///
    /// Only an object is accepted at the top level; `null` means the service
    /// sent no results at all.
    pub fn from_json(value: Json) -> Result<Self, MalformedResult> {
        match value {
            Json::Object(_) => serde_json::from_value(value)
                .map_err(|e| MalformedResult(format!("log analysis: {}", e))),
            other => Err(MalformedResult(format!(
                "log analysis: expected an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// True when no phase reported anything.
    pub fn is_empty(&self) -> bool {
        self.lexical_analysis.is_empty()
            && self.syntactic_analysis.is_empty()
            && self.semantic_analysis.is_empty()
            && self.structural_analysis.is_empty()
    }
}
