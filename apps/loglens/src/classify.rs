//! Display classification for tokens, alert severities and grammar findings.
//!
//! All lookups are exhaustive matches over closed enums; labels the service
//! invents later land in the explicit fallback arm.

use crate::models::{GrammarErrorKind, Severity, TokenType};
use serde::Serialize;

/// Columns of the lexical token table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Column {
    /// The token's literal value; never a classification target.
    Tokens,
    PrTipo,
    Id,
    Numero,
    Str,
    Simbolo,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Tokens,
        Column::PrTipo,
        Column::Id,
        Column::Numero,
        Column::Str,
        Column::Simbolo,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Tokens => "Tokens",
            Column::PrTipo => "PR/Tipo",
            Column::Id => "ID",
            Column::Numero => "Numero",
            Column::Str => "String",
            Column::Simbolo => "Simbolo",
        }
    }
}

/// Marker column for a token type, or `None` when the type is unrecognized.
pub fn column_for(kind: &TokenType) -> Option<Column> {
    match kind {
        TokenType::Keyword | TokenType::Process => Some(Column::PrTipo),
        TokenType::User | TokenType::Hostname => Some(Column::Id),
        TokenType::Ip | TokenType::Timestamp => Some(Column::Str),
        TokenType::Pid => Some(Column::Numero),
        TokenType::Separator | TokenType::Unknown => Some(Column::Simbolo),
        TokenType::Unrecognized(_) => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

/// Visual treatment of an alert card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Treatment {
    pub urgency: Urgency,
    pub icon: &'static str,
    pub label: &'static str,
}

const HIGH: Treatment = Treatment {
    urgency: Urgency::High,
    icon: "✖",
    label: "ALTA",
};
const MEDIUM: Treatment = Treatment {
    urgency: Urgency::Medium,
    icon: "▲",
    label: "MEDIA",
};
const LOW: Treatment = Treatment {
    urgency: Urgency::Low,
    icon: "◆",
    label: "BAJA",
};

/// Treatment for a severity; unknown labels degrade to the BAJA treatment.
pub fn treatment_for(severity: &Severity) -> Treatment {
    match severity {
        Severity::Alta => HIGH,
        Severity::Media => MEDIUM,
        Severity::Baja => LOW,
        Severity::Other(_) => LOW,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammarStyle {
    Lexical,
    Syntactic,
    Semantic,
    Neutral,
}

pub fn grammar_style_for(kind: &GrammarErrorKind) -> GrammarStyle {
    match kind {
        GrammarErrorKind::Lexico => GrammarStyle::Lexical,
        GrammarErrorKind::Sintactico => GrammarStyle::Syntactic,
        GrammarErrorKind::Semantico => GrammarStyle::Semantic,
        GrammarErrorKind::Other(_) => GrammarStyle::Neutral,
    }
}
