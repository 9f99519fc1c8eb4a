//! Pure view composition for analysis results.
//!
//! Nothing here prints; `output` turns these views into terminal text or
//! JSON. Every section tolerates empty input.

use crate::classify::{column_for, grammar_style_for, treatment_for, Column, GrammarStyle, Treatment};
use crate::models::{
    AnalysisResult, AnalysisSummary, GrammarResult, LexicalLineResult, StructuralFinding,
};
use serde::Serialize;
use std::fmt;

pub const MSG_NO_THREATS: &str = "No se encontraron amenazas de seguridad en las líneas válidas.";
pub const MSG_NO_GRAMMAR_ERRORS: &str =
    "¡Excelente! No se encontraron errores según nuestras reglas.";

/// `K de N` count of lines with a recognized structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyntaxSummary {
    pub successful: usize,
    pub total: usize,
}

impl fmt::Display for SyntaxSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} de {}", self.successful, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineReport {
    pub line_number: u32,
    pub success: bool,
    pub status: String,
    pub reason: String,
}

impl LineReport {
    pub fn icon(&self) -> &'static str {
        if self.success {
            "✓"
        } else {
            "✗"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertCard {
    pub id: String,
    pub treatment: Treatment,
    pub title: String,
    pub details: String,
    pub ip_address: Option<String>,
    pub user: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticSection {
    Alerts(Vec<AlertCard>),
    NoThreats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub summary: SyntaxSummary,
    pub lines: Vec<LineReport>,
    pub semantic: SemanticSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRow {
    pub line_number: u32,
    pub value: String,
    pub column: Option<Column>,
}

impl TokenRow {
    /// One cell per `Column::ALL`: the literal, then `X` in at most one
    /// marker column.
    pub fn cells(&self) -> Vec<String> {
        Column::ALL
            .iter()
            .map(|c| match c {
                Column::Tokens => self.value.clone(),
                c if Some(*c) == self.column => "X".to_string(),
                _ => String::new(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTable {
    pub rows: Vec<TokenRow>,
    pub shown_lines: usize,
    pub total_lines: usize,
}

impl TokenTable {
    pub fn is_truncated(&self) -> bool {
        self.shown_lines < self.total_lines
    }

    pub fn truncation_notice(&self) -> Option<String> {
        self.is_truncated().then(|| {
            format!(
                "Mostrando {} de {} líneas analizadas.",
                self.shown_lines, self.total_lines
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogReport {
    pub summary: Option<AnalysisSummary>,
    pub verdict: Verdict,
    pub table: TokenTable,
    pub structural: Option<Vec<StructuralFinding>>,
}

pub fn syntax_summary(result: &AnalysisResult) -> SyntaxSummary {
    SyntaxSummary {
        successful: result
            .syntactic_analysis
            .iter()
            .filter(|l| l.status.is_success())
            .count(),
        total: result.syntactic_analysis.len(),
    }
}

/// Empty strings count as absent, like the optional fields they come from.
fn present(v: &Option<String>) -> Option<String> {
    v.as_ref().filter(|s| !s.is_empty()).cloned()
}

pub fn verdict(result: &AnalysisResult) -> Verdict {
    let lines = result
        .syntactic_analysis
        .iter()
        .map(|l| LineReport {
            line_number: l.line_number,
            success: l.status.is_success(),
            status: l.status.as_str().to_string(),
            reason: l.reason.clone(),
        })
        .collect();
    let semantic = if result.semantic_analysis.is_empty() {
        SemanticSection::NoThreats
    } else {
        SemanticSection::Alerts(
            result
                .semantic_analysis
                .iter()
                .map(|a| AlertCard {
                    id: a.id.clone(),
                    treatment: treatment_for(&a.severity),
                    title: a.kind.clone(),
                    details: a.details.clone(),
                    ip_address: present(&a.ip_address),
                    user: present(&a.user),
                })
                .collect(),
        )
    };
    Verdict {
        summary: syntax_summary(result),
        lines,
        semantic,
    }
}

/// Materialize rows for the first `max_lines` lexical results.
pub fn token_table(lines: &[LexicalLineResult], max_lines: usize) -> TokenTable {
    let shown = &lines[..lines.len().min(max_lines)];
    let rows = shown
        .iter()
        .flat_map(|line| {
            line.tokens.iter().map(move |t| TokenRow {
                line_number: line.line_number,
                value: t.value.clone(),
                column: column_for(&t.kind),
            })
        })
        .collect();
    TokenTable {
        rows,
        shown_lines: shown.len(),
        total_lines: lines.len(),
    }
}

/// Structural findings, only when there are any.
pub fn structural(result: &AnalysisResult) -> Option<Vec<StructuralFinding>> {
    (!result.structural_analysis.is_empty()).then(|| result.structural_analysis.clone())
}

pub fn log_report(result: &AnalysisResult, max_lines: usize) -> LogReport {
    LogReport {
        summary: result.summary.clone(),
        verdict: verdict(result),
        table: token_table(&result.lexical_analysis, max_lines),
        structural: structural(result),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrammarCard {
    pub style: GrammarStyle,
    pub error_type: String,
    pub line: u32,
    pub fragment: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl GrammarCard {
    pub fn headline(&self) -> String {
        format!("Error en \"{}\": {}", self.fragment, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarView {
    /// No analysis has run; render nothing.
    NotAnalyzed,
    Clean,
    Errors(Vec<GrammarCard>),
}

pub fn grammar(result: Option<&GrammarResult>) -> GrammarView {
    let Some(result) = result else {
        return GrammarView::NotAnalyzed;
    };
    if result.is_clean() {
        return GrammarView::Clean;
    }
    GrammarView::Errors(
        result
            .errors
            .iter()
            .map(|e| GrammarCard {
                style: grammar_style_for(&e.error_type),
                error_type: e.error_type.as_str().to_string(),
                line: e.line,
                fragment: e.fragment.clone(),
                message: e.message.clone(),
                suggestion: present(&e.suggestion),
            })
            .collect(),
    )
}
